//! User preferences.

#![allow(missing_docs)] // too many things to document

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate strum;

use std::path::Path;

use eyre::Result;
use serde::{Deserialize, Serialize};

mod animation;
mod interaction;

pub use animation::*;
pub use interaction::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub animation: AnimationPreferences,
    pub interaction: InteractionPreferences,
}
impl Preferences {
    /// Loads preferences from the built-in defaults, overridden by
    /// `user_file` if it is given and exists. If loading fails, the default
    /// preferences are returned.
    pub fn load(user_file: Option<&Path>) -> Self {
        lazy_static::initialize(&DEFAULT_PREFS);

        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));

        if let Some(path) = user_file {
            config = config.add_source(
                config::File::from(path)
                    .format(PREFS_FILE_FORMAT)
                    .required(false),
            );
        }

        config
            .build()
            .and_then(|c| c.try_deserialize::<Preferences>())
            .unwrap_or_else(|e| {
                log::warn!("Error loading preferences: {e}");
                DEFAULT_PREFS.clone()
            })
    }

    /// Saves preferences to a YAML file, creating parent directories as
    /// needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(p) = path.parent() {
            std::fs::create_dir_all(p)?;
        }
        serde_norway::to_writer(std::fs::File::create(path)?, self)?;
        Ok(())
    }

    /// Serializes preferences as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_norway::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_prefs() {
        let prefs = &*DEFAULT_PREFS;
        assert_eq!(prefs.animation.twist_duration, 0.5);
        assert_eq!(prefs.interaction.drag_threshold_ratio, 128.0);
        assert_eq!(prefs.interaction.flick_speed_threshold, 0.2);
        assert_eq!(Preferences::load(None), *prefs);
    }

    #[test]
    fn test_user_prefs_override_defaults() {
        let dir = tempfile::tempdir().expect("error creating temp dir");
        let path = dir.path().join("prefs.yaml");
        std::fs::write(&path, "interaction:\n  drag_sensitivity: 2.5\n")
            .expect("error writing prefs file");

        let prefs = Preferences::load(Some(&path));
        assert_eq!(prefs.interaction.drag_sensitivity, 2.5);
        assert_eq!(prefs.interaction.drag_threshold_ratio, 128.0);
        assert_eq!(prefs.animation, DEFAULT_PREFS.animation);
    }

    #[test]
    fn test_missing_user_prefs_file() {
        let dir = tempfile::tempdir().expect("error creating temp dir");
        let prefs = Preferences::load(Some(&dir.path().join("missing.yaml")));
        assert_eq!(prefs, *DEFAULT_PREFS);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().expect("error creating temp dir");
        let path = dir.path().join("nested").join("prefs.yaml");
        let mut prefs = DEFAULT_PREFS.clone();
        prefs.animation.twist_interpolation = InterpolateFn::Cosine;
        prefs.interaction.flick_speed_threshold = 0.75;
        prefs.save(&path).expect("error saving prefs");
        assert_eq!(Preferences::load(Some(&path)), prefs);
    }
}
