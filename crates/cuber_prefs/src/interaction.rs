use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionPreferences {
    /// Multiplier applied to drag-derived twist angles.
    pub drag_sensitivity: f32,
    /// A pointer drag becomes a twist once `min(width, height) / distance`
    /// drops to this value or below.
    pub drag_threshold_ratio: f32,
    /// Minimum angular speed (radians per second) at which a short drag is
    /// completed to a full quarter turn on release.
    pub flick_speed_threshold: f32,
    /// Fraction of the remaining distance that the displayed drag angle
    /// catches up each frame.
    pub follow_factor: f32,
}

impl InteractionPreferences {
    /// Returns whether a pointer drag of `distance` pixels in a viewport of
    /// size `[width, height]` is long enough to begin a twist.
    pub fn exceeds_drag_threshold(&self, [width, height]: [f32; 2], distance: f32) -> bool {
        f32::min(width, height) / distance <= self.drag_threshold_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_threshold() {
        let prefs = InteractionPreferences {
            drag_threshold_ratio: 128.0,
            ..Default::default()
        };
        assert!(!prefs.exceeds_drag_threshold([1280.0, 1024.0], 0.0));
        assert!(!prefs.exceeds_drag_threshold([1280.0, 1024.0], 7.9));
        assert!(prefs.exceeds_drag_threshold([1280.0, 1024.0], 8.0));
        assert!(prefs.exceeds_drag_threshold([1280.0, 1024.0], 100.0));
    }
}
