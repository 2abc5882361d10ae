use serde::{Deserialize, Serialize};

pub use interpolation::InterpolateFn;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Duration of a quarter-turn twist animation, in seconds.
    pub twist_duration: f32,
    /// Speed multiplier applied to an in-flight twist when a new gesture
    /// interrupts it.
    pub speedup_factor: f32,
    pub twist_interpolation: InterpolateFn,
}

impl AnimationPreferences {
    /// Returns the duration in seconds of a twist animation covering `turns`
    /// quarter turns.
    ///
    /// Short corrections animate quickly and the duration approaches zero as
    /// the distance does. A single quarter turn takes exactly
    /// `twist_duration`.
    pub fn twist_duration_for(&self, turns: f32) -> f32 {
        let turns = turns.abs();
        self.twist_duration * (2.0 - 2.0 / (turns + 1.0))
    }
}

pub mod interpolation {
    //! Interpolation functions.

    use std::f32::consts::PI;

    use serde::{Deserialize, Serialize};

    /// Function that maps a float from the range 0.0 to 1.0 to another float
    /// from 0.0 to 1.0.
    ///
    /// Every variant is monotonic, so twists never overshoot their target.
    #[derive(
        Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, VariantArray,
    )]
    #[serde(rename_all = "snake_case")]
    pub enum InterpolateFn {
        Lerp,
        Cosine,
        Cubic,
        Circular,
        #[default]
        CriticallyDamped,
    }

    impl InterpolateFn {
        /// Returns the interpolation value in the range [0, 1] for `t` in the
        /// range [0, 1].
        pub fn interpolate(self, t: f32) -> f32 {
            let t = t.clamp(0.0, 1.0);
            match self {
                Self::Lerp => t,

                Self::Cosine => (1.0 - (t * PI).cos()) / 2.0,

                Self::Cubic => (3.0 - 2.0 * t) * t * t,

                Self::Circular => {
                    if t < 0.5 {
                        (1.0 - (1.0 - (2.0 * t).powf(2.0)).sqrt()) * 0.5
                    } else {
                        (1.0 + (1.0 - (-2.0 * t + 2.0).powf(2.0)).sqrt()) * 0.5
                    }
                }

                Self::CriticallyDamped => (-5.0 * t - 1.0) * (-8.0 * t).exp() + 1.0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::VariantArray;

    use super::*;

    #[test]
    fn test_interpolation_is_monotonic() {
        for &f in InterpolateFn::VARIANTS {
            let mut last = f.interpolate(0.0);
            assert!(last.abs() < 0.001, "{f:?} does not start at 0");
            for i in 1..=100 {
                let x = f.interpolate(i as f32 / 100.0);
                assert!(x >= last, "{f:?} is not monotonic");
                last = x;
            }
            assert!((last - 1.0).abs() < 0.01, "{f:?} does not end at 1");
        }
    }

    #[test]
    fn test_twist_duration_scaling() {
        let prefs = AnimationPreferences {
            twist_duration: 0.5,
            ..Default::default()
        };
        assert_eq!(prefs.twist_duration_for(0.0), 0.0);
        assert_eq!(prefs.twist_duration_for(1.0), 0.5);
        assert_eq!(prefs.twist_duration_for(-1.0), 0.5);
        assert!(prefs.twist_duration_for(2.0) > prefs.twist_duration_for(1.0));
        assert!(prefs.twist_duration_for(2.0) < 1.0);
        assert!(prefs.twist_duration_for(0.1) < prefs.twist_duration_for(0.5));
    }
}
