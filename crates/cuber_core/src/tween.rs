//! Twist animation.

use cuber_math::Float;
use cuber_prefs::InterpolateFn;
use web_time::Duration;

use crate::GroupId;

/// If at least this much of a tween is animated in one frame, just skip to
/// the end to reduce unnecessary flashing.
const MIN_TWEEN_DELTA: f32 = 1.0 / 3.0;

/// Animation of a held group's angle toward a target.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    /// Group whose angle is animated.
    pub group: GroupId,
    /// Angle at the start of the tween.
    pub from: Float,
    /// Angle at the end of the tween.
    pub to: Float,
    /// Duration of the tween at normal speed, in seconds.
    pub duration: f32,
}

/// Value of an in-flight tween after a step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TweenFrame {
    /// Group whose angle is animated.
    pub group: GroupId,
    /// New angle of the group.
    pub angle: Float,
    /// Whether the tween has completed.
    pub done: bool,
}

/// Scheduler for at most one tween at a time.
#[derive(Debug, Default, Clone)]
pub struct Tweener {
    current: Option<Tween>,
    /// Progress of the current tween, from 0.0 to 1.0.
    progress: f32,
    /// Speed multiplier for the current tween.
    speed: f32,
}
impl Tweener {
    /// Returns the in-flight tween.
    pub fn current(&self) -> Option<&Tween> {
        self.current.as_ref()
    }
    /// Returns whether a tween is in flight.
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Starts a tween. Returns the final frame of the tween it replaces, if
    /// any, which the caller must apply.
    pub fn tween(&mut self, tween: Tween) -> Option<TweenFrame> {
        let replaced = self.finish();
        self.current = Some(tween);
        self.progress = 0.0;
        self.speed = 1.0;
        replaced
    }

    /// Steps the in-flight tween forward.
    pub fn proceed(&mut self, delta: Duration, interpolate: InterpolateFn) -> Option<TweenFrame> {
        let tween = self.current.as_ref()?;

        let mut step = delta.as_secs_f32() / tween.duration * self.speed;
        // Also handles division by zero.
        if !(0.0..MIN_TWEEN_DELTA).contains(&step) {
            step = 1.0;
        }
        self.progress += step;
        if self.progress >= 1.0 {
            return self.finish();
        }

        let t = interpolate.interpolate(self.progress);
        Some(TweenFrame {
            group: tween.group,
            angle: tween.from + (tween.to - tween.from) * t,
            done: false,
        })
    }

    /// Multiplies the speed of the in-flight tween.
    pub fn speedup(&mut self, factor: f32) {
        if self.current.is_some() {
            self.speed *= factor;
        }
    }

    /// Completes the in-flight tween immediately, returning its final frame.
    pub fn finish(&mut self) -> Option<TweenFrame> {
        let tween = self.current.take()?;
        self.progress = 0.0;
        Some(TweenFrame {
            group: tween.group,
            angle: tween.to,
            done: true,
        })
    }

    /// Abandons the in-flight tween without completing it.
    pub fn cancel(&mut self) {
        self.current = None;
        self.progress = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tween(duration: f32) -> Tween {
        Tween {
            group: GroupId(7),
            from: 0.0,
            to: 1.0,
            duration,
        }
    }

    #[test]
    fn test_tween_progress() {
        let mut tweener = Tweener::default();
        assert_eq!(tweener.proceed(Duration::from_millis(10), InterpolateFn::Lerp), None);

        assert_eq!(tweener.tween(tween(1.0)), None);
        let frame = tweener
            .proceed(Duration::from_millis(250), InterpolateFn::Lerp)
            .expect("tween ended early");
        assert!(!frame.done);
        cuber_math::assert_approx_eq!(frame.angle, 0.25);

        for _ in 0..2 {
            tweener.proceed(Duration::from_millis(250), InterpolateFn::Lerp);
        }
        let frame = tweener
            .proceed(Duration::from_millis(250), InterpolateFn::Lerp)
            .expect("missing final frame");
        assert_eq!(frame.angle, 1.0);
        assert!(frame.done);
        assert!(!tweener.is_active());
    }

    #[test]
    fn test_tween_skips_short_animations() {
        let mut tweener = Tweener::default();
        tweener.tween(tween(0.0));
        let frame = tweener.proceed(Duration::from_millis(16), InterpolateFn::Lerp);
        assert_eq!(frame.map(|f| f.done), Some(true));
    }

    #[test]
    fn test_tween_speedup_and_finish() {
        let mut tweener = Tweener::default();
        tweener.tween(tween(1.0));
        tweener.speedup(4.0);
        let frame = tweener
            .proceed(Duration::from_millis(50), InterpolateFn::Lerp)
            .expect("tween ended early");
        cuber_math::assert_approx_eq!(frame.angle, 0.2);

        let replaced = tweener.tween(Tween {
            group: GroupId(8),
            ..tween(1.0)
        });
        assert_eq!(
            replaced,
            Some(TweenFrame {
                group: GroupId(7),
                angle: 1.0,
                done: true,
            }),
        );
        assert_eq!(tweener.current().map(|t| t.group), Some(GroupId(8)));
        assert_eq!(tweener.finish().map(|f| f.group), Some(GroupId(8)));
        assert_eq!(tweener.finish(), None);
    }
}
