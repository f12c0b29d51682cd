use crate::animation::ease::Ease;
use crate::geometry::interpolate::Lerp;

/// An eased transition of a scalar from `from` to `to`, sampled by clock time.
///
/// A tween owns no reference to the value it drives; the caller samples
/// [`Tween::value_at`] and stores the result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub ease: Ease,
}

impl Tween {
    /// Start a tween from the `current` value toward `target`, beginning at `now_ms`.
    pub fn retarget(current: f64, target: f64, now_ms: f64, duration_ms: f64, ease: Ease) -> Self {
        Self {
            from: current,
            to: target,
            start_ms: now_ms,
            duration_ms: duration_ms.max(0.0),
            ease,
        }
    }

    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    /// Elapsed fraction of the duration in `[0, 1]`.
    pub fn fraction_at(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, now_ms: f64) -> bool {
        self.fraction_at(now_ms) >= 1.0
    }

    /// Value at `now_ms`. Exactly `to` once the duration has elapsed.
    pub fn value_at(&self, now_ms: f64) -> f64 {
        let t = self.fraction_at(now_ms);
        if t >= 1.0 {
            return self.to;
        }
        <f64 as Lerp>::lerp(&self.from, &self.to, self.ease.apply(t))
    }
}
