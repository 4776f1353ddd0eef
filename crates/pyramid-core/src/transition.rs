// File: crates/pyramid-core/src/transition.rs
// Summary: Animated values: linear interpolation from a prior state to a target.

use std::time::{Duration, Instant};

/// Duration used for geometry transitions unless a caller settles the scene.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(250);

/// Values that can be interpolated component-wise.
pub trait Lerp: Copy {
    fn lerp(a: Self, b: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: Self, b: Self, t: f64) -> Self { a + (b - a) * t }
}

impl Lerp for (f64, f64) {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        (f64::lerp(a.0, b.0, t), f64::lerp(a.1, b.1, t))
    }
}

/// A value in flight between two states. A freshly created value is settled
/// at its target; `retarget` restarts the flight from whatever is currently
/// displayed, so interrupted transitions pick up mid-way instead of jumping.
#[derive(Clone, Copy, Debug)]
pub struct Animated<T: Lerp> {
    from: T,
    to: T,
    start: Instant,
    duration: Duration,
}

impl<T: Lerp> Animated<T> {
    pub fn new(value: T) -> Self {
        Self { from: value, to: value, start: Instant::now(), duration: Duration::ZERO }
    }

    pub fn target(&self) -> T { self.to }

    pub fn retarget(&mut self, to: T, now: Instant, duration: Duration) {
        self.from = self.value_at(now);
        self.to = to;
        self.start = now;
        self.duration = duration;
    }

    /// Jump to the target immediately, abandoning any flight in progress.
    pub fn settle(&mut self) {
        self.from = self.to;
        self.duration = Duration::ZERO;
    }

    pub fn value_at(&self, now: Instant) -> T {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.start);
        if elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        T::lerp(self.from, self.to, t)
    }

    pub fn is_settled_at(&self, now: Instant) -> bool {
        self.duration.is_zero() || now.saturating_duration_since(self.start) >= self.duration
    }
}
