use crate::constants::{DURATION_BASE, DURATION_EPSILON, JITTER_MIN, JITTER_SPAN, TIME_SCALE_FLOOR};
use crate::params::{ParamKey, SpeedTable};
use crate::rng::SeededRandom;

/// Derives a randomized waypoint duration from a parameter's speed.
#[derive(Clone, Debug)]
pub struct DurationPolicy {
    speeds: SpeedTable,
    time_scale: f32,
}

impl DurationPolicy {
    pub fn new(speeds: SpeedTable, time_scale: f32) -> Self {
        Self {
            speeds,
            time_scale: sanitize_time_scale(time_scale),
        }
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn speeds(&self) -> &SpeedTable {
        &self.speeds
    }

    /// Undithered duration for `key`, before jitter.
    pub fn base(&self, key: ParamKey) -> f32 {
        DURATION_BASE / self.speeds.get(key)
    }

    /// Draws one jitter value and returns the duration in seconds.
    pub fn compute(&self, key: ParamKey, rng: &mut SeededRandom) -> f32 {
        let jitter = JITTER_MIN + rng.next_f32() * JITTER_SPAN;
        let d = self.base(key) * jitter / self.time_scale.max(TIME_SCALE_FLOOR);
        d.max(DURATION_EPSILON)
    }
}

/// Non-finite or negative scales collapse to zero; the divisor floor then
/// keeps durations finite.
pub(crate) fn sanitize_time_scale(time_scale: f32) -> f32 {
    if time_scale.is_finite() {
        time_scale.max(0.0)
    } else {
        0.0
    }
}
