//! Manually driven values that ease toward whatever was last set.
//!
//! A control surface writes a value; the displayed value follows it over
//! [`CONTROL_TWEEN_SECS`] with a circular ease-out instead of snapping.

use crate::constants::CONTROL_TWEEN_SECS;
use crate::params::lerp;
use crate::rng::SeededRandom;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlSpec {
    pub min: f32,
    pub max: f32,
    pub step: Option<f32>,
    pub default: f32,
}

impl ControlSpec {
    pub fn new(min: f32, max: f32, default: f32) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
            step: None,
            default,
        }
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = (step.is_finite() && step > 0.0).then_some(step);
        self
    }

    /// Snaps to `step` (if any) and clamps into [min, max].
    pub fn constrain(&self, value: f32) -> f32 {
        let v = match self.step {
            Some(step) => (value / step).round() * step,
            None => value,
        };
        v.clamp(self.min, self.max)
    }
}

/// Circular ease-out on [0, 1].
#[inline]
pub fn circ_out(t: f32) -> f32 {
    let p = t.clamp(0.0, 1.0) - 1.0;
    (1.0 - p * p).sqrt()
}

#[derive(Clone, Debug)]
pub struct SmoothControl {
    spec: ControlSpec,
    value: f32,
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
    animating: bool,
}

impl SmoothControl {
    pub fn new(spec: ControlSpec) -> Self {
        let value = spec.constrain(spec.default);
        Self {
            spec,
            value,
            from: value,
            to: value,
            elapsed: 0.0,
            duration: CONTROL_TWEEN_SECS,
            animating: false,
        }
    }

    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = if seconds.is_finite() {
            seconds.max(0.0)
        } else {
            0.0
        };
        self
    }

    pub fn spec(&self) -> &ControlSpec {
        &self.spec
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Starts easing from the displayed value toward `value`.
    pub fn set(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        let to = self.spec.constrain(value);
        if to == self.to {
            return;
        }
        self.from = self.value;
        self.to = to;
        self.elapsed = 0.0;
        self.animating = true;
        if self.duration <= 0.0 {
            self.finish();
        }
    }

    pub fn update(&mut self, delta_seconds: f32) -> f32 {
        if !self.animating {
            return self.value;
        }
        if delta_seconds.is_finite() && delta_seconds > 0.0 {
            self.elapsed += delta_seconds;
        }
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            self.finish();
        } else {
            let t = self.elapsed / self.duration;
            self.value = lerp(self.from, self.to, circ_out(t));
        }
        self.value
    }

    /// Eases toward a uniformly drawn, step-snapped value.
    pub fn randomize(&mut self, rng: &mut SeededRandom) {
        let v = rng.range(self.spec.min, self.spec.max);
        self.set(v);
    }

    pub fn reset(&mut self) {
        self.set(self.spec.default);
    }

    fn finish(&mut self) {
        self.value = self.to;
        self.from = self.to;
        self.animating = false;
    }
}
