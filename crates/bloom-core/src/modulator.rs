//! Waypoint tweening: every parameter wanders between uniformly sampled
//! targets inside its range, one linear segment at a time.
//!
//! Each key runs its own timer. When a segment completes, the key restarts
//! from the exact value it reached, so the output never jumps even when the
//! range changes underneath it.

use crate::constants::{DEFAULT_SPEEDS, DURATION_EPSILON};
use crate::drift::DriftModulator;
use crate::duration::{sanitize_time_scale, DurationPolicy};
use crate::params::{lerp, Config, ParamKey, RangeUpdate, SpeedTable, PARAM_COUNT};
use crate::ranges::RangeTable;
use crate::rng::{Seed, SeededRandom};

/// Shared surface of the modulation strategies, so a frame loop can swap them.
pub trait Modulation {
    /// Advances by `delta_seconds` of wall time and returns the new snapshot.
    fn update(&mut self, delta_seconds: f32) -> &Config;
    fn current(&self) -> &Config;
    fn set_ranges(&mut self, update: &RangeUpdate);
    fn ranges(&self) -> &RangeTable;
    fn seed(&self) -> u64;
    /// Scaled seconds accumulated so far.
    fn time(&self) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Waypoint,
    Drift,
}

pub fn build_modulator(
    strategy: Strategy,
    seed: Option<Seed>,
    time_scale: f32,
) -> Box<dyn Modulation> {
    match strategy {
        Strategy::Waypoint => Box::new(ParamModulator::new(seed, time_scale)),
        Strategy::Drift => Box::new(DriftModulator::new(seed, time_scale)),
    }
}

/// One linear segment for one parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaypointState {
    pub from: f32,
    pub target: f32,
    pub current: f32,
    pub elapsed: f32,
    pub duration: f32,
}

impl WaypointState {
    fn resting(value: f32) -> Self {
        Self {
            from: value,
            target: value,
            current: value,
            elapsed: 0.0,
            duration: DURATION_EPSILON,
        }
    }

    /// Normalized segment progress in [0, 1].
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration.max(DURATION_EPSILON)).clamp(0.0, 1.0)
    }
}

/// Normalizes a raw frame delta; the engine never runs backwards.
pub(crate) fn sanitize_delta(delta_seconds: f32) -> f32 {
    if delta_seconds.is_finite() {
        delta_seconds.max(0.0)
    } else {
        0.0
    }
}

/// Applies the time scale to a sanitized delta. A product that overflows
/// saturates at `f32::MAX` instead of becoming infinite.
pub(crate) fn scaled_delta(delta_seconds: f32, time_scale: f32) -> f32 {
    (sanitize_delta(delta_seconds) * time_scale).min(f32::MAX)
}

pub struct ParamModulator {
    rng: SeededRandom,
    ranges: RangeTable,
    policy: DurationPolicy,
    waypoints: [WaypointState; PARAM_COUNT],
    current: Config,
    time_scale: f32,
    time: f64,
}

impl ParamModulator {
    pub fn new(seed: Option<Seed>, time_scale: f32) -> Self {
        Self::with_tables(
            seed,
            time_scale,
            Config::default(),
            RangeTable::default(),
            SpeedTable::new(DEFAULT_SPEEDS),
        )
    }

    pub fn with_seed(seed: impl Into<Seed>) -> Self {
        Self::new(Some(seed.into()), 1.0)
    }

    /// Builds an engine over custom static tables.
    ///
    /// Defaults that fall outside their range start clamped to it, so every
    /// segment begins and ends inside the bound.
    pub fn with_tables(
        seed: Option<Seed>,
        time_scale: f32,
        defaults: Config,
        ranges: RangeTable,
        speeds: SpeedTable,
    ) -> Self {
        let time_scale = sanitize_time_scale(time_scale);
        let mut rng = SeededRandom::new(seed);
        let policy = DurationPolicy::new(speeds, time_scale);

        let mut current = defaults;
        let mut waypoints = [WaypointState::resting(0.0); PARAM_COUNT];
        for key in ParamKey::ALL {
            let start = ranges.get(key).clamp(defaults[key]);
            current[key] = start;
            let mut w = WaypointState::resting(start);
            w.duration = policy.compute(key, &mut rng);
            waypoints[key.index()] = w;
        }
        // First targets come from the ranges, not the defaults.
        for key in ParamKey::ALL {
            let bound = ranges.get(key);
            waypoints[key.index()].target = bound.clamp(bound.lerp(rng.next_f32()));
        }

        log::debug!(
            "[modulator] waypoint engine seed={} time_scale={:.3}",
            rng.seed(),
            time_scale
        );

        Self {
            rng,
            ranges,
            policy,
            waypoints,
            current,
            time_scale,
            time: 0.0,
        }
    }

    pub fn update(&mut self, delta_seconds: f32) -> &Config {
        let dt = scaled_delta(delta_seconds, self.time_scale);
        self.time += dt as f64;

        for key in ParamKey::ALL {
            let i = key.index();
            let w = &mut self.waypoints[i];
            w.elapsed = (w.elapsed + dt).min(f32::MAX);
            let t = w.progress();
            w.current = if t >= 1.0 {
                w.target
            } else {
                let lo = w.from.min(w.target);
                let hi = w.from.max(w.target);
                lerp(w.from, w.target, t).clamp(lo, hi)
            };
            self.current[key] = w.current;

            if t >= 1.0 {
                let bound = self.ranges.get(key);
                w.from = w.current;
                w.target = bound.clamp(bound.lerp(self.rng.next_f32()));
                w.duration = self.policy.compute(key, &mut self.rng);
                w.elapsed = 0.0;
                log::trace!(
                    "[modulator] {} reached {:.4}; next {:.4} over {:.2}s",
                    key,
                    w.from,
                    w.target,
                    w.duration
                );
            }
        }

        &self.current
    }

    pub fn current(&self) -> &Config {
        &self.current
    }

    pub fn set_ranges(&mut self, update: &RangeUpdate) {
        self.ranges.set_ranges(update);
    }

    pub fn ranges(&self) -> &RangeTable {
        &self.ranges
    }

    pub fn waypoint(&self, key: ParamKey) -> WaypointState {
        self.waypoints[key.index()]
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl Modulation for ParamModulator {
    fn update(&mut self, delta_seconds: f32) -> &Config {
        ParamModulator::update(self, delta_seconds)
    }

    fn current(&self) -> &Config {
        ParamModulator::current(self)
    }

    fn set_ranges(&mut self, update: &RangeUpdate) {
        ParamModulator::set_ranges(self, update)
    }

    fn ranges(&self) -> &RangeTable {
        ParamModulator::ranges(self)
    }

    fn seed(&self) -> u64 {
        ParamModulator::seed(self)
    }

    fn time(&self) -> f64 {
        ParamModulator::time(self)
    }
}

impl Default for ParamModulator {
    fn default() -> Self {
        Self::new(None, 1.0)
    }
}
