//! Continuous drift: each parameter follows a smooth 1-D value-noise curve
//! mapped into its range, with an exponential follower on top.
//!
//! Unlike the waypoint engine the output is continuous everywhere, but there
//! are no discrete segments to inspect or retime.

use crate::constants::{DEFAULT_SPEEDS, DRIFT_SMOOTHING_TAU_SEC, NOISE_OFFSET_SPAN};
use crate::duration::sanitize_time_scale;
use crate::modulator::{scaled_delta, Modulation};
use crate::params::{lerp, Config, ParamKey, RangeUpdate, SpeedTable, PARAM_COUNT};
use crate::ranges::RangeTable;
use crate::rng::{Seed, SeededRandom};

pub struct DriftModulator {
    rng: SeededRandom,
    ranges: RangeTable,
    speeds: SpeedTable,
    offsets: [f64; PARAM_COUNT],
    noise_seeds: [u64; PARAM_COUNT],
    current: Config,
    time_scale: f32,
    time: f64,
}

impl DriftModulator {
    pub fn new(seed: Option<Seed>, time_scale: f32) -> Self {
        let mut rng = SeededRandom::new(seed);
        let ranges = RangeTable::default();
        let mut current = Config::default();
        let mut offsets = [0.0; PARAM_COUNT];
        let mut noise_seeds = [0u64; PARAM_COUNT];
        for key in ParamKey::ALL {
            // Decorrelates the keys' noise curves.
            offsets[key.index()] = (rng.next_f32() * NOISE_OFFSET_SPAN) as f64;
            noise_seeds[key.index()] = rng.next_u64();
            current[key] = ranges.get(key).clamp(current[key]);
        }
        let time_scale = sanitize_time_scale(time_scale);
        log::debug!(
            "[drift] drift engine seed={} time_scale={:.3}",
            rng.seed(),
            time_scale
        );
        Self {
            rng,
            ranges,
            speeds: SpeedTable::new(DEFAULT_SPEEDS),
            offsets,
            noise_seeds,
            current,
            time_scale,
            time: 0.0,
        }
    }

    pub fn update(&mut self, delta_seconds: f32) -> &Config {
        let dt = scaled_delta(delta_seconds, self.time_scale);
        self.time = (self.time + dt as f64).min(f64::MAX);
        let alpha = 1.0 - (-dt / DRIFT_SMOOTHING_TAU_SEC).exp();

        for key in ParamKey::ALL {
            let i = key.index();
            let x = self.offsets[i] + self.time * self.speeds.get(key) as f64;
            if !x.is_finite() {
                continue;
            }
            let bound = self.ranges.get(key);
            let goal = bound.clamp(bound.lerp(value_noise(self.noise_seeds[i], x)));
            if !goal.is_finite() {
                continue;
            }
            let v = self.current[key];
            self.current[key] = lerp(v, goal, alpha).clamp(v.min(goal), v.max(goal));
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

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn time(&self) -> f64 {
        self.time
    }
}

impl Modulation for DriftModulator {
    fn update(&mut self, delta_seconds: f32) -> &Config {
        DriftModulator::update(self, delta_seconds)
    }

    fn current(&self) -> &Config {
        DriftModulator::current(self)
    }

    fn set_ranges(&mut self, update: &RangeUpdate) {
        DriftModulator::set_ranges(self, update)
    }

    fn ranges(&self) -> &RangeTable {
        DriftModulator::ranges(self)
    }

    fn seed(&self) -> u64 {
        DriftModulator::seed(self)
    }

    fn time(&self) -> f64 {
        DriftModulator::time(self)
    }
}

/// Smoothstep-interpolated lattice noise in [0, 1).
pub fn value_noise(seed: u64, x: f64) -> f32 {
    let cell = x.floor();
    let f = (x - cell) as f32;
    let i = cell as i64;
    let a = lattice(seed, i);
    let b = lattice(seed, i.wrapping_add(1));
    let s = f * f * (3.0 - 2.0 * f);
    a + (b - a) * s
}

fn lattice(seed: u64, i: i64) -> f32 {
    let h = splitmix64(seed ^ (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    (h >> 40) as f32 / (1u64 << 24) as f32
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
