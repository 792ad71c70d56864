// Shared modulation tuning constants and the static per-parameter tables.
//
// Table order matches `ParamKey::ALL`; see params.rs.

use crate::params::PARAM_COUNT;

// Duration policy
pub const DURATION_BASE: f32 = 0.4; // base seconds at speed 1.0 (~3-40s with the speed table)
pub const JITTER_MIN: f32 = 0.7; // lower edge of the per-waypoint duration jitter band
pub const JITTER_SPAN: f32 = 0.6; // band width, so jitter lies in [0.7, 1.3)
pub const DURATION_EPSILON: f32 = 0.0001; // division guard only
pub const SPEED_FLOOR: f32 = 0.001; // speeds below this are clamped when the table is built
pub const TIME_SCALE_FLOOR: f32 = 0.001; // divisor floor for the global time scale

// Continuous drift strategy
pub const NOISE_OFFSET_SPAN: f32 = 1000.0; // per-parameter noise offsets are drawn in [0, span)
pub const DRIFT_SMOOTHING_TAU_SEC: f32 = 0.6; // exponential follow time constant

// Manual controls
pub const CONTROL_TWEEN_SECS: f32 = 0.35; // eased retarget duration

// Frame loop
pub const MAX_FRAME_DT_SECS: f32 = 0.25; // longest step a stalled frame may feed the engine

// Scene
pub const DEGREES_PER_CYCLE: f32 = 360.0;
pub const ROT_FLOOR: f32 = 0.001; // |rot| floor when used as a divisor for petal instances

// Static defaults, in `ParamKey::ALL` order.
pub const DEFAULT_VALUES: [f32; PARAM_COUNT] = [
    0.93,   // fadeAlpha
    0.16,   // fadeWidth
    40.0,   // gradientDuration
    50.0,   // instanceCount
    0.27,   // metalness
    0.04,   // opacity
    0.36,   // petalAmp
    360.0,  // petalSegments
    0.02,   // petalWidth
    4.0,    // petals
    15.0,   // phaseDuration
    -214.0, // rot
    0.52,   // roughness
    0.33,   // scale
];

// Default sampling bounds as [min, max].
pub const DEFAULT_RANGES: [[f32; 2]; PARAM_COUNT] = [
    [0.9, 0.96],
    [0.14, 0.18],
    [10.0, 20.0],
    [48.0, 50.0],
    [0.0, 1.0],
    [0.005, 0.3],
    [0.33, 0.39],
    [320.0, 400.0],
    [0.018, 0.024],
    [4.0, 6.0],
    [6.0, 12.0],
    [-720.0, 720.0],
    [0.0, 1.0],
    [0.01, 0.95],
];

// Per-parameter pace; larger is faster (shorter waypoints).
pub const DEFAULT_SPEEDS: [f32; PARAM_COUNT] = [
    0.05,  // fadeAlpha
    0.05,  // fadeWidth
    0.015, // gradientDuration
    0.01,  // instanceCount
    0.04,  // metalness
    0.09,  // opacity
    0.02,  // petalAmp
    0.008, // petalSegments
    0.05,  // petalWidth
    0.02,  // petals
    0.015, // phaseDuration
    0.03,  // rot
    0.04,  // roughness
    0.02,  // scale
];
