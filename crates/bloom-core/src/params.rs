//! The fixed parameter set driven by the modulators.
//!
//! Every table in the crate is a `[_; PARAM_COUNT]` indexed by
//! [`ParamKey::index`], so a missing or unknown key cannot exist at runtime.

use crate::constants::{DEFAULT_SPEEDS, DEFAULT_VALUES, SPEED_FLOOR};
use std::fmt;
use std::ops::{Index, IndexMut};

pub const PARAM_COUNT: usize = 14;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamKey {
    FadeAlpha,
    FadeWidth,
    GradientDuration,
    InstanceCount,
    Metalness,
    Opacity,
    PetalAmp,
    PetalSegments,
    PetalWidth,
    Petals,
    PhaseDuration,
    Rot,
    Roughness,
    Scale,
}

impl ParamKey {
    pub const ALL: [ParamKey; PARAM_COUNT] = [
        ParamKey::FadeAlpha,
        ParamKey::FadeWidth,
        ParamKey::GradientDuration,
        ParamKey::InstanceCount,
        ParamKey::Metalness,
        ParamKey::Opacity,
        ParamKey::PetalAmp,
        ParamKey::PetalSegments,
        ParamKey::PetalWidth,
        ParamKey::Petals,
        ParamKey::PhaseDuration,
        ParamKey::Rot,
        ParamKey::Roughness,
        ParamKey::Scale,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable external name, as used by control surfaces and CLI overrides.
    pub fn name(self) -> &'static str {
        match self {
            ParamKey::FadeAlpha => "fadeAlpha",
            ParamKey::FadeWidth => "fadeWidth",
            ParamKey::GradientDuration => "gradientDuration",
            ParamKey::InstanceCount => "instanceCount",
            ParamKey::Metalness => "metalness",
            ParamKey::Opacity => "opacity",
            ParamKey::PetalAmp => "petalAmp",
            ParamKey::PetalSegments => "petalSegments",
            ParamKey::PetalWidth => "petalWidth",
            ParamKey::Petals => "petals",
            ParamKey::PhaseDuration => "phaseDuration",
            ParamKey::Rot => "rot",
            ParamKey::Roughness => "roughness",
            ParamKey::Scale => "scale",
        }
    }

    pub fn from_name(name: &str) -> Option<ParamKey> {
        ParamKey::ALL.iter().copied().find(|k| k.name() == name)
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Full vector of current parameter values, one per key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    values: [f32; PARAM_COUNT],
}

impl Config {
    pub fn from_values(values: [f32; PARAM_COUNT]) -> Self {
        Self { values }
    }

    pub fn get(&self, key: ParamKey) -> f32 {
        self.values[key.index()]
    }

    pub fn set(&mut self, key: ParamKey, value: f32) {
        self.values[key.index()] = value;
    }

    pub fn values(&self) -> &[f32; PARAM_COUNT] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, f32)> + '_ {
        ParamKey::ALL.iter().map(move |&k| (k, self.values[k.index()]))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_values(DEFAULT_VALUES)
    }
}

impl Index<ParamKey> for Config {
    type Output = f32;
    fn index(&self, key: ParamKey) -> &f32 {
        &self.values[key.index()]
    }
}

impl IndexMut<ParamKey> for Config {
    fn index_mut(&mut self, key: ParamKey) -> &mut f32 {
        &mut self.values[key.index()]
    }
}

/// Inclusive sampling bound with `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeBound {
    pub min: f32,
    pub max: f32,
}

impl RangeBound {
    /// Builds a bound, swapping inverted input.
    pub fn new(a: f32, b: f32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn span(&self) -> f32 {
        (self.max as f64 - self.min as f64).min(f32::MAX as f64) as f32
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Maps a unit value into the bound.
    #[inline]
    pub fn lerp(&self, u: f32) -> f32 {
        lerp(self.min, self.max, u)
    }
}

/// Linear interpolation that stays finite for any finite endpoints, even when
/// `b - a` would overflow `f32`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    let (a, b) = (a as f64, b as f64);
    (a + (b - a) * t as f64) as f32
}

/// Partial range update; keys left as `None` keep their current bound.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RangeUpdate {
    bounds: [Option<RangeBound>; PARAM_COUNT],
}

impl RangeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RangeUpdate::insert`].
    pub fn with(mut self, key: ParamKey, min: f32, max: f32) -> Self {
        self.insert(key, min, max);
        self
    }

    /// Records a bound for `key`. Non-finite input is dropped.
    pub fn insert(&mut self, key: ParamKey, min: f32, max: f32) {
        if min.is_finite() && max.is_finite() {
            self.bounds[key.index()] = Some(RangeBound::new(min, max));
        }
    }

    pub fn get(&self, key: ParamKey) -> Option<RangeBound> {
        self.bounds[key.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.bounds.iter().filter(|b| b.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, RangeBound)> + '_ {
        ParamKey::ALL
            .iter()
            .filter_map(move |&k| self.bounds[k.index()].map(|b| (k, b)))
    }

    /// Folds `other` on top of `self`; later entries win.
    pub fn merge(&mut self, other: &RangeUpdate) {
        for (k, b) in other.iter() {
            self.bounds[k.index()] = Some(b);
        }
    }
}

/// Per-parameter pace constants, fixed at construction.
#[derive(Clone, Debug)]
pub struct SpeedTable {
    speeds: [f32; PARAM_COUNT],
}

impl SpeedTable {
    /// Non-finite, zero or negative speeds are clamped to [`SPEED_FLOOR`].
    pub fn new(speeds: [f32; PARAM_COUNT]) -> Self {
        let speeds = speeds.map(|s| {
            if s.is_finite() {
                s.max(SPEED_FLOOR)
            } else {
                SPEED_FLOOR
            }
        });
        Self { speeds }
    }

    pub fn get(&self, key: ParamKey) -> f32 {
        self.speeds[key.index()]
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self::new(DEFAULT_SPEEDS)
    }
}
