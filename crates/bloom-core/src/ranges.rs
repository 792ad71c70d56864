//! Live-updatable sampling bounds, one per parameter.

use crate::constants::DEFAULT_RANGES;
use crate::params::{ParamKey, RangeBound, RangeUpdate, PARAM_COUNT};
use fnv::FnvHashMap;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct RangeTable {
    bounds: [RangeBound; PARAM_COUNT],
}

impl RangeTable {
    pub fn get(&self, key: ParamKey) -> RangeBound {
        self.bounds[key.index()]
    }

    /// Merges `update` into the table. Only the supplied keys change; the new
    /// bounds apply from each key's next resample onwards.
    pub fn set_ranges(&mut self, update: &RangeUpdate) {
        for (key, bound) in update.iter() {
            self.bounds[key.index()] = RangeBound::new(bound.min, bound.max);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, RangeBound)> + '_ {
        ParamKey::ALL.iter().map(move |&k| (k, self.bounds[k.index()]))
    }
}

impl Default for RangeTable {
    fn default() -> Self {
        Self {
            bounds: DEFAULT_RANGES.map(|[lo, hi]| RangeBound::new(lo, hi)),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RangeSpecError {
    #[error("range override `{0}` is missing `=` (expected name=min:max)")]
    MissingEquals(String),
    #[error("range override `{0}` is missing `:` between min and max")]
    MissingSeparator(String),
    #[error("range override `{entry}` has an invalid number `{value}`")]
    InvalidNumber { entry: String, value: String },
}

/// Parses `name=min:max[,name=min:max...]` into a partial update.
///
/// Unknown names are skipped with a warning; inverted bounds are normalized.
pub fn parse_range_overrides(spec: &str) -> Result<RangeUpdate, RangeSpecError> {
    let mut update = RangeUpdate::new();
    for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, bounds) = entry
            .split_once('=')
            .ok_or_else(|| RangeSpecError::MissingEquals(entry.to_owned()))?;
        let (lo, hi) = bounds
            .split_once(':')
            .ok_or_else(|| RangeSpecError::MissingSeparator(entry.to_owned()))?;
        let lo = parse_bound(entry, lo)?;
        let hi = parse_bound(entry, hi)?;
        match ParamKey::from_name(name.trim()) {
            Some(key) => update.insert(key, lo, hi),
            None => log::warn!("ignoring range override for unknown parameter `{}`", name.trim()),
        }
    }
    Ok(update)
}

fn parse_bound(entry: &str, raw: &str) -> Result<f32, RangeSpecError> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RangeSpecError::InvalidNumber {
            entry: entry.to_owned(),
            value: raw.trim().to_owned(),
        })
}

/// Converts a name-keyed map (e.g. from a control surface) into an update.
/// Names outside the parameter set are ignored.
pub fn update_from_named(named: &FnvHashMap<String, RangeBound>) -> RangeUpdate {
    let mut update = RangeUpdate::new();
    for (name, bound) in named {
        if let Some(key) = ParamKey::from_name(name) {
            update.insert(key, bound.min, bound.max);
        }
    }
    update
}
