//! Scene-side state derived from a modulated [`Config`].
//!
//! These types avoid any renderer API. A frontend reads them each frame to
//! build instance buffers and a uniform block for the flower shader.

use crate::constants::{DEGREES_PER_CYCLE, DURATION_EPSILON, ROT_FLOOR};
use crate::modulator::sanitize_delta;
use crate::params::{Config, ParamKey, PARAM_COUNT};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;
use std::f32::consts::PI;

/// Two repeating linear cycles in degrees, paced by the config.
///
/// `phase` completes one turn every `phaseDuration` seconds and
/// `gradient_rotation` every `gradientDuration` seconds. Durations are read
/// on every advance, so a modulated duration changes the pace without a jump.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationClock {
    pub phase: f32,
    pub gradient_rotation: f32,
}

impl AnimationClock {
    pub fn advance(&mut self, delta_seconds: f32, config: &Config) {
        let dt = sanitize_delta(delta_seconds);
        self.phase = step_cycle(self.phase, dt, config[ParamKey::PhaseDuration]);
        self.gradient_rotation =
            step_cycle(self.gradient_rotation, dt, config[ParamKey::GradientDuration]);
    }
}

fn step_cycle(angle: f32, dt: f32, period: f32) -> f32 {
    let period = period.abs().max(DURATION_EPSILON);
    (angle + DEGREES_PER_CYCLE * dt / period).rem_euclid(DEGREES_PER_CYCLE)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceTransform {
    /// Rotation about Z in radians.
    pub rotation_z: f32,
    pub scale: f32,
}

impl InstanceTransform {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_z(self.rotation_z),
            Vec3::ZERO,
        )
    }

    /// The same instance reflected across X, for the mirrored half.
    pub fn mirrored_matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0)) * self.model_matrix()
    }
}

/// Builds the petal instance stack: each successive instance turns by
/// `PI / rot` and shrinks by `scale / count`.
pub fn instance_transforms(config: &Config) -> SmallVec<[InstanceTransform; 64]> {
    let count = config[ParamKey::InstanceCount].round().max(0.0) as usize;
    let rot = config[ParamKey::Rot];
    let rot = if rot.abs() < ROT_FLOOR {
        ROT_FLOOR.copysign(rot)
    } else {
        rot
    };
    let shrink = config[ParamKey::Scale];
    (0..count)
        .map(|i| InstanceTransform {
            rotation_z: i as f32 * PI / rot,
            scale: 1.0 - (i as f32 / count as f32) * shrink,
        })
        .collect()
}

/// Uniform block layout: the parameter values followed by the two clock
/// angles, 64 bytes total.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ConfigUniform {
    pub values: [f32; PARAM_COUNT],
    pub phase: f32,
    pub gradient_rotation: f32,
}

impl ConfigUniform {
    pub fn new(config: &Config, clock: &AnimationClock) -> Self {
        Self {
            values: *config.values(),
            phase: clock.phase,
            gradient_rotation: clock.gradient_rotation,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
