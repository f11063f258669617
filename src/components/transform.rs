//! World-space pose of a character.
//!
//! The crate uses a Z-up, X-forward convention: an identity rotation faces
//! `+X`, `+Y` is to the character's right-hand side when looking from above
//! with `+Z` towards the viewer, and `+Z` is up.

use bevy_ecs::prelude::Component;
use glam::{Quat, Vec3};

/// Position and orientation of an entity in world space.
///
/// For characters the translation is the centre of the collision capsule
/// (the "root"), matching how probes and the alignment actuator measure
/// distances.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct WorldTransform {
    /// World-space position.
    pub translation: Vec3,
    /// World-space orientation.
    pub rotation: Quat,
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl WorldTransform {
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Build a transform facing `yaw_degrees` around the up axis.
    pub fn from_translation_yaw(translation: Vec3, yaw_degrees: f32) -> Self {
        Self {
            translation,
            rotation: Quat::from_rotation_z(yaw_degrees.to_radians()),
        }
    }

    /// Unit forward axis (local `+X`).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Unit right axis (local `+Y`).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Unit up axis (local `+Z`).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Transform a point from local space into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.translation + self.rotation * local
    }
}

/// Orientation whose forward axis points along `direction`.
///
/// Yaw and pitch are derived from the direction and roll is always zero.
/// A zero-length direction yields the identity rotation.
pub fn facing_rotation(direction: Vec3) -> Quat {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let yaw = dir.y.atan2(dir.x);
    let pitch = dir.z.atan2(dir.truncate().length());
    Quat::from_rotation_z(yaw) * Quat::from_rotation_y(-pitch)
}
