//! Capsule collision volume.

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Upright collision capsule centred on the entity's
/// [`WorldTransform`](super::transform::WorldTransform) translation.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct CapsuleCollider {
    pub radius: f32,
    /// Distance from the centre to the bottom (and top) of the capsule.
    pub half_height: f32,
}

impl CapsuleCollider {
    pub fn new(radius: f32, half_height: f32) -> Self {
        Self {
            radius,
            half_height,
        }
    }

    /// Centre of the lower hemisphere for a capsule centred at `center`.
    pub fn bottom_sphere_center(&self, center: Vec3) -> Vec3 {
        center - Vec3::Z * (self.half_height - self.radius).max(0.0)
    }
}
