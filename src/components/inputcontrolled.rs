//! Input-driven locomotion components.
//!
//! - [`LocomotionInput`] – raw axis and action values written by the input
//!   binding layer each frame
//! - [`Locomotion`] – movement intent accumulated by the input handlers and
//!   the speeds used to turn it into velocity
//!
//! The handlers in [`crate::systems::locomotion`] read the first and write
//! the second, and do nothing while the character is not grounded.

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Raw input forwarded by the binding layer.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct LocomotionInput {
    /// "Move Forward / Backward" axis in `[-1, 1]`.
    pub forward_axis: f32,
    /// "Move Right / Left" axis in `[-1, 1]`.
    pub right_axis: f32,
    /// Control (camera) yaw in degrees. Movement is relative to it.
    pub control_yaw: f32,
    /// Jump action pressed this frame.
    pub jump: bool,
}

impl LocomotionInput {
    pub fn new(forward_axis: f32, right_axis: f32, control_yaw: f32) -> Self {
        Self {
            forward_axis,
            right_axis,
            control_yaw,
            jump: false,
        }
    }
}

/// Movement intent and the speeds it maps to.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Locomotion {
    /// Maximum ground speed in units per second.
    pub walk_speed: f32,
    /// Upward launch speed when jumping.
    pub jump_velocity: f32,
    /// Accumulated movement direction for this tick (not normalized).
    pub pending_input: Vec3,
    /// A jump was requested this tick.
    pub jump_requested: bool,
}

impl Locomotion {
    pub fn new(walk_speed: f32, jump_velocity: f32) -> Self {
        Self {
            walk_speed,
            jump_velocity,
            pending_input: Vec3::ZERO,
            jump_requested: false,
        }
    }

    /// Accumulate `direction * scale` into the pending intent.
    pub fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.pending_input += direction * scale;
    }

    /// Take and clear the pending intent, clamped to unit length.
    pub fn consume_input(&mut self) -> Vec3 {
        let input = self.pending_input.clamp_length_max(1.0);
        self.pending_input = Vec3::ZERO;
        input
    }
}
