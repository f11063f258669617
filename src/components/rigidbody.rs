//! Kinematic body component with named acceleration forces.
//!
//! The [`RigidBody`] component stores a character's velocity and the named
//! acceleration forces acting on it. Each force can be individually toggled,
//! which is how the traversal controller switches gravity off while a
//! character hangs from a ledge and back on when it returns to the ground.

use bevy_ecs::prelude::Component;
use glam::Vec3;
use rustc_hash::FxHashMap;

/// Name of the force that carries gravity.
pub const GRAVITY_FORCE: &str = "gravity";

/// A named acceleration force that can be toggled on/off.
#[derive(Clone, Copy, Debug)]
pub struct AccelerationForce {
    /// The acceleration vector in world units per second squared.
    pub value: Vec3,
    /// Whether this force is currently active.
    pub enabled: bool,
}

impl AccelerationForce {
    /// Create a new enabled acceleration force.
    pub fn new(value: Vec3) -> Self {
        Self {
            value,
            enabled: true,
        }
    }
}

/// Kinematic body storing velocity and named acceleration forces.
///
/// Written by the locomotion and traversal systems and consumed by the
/// movement system to update [`WorldTransform`](super::transform::WorldTransform).
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::new();
/// rb.add_force(GRAVITY_FORCE, Vec3::new(0.0, 0.0, -980.0));
///
/// // Hanging: no gravity, no residual momentum
/// rb.set_force_enabled(GRAVITY_FORCE, false);
/// rb.stop_immediately();
/// ```
#[derive(Component, Clone, Debug, Default)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec3,
    /// Named acceleration forces. The total acceleration is the sum of all enabled forces.
    pub forces: FxHashMap<String, AccelerationForce>,
    /// Optional maximum speed. If set, velocity magnitude is clamped to this value.
    pub max_speed: Option<f32>,
}

impl RigidBody {
    /// Create a RigidBody with zero velocity and no forces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a RigidBody with an enabled gravity force.
    pub fn with_gravity(gravity_z: f32) -> Self {
        let mut rb = Self::new();
        rb.add_force(GRAVITY_FORCE, Vec3::new(0.0, 0.0, gravity_z));
        rb
    }

    /// Add or update a named acceleration force (enabled by default).
    pub fn add_force(&mut self, name: &str, value: Vec3) {
        self.forces
            .insert(name.to_string(), AccelerationForce::new(value));
    }

    /// Enable or disable a specific force by name.
    /// Returns false if the force doesn't exist.
    pub fn set_force_enabled(&mut self, name: &str, enabled: bool) -> bool {
        if let Some(force) = self.forces.get_mut(name) {
            force.enabled = enabled;
            true
        } else {
            false
        }
    }

    /// Check if a force exists and is enabled.
    pub fn is_force_enabled(&self, name: &str) -> bool {
        self.forces.get(name).map(|f| f.enabled).unwrap_or(false)
    }

    /// Calculate the total acceleration from all enabled forces.
    pub fn total_acceleration(&self) -> Vec3 {
        self.forces
            .values()
            .filter(|f| f.enabled)
            .fold(Vec3::ZERO, |acc, f| acc + f.value)
    }

    /// Drop all momentum at once.
    pub fn stop_immediately(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    /// Clamp the velocity magnitude to `max_speed`, if one is set.
    pub fn clamp_speed(&mut self) {
        if let Some(max) = self.max_speed {
            self.velocity = self.velocity.clamp_length_max(max);
        }
    }
}
