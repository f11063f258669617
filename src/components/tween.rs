//! Tween component for smoothed move-to-pose transitions.
//!
//! [`PoseTween`] interpolates an entity's
//! [`WorldTransform`](super::transform::WorldTransform) translation and
//! rotation together over a fixed duration. It is one-shot: when the clock
//! reaches the duration the tween is finished and removed by
//! [`crate::systems::alignment::pose_tween_system`].

use bevy_ecs::prelude::Component;
use glam::{Quat, Vec3};

/// Easing curve applied to a tween's normalized progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed (no easing).
    Linear,
    /// Starts slow, accelerates (quadratic).
    QuadIn,
    /// Starts fast, decelerates (quadratic).
    QuadOut,
    /// Slow start and end (quadratic).
    #[default]
    QuadInOut,
}

impl Easing {
    /// Pick the curve matching separate ease-in / ease-out switches.
    pub fn from_flags(ease_in: bool, ease_out: bool) -> Self {
        match (ease_in, ease_out) {
            (true, true) => Easing::QuadInOut,
            (true, false) => Easing::QuadIn,
            (false, true) => Easing::QuadOut,
            (false, false) => Easing::Linear,
        }
    }
}

/// Animates an entity's translation and rotation towards a target pose.
#[derive(Component, Clone, Debug)]
pub struct PoseTween {
    pub from_translation: Vec3,
    pub to_translation: Vec3,
    pub from_rotation: Quat,
    pub to_rotation: Quat,
    /// Duration in seconds.
    pub duration: f32,
    /// Easing applied to both translation and rotation.
    pub easing: Easing,
    /// Radius of the sphere swept along each step, `None` to move without
    /// collision checks.
    pub sweep_radius: Option<f32>,
    /// Current time within the tween.
    pub time: f32,
    /// Whether the tween is still advancing.
    pub playing: bool,
    /// Set once a sweep blocked the move; translation stays put afterwards.
    pub blocked: bool,
}

impl PoseTween {
    pub fn new(
        from_translation: Vec3,
        to_translation: Vec3,
        from_rotation: Quat,
        to_rotation: Quat,
        duration: f32,
    ) -> Self {
        Self {
            from_translation,
            to_translation,
            from_rotation,
            to_rotation,
            duration,
            easing: Easing::Linear,
            sweep_radius: None,
            time: 0.0,
            playing: true,
            blocked: false,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_sweep(mut self, radius: f32) -> Self {
        self.sweep_radius = Some(radius);
        self
    }

    /// Normalized progress in `[0, 1]`. A zero duration counts as complete.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.time / self.duration).clamp(0.0, 1.0)
        }
    }
}
