//! Collision query service.
//!
//! The traversal controller never owns world geometry. It asks a
//! [`CollisionQuery`] implementation, stored in the [`CollisionWorld`]
//! resource, to sweep spheres through the world. Host engines provide their
//! own implementation; [`StaticGeometry`](super::staticgeometry::StaticGeometry)
//! is a small box world used by the demo scene and tests, and any
//! `Fn(&ProbeRequest) -> Option<SweepHit>` closure works as a test double.

use bevy_ecs::prelude::Resource;
use glam::Vec3;

/// Collision channel a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollisionChannel {
    /// Anything that blocks sight lines. Ledge probes use this channel.
    #[default]
    Visibility,
    /// Geometry that blocks character movement.
    Pawn,
}

impl CollisionChannel {
    pub fn bit(self) -> u32 {
        match self {
            CollisionChannel::Visibility => 1 << 0,
            CollisionChannel::Pawn => 1 << 1,
        }
    }
}

/// A sphere sweep from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeRequest {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
    pub channel: CollisionChannel,
}

impl ProbeRequest {
    pub fn sphere(start: Vec3, end: Vec3, radius: f32, channel: CollisionChannel) -> Self {
        Self {
            start,
            end,
            radius,
            channel,
        }
    }
}

/// First blocking hit of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// Centre of the swept sphere at the moment of impact.
    pub location: Vec3,
    /// Point on the blocking surface that was touched.
    pub impact_point: Vec3,
    /// Surface normal at the impact, pointing away from the surface.
    pub normal: Vec3,
    /// Fraction of the sweep travelled before the impact, in `[0, 1]`.
    pub time: f32,
    /// The sweep started already overlapping the geometry.
    pub start_penetrating: bool,
}

/// Shape-cast service consumed by the probes, the alignment sweep and the
/// landing check.
pub trait CollisionQuery: Send + Sync + 'static {
    /// Sweep a sphere along `request`, returning the first blocking hit.
    /// `None` means the path is clear, which is not an error.
    fn sweep_sphere(&self, request: &ProbeRequest) -> Option<SweepHit>;
}

impl<F> CollisionQuery for F
where
    F: Fn(&ProbeRequest) -> Option<SweepHit> + Send + Sync + 'static,
{
    fn sweep_sphere(&self, request: &ProbeRequest) -> Option<SweepHit> {
        self(request)
    }
}

/// Resource wrapping the active collision service.
#[derive(Resource)]
pub struct CollisionWorld {
    query: Box<dyn CollisionQuery>,
}

impl CollisionWorld {
    pub fn new(query: impl CollisionQuery) -> Self {
        Self {
            query: Box::new(query),
        }
    }

    pub fn sweep_sphere(&self, request: &ProbeRequest) -> Option<SweepHit> {
        self.query.sweep_sphere(request)
    }
}
