//! Debug toggle and probe visualisation resources.
//!
//! The mere presence of [`DebugMode`] indicates that debug shapes and extra
//! diagnostics should be produced. Remove it to disable debug behavior.
//! [`DebugShapes`] holds the shapes recorded during the current tick for a
//! host renderer to draw; it never feeds back into simulation state.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Resource;
use glam::Vec3;

/// Upper bound on shapes kept per tick. Extra shapes are dropped.
pub const MAX_DEBUG_SHAPES: usize = 64;

/// Marker resource: when present, systems may record overlays or print extra logs.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}

/// A shape to visualise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebugShape {
    /// Volume covered by a sphere sweep. `hit` selects the highlight colour.
    ProbeCylinder {
        start: Vec3,
        end: Vec3,
        radius: f32,
        hit: bool,
    },
    /// A contact point.
    HitSphere { center: Vec3, radius: f32 },
}

/// Shapes recorded this tick.
#[derive(Resource, Debug, Default)]
pub struct DebugShapes {
    pub shapes: ArrayVec<DebugShape, MAX_DEBUG_SHAPES>,
}

impl DebugShapes {
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Record a shape. Returns `false` when the per-tick budget is exhausted.
    pub fn push(&mut self, shape: DebugShape) -> bool {
        self.shapes.try_push(shape).is_ok()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_stops_at_capacity() {
        let mut shapes = DebugShapes::default();
        for _ in 0..MAX_DEBUG_SHAPES {
            assert!(shapes.push(DebugShape::HitSphere {
                center: Vec3::ZERO,
                radius: 1.0,
            }));
        }
        assert!(!shapes.push(DebugShape::HitSphere {
            center: Vec3::ZERO,
            radius: 1.0,
        }));
        assert_eq!(shapes.len(), MAX_DEBUG_SHAPES);
        shapes.clear();
        assert!(shapes.is_empty());
    }
}
