//! Axis-aligned box world implementing [`CollisionQuery`].
//!
//! Sphere sweeps are resolved as a segment against each box grown by the
//! sphere radius (slab test). Edges and corners of the grown box are square
//! rather than rounded, so sweeps grazing a corner report a hit slightly
//! early. That is accurate enough for blocky level geometry and keeps the
//! query exact on faces, which is where ledge probes land.

use glam::Vec3;

use super::collision::{CollisionChannel, CollisionQuery, ProbeRequest, SweepHit};

const PARALLEL_EPSILON: f32 = 1e-6;

/// A solid axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticBox {
    pub min: Vec3,
    pub max: Vec3,
    /// Bitmask of [`CollisionChannel::bit`] values this box blocks.
    pub channels: u32,
}

impl StaticBox {
    /// Box blocking every channel, built from two opposite corners.
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            channels: u32::MAX,
        }
    }

    pub fn with_channels(mut self, channels: &[CollisionChannel]) -> Self {
        self.channels = channels.iter().fold(0, |acc, c| acc | c.bit());
        self
    }

    pub fn blocks(&self, channel: CollisionChannel) -> bool {
        self.channels & channel.bit() != 0
    }

    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min, self.max)
    }

    /// Sweep a sphere against this box only.
    pub fn sweep(&self, request: &ProbeRequest) -> Option<SweepHit> {
        let grow = Vec3::splat(request.radius.max(0.0));
        let min = self.min - grow;
        let max = self.max + grow;
        let start = request.start;
        let delta = request.end - request.start;

        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_normal = Vec3::ZERO;

        for axis in 0..3 {
            let s = start[axis];
            let d = delta[axis];
            if d.abs() < PARALLEL_EPSILON {
                if s < min[axis] || s > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (min[axis] - s) * inv;
            let mut t1 = (max[axis] - s) * inv;
            let mut face = -1.0;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
                face = 1.0;
            }
            if t0 > t_enter {
                t_enter = t0;
                enter_normal = Vec3::ZERO;
                enter_normal[axis] = face;
            }
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        if t_exit < 0.0 || t_enter > 1.0 {
            return None;
        }

        if t_enter < 0.0 {
            let normal = if delta.length_squared() > 0.0 {
                -delta.normalize()
            } else {
                Vec3::Z
            };
            return Some(SweepHit {
                location: start,
                impact_point: self.closest_point(start),
                normal,
                time: 0.0,
                start_penetrating: true,
            });
        }

        let location = start + delta * t_enter;
        Some(SweepHit {
            location,
            impact_point: self.closest_point(location),
            normal: enter_normal,
            time: t_enter,
            start_penetrating: false,
        })
    }
}

/// A collection of static boxes.
#[derive(Debug, Clone, Default)]
pub struct StaticGeometry {
    boxes: Vec<StaticBox>,
}

impl StaticGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_box(mut self, b: StaticBox) -> Self {
        self.boxes.push(b);
        self
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

impl CollisionQuery for StaticGeometry {
    fn sweep_sphere(&self, request: &ProbeRequest) -> Option<SweepHit> {
        self.boxes
            .iter()
            .filter(|b| b.blocks(request.channel))
            .filter_map(|b| b.sweep(request))
            .min_by(|a, b| a.time.total_cmp(&b.time))
    }
}
