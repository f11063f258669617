//! Geometry probes.
//!
//! Two sphere sweeps decide whether a climbable ledge is in front of a
//! character:
//!
//! - the **forward probe** sweeps horizontally from just in front of the
//!   origin out to the climbing offset, looking for a wall;
//! - the **elevated probe** starts above that same forward point and sweeps
//!   straight down, looking for the top of the wall.
//!
//! Both are pure queries against the [`CollisionWorld`]. A clear path yields
//! a [`ProbeResult`] with `hit == false`; it is never an error. The request
//! builders are public so debug drawing can show exactly what was swept.

use glam::Vec3;

use crate::resources::collision::{CollisionWorld, ProbeRequest, SweepHit};
use crate::resources::traversalconfig::TraversalConfig;

/// Outcome of one probe.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProbeResult {
    pub hit: bool,
    /// Centre of the swept sphere at impact. Meaningless without `hit`.
    pub contact_point: Vec3,
    pub contact_normal: Vec3,
}

impl ProbeResult {
    pub const MISS: ProbeResult = ProbeResult {
        hit: false,
        contact_point: Vec3::ZERO,
        contact_normal: Vec3::ZERO,
    };
}

impl From<Option<SweepHit>> for ProbeResult {
    fn from(hit: Option<SweepHit>) -> Self {
        match hit {
            Some(hit) => ProbeResult {
                hit: true,
                contact_point: hit.location,
                contact_normal: hit.normal,
            },
            None => ProbeResult::MISS,
        }
    }
}

/// Sweep for the forward wall probe.
pub fn forward_request(
    config: &TraversalConfig,
    origin: Vec3,
    forward: Vec3,
    offset_distance: f32,
) -> ProbeRequest {
    ProbeRequest::sphere(
        origin + forward * config.forward_start_offset,
        origin + forward * (offset_distance * config.forward_reach_scale),
        config.probe_radius,
        config.probe_channel,
    )
}

/// Sweep for the elevated ledge probe.
pub fn elevated_request(
    config: &TraversalConfig,
    origin: Vec3,
    forward: Vec3,
    up: Vec3,
    offset_distance: f32,
    lift_height: f32,
) -> ProbeRequest {
    let end = origin + forward * offset_distance;
    ProbeRequest::sphere(
        end + up * lift_height,
        end,
        config.probe_radius,
        config.probe_channel,
    )
}

/// Look for a wall between `origin` and `offset_distance` along `forward`.
pub fn probe_forward(
    collision: &CollisionWorld,
    config: &TraversalConfig,
    origin: Vec3,
    forward: Vec3,
    offset_distance: f32,
) -> ProbeResult {
    let request = forward_request(config, origin, forward, offset_distance);
    collision.sweep_sphere(&request).into()
}

/// Look down onto a ledge `offset_distance` in front of `origin`, starting
/// `lift_height` above it.
pub fn probe_elevated(
    collision: &CollisionWorld,
    config: &TraversalConfig,
    origin: Vec3,
    forward: Vec3,
    up: Vec3,
    offset_distance: f32,
    lift_height: f32,
) -> ProbeResult {
    let request = elevated_request(config, origin, forward, up, offset_distance, lift_height);
    collision.sweep_sphere(&request).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::collision::CollisionChannel;
    use std::sync::{Arc, Mutex};

    const EPSILON: f32 = 1e-4;

    fn recording_world(
        response: Option<SweepHit>,
    ) -> (CollisionWorld, Arc<Mutex<Vec<ProbeRequest>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let world = CollisionWorld::new(move |req: &ProbeRequest| {
            seen_clone.lock().unwrap().push(*req);
            response
        });
        (world, seen)
    }

    #[test]
    fn test_forward_request_geometry() {
        let cfg = TraversalConfig::new();
        let req = forward_request(&cfg, Vec3::new(10.0, 0.0, 5.0), Vec3::Y, 50.0);
        assert!((req.start - Vec3::new(10.0, 1.0, 5.0)).length() < EPSILON);
        assert!((req.end - Vec3::new(10.0, 50.0, 5.0)).length() < EPSILON);
        assert_eq!(req.radius, 20.0);
        assert_eq!(req.channel, CollisionChannel::Visibility);
    }

    #[test]
    fn test_forward_reach_scale_extends_end_only() {
        let mut cfg = TraversalConfig::new();
        cfg.forward_reach_scale = 2.0;
        let req = forward_request(&cfg, Vec3::ZERO, Vec3::X, 50.0);
        assert!((req.start - Vec3::X).length() < EPSILON);
        assert!((req.end - Vec3::new(100.0, 0.0, 0.0)).length() < EPSILON);
    }

    #[test]
    fn test_elevated_request_sweeps_down() {
        let cfg = TraversalConfig::new();
        let req = elevated_request(&cfg, Vec3::ZERO, Vec3::X, Vec3::Z, 50.0, 150.0);
        assert!((req.start - Vec3::new(50.0, 0.0, 150.0)).length() < EPSILON);
        assert!((req.end - Vec3::new(50.0, 0.0, 0.0)).length() < EPSILON);
    }

    #[test]
    fn test_probe_forward_reports_wall() {
        let (world, seen) = recording_world(Some(SweepHit {
            location: Vec3::new(50.0, 0.0, 0.0),
            impact_point: Vec3::new(70.0, 0.0, 0.0),
            normal: -Vec3::X,
            time: 1.0,
            start_penetrating: false,
        }));
        let cfg = TraversalConfig::new();
        let result = probe_forward(&world, &cfg, Vec3::ZERO, Vec3::X, 50.0);
        assert!(result.hit);
        assert_eq!(result.contact_point, Vec3::new(50.0, 0.0, 0.0));
        assert_eq!(result.contact_normal, -Vec3::X);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_probe_miss_is_not_an_error() {
        let (world, _) = recording_world(None);
        let cfg = TraversalConfig::new();
        let result = probe_elevated(&world, &cfg, Vec3::ZERO, Vec3::X, Vec3::Z, 50.0, 150.0);
        assert_eq!(result, ProbeResult::MISS);
    }
}
