//! Probe visualisation.
//!
//! While [`DebugMode`] is present, records the volume of both ledge probes
//! and the contact points they found into [`DebugShapes`]. The probes are
//! drawn every tick, including while hanging when they are not swept, so
//! the last contacts stay visible.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::sockets::SkeletalSockets;
use crate::components::transform::WorldTransform;
use crate::components::traversal::TraversalState;
use crate::resources::debugmode::{DebugMode, DebugShape, DebugShapes};
use crate::resources::traversalconfig::{ElevatedProbeOrigin, TraversalConfig};
use crate::systems::probe::{elevated_request, forward_request};

const HIT_SPHERE_RADIUS: f32 = 10.0;

pub fn probe_debug_system(
    debug: Option<Res<DebugMode>>,
    config: Res<TraversalConfig>,
    shapes: Option<ResMut<DebugShapes>>,
    query: Query<(&WorldTransform, &SkeletalSockets, &TraversalState)>,
) {
    let (Some(_), Some(mut shapes)) = (debug, shapes) else {
        return;
    };
    shapes.clear();

    for (transform, sockets, state) in query.iter() {
        let root = transform.translation;
        let forward = transform.forward();
        let offset = config.climbing_front_offset;

        let wall = forward_request(&config, root, forward, offset);
        shapes.push(DebugShape::ProbeCylinder {
            start: wall.start,
            end: wall.end,
            radius: wall.radius,
            hit: state.wall_available,
        });
        if state.wall_available {
            shapes.push(DebugShape::HitSphere {
                center: state.wall_contact_point,
                radius: HIT_SPHERE_RADIUS,
            });
        }

        let origin = match config.elevated_probe_origin {
            ElevatedProbeOrigin::Pelvis => sockets
                .socket_location(&config.pelvis_socket, transform)
                .unwrap_or(root),
            ElevatedProbeOrigin::Root => root,
        };
        let ledge = elevated_request(
            &config,
            origin,
            forward,
            transform.up(),
            offset,
            config.elevated_lift_height,
        );
        shapes.push(DebugShape::ProbeCylinder {
            start: ledge.start,
            end: ledge.end,
            radius: ledge.radius,
            hit: state.ledge_found,
        });
        if state.ledge_found {
            shapes.push(DebugShape::HitSphere {
                center: state.ledge_height_point,
                radius: HIT_SPHERE_RADIUS,
            });
        }
    }
    trace!("Recorded {} probe debug shapes", shapes.len());
}
