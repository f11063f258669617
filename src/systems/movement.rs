//! Character movement integration.
//!
//! Moves every character according to its [`MovementMode`]:
//!
//! - **Walking**: planar velocity comes straight from the consumed movement
//!   intent; a pending jump launches the character into `Falling`. After the
//!   move a short downward sweep keeps the capsule on the floor, or starts a
//!   fall when there is none.
//! - **Falling**: enabled acceleration forces (gravity) are integrated and a
//!   walkable hit under the capsule lands the character.
//! - **Flying**: velocity is integrated as-is without forces or collision.
//!   Hanging characters fly with zero velocity; pose changes come from the
//!   alignment tween.
//!
//! Collision uses the bottom sphere of the [`CapsuleCollider`], lifted by a
//! small skin so a resting capsule does not start inside the floor.

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::debug;

use crate::components::capsule::CapsuleCollider;
use crate::components::inputcontrolled::Locomotion;
use crate::components::movementmode::MovementMode;
use crate::components::rigidbody::RigidBody;
use crate::components::transform::{WorldTransform, facing_rotation};
use crate::resources::collision::{CollisionChannel, CollisionWorld, ProbeRequest, SweepHit};
use crate::resources::worldtime::WorldTime;

const GROUND_SKIN: f32 = 2.0;
const GROUND_PROBE_DEPTH: f32 = 10.0;
/// Minimum `normal.z` of a surface the character can stand on.
const WALKABLE_NORMAL_Z: f32 = 0.7;

fn sweep_bottom_sphere(
    collision: &CollisionWorld,
    capsule: &CapsuleCollider,
    translation: Vec3,
    delta: Vec3,
) -> (Vec3, Option<SweepHit>) {
    let start = capsule.bottom_sphere_center(translation) + Vec3::Z * GROUND_SKIN;
    let request = ProbeRequest::sphere(
        start,
        start + delta,
        capsule.radius,
        CollisionChannel::Pawn,
    );
    let hit = collision
        .sweep_sphere(&request)
        .filter(|hit| !hit.start_penetrating);
    (start, hit)
}

/// Move `translation` by `delta`, stopping at the first blocking hit.
/// Returns the hit, if any.
fn move_with_sweep(
    collision: Option<&CollisionWorld>,
    capsule: Option<&CapsuleCollider>,
    translation: &mut Vec3,
    delta: Vec3,
) -> Option<SweepHit> {
    let (Some(collision), Some(capsule)) = (collision, capsule) else {
        *translation += delta;
        return None;
    };
    if delta == Vec3::ZERO {
        return None;
    }
    let (start, hit) = sweep_bottom_sphere(collision, capsule, *translation, delta);
    match hit {
        Some(hit) => {
            *translation += hit.location - start;
            Some(hit)
        }
        None => {
            *translation += delta;
            None
        }
    }
}

/// Walkable floor right under the capsule, as the height offset to snap by.
fn find_floor(
    collision: Option<&CollisionWorld>,
    capsule: Option<&CapsuleCollider>,
    translation: Vec3,
) -> Option<f32> {
    let (Some(collision), Some(capsule)) = (collision, capsule) else {
        // Without collision there is nothing to fall onto or off of.
        return Some(0.0);
    };
    let (start, hit) = sweep_bottom_sphere(
        collision,
        capsule,
        translation,
        Vec3::NEG_Z * (GROUND_SKIN + GROUND_PROBE_DEPTH),
    );
    hit.filter(|hit| hit.normal.z > WALKABLE_NORMAL_Z)
        .map(|hit| hit.location.z - (start.z - GROUND_SKIN))
}

pub fn movement_system(
    time: Res<WorldTime>,
    collision: Option<Res<CollisionWorld>>,
    mut query: Query<(
        Entity,
        &mut WorldTransform,
        &mut RigidBody,
        &mut MovementMode,
        Option<&mut Locomotion>,
        Option<&CapsuleCollider>,
    )>,
) {
    let dt = time.delta;
    let collision = collision.as_deref();
    for (entity, mut transform, mut rigidbody, mut mode, locomotion, capsule) in query.iter_mut() {
        match *mode {
            MovementMode::Walking => {
                let mut jumped = false;
                if let Some(mut locomotion) = locomotion {
                    let input = locomotion.consume_input();
                    let planar = Vec3::new(input.x, input.y, 0.0);
                    rigidbody.velocity = planar * locomotion.walk_speed;
                    if planar != Vec3::ZERO {
                        transform.rotation = facing_rotation(planar);
                    }
                    if locomotion.jump_requested {
                        locomotion.jump_requested = false;
                        rigidbody.velocity.z = locomotion.jump_velocity;
                        jumped = true;
                    }
                } else {
                    rigidbody.velocity.z = 0.0;
                }
                rigidbody.clamp_speed();

                let delta = rigidbody.velocity * dt;
                if let Some(hit) =
                    move_with_sweep(collision, capsule, &mut transform.translation, delta)
                {
                    let n = hit.normal;
                    let push = n * rigidbody.velocity.dot(n).min(0.0);
                    rigidbody.velocity -= push;
                }

                if jumped {
                    debug!("{:?} jumped", entity);
                    *mode = MovementMode::Falling;
                } else if let Some(snap) = find_floor(collision, capsule, transform.translation) {
                    transform.translation.z += snap;
                } else {
                    debug!("{:?} walked off a ledge", entity);
                    *mode = MovementMode::Falling;
                }
            }
            MovementMode::Falling => {
                if let Some(mut locomotion) = locomotion {
                    // Intent is dropped in the air.
                    locomotion.consume_input();
                    locomotion.jump_requested = false;
                }
                let acceleration = rigidbody.total_acceleration();
                rigidbody.velocity += acceleration * dt;
                rigidbody.clamp_speed();

                let delta = rigidbody.velocity * dt;
                if let Some(hit) =
                    move_with_sweep(collision, capsule, &mut transform.translation, delta)
                {
                    let n = hit.normal;
                    if n.z > WALKABLE_NORMAL_Z && rigidbody.velocity.z <= 0.0 {
                        // The sweep ran with the skin lift; rest the capsule on the floor.
                        transform.translation.z += GROUND_SKIN;
                        debug!("{:?} landed at {:?}", entity, transform.translation);
                        rigidbody.velocity.z = 0.0;
                        *mode = MovementMode::Walking;
                    } else {
                        let push = n * rigidbody.velocity.dot(n).min(0.0);
                        rigidbody.velocity -= push;
                    }
                }
            }
            MovementMode::Flying => {
                transform.translation += rigidbody.velocity * dt;
            }
        }
    }
}
