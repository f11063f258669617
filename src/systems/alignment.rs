//! Ledge alignment actuator.
//!
//! When a character grabs a ledge it has to be snapped against the wall:
//! pulled out to a fixed stand-off along the wall normal, dropped so the
//! capsule hangs below the ledge top, and turned to face into the wall.
//! [`align_to_ledge`] computes that pose and returns a [`PoseTween`] which
//! [`pose_tween_system`] advances over the following ticks.
//!
//! The move is non-blocking. On completion the tween is removed and an
//! [`AlignmentFinished`] event is triggered. If the character leaves the
//! hanging mode first, the tween is dropped and [`AlignmentCancelled`] fires.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};
use log::{debug, trace};

use crate::components::transform::{WorldTransform, facing_rotation};
use crate::components::traversal::{TraversalMode, TraversalState};
use crate::components::tween::{Easing, PoseTween};
use crate::events::alignment::{AlignmentCancelled, AlignmentFinished};
use crate::resources::collision::{CollisionChannel, CollisionWorld, ProbeRequest};
use crate::resources::traversalconfig::TraversalConfig;
use crate::resources::worldtime::WorldTime;

/// Pose a hanging character is moved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentTarget {
    pub position: Vec3,
    pub rotation: Quat,
    /// Seconds the move takes.
    pub duration: f32,
}

impl AlignmentTarget {
    /// Target pose against a wall hit and a ledge hit.
    pub fn compute(
        wall_contact_point: Vec3,
        wall_contact_normal: Vec3,
        ledge_height_point: Vec3,
        capsule_half_height: f32,
        wall_standoff: f32,
        duration: f32,
    ) -> Self {
        let lateral = wall_contact_point + wall_contact_normal * wall_standoff;
        Self {
            position: Vec3::new(
                lateral.x,
                lateral.y,
                ledge_height_point.z - capsule_half_height,
            ),
            rotation: facing_rotation(-wall_contact_normal),
            duration,
        }
    }

    /// Target a tween is heading for.
    pub fn from_tween(tween: &PoseTween) -> Self {
        Self {
            position: tween.to_translation,
            rotation: tween.to_rotation,
            duration: tween.duration,
        }
    }
}

/// Build the move-to-ledge transition from the character's current pose.
pub fn align_to_ledge(
    current: &WorldTransform,
    wall_contact_point: Vec3,
    wall_contact_normal: Vec3,
    ledge_height_point: Vec3,
    config: &TraversalConfig,
) -> PoseTween {
    let target = AlignmentTarget::compute(
        wall_contact_point,
        wall_contact_normal,
        ledge_height_point,
        config.capsule_half_height,
        config.wall_standoff,
        config.alignment_duration,
    );
    let tween = PoseTween::new(
        current.translation,
        target.position,
        current.rotation,
        target.rotation,
        target.duration,
    )
    .with_easing(config.alignment_easing());
    if config.alignment_sweep {
        tween.with_sweep(config.alignment_sweep_radius)
    } else {
        tween
    }
}

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] and transformed according to the
/// easing curve.
pub(crate) fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
    }
}

/// Advance every [`PoseTween`], moving the transform towards its target.
///
/// Sweeping tweens check the step against the [`CollisionWorld`] on the pawn
/// channel; the first blocking hit parks the translation at the hit location
/// for the rest of the move while rotation keeps interpolating. Hits that
/// start inside geometry do not block, so a character can slide out of an
/// overlap.
pub fn pose_tween_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    collision: Option<Res<CollisionWorld>>,
    mut query: Query<(
        Entity,
        &mut WorldTransform,
        &mut PoseTween,
        Option<&TraversalState>,
    )>,
) {
    for (entity, mut transform, mut tween, state) in query.iter_mut() {
        if state.is_some_and(|s| s.mode != TraversalMode::Hanging) {
            debug!("Alignment of {:?} cancelled: no longer hanging", entity);
            commands.entity(entity).remove::<PoseTween>();
            commands.trigger(AlignmentCancelled { entity });
            continue;
        }
        if !tween.playing {
            continue;
        }

        tween.time += time.delta;
        let k = ease(tween.easing, tween.progress());

        if !tween.blocked {
            let next = tween.from_translation.lerp(tween.to_translation, k);
            match (tween.sweep_radius, collision.as_deref()) {
                (Some(radius), Some(collision)) if next != transform.translation => {
                    let request = ProbeRequest::sphere(
                        transform.translation,
                        next,
                        radius,
                        CollisionChannel::Pawn,
                    );
                    match collision.sweep_sphere(&request) {
                        Some(hit) if !hit.start_penetrating => {
                            trace!("Alignment of {:?} blocked at {:?}", entity, hit.location);
                            transform.translation = hit.location;
                            tween.blocked = true;
                        }
                        _ => transform.translation = next,
                    }
                }
                _ => transform.translation = next,
            }
        }
        transform.rotation = tween.from_rotation.slerp(tween.to_rotation, k);

        if tween.progress() >= 1.0 {
            tween.playing = false;
            let target = AlignmentTarget::from_tween(&tween);
            debug!(
                "Alignment of {:?} finished at {:?} (blocked: {})",
                entity, transform.translation, tween.blocked
            );
            commands.entity(entity).remove::<PoseTween>();
            commands.trigger(AlignmentFinished { entity, target });
        }
    }
}
