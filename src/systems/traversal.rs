//! Traversal state machine.
//!
//! Drives each character through
//! `Grounded → Hanging → {ClimbingUp, DroppingDown} → Grounded`.
//!
//! [`traversal_probe_system`] runs the geometry probes every tick while a
//! character is grounded, records what they found on [`TraversalState`] and,
//! when a ledge passes the acceptance test, calls [`attempt_hang`]. The
//! remaining transitions are event driven:
//!
//! - [`traversal_request_observer`] – `TraversalRequest` moves a hanging
//!   character into climbing up or dropping down;
//! - [`traversal_finished_observer`] – `TraversalFinished` hands a character
//!   back to ground locomotion;
//! - [`climb_notify_observer`] – turns the configured montage notify into a
//!   `TraversalFinished`.
//!
//! While not grounded the probes are skipped entirely, so a character that
//! walks into a wall mid-climb does not re-grab it. A ledge accepted without
//! a wall hit still puts the character into `Hanging`, just without any
//! alignment move.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::components::animation::MontagePlayer;
use crate::components::movementmode::MovementMode;
use crate::components::rigidbody::{GRAVITY_FORCE, RigidBody};
use crate::components::sockets::SkeletalSockets;
use crate::components::transform::WorldTransform;
use crate::components::traversal::{TraversalMode, TraversalState};
use crate::events::montage::MontageNotify;
use crate::events::traversal::{TraversalFinished, TraversalModeChanged, TraversalRequest};
use crate::resources::collision::CollisionWorld;
use crate::resources::montagestore::MontageStore;
use crate::resources::traversalconfig::{ElevatedProbeOrigin, TraversalConfig};
use crate::systems::alignment::{AlignmentTarget, align_to_ledge};
use crate::systems::probe::{probe_elevated, probe_forward};

/// Ledge acceptance test: the ledge must be within `acceptance` of the
/// pelvis height, inclusive.
pub fn ledge_accepted(pelvis_z: f32, ledge_z: f32, acceptance: f32) -> bool {
    (pelvis_z - ledge_z).abs() <= acceptance
}

/// Set the mode and announce the transition. No-op if unchanged.
pub fn change_mode(
    commands: &mut Commands,
    entity: Entity,
    state: &mut TraversalState,
    to: TraversalMode,
) {
    let from = state.mode;
    if from == to {
        return;
    }
    state.mode = to;
    info!("{:?} traversal mode {} -> {}", entity, from, to);
    commands.trigger(TraversalModeChanged { entity, from, to });
}

/// Start `key` on the character's montage player if the montage is known.
fn start_montage(
    entity: Entity,
    player: Option<&mut MontagePlayer>,
    montages: Option<&MontageStore>,
    key: &str,
    paused: bool,
) {
    let Some(player) = player else {
        debug!("{:?} has no montage player, skipping '{}'", entity, key);
        return;
    };
    if montages.is_some_and(|store| !store.contains(key)) {
        warn!("Montage '{}' is not in the montage store", key);
        return;
    }
    if paused {
        player.play_paused(key);
    } else {
        player.play(key, 0.0);
    }
}

/// Character components touched by [`attempt_hang`].
pub struct HangSubject<'a> {
    pub entity: Entity,
    pub transform: &'a WorldTransform,
    pub state: &'a mut TraversalState,
    pub movement: &'a mut MovementMode,
    pub rigidbody: &'a mut RigidBody,
    pub montage: Option<&'a mut MontagePlayer>,
}

/// Put the character into the hanging mode.
///
/// Switches movement to flying with gravity off, stops all motion, holds the
/// hang montage on its first frame and, when a wall was found this tick,
/// inserts the alignment tween. Returns the alignment target if one was
/// issued.
pub fn attempt_hang(
    commands: &mut Commands,
    subject: HangSubject<'_>,
    config: &TraversalConfig,
    montages: Option<&MontageStore>,
) -> Option<AlignmentTarget> {
    let HangSubject {
        entity,
        transform,
        state,
        movement,
        rigidbody,
        montage,
    } = subject;

    change_mode(commands, entity, state, TraversalMode::Hanging);
    *movement = MovementMode::Flying;
    rigidbody.set_force_enabled(GRAVITY_FORCE, false);
    rigidbody.stop_immediately();

    if let Some(key) = config.hang_montage.as_deref() {
        start_montage(entity, montage, montages, key, true);
    }

    let Some((wall_point, wall_normal)) = state.wall_contact() else {
        debug!("{:?} hanging without a wall contact, no alignment", entity);
        return None;
    };
    let tween = align_to_ledge(
        transform,
        wall_point,
        wall_normal,
        state.ledge_height_point,
        config,
    );
    let target = AlignmentTarget::from_tween(&tween);
    debug!(
        "{:?} aligning to ledge: {:?} over {}s",
        entity, target.position, target.duration
    );
    commands.entity(entity).insert(tween);
    Some(target)
}

/// Probe for a ledge in front of every grounded character and hang on it
/// when accepted.
pub fn traversal_probe_system(
    mut commands: Commands,
    config: Res<TraversalConfig>,
    collision: Option<Res<CollisionWorld>>,
    montages: Option<Res<MontageStore>>,
    mut query: Query<(
        Entity,
        &WorldTransform,
        &SkeletalSockets,
        &mut TraversalState,
        &mut MovementMode,
        &mut RigidBody,
        Option<&mut MontagePlayer>,
    )>,
) {
    let Some(collision) = collision else {
        return;
    };
    for (entity, transform, sockets, mut state, mut movement, mut rigidbody, mut montage) in
        query.iter_mut()
    {
        if !state.mode.is_grounded() {
            continue;
        }

        let root = transform.translation;
        let forward = transform.forward();
        let up = transform.up();

        let wall = probe_forward(&collision, &config, root, forward, config.climbing_front_offset);
        state.wall_available = wall.hit;
        if wall.hit {
            state.wall_contact_point = wall.contact_point;
            state.wall_contact_normal = wall.contact_normal;
        }

        let Some(pelvis) = sockets.socket_location(&config.pelvis_socket, transform) else {
            warn!(
                "{:?} has no '{}' socket, skipping ledge probe",
                entity, config.pelvis_socket
            );
            state.ledge_found = false;
            continue;
        };
        let origin = match config.elevated_probe_origin {
            ElevatedProbeOrigin::Pelvis => pelvis,
            ElevatedProbeOrigin::Root => root,
        };
        let ledge = probe_elevated(
            &collision,
            &config,
            origin,
            forward,
            up,
            config.climbing_front_offset,
            config.elevated_lift_height,
        );
        state.ledge_found = ledge.hit;
        if !ledge.hit {
            continue;
        }
        state.ledge_height_point = ledge.contact_point;

        if !ledge_accepted(
            pelvis.z,
            ledge.contact_point.z,
            config.vertical_acceptance_height,
        ) {
            debug!(
                "{:?} ledge at z={} rejected (pelvis z={})",
                entity, ledge.contact_point.z, pelvis.z
            );
            continue;
        }
        debug!(
            "{:?} ledge accepted at {:?} (wall: {})",
            entity, ledge.contact_point, wall.hit
        );
        attempt_hang(
            &mut commands,
            HangSubject {
                entity,
                transform,
                state: &mut state,
                movement: &mut movement,
                rigidbody: &mut rigidbody,
                montage: montage.as_deref_mut(),
            },
            &config,
            montages.as_deref(),
        );
    }
}

/// Move a hanging character into climbing up or dropping down.
pub fn traversal_request_observer(
    trigger: On<TraversalRequest>,
    mut commands: Commands,
    config: Res<TraversalConfig>,
    montages: Option<Res<MontageStore>>,
    mut query: Query<(&mut TraversalState, Option<&mut MontagePlayer>)>,
) {
    let request = trigger.event();
    let Ok((mut state, mut montage)) = query.get_mut(request.entity) else {
        return;
    };
    if state.mode != TraversalMode::Hanging {
        debug!(
            "{:?} ignoring {:?} while {}",
            request.entity, request.action, state.mode
        );
        return;
    }
    change_mode(
        &mut commands,
        request.entity,
        &mut state,
        request.action.target_mode(),
    );

    let key = match request.action.target_mode() {
        TraversalMode::ClimbingUp => config.climb_up_montage.as_deref(),
        _ => config.drop_down_montage.as_deref(),
    };
    match key {
        Some(key) => start_montage(
            request.entity,
            montage.as_deref_mut(),
            montages.as_deref(),
            key,
            false,
        ),
        None => {
            if let Some(player) = montage.as_deref_mut() {
                player.stop();
            }
        }
    }
}

/// Return a character to ground locomotion.
pub fn traversal_finished_observer(
    trigger: On<TraversalFinished>,
    mut commands: Commands,
    mut query: Query<(
        &mut TraversalState,
        &mut MovementMode,
        &mut RigidBody,
        Option<&mut MontagePlayer>,
    )>,
) {
    let entity = trigger.event().entity;
    let Ok((mut state, mut movement, mut rigidbody, montage)) = query.get_mut(entity) else {
        return;
    };
    if state.mode.is_grounded() {
        return;
    }
    change_mode(&mut commands, entity, &mut state, TraversalMode::Grounded);
    *movement = MovementMode::Walking;
    rigidbody.set_force_enabled(GRAVITY_FORCE, true);
    if let Some(mut player) = montage {
        player.stop();
    }
}

/// Finish a climb-up or drop-down when its montage reaches the configured notify.
pub fn climb_notify_observer(
    trigger: On<MontageNotify>,
    mut commands: Commands,
    config: Res<TraversalConfig>,
    query: Query<&TraversalState>,
) {
    let notify = trigger.event();
    if notify.name != config.climb_finished_notify {
        return;
    }
    let Ok(state) = query.get(notify.entity) else {
        return;
    };
    if matches!(
        state.mode,
        TraversalMode::ClimbingUp | TraversalMode::DroppingDown
    ) {
        commands.trigger(TraversalFinished {
            entity: notify.entity,
        });
    }
}
