//! World assembly.
//!
//! Everything needed to stand up a traversal-capable world: resource setup,
//! observer registration, the per-tick update schedule and character
//! spawning. It also builds the headless demo scene run by the binary: a
//! floor, a wall whose top is a reachable ledge, and one character walking
//! into it.

use bevy_ecs::observer::{Observer, On};
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::info;
use thiserror::Error;

use crate::components::animation::MontagePlayer;
use crate::components::capsule::CapsuleCollider;
use crate::components::inputcontrolled::{Locomotion, LocomotionInput};
use crate::components::movementmode::MovementMode;
use crate::components::rigidbody::RigidBody;
use crate::components::sockets::SkeletalSockets;
use crate::components::transform::WorldTransform;
use crate::components::traversal::{TraversalMode, TraversalState};
use crate::events::alignment::AlignmentFinished;
use crate::events::switchdebug::{SwitchDebugEvent, switch_debug_observer};
use crate::events::traversal::{TraversalAction, TraversalModeChanged, TraversalRequest};
use crate::resources::collision::CollisionWorld;
use crate::resources::debugmode::{DebugMode, DebugShapes};
use crate::resources::montagestore::{MontageDef, MontageStore};
use crate::resources::staticgeometry::{StaticBox, StaticGeometry};
use crate::resources::traversalconfig::TraversalConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::alignment::pose_tween_system;
use crate::systems::debugdraw::probe_debug_system;
use crate::systems::locomotion::locomotion_input_system;
use crate::systems::montage::montage_system;
use crate::systems::movement::movement_system;
use crate::systems::time::update_world_time;
use crate::systems::traversal::{
    climb_notify_observer, traversal_finished_observer, traversal_probe_system,
    traversal_request_observer,
};

pub const CAPSULE_RADIUS: f32 = 42.0;
pub const CAPSULE_HALF_HEIGHT: f32 = 96.0;

/// A required collaborator is missing from the world.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WiringError {
    #[error("no CollisionWorld resource; ledge probes need a collision service")]
    MissingCollisionWorld,
    #[error("no TraversalConfig resource")]
    MissingConfig,
    #[error("character skeleton has no '{0}' socket")]
    MissingSocket(String),
}

/// Transitions recorded by the demo scene, in order.
#[derive(Resource, Debug, Default)]
pub struct TraversalLog {
    pub transitions: Vec<TraversalModeChanged>,
}

fn record_mode_change_observer(trigger: On<TraversalModeChanged>, mut log: ResMut<TraversalLog>) {
    log.transitions.push(*trigger.event());
}

/// Insert the shared resources every traversal world needs.
pub fn setup_world(
    world: &mut World,
    config: TraversalConfig,
    montages: MontageStore,
    collision: CollisionWorld,
) {
    world.insert_resource(WorldTime::default());
    world.insert_resource(config);
    world.insert_resource(montages);
    world.insert_resource(collision);
    world.insert_resource(DebugShapes::default());
}

/// Register the traversal observers.
pub fn register_observers(world: &mut World) {
    world.spawn(Observer::new(traversal_request_observer));
    world.spawn(Observer::new(traversal_finished_observer));
    world.spawn(Observer::new(climb_notify_observer));
    world.spawn(Observer::new(switch_debug_observer));
    // Observers must exist before any system triggers events.
    world.flush();
}

/// Turn probe visualisation on or off through [`SwitchDebugEvent`].
///
/// Needs the observers from [`register_observers`].
pub fn set_debug(world: &mut World, enabled: bool) {
    if world.contains_resource::<DebugMode>() != enabled {
        world.trigger(SwitchDebugEvent {});
        world.flush();
    }
}

/// Per-tick update schedule, in execution order.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            locomotion_input_system,
            movement_system,
            traversal_probe_system,
            pose_tween_system,
            montage_system,
            probe_debug_system,
        )
            .chain(),
    );
    update
}

/// Spawn a character with everything the traversal controller drives.
///
/// Fails when the world lacks the collision service or the configuration,
/// or when `sockets` has no socket named by
/// [`TraversalConfig::pelvis_socket`].
pub fn spawn_character(
    world: &mut World,
    transform: WorldTransform,
    sockets: SkeletalSockets,
) -> Result<Entity, WiringError> {
    if !world.contains_resource::<CollisionWorld>() {
        return Err(WiringError::MissingCollisionWorld);
    }
    let config = world
        .get_resource::<TraversalConfig>()
        .ok_or(WiringError::MissingConfig)?;
    if !sockets.has_socket(&config.pelvis_socket) {
        return Err(WiringError::MissingSocket(config.pelvis_socket.clone()));
    }
    let rigidbody = RigidBody::with_gravity(config.gravity);
    let locomotion = Locomotion::new(config.walk_speed, config.jump_velocity);

    let entity = world
        .spawn((
            transform,
            CapsuleCollider::new(CAPSULE_RADIUS, CAPSULE_HALF_HEIGHT),
            rigidbody,
            MovementMode::Walking,
            locomotion,
            LocomotionInput::default(),
            TraversalState::new(),
            sockets,
            MontagePlayer::new(),
        ))
        .id();
    info!(
        "Spawned character {:?} at {:?}",
        entity, transform.translation
    );
    Ok(entity)
}

/// Advance the world by one tick.
pub fn step(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
}

// ---------------------------------------------------------------------------
// Demo scene
// ---------------------------------------------------------------------------

/// Floor at z = 0 and a wall spanning x = 100..200 whose top, at z = 170, is
/// the ledge.
pub fn demo_geometry() -> StaticGeometry {
    StaticGeometry::new()
        .with_box(StaticBox::from_corners(
            Vec3::new(-2000.0, -2000.0, -50.0),
            Vec3::new(2000.0, 2000.0, 0.0),
        ))
        .with_box(StaticBox::from_corners(
            Vec3::new(100.0, -300.0, 0.0),
            Vec3::new(200.0, 300.0, 170.0),
        ))
}

/// Montages used when no library is supplied.
pub fn demo_montages() -> MontageStore {
    MontageStore::new()
        .with_montage("Hang", MontageDef::new(0.8))
        .with_montage(
            "ClimbUp",
            MontageDef::new(1.2).with_notify("ClimbUpFinished", 1.1),
        )
        .with_montage(
            "DropDown",
            MontageDef::new(0.6).with_notify("ClimbUpFinished", 0.5),
        )
}

/// Defaults with the demo's climb and drop montages bound.
pub fn demo_config() -> TraversalConfig {
    TraversalConfig {
        climb_up_montage: Some("ClimbUp".to_string()),
        drop_down_montage: Some("DropDown".to_string()),
        ..TraversalConfig::new()
    }
}

/// The demo character climbs as soon as it is aligned...
fn demo_climb_when_aligned(trigger: On<AlignmentFinished>, mut commands: Commands) {
    commands.trigger(TraversalRequest {
        entity: trigger.event().entity,
        action: TraversalAction::ClimbUp,
    });
}

/// ...and walks back out once the climb is over.
fn demo_back_off_after_climb(
    trigger: On<TraversalModeChanged>,
    mut query: Query<&mut LocomotionInput>,
) {
    let ev = trigger.event();
    if ev.from == TraversalMode::ClimbingUp
        && ev.to == TraversalMode::Grounded
        && let Ok(mut input) = query.get_mut(ev.entity)
    {
        input.forward_axis = -1.0;
    }
}

/// Build the demo world and spawn its character walking towards the wall.
pub fn setup_demo(
    world: &mut World,
    config: TraversalConfig,
    montages: MontageStore,
    debug: bool,
) -> Result<Entity, WiringError> {
    setup_world(world, config, montages, CollisionWorld::new(demo_geometry()));
    world.insert_resource(TraversalLog::default());
    register_observers(world);
    set_debug(world, debug);
    world.spawn(Observer::new(record_mode_change_observer));
    world.spawn(Observer::new(demo_climb_when_aligned));
    world.spawn(Observer::new(demo_back_off_after_climb));
    world.flush();

    let character = spawn_character(
        world,
        WorldTransform::from_translation(Vec3::new(0.0, 0.0, CAPSULE_HALF_HEIGHT)),
        SkeletalSockets::new().with_socket("pelvis", Vec3::ZERO),
    )?;
    if let Some(mut input) = world.get_mut::<LocomotionInput>(character) {
        input.forward_axis = 1.0;
    }
    Ok(character)
}
