//! Integration tests for the ledge traversal controller.
//!
//! Each test builds a bare `World`, wires the resources the systems need and
//! drives them with one-system (or full) schedules. Collision is provided by
//! closures so every probe outcome can be scripted exactly.
//!
//! Covered:
//! 1. **Forward probe** - wall detection updates the traversal state
//! 2. **Ledge acceptance** - the inclusive vertical window around the pelvis
//! 3. **Hang entry** - zero velocity, flying movement, alignment or not
//! 4. **Alignment** - stand-off along the wall normal and facing into it
//! 5. **Input gating** - handlers do nothing while off the ground
//! 6. **Round trip** - finishing a traversal restores input on the next tick
//! 7. **Demo scene** - the full schedule against box geometry

use std::sync::{Arc, Mutex};

use bevy_ecs::prelude::*;
use glam::Vec3;

use parkourcore::components::inputcontrolled::{Locomotion, LocomotionInput};
use parkourcore::components::movementmode::MovementMode;
use parkourcore::components::rigidbody::{GRAVITY_FORCE, RigidBody};
use parkourcore::components::sockets::SkeletalSockets;
use parkourcore::components::transform::WorldTransform;
use parkourcore::components::traversal::{TraversalMode, TraversalState};
use parkourcore::components::tween::PoseTween;
use parkourcore::events::traversal::{TraversalAction, TraversalFinished, TraversalRequest};
use parkourcore::game::{
    TraversalLog, build_update_schedule, demo_config, demo_montages, register_observers,
    setup_demo, setup_world, spawn_character, step,
};
use parkourcore::resources::collision::{CollisionChannel, CollisionWorld, ProbeRequest, SweepHit};
use parkourcore::resources::montagestore::MontageStore;
use parkourcore::resources::staticgeometry::{StaticBox, StaticGeometry};
use parkourcore::resources::traversalconfig::{ElevatedProbeOrigin, TraversalConfig};
use parkourcore::resources::worldtime::WorldTime;
use parkourcore::systems::alignment::pose_tween_system;
use parkourcore::systems::locomotion::locomotion_input_system;
use parkourcore::systems::movement::movement_system;
use parkourcore::systems::traversal::traversal_probe_system;

const EPSILON: f32 = 1e-3;

// =============================================================================
// Helpers
// =============================================================================

fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

fn hit_at(location: Vec3, normal: Vec3) -> SweepHit {
    SweepHit {
        location,
        impact_point: location,
        normal,
        time: 0.5,
        start_penetrating: false,
    }
}

/// Collision double answering the forward (horizontal) and elevated
/// (vertical) probes separately. Pawn-channel sweeps never hit.
fn scripted_collision(forward: Option<SweepHit>, elevated: Option<SweepHit>) -> CollisionWorld {
    CollisionWorld::new(move |req: &ProbeRequest| {
        if req.channel != CollisionChannel::Visibility {
            return None;
        }
        let delta = req.end - req.start;
        if delta.truncate().length() < 1e-3 {
            elevated
        } else {
            forward
        }
    })
}

fn traversal_world(collision: CollisionWorld) -> World {
    let mut world = World::new();
    setup_world(
        &mut world,
        TraversalConfig::new(),
        MontageStore::new(),
        collision,
    );
    register_observers(&mut world);
    world
}

/// Character at the origin facing +X, pelvis on the root.
fn spawn_at_origin(world: &mut World) -> Entity {
    spawn_character(
        world,
        WorldTransform::default(),
        SkeletalSockets::new().with_socket("pelvis", Vec3::ZERO),
    )
    .unwrap()
}

fn run_probe(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(traversal_probe_system);
    schedule.run(world);
}

fn run_tween(world: &mut World, dt: f32) {
    world.resource_mut::<WorldTime>().delta = dt;
    let mut schedule = Schedule::default();
    schedule.add_systems(pose_tween_system);
    schedule.run(world);
}

fn state_of(world: &World, entity: Entity) -> TraversalState {
    *world.get::<TraversalState>(entity).unwrap()
}

// =============================================================================
// Forward probe
// =============================================================================

#[test]
fn forward_probe_records_wall_contact() {
    let mut world = traversal_world(scripted_collision(
        Some(hit_at(Vec3::new(50.0, 0.0, 0.0), -Vec3::X)),
        None,
    ));
    let e = spawn_at_origin(&mut world);

    run_probe(&mut world);

    let state = state_of(&world, e);
    assert!(state.wall_available);
    assert_eq!(state.wall_contact_point, Vec3::new(50.0, 0.0, 0.0));
    assert_eq!(state.wall_contact_normal, -Vec3::X);
    assert!(!state.ledge_found);
    assert_eq!(state.mode, TraversalMode::Grounded);
}

#[test]
fn forward_probe_miss_clears_availability_but_keeps_stale_point() {
    let mut world = traversal_world(scripted_collision(
        Some(hit_at(Vec3::new(50.0, 0.0, 0.0), -Vec3::X)),
        None,
    ));
    let e = spawn_at_origin(&mut world);
    run_probe(&mut world);

    world.insert_resource(scripted_collision(None, None));
    run_probe(&mut world);

    let state = state_of(&world, e);
    assert!(!state.wall_available);
    assert_eq!(state.wall_contact_point, Vec3::new(50.0, 0.0, 0.0));
}

// =============================================================================
// Ledge acceptance
// =============================================================================

#[test]
fn low_ledge_is_accepted_high_ledge_is_not() {
    let mut world = traversal_world(scripted_collision(
        None,
        Some(hit_at(Vec3::new(50.0, 0.0, 40.0), Vec3::Z)),
    ));
    let e = spawn_at_origin(&mut world);
    run_probe(&mut world);
    assert_eq!(state_of(&world, e).mode, TraversalMode::Hanging);

    let mut world = traversal_world(scripted_collision(
        None,
        Some(hit_at(Vec3::new(50.0, 0.0, 250.0), Vec3::Z)),
    ));
    let e = spawn_at_origin(&mut world);
    run_probe(&mut world);
    let state = state_of(&world, e);
    assert_eq!(state.mode, TraversalMode::Grounded);
    assert!(state.ledge_found);
    assert_eq!(state.ledge_height_point.z, 250.0);
}

#[test]
fn acceptance_window_is_inclusive() {
    for (ledge_z, expected) in [
        (100.0, TraversalMode::Hanging),
        (100.01, TraversalMode::Grounded),
        (-100.0, TraversalMode::Hanging),
    ] {
        let mut world = traversal_world(scripted_collision(
            None,
            Some(hit_at(Vec3::new(50.0, 0.0, ledge_z), Vec3::Z)),
        ));
        let e = spawn_at_origin(&mut world);
        run_probe(&mut world);
        assert_eq!(state_of(&world, e).mode, expected, "ledge z = {ledge_z}");
    }
}

/// Elevated sweeps from the actor root while a pelvis sits 60 above it.
/// Records where every vertical sweep started.
fn root_origin_world(ledge_z: f32) -> (World, Entity, Arc<Mutex<Vec<Vec3>>>) {
    let starts = Arc::new(Mutex::new(Vec::new()));
    let recorded = starts.clone();
    let collision = CollisionWorld::new(move |req: &ProbeRequest| {
        if req.channel != CollisionChannel::Visibility {
            return None;
        }
        if (req.end - req.start).truncate().length() > 1e-3 {
            return None;
        }
        recorded.lock().unwrap().push(req.start);
        Some(hit_at(Vec3::new(50.0, 0.0, ledge_z), Vec3::Z))
    });

    let mut world = World::new();
    setup_world(
        &mut world,
        TraversalConfig {
            elevated_probe_origin: ElevatedProbeOrigin::Root,
            ..TraversalConfig::new()
        },
        MontageStore::new(),
        collision,
    );
    register_observers(&mut world);
    let e = spawn_character(
        &mut world,
        WorldTransform::default(),
        SkeletalSockets::new().with_socket("pelvis", Vec3::new(0.0, 0.0, 60.0)),
    )
    .unwrap();
    (world, e, starts)
}

#[test]
fn root_origin_sweeps_from_root_but_measures_from_pelvis() {
    // 90 above the pelvis, 150 above the root.
    let (mut world, e, starts) = root_origin_world(150.0);
    run_probe(&mut world);
    assert_eq!(*starts.lock().unwrap(), vec![Vec3::new(50.0, 0.0, 150.0)]);
    assert_eq!(state_of(&world, e).mode, TraversalMode::Hanging);

    // 45 below the root, 105 below the pelvis.
    let (mut world, e, starts) = root_origin_world(-45.0);
    run_probe(&mut world);
    assert_eq!(*starts.lock().unwrap(), vec![Vec3::new(50.0, 0.0, 150.0)]);
    let state = state_of(&world, e);
    assert_eq!(state.mode, TraversalMode::Grounded);
    assert!(state.ledge_found);
}

// =============================================================================
// Hang entry
// =============================================================================

#[test]
fn hang_always_zeroes_velocity() {
    let mut rng = fastrand::Rng::with_seed(0x1ed6e);
    for _ in 0..32 {
        let mut world = traversal_world(scripted_collision(
            Some(hit_at(Vec3::new(50.0, 0.0, 0.0), -Vec3::X)),
            Some(hit_at(Vec3::new(50.0, 0.0, 40.0), Vec3::Z)),
        ));
        let e = spawn_at_origin(&mut world);
        let velocity = Vec3::new(
            rng.f32() * 2000.0 - 1000.0,
            rng.f32() * 2000.0 - 1000.0,
            rng.f32() * 2000.0 - 1000.0,
        );
        world.get_mut::<RigidBody>(e).unwrap().velocity = velocity;
        *world.get_mut::<MovementMode>(e).unwrap() = MovementMode::Falling;

        run_probe(&mut world);

        let body = world.get::<RigidBody>(e).unwrap();
        assert_eq!(body.velocity, Vec3::ZERO, "from {velocity:?}");
        assert!(!body.is_force_enabled(GRAVITY_FORCE));
        assert_eq!(*world.get::<MovementMode>(e).unwrap(), MovementMode::Flying);
    }
}

#[test]
fn hang_without_wall_issues_no_alignment() {
    let mut world = traversal_world(scripted_collision(
        None,
        Some(hit_at(Vec3::new(50.0, 0.0, 40.0), Vec3::Z)),
    ));
    let e = spawn_at_origin(&mut world);

    run_probe(&mut world);

    assert_eq!(state_of(&world, e).mode, TraversalMode::Hanging);
    assert!(world.get::<PoseTween>(e).is_none());
    assert_eq!(
        world.get::<WorldTransform>(e).unwrap().translation,
        Vec3::ZERO
    );
}

#[test]
fn hanging_character_is_not_reprobed() {
    let mut world = traversal_world(scripted_collision(
        None,
        Some(hit_at(Vec3::new(50.0, 0.0, 40.0), Vec3::Z)),
    ));
    let e = spawn_at_origin(&mut world);
    run_probe(&mut world);

    world.insert_resource(scripted_collision(
        Some(hit_at(Vec3::new(50.0, 0.0, 0.0), -Vec3::X)),
        None,
    ));
    run_probe(&mut world);

    let state = state_of(&world, e);
    assert_eq!(state.mode, TraversalMode::Hanging);
    assert!(!state.wall_available);
    assert!(world.get::<PoseTween>(e).is_none());
}

// =============================================================================
// Alignment
// =============================================================================

#[test]
fn alignment_moves_to_standoff_and_faces_wall() {
    let mut world = traversal_world(scripted_collision(
        Some(hit_at(Vec3::new(50.0, 0.0, 0.0), -Vec3::X)),
        Some(hit_at(Vec3::new(50.0, 0.0, 40.0), Vec3::Z)),
    ));
    let e = spawn_at_origin(&mut world);

    run_probe(&mut world);
    let tween = world.get::<PoseTween>(e).unwrap().clone();
    assert!(vec_approx_eq(
        tween.to_translation,
        Vec3::new(40.0, 0.0, 40.0 - 94.0)
    ));
    assert_eq!(tween.duration, 0.2);

    // One spare tick in case the summed deltas land just short of 0.2.
    for _ in 0..5 {
        run_tween(&mut world, 0.05);
    }

    let transform = world.get::<WorldTransform>(e).unwrap();
    assert!(vec_approx_eq(
        transform.translation,
        Vec3::new(40.0, 0.0, -54.0)
    ));
    assert!(vec_approx_eq(transform.forward(), Vec3::X));
    assert!(world.get::<PoseTween>(e).is_none());
}

#[test]
fn alignment_offset_follows_oblique_normal() {
    let normal = Vec3::new(-0.6, 0.8, 0.0);
    let wall = Vec3::new(45.0, -20.0, 0.0);
    let mut world = traversal_world(scripted_collision(
        Some(hit_at(wall, normal)),
        Some(hit_at(Vec3::new(50.0, 0.0, 40.0), Vec3::Z)),
    ));
    let e = spawn_at_origin(&mut world);

    run_probe(&mut world);

    let tween = world.get::<PoseTween>(e).unwrap();
    let lateral = Vec3::new(tween.to_translation.x, tween.to_translation.y, wall.z);
    assert!(((lateral - wall).length() - 10.0).abs() < EPSILON);
    assert!(vec_approx_eq((lateral - wall).normalize(), normal));
    assert!(vec_approx_eq(tween.to_rotation * Vec3::X, -normal));
}

#[test]
fn leaving_hang_mid_alignment_cancels_move() {
    let mut world = traversal_world(scripted_collision(
        Some(hit_at(Vec3::new(50.0, 0.0, 0.0), -Vec3::X)),
        Some(hit_at(Vec3::new(50.0, 0.0, 40.0), Vec3::Z)),
    ));
    let e = spawn_at_origin(&mut world);
    run_probe(&mut world);
    assert!(world.get::<PoseTween>(e).is_some());

    world.trigger(TraversalRequest {
        entity: e,
        action: TraversalAction::DropDown,
    });
    world.flush();
    run_tween(&mut world, 0.05);

    assert_eq!(state_of(&world, e).mode, TraversalMode::DroppingDown);
    assert!(world.get::<PoseTween>(e).is_none());
}

// =============================================================================
// Input gating and round trip
// =============================================================================

#[test]
fn handlers_are_noops_while_not_grounded() {
    for mode in [
        TraversalMode::Hanging,
        TraversalMode::ClimbingUp,
        TraversalMode::DroppingDown,
    ] {
        let mut world = traversal_world(scripted_collision(None, None));
        let e = spawn_at_origin(&mut world);
        world.get_mut::<TraversalState>(e).unwrap().mode = mode;
        *world.get_mut::<MovementMode>(e).unwrap() = MovementMode::Flying;
        *world.get_mut::<LocomotionInput>(e).unwrap() = LocomotionInput {
            jump: true,
            ..LocomotionInput::new(1.0, 1.0, 0.0)
        };
        world.resource_mut::<WorldTime>().delta = 0.1;

        let mut schedule = Schedule::default();
        schedule.add_systems((locomotion_input_system, movement_system).chain());
        schedule.run(&mut world);

        assert_eq!(
            world.get::<RigidBody>(e).unwrap().velocity,
            Vec3::ZERO,
            "{mode}"
        );
        assert_eq!(
            world.get::<WorldTransform>(e).unwrap().translation,
            Vec3::ZERO,
            "{mode}"
        );
        let loco = world.get::<Locomotion>(e).unwrap();
        assert_eq!(loco.pending_input, Vec3::ZERO, "{mode}");
        assert!(!loco.jump_requested, "{mode}");
    }
}

#[test]
fn finishing_traversal_restores_input_next_tick() {
    let floor = StaticGeometry::new().with_box(StaticBox::from_corners(
        Vec3::new(-1000.0, -1000.0, -50.0),
        Vec3::new(1000.0, 1000.0, 0.0),
    ));
    let mut world = traversal_world(CollisionWorld::new(floor));
    let e = spawn_character(
        &mut world,
        WorldTransform::from_translation(Vec3::new(0.0, 0.0, 96.0)),
        SkeletalSockets::new().with_socket("pelvis", Vec3::ZERO),
    )
    .unwrap();
    {
        let mut state = world.get_mut::<TraversalState>(e).unwrap();
        state.mode = TraversalMode::Hanging;
    }
    *world.get_mut::<MovementMode>(e).unwrap() = MovementMode::Flying;
    world.get_mut::<LocomotionInput>(e).unwrap().forward_axis = 1.0;

    let mut update = build_update_schedule();
    step(&mut world, &mut update, 0.1);
    assert_eq!(world.get::<WorldTransform>(e).unwrap().translation.x, 0.0);

    world.trigger(TraversalFinished { entity: e });
    world.flush();
    assert_eq!(state_of(&world, e).mode, TraversalMode::Grounded);

    step(&mut world, &mut update, 0.1);
    let transform = world.get::<WorldTransform>(e).unwrap();
    assert!((transform.translation.x - 50.0).abs() < EPSILON);
    assert_eq!(*world.get::<MovementMode>(e).unwrap(), MovementMode::Walking);
}

// =============================================================================
// Demo scene
// =============================================================================

#[test]
fn demo_character_hangs_climbs_and_backs_off() {
    let mut world = World::new();
    let e = setup_demo(&mut world, demo_config(), demo_montages(), true).unwrap();
    let mut update = build_update_schedule();

    for _ in 0..240 {
        step(&mut world, &mut update, 1.0 / 60.0);
    }

    let modes: Vec<_> = world
        .resource::<TraversalLog>()
        .transitions
        .iter()
        .map(|t| (t.from, t.to))
        .collect();
    assert_eq!(
        modes,
        vec![
            (TraversalMode::Grounded, TraversalMode::Hanging),
            (TraversalMode::Hanging, TraversalMode::ClimbingUp),
            (TraversalMode::ClimbingUp, TraversalMode::Grounded),
        ]
    );
    let transform = world.get::<WorldTransform>(e).unwrap();
    assert!(transform.translation.x < 0.0);
    assert!((transform.translation.z - 96.0).abs() < EPSILON);
    assert!(vec_approx_eq(transform.forward(), -Vec3::X));
}
