//! Locomotion input handlers.
//!
//! The input binding writes raw axes into [`LocomotionInput`]; this module
//! turns them into movement intent on [`Locomotion`]. Every handler is a
//! no-op while the character is not grounded in the traversal sense
//! (hanging, climbing up, dropping down), so stick input cannot drag a
//! hanging character off its ledge.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};

use crate::components::inputcontrolled::{Locomotion, LocomotionInput};
use crate::components::traversal::TraversalState;

fn control_axis(control_yaw: f32, local_axis: Vec3) -> Vec3 {
    Quat::from_rotation_z(control_yaw.to_radians()) * local_axis
}

/// Add forward/backward intent along the control yaw.
pub fn move_forward(
    state: &TraversalState,
    locomotion: &mut Locomotion,
    control_yaw: f32,
    value: f32,
) {
    if !state.accepts_locomotion_input() || value == 0.0 {
        return;
    }
    locomotion.add_movement_input(control_axis(control_yaw, Vec3::X), value);
}

/// Add strafe intent, perpendicular to the control yaw.
pub fn move_right(
    state: &TraversalState,
    locomotion: &mut Locomotion,
    control_yaw: f32,
    value: f32,
) {
    if !state.accepts_locomotion_input() || value == 0.0 {
        return;
    }
    locomotion.add_movement_input(control_axis(control_yaw, Vec3::Y), value);
}

/// Request a jump on the next movement step.
pub fn jump(state: &TraversalState, locomotion: &mut Locomotion) {
    if !state.accepts_locomotion_input() {
        return;
    }
    locomotion.jump_requested = true;
}

/// Route each character's raw input through the handlers.
pub fn locomotion_input_system(
    mut query: Query<(&mut LocomotionInput, &TraversalState, &mut Locomotion)>,
) {
    for (mut input, state, mut locomotion) in query.iter_mut() {
        move_forward(state, &mut locomotion, input.control_yaw, input.forward_axis);
        move_right(state, &mut locomotion, input.control_yaw, input.right_axis);
        if input.jump {
            jump(state, &mut locomotion);
            input.jump = false;
        }
    }
}
