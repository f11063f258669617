//! Traversal state machine events.
//!
//! [`TraversalModeChanged`] is triggered by the controller on every mode
//! transition. [`TraversalRequest`] and [`TraversalFinished`] flow the other
//! way: gameplay code (or the montage notify sink) triggers them to move a
//! hanging character on and to hand it back to ground locomotion.
//!
//! # Related
//!
//! - [`crate::systems::traversal::traversal_request_observer`]
//! - [`crate::systems::traversal::traversal_finished_observer`]
//! - [`crate::systems::traversal::climb_notify_observer`]

use bevy_ecs::prelude::*;

use crate::components::traversal::TraversalMode;

/// Emitted after a character's traversal mode changed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalModeChanged {
    pub entity: Entity,
    pub from: TraversalMode,
    pub to: TraversalMode,
}

/// What a hanging character should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalAction {
    ClimbUp,
    DropDown,
}

impl TraversalAction {
    /// Mode entered when the action is accepted.
    pub fn target_mode(self) -> TraversalMode {
        match self {
            TraversalAction::ClimbUp => TraversalMode::ClimbingUp,
            TraversalAction::DropDown => TraversalMode::DroppingDown,
        }
    }
}

/// Ask a hanging character to climb up or drop down. Ignored in any other mode.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalRequest {
    pub entity: Entity,
    pub action: TraversalAction,
}

/// The current climb-up or drop-down is over; return the character to the ground.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalFinished {
    pub entity: Entity,
}
