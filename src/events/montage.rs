//! Montage playback events.
//!
//! [`crate::systems::montage::montage_system`] triggers a [`MontageNotify`]
//! for every notify whose time the playhead crossed during the tick, and a
//! [`MontageEnded`] when a non-looping clip reaches its end.

use bevy_ecs::prelude::*;

/// A named notify on the active montage was reached.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct MontageNotify {
    pub entity: Entity,
    pub montage: String,
    pub name: String,
}

/// A non-looping montage played to its end.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct MontageEnded {
    pub entity: Entity,
    pub montage: String,
}
