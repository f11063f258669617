//! Movement mode component read by the movement system.

use bevy_ecs::prelude::Component;

/// How the movement system integrates a character's body this tick.
///
/// - `Walking`: planar motion on the ground, vertical velocity discarded.
/// - `Falling`: ballistic motion under the body's enabled forces until a
///   landing sweep finds walkable ground.
/// - `Flying`: unconstrained motion, no ground handling. Used while hanging
///   so the character neither falls nor snaps back to the floor.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MovementMode {
    #[default]
    Walking,
    Falling,
    Flying,
}
