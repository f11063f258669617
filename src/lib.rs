//! parkourcore library.
//!
//! A ledge traversal controller for third-person characters, built on
//! `bevy_ecs`. Characters walk, fall and jump as usual; every tick two sphere
//! probes look for a climbable ledge in front of them, and when one is
//! accepted the character switches to a hanging mode and is snapped against
//! the wall. Climbing up and dropping down are driven by events.
//!
//! The crate exposes its components, resources, systems and events so a host
//! engine can plug in its own collision service and animation data, plus a
//! [`game`] module that assembles a complete world.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
