//! Traversal state owned by the ledge controller.
//!
//! A single [`TraversalMode`] replaces independent "is hanging" / "is
//! climbing" booleans so that only valid combinations can be represented.
//! [`TraversalState`] additionally caches the most recent probe hits. The
//! cached points are only meaningful while their availability flag says so;
//! after a miss they keep the previous hit's values.

use bevy_ecs::prelude::Component;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Current traversal mode of a character.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraversalMode {
    /// Normal ground locomotion. Probing runs every tick.
    #[default]
    Grounded,
    /// Suspended from a ledge.
    Hanging,
    /// Pulling up over the ledge.
    ClimbingUp,
    /// Letting go of the ledge.
    DroppingDown,
}

impl TraversalMode {
    pub fn is_grounded(self) -> bool {
        matches!(self, TraversalMode::Grounded)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TraversalMode::Grounded => "grounded",
            TraversalMode::Hanging => "hanging",
            TraversalMode::ClimbingUp => "climbing_up",
            TraversalMode::DroppingDown => "dropping_down",
        }
    }
}

impl std::fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-character traversal state, mutated once per tick by
/// [`traversal_probe_system`](crate::systems::traversal::traversal_probe_system).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraversalState {
    /// Current traversal mode.
    pub mode: TraversalMode,
    /// Whether this tick's forward probe hit a surface.
    pub wall_available: bool,
    /// Sweep location of the last forward-probe hit.
    pub wall_contact_point: Vec3,
    /// Surface normal of the last forward-probe hit.
    pub wall_contact_normal: Vec3,
    /// Whether this tick's elevated probe hit a surface.
    pub ledge_found: bool,
    /// Sweep location of the last elevated-probe hit.
    pub ledge_height_point: Vec3,
}

impl TraversalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether movement input may be applied this tick.
    pub fn accepts_locomotion_input(&self) -> bool {
        self.mode.is_grounded()
    }

    /// Wall hit, gated on availability.
    pub fn wall_contact(&self) -> Option<(Vec3, Vec3)> {
        self.wall_available
            .then_some((self.wall_contact_point, self.wall_contact_normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_grounded_without_wall() {
        let state = TraversalState::new();
        assert_eq!(state.mode, TraversalMode::Grounded);
        assert!(!state.wall_available);
        assert!(state.wall_contact().is_none());
        assert!(state.accepts_locomotion_input());
    }

    #[test]
    fn test_only_grounded_accepts_input() {
        for mode in [
            TraversalMode::Hanging,
            TraversalMode::ClimbingUp,
            TraversalMode::DroppingDown,
        ] {
            let state = TraversalState {
                mode,
                ..Default::default()
            };
            assert!(!state.accepts_locomotion_input(), "{mode}");
        }
    }

    #[test]
    fn test_wall_contact_is_gated_on_availability() {
        let mut state = TraversalState {
            wall_available: true,
            wall_contact_point: Vec3::new(50.0, 0.0, 0.0),
            wall_contact_normal: -Vec3::X,
            ..Default::default()
        };
        assert_eq!(
            state.wall_contact(),
            Some((Vec3::new(50.0, 0.0, 0.0), -Vec3::X))
        );

        // stale data stays in place but is no longer exposed
        state.wall_available = false;
        assert!(state.wall_contact().is_none());
        assert_eq!(state.wall_contact_point, Vec3::new(50.0, 0.0, 0.0));
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(TraversalMode::ClimbingUp.to_string(), "climbing_up");
        assert_eq!(TraversalMode::default().to_string(), "grounded");
    }
}
