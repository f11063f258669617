//! Ledge alignment notifications.
//!
//! Triggered by [`crate::systems::alignment::pose_tween_system`] when a
//! move-to-ledge transition ends, either by reaching its duration or by the
//! character leaving the hanging mode first.

use bevy_ecs::prelude::*;

use crate::systems::alignment::AlignmentTarget;

/// The alignment move ran its full duration.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AlignmentFinished {
    pub entity: Entity,
    /// Pose that was requested. The character may stop short of it when the
    /// move was blocked.
    pub target: AlignmentTarget,
}

/// The alignment move was dropped because the character stopped hanging.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentCancelled {
    pub entity: Entity,
}
