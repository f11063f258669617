//! Named skeletal reference points.
//!
//! Stands in for the skeletal mesh's socket lookup: each socket is an offset
//! in the character's local space, resolved against its
//! [`WorldTransform`](super::transform::WorldTransform) on demand.

use bevy_ecs::prelude::Component;
use glam::Vec3;
use rustc_hash::FxHashMap;

use super::transform::WorldTransform;

#[derive(Component, Clone, Debug, Default)]
pub struct SkeletalSockets {
    pub sockets: FxHashMap<String, Vec3>,
}

impl SkeletalSockets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_socket(mut self, name: impl Into<String>, local_offset: Vec3) -> Self {
        self.sockets.insert(name.into(), local_offset);
        self
    }

    pub fn has_socket(&self, name: &str) -> bool {
        self.sockets.contains_key(name)
    }

    /// World-space position of `name`, or `None` if the socket is unknown.
    pub fn socket_location(&self, name: &str, transform: &WorldTransform) -> Option<Vec3> {
        self.sockets
            .get(name)
            .map(|offset| transform.transform_point(*offset))
    }
}
