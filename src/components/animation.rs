//! Montage playback state carried by each character.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Playback state of the montage currently bound to a character.
///
/// Clip data (length, notifies) lives in
/// [`MontageStore`](crate::resources::montagestore::MontageStore); this
/// component only tracks which clip is active and where its playhead is.
#[derive(Debug, Clone, Default, Component, Serialize, Deserialize)]
pub struct MontagePlayer {
    /// Key of the active montage, `None` when nothing is playing.
    pub montage_key: Option<String>,
    /// Playhead in seconds.
    pub position: f32,
    /// Playback rate. Zero holds the current pose.
    pub play_rate: f32,
    pub paused: bool,
    /// Set by [`play`](Self::play) until the first advance, which also fires
    /// notifies sitting exactly on the start position.
    #[serde(default)]
    pub fresh: bool,
}

impl MontagePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `key` from `start_position` at normal speed.
    pub fn play(&mut self, key: impl Into<String>, start_position: f32) {
        self.montage_key = Some(key.into());
        self.position = start_position;
        self.play_rate = 1.0;
        self.paused = false;
        self.fresh = true;
    }

    /// Start `key` and immediately hold its first frame.
    pub fn play_paused(&mut self, key: impl Into<String>) {
        self.play(key, 0.0);
        self.play_rate = 0.0;
        self.paused = true;
    }

    pub fn stop(&mut self) {
        self.montage_key = None;
        self.position = 0.0;
        self.paused = false;
        self.fresh = false;
    }

    pub fn is_playing(&self, key: &str) -> bool {
        self.montage_key.as_deref() == Some(key)
    }
}
