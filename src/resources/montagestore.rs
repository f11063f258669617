//! Montage resource registry.
//!
//! Minimal store for animation montage definitions shared by every
//! character. The montage system looks a clip up by its string key to know
//! how long it runs and which named notifies fire along its timeline.
//!
//! Definitions can be loaded from JSON:
//!
//! ```json
//! {
//!   "Hang":    { "length": 0.8 },
//!   "ClimbUp": { "length": 1.2, "notifies": [{ "name": "ClimbUpFinished", "time": 1.1 }] }
//! }
//! ```

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MontageStoreError {
    #[error("failed to read montage file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse montage definitions")]
    Parse(#[from] serde_json::Error),
    #[error("montage '{key}' has invalid length {length}")]
    InvalidLength { key: String, length: f32 },
    #[error("notify '{name}' of montage '{key}' lies outside the clip")]
    NotifyOutOfRange { key: String, name: String },
}

/// A named event placed on a montage timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MontageNotifyDef {
    pub name: String,
    /// Seconds from the start of the clip.
    pub time: f32,
}

/// Immutable data describing one montage clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MontageDef {
    /// Clip length in seconds.
    pub length: f32,
    #[serde(default)]
    pub looped: bool,
    #[serde(default)]
    pub notifies: SmallVec<[MontageNotifyDef; 4]>,
}

impl MontageDef {
    pub fn new(length: f32) -> Self {
        Self {
            length,
            looped: false,
            notifies: SmallVec::new(),
        }
    }

    pub fn with_notify(mut self, name: impl Into<String>, time: f32) -> Self {
        self.notifies.push(MontageNotifyDef {
            name: name.into(),
            time,
        });
        self
    }

    /// Notifies whose time lies in `(from, to]`.
    pub fn notifies_between(&self, from: f32, to: f32) -> impl Iterator<Item = &MontageNotifyDef> {
        self.notifies
            .iter()
            .filter(move |n| n.time > from && n.time <= to)
    }

    /// Notifies whose time lies in `[from, to]`, for the first advance of a
    /// clip that has just started at `from`.
    pub fn notifies_from(&self, from: f32, to: f32) -> impl Iterator<Item = &MontageNotifyDef> {
        self.notifies
            .iter()
            .filter(move |n| n.time >= from && n.time <= to)
    }
}

/// Central registry of montage definitions keyed by string IDs.
#[derive(Resource, Debug, Clone, Default)]
pub struct MontageStore {
    pub montages: FxHashMap<String, MontageDef>,
}

impl MontageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, def: MontageDef) {
        self.montages.insert(key.into(), def);
    }

    pub fn with_montage(mut self, key: impl Into<String>, def: MontageDef) -> Self {
        self.insert(key, def);
        self
    }

    pub fn get(&self, key: &str) -> Option<&MontageDef> {
        self.montages.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.montages.contains_key(key)
    }

    pub fn from_json_str(text: &str) -> Result<Self, MontageStoreError> {
        let montages: FxHashMap<String, MontageDef> = serde_json::from_str(text)?;
        for (key, def) in &montages {
            if !(def.length > 0.0) {
                return Err(MontageStoreError::InvalidLength {
                    key: key.clone(),
                    length: def.length,
                });
            }
            if let Some(n) = def
                .notifies
                .iter()
                .find(|n| n.time < 0.0 || n.time > def.length)
            {
                return Err(MontageStoreError::NotifyOutOfRange {
                    key: key.clone(),
                    name: n.name.clone(),
                });
            }
        }
        Ok(Self { montages })
    }

    pub fn load_json(path: &Path) -> Result<Self, MontageStoreError> {
        let text = std::fs::read_to_string(path).map_err(|source| MontageStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
