//! Typed access to the player's durable surfaces
//!
//! Keys mirror the surfaces a player persists between sessions. Loaders
//! degrade to the surface default on any failure; savers report errors so
//! the caller can log them and carry on.

use crate::error::Result;
use crate::kv::KeyValueStore;
use cadence_core::{QueueEntry, RecentEntry, Track};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

// Surface key constants
/// Equalizer gain vector (`[f32]`, dB)
pub const KEY_EQUALIZER: &str = "player.equalizer";

/// Volume level and mute flag
pub const KEY_VOLUME: &str = "player.volume";

/// Play queue (`[QueueEntry]`)
pub const KEY_QUEUE: &str = "player.queue";

/// Recently played ledger (`[RecentEntry]`, most recent first)
pub const KEY_RECENT: &str = "player.recent";

/// Track that was current when the session ended
pub const KEY_CURRENT_TRACK: &str = "player.current_track";

/// Persisted volume surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeSetting {
    /// Linear level in `[0, 1]`
    pub level: f32,

    /// Mute flag (level is kept while muted)
    #[serde(default)]
    pub muted: bool,
}

impl Default for VolumeSetting {
    fn default() -> Self {
        Self {
            level: 1.0,
            muted: false,
        }
    }
}

/// Typed facade over a [`KeyValueStore`]
#[derive(Clone)]
pub struct PlayerStorage {
    backend: Arc<dyn KeyValueStore>,
}

impl PlayerStorage {
    /// Wrap a backend
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Underlying backend
    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    // ===== Equalizer =====

    /// Stored gain vector, empty when absent or unreadable
    pub fn load_equalizer(&self) -> Vec<f32> {
        self.load_json(KEY_EQUALIZER).unwrap_or_default()
    }

    /// Persist the gain vector
    pub fn save_equalizer(&self, gains: &[f32]) -> Result<()> {
        self.save_json(KEY_EQUALIZER, &gains)
    }

    // ===== Volume =====

    /// Stored volume, full and unmuted when absent or unreadable
    pub fn load_volume(&self) -> VolumeSetting {
        self.load_json(KEY_VOLUME).unwrap_or_default()
    }

    /// Persist volume and mute flag
    pub fn save_volume(&self, volume: &VolumeSetting) -> Result<()> {
        self.save_json(KEY_VOLUME, volume)
    }

    // ===== Queue =====

    /// Stored play queue, empty when absent or unreadable
    pub fn load_queue(&self) -> Vec<QueueEntry> {
        self.load_json(KEY_QUEUE).unwrap_or_default()
    }

    /// Rewrite the whole queue
    pub fn save_queue(&self, entries: &[QueueEntry]) -> Result<()> {
        self.save_json(KEY_QUEUE, &entries)
    }

    // ===== Recently played =====

    /// Stored ledger, empty when absent or unreadable
    pub fn load_recent(&self) -> Vec<RecentEntry> {
        self.load_json(KEY_RECENT).unwrap_or_default()
    }

    /// Rewrite the whole ledger
    pub fn save_recent(&self, entries: &[RecentEntry]) -> Result<()> {
        self.save_json(KEY_RECENT, &entries)
    }

    // ===== Current track =====

    /// Track that was current last session
    pub fn load_current_track(&self) -> Option<Track> {
        self.load_json(KEY_CURRENT_TRACK)
    }

    /// Remember the current track, or forget it with `None`
    pub fn save_current_track(&self, track: Option<&Track>) -> Result<()> {
        match track {
            Some(track) => self.save_json(KEY_CURRENT_TRACK, track),
            None => self.backend.remove(KEY_CURRENT_TRACK),
        }
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read '{}', using default: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Malformed JSON under '{}', using default: {}", key, e);
                None
            }
        }
    }

    fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.backend.set(key, &json)
    }
}
