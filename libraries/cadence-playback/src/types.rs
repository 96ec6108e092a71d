//! Core types for playback management

use cadence_audio::BAND_COUNT;
use cadence_core::{QueueEntry, Track};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag attached to every source assignment
///
/// Ids increase monotonically; device events carrying an older id belong to
/// a superseded load and are discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadRequestId(u64);

impl LoadRequestId {
    /// Wrap a raw id
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The id that follows this one
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw counter value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Transport state of the single output resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// No source assigned
    Idle,

    /// Source assigned, waiting for the device to report it can play
    Loading,

    /// Source ready; start requested or awaiting a resume
    Ready,

    /// Device reports audio is flowing
    Playing,

    /// Device reports playback is paused
    Paused,

    /// Source played to its end
    Ended,
}

/// Configuration for playback manager
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Maximum recently played entries (default: 20)
    pub history_limit: usize,

    /// Initial linear volume, 0.0-1.0 (default: 1.0)
    pub volume: f32,

    /// Start with shuffle enabled (default: false)
    pub shuffle: bool,

    /// Start with single-track repeat enabled (default: false)
    pub repeat: bool,

    /// Fixed seed for shuffle orders; random when unset
    pub shuffle_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            history_limit: crate::history::HISTORY_LIMIT,
            volume: 1.0,
            shuffle: false,
            repeat: false,
            shuffle_seed: None,
        }
    }
}

/// Read-only view of the playback state handed to UI surfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    /// Track loaded into the device
    pub current_track: Option<Track>,

    /// Audio is flowing (or will as soon as the pending load is ready)
    pub is_playing: bool,

    /// Position in seconds
    pub current_time: f64,

    /// Length of the current source in seconds (0 until metadata loads)
    pub duration: f64,

    /// Linear volume, 0.0-1.0
    pub volume: f32,

    /// Mute flag
    pub is_muted: bool,

    /// Shuffle enabled
    pub is_shuffled: bool,

    /// Single-track repeat enabled
    pub is_repeating: bool,

    /// Permutation of collection indices while shuffled
    pub shuffle_order: Vec<usize>,

    /// Position inside `shuffle_order`
    pub shuffle_cursor: usize,

    /// Detailed transport state
    pub transport: TransportState,

    /// Upcoming user-queued tracks
    pub queue: Vec<QueueEntry>,

    /// Equalizer gains in dB
    pub equalizer_gains: [f32; BAND_COUNT],
}
