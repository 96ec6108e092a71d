//! Playback Events
//!
//! Event-based communication for UI synchronization. The manager buffers
//! events as state changes and hands them out through
//! [`PlaybackManager::drain_events`](crate::PlaybackManager::drain_events).

use crate::types::TransportState;
use cadence_audio::BAND_COUNT;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new transport state
        state: TransportState,
        /// Derived playing flag
        is_playing: bool,
    },

    /// A different track was loaded
    TrackChanged {
        /// Identity of the new (current) track
        track_id: String,
        /// Identity of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Track finished playing naturally (reached end)
    TrackFinished {
        /// Identity of the finished track
        track_id: String,
    },

    /// Position update, in seconds
    PositionUpdate {
        /// Current playback position
        position: f64,
        /// Total track duration (0 when unknown)
        duration: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// New linear level (0.0-1.0)
        level: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Queue changed (tracks added/removed/consumed)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Shuffle toggled
    ShuffleChanged {
        /// New state
        enabled: bool,
    },

    /// Repeat toggled
    RepeatChanged {
        /// New state
        enabled: bool,
    },

    /// Equalizer gains changed
    EqualizerChanged {
        /// Gains in dB, one per band
        gains: [f32; BAND_COUNT],
    },

    /// Recently played ledger changed
    HistoryChanged {
        /// New ledger length
        length: usize,
    },

    /// Error occurred during playback
    Error {
        /// Error message
        message: String,
    },
}
