//! Error types for playback management

use thiserror::Error;

/// Errors reported by a [`PlaybackDevice`](crate::PlaybackDevice)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// Host refused to start playback (e.g. autoplay without a user gesture)
    #[error("Playback denied: {0}")]
    PlaybackDenied(String),

    /// Source could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// No output is available
    #[error("Audio output unavailable")]
    Unavailable,
}

/// Playback errors
///
/// These never escape the engine's public operations: they are logged,
/// turned into a [`PlaybackEvent::Error`](crate::PlaybackEvent::Error) and
/// the state is rolled back.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track descriptor cannot be played
    #[error(transparent)]
    InvalidTrack(#[from] cadence_core::CoreError),

    /// Device refused or failed an operation
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
