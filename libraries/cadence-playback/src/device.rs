//! Output device abstraction
//!
//! The manager owns exactly one device and never touches audio samples
//! itself. Anything that can play a URL (a media element bridge, a native
//! decoder thread, a simulation) implements [`PlaybackDevice`] and reports
//! what actually happened through [`DeviceEvent`]s.

use crate::error::DeviceError;
use crate::types::LoadRequestId;
use cadence_audio::SharedEqualizer;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Single audio output resource
#[cfg_attr(test, mockall::automock)]
pub trait PlaybackDevice: Send {
    /// Assign a new source; later readiness and errors carry `request`
    fn load(&mut self, url: &str, request: LoadRequestId);

    /// Start or resume the transport
    ///
    /// May be refused, e.g. when the host blocks autoplay.
    fn play(&mut self) -> Result<(), DeviceError>;

    /// Pause the transport
    fn pause(&mut self);

    /// Jump to a position in seconds
    fn seek(&mut self, position: f64);

    /// Set linear output gain (0.0-1.0)
    fn set_volume(&mut self, level: f32);

    /// Loop the current source natively
    fn set_loop(&mut self, enabled: bool);

    /// Filter chain wired into the output path, if the host supports DSP
    fn equalizer(&self) -> Option<SharedEqualizer> {
        None
    }

    /// Events produced since the last poll
    ///
    /// Devices that report from another thread push through
    /// [`PlayerAction::Device`](crate::PlayerAction::Device) instead and can
    /// keep the default.
    fn poll_events(&mut self) -> Vec<DeviceEvent> {
        Vec::new()
    }
}

/// Everything a native media element reports back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeviceEvent {
    /// Playback position moved
    TimeUpdate {
        /// Seconds from the start
        position: f64,
    },

    /// Source length is known
    MetadataLoaded {
        /// Load this belongs to
        request: LoadRequestId,
        /// Seconds
        duration: f64,
    },

    /// Source is buffered enough to start
    CanPlay {
        /// Load this belongs to
        request: LoadRequestId,
    },

    /// Audio started flowing
    Playing,

    /// Audio stopped flowing
    Paused,

    /// Source reached its end
    Ended,

    /// Source failed to load or decode
    Error {
        /// Load this belongs to
        request: LoadRequestId,
        /// Host-provided description
        message: String,
    },
}

/// Device without audio output
///
/// Accepts every call and reports the transitions a real element would,
/// immediately. Sources have no known duration.
#[derive(Debug, Default)]
pub struct NullDevice {
    pending: VecDeque<DeviceEvent>,
    loaded: bool,
}

impl NullDevice {
    /// Create a silent device
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlaybackDevice for NullDevice {
    fn load(&mut self, _url: &str, request: LoadRequestId) {
        self.loaded = true;
        self.pending.push_back(DeviceEvent::CanPlay { request });
    }

    fn play(&mut self) -> Result<(), DeviceError> {
        if !self.loaded {
            return Err(DeviceError::Unavailable);
        }
        self.pending.push_back(DeviceEvent::Playing);
        Ok(())
    }

    fn pause(&mut self) {
        if self.loaded {
            self.pending.push_back(DeviceEvent::Paused);
        }
    }

    fn seek(&mut self, position: f64) {
        self.pending.push_back(DeviceEvent::TimeUpdate { position });
    }

    fn set_volume(&mut self, _level: f32) {}

    fn set_loop(&mut self, _enabled: bool) {}

    fn poll_events(&mut self) -> Vec<DeviceEvent> {
        self.pending.drain(..).collect()
    }
}
