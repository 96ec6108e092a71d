//! Transport state machine
//!
//! Tracks what the device is doing separately from what the user asked for.
//! `is_playing` is derived from both: audio flowing, or a pending load the
//! user wants to hear.

use crate::types::{LoadRequestId, TransportState};
use tracing::debug;

/// Transport state plus user intent and the live load request
#[derive(Debug, Clone)]
pub struct Transport {
    state: TransportState,
    request: LoadRequestId,
    play_intent: bool,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport {
    /// Idle transport, no request issued yet
    pub fn new() -> Self {
        Self {
            state: TransportState::Idle,
            request: LoadRequestId::default(),
            play_intent: false,
        }
    }

    /// Current state
    pub fn state(&self) -> TransportState {
        self.state
    }

    /// Most recent load request
    pub fn request(&self) -> LoadRequestId {
        self.request
    }

    /// Whether the user wants audio
    pub fn play_intent(&self) -> bool {
        self.play_intent
    }

    /// Playing, or about to play once the pending load is ready
    pub fn is_playing(&self) -> bool {
        match self.state {
            TransportState::Playing => true,
            TransportState::Loading | TransportState::Ready => self.play_intent,
            TransportState::Idle | TransportState::Paused | TransportState::Ended => false,
        }
    }

    /// Whether `request` is the live load
    pub fn is_current(&self, request: LoadRequestId) -> bool {
        request == self.request
    }

    /// Start a new load, superseding any previous one
    pub fn begin_load(&mut self, play_intent: bool) -> LoadRequestId {
        self.request = self.request.next();
        self.state = TransportState::Loading;
        self.play_intent = play_intent;
        self.request
    }

    /// Record the user's wish without touching device state
    pub fn set_intent(&mut self, play_intent: bool) {
        self.play_intent = play_intent;
    }

    /// Device can play the source of `request`
    ///
    /// Returns `false` for a stale request, which must be ignored.
    pub fn on_can_play(&mut self, request: LoadRequestId) -> bool {
        if !self.is_current(request) {
            debug!("Ignoring readiness for stale load {} (live {})", request, self.request);
            return false;
        }
        if self.state == TransportState::Loading {
            self.state = TransportState::Ready;
        }
        true
    }

    /// Native playing notification
    pub fn on_playing(&mut self) {
        match self.state {
            TransportState::Ready | TransportState::Paused | TransportState::Ended => {
                self.state = TransportState::Playing;
                self.play_intent = true;
            }
            TransportState::Playing => {}
            TransportState::Idle | TransportState::Loading => {
                debug!("Ignoring playing notification in {:?}", self.state);
            }
        }
    }

    /// Native paused notification
    pub fn on_paused(&mut self) {
        match self.state {
            TransportState::Playing | TransportState::Ready | TransportState::Loading => {
                self.state = TransportState::Paused;
                self.play_intent = false;
            }
            TransportState::Idle | TransportState::Paused | TransportState::Ended => {}
        }
    }

    /// Native ended notification
    ///
    /// Media elements report `pause` right before `ended`, so the end is
    /// accepted from `Paused` and `Ready` too. In `Idle` and `Loading` it
    /// belongs to a source that was already replaced.
    ///
    /// Returns `true` when the transition happened.
    pub fn on_ended(&mut self) -> bool {
        match self.state {
            TransportState::Playing | TransportState::Paused | TransportState::Ready => {
                self.state = TransportState::Ended;
                self.play_intent = false;
                true
            }
            TransportState::Idle | TransportState::Loading | TransportState::Ended => {
                debug!("Ignoring end notification in {:?}", self.state);
                false
            }
        }
    }

    /// Start was refused or the live source failed
    pub fn on_failure(&mut self) {
        if self.state != TransportState::Idle {
            self.state = TransportState::Paused;
        }
        self.play_intent = false;
    }

    /// Rewind an ended source for another pass
    pub fn rearm(&mut self) {
        if self.state != TransportState::Idle {
            self.state = TransportState::Ready;
            self.play_intent = true;
        }
    }
}
