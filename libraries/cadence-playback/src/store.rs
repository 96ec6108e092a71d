//! Shared player state
//!
//! [`PlayerStore`] is the one handle UI surfaces hold. Mutations go through
//! [`PlayerStore::dispatch`], which serializes them on a mutex; readers get
//! snapshots from a `watch` channel and never see the manager mutably.

use crate::device::{DeviceEvent, PlaybackDevice};
use crate::events::PlaybackEvent;
use crate::manager::PlaybackManager;
use crate::types::PlaybackSnapshot;
use cadence_core::{Track, TrackId};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::warn;

/// Every mutation the player accepts
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerAction {
    /// Play a track (toggles when it is already loaded)
    Play(Track),
    /// Play a collection entry
    PlayIndex(usize),
    /// Pause
    Pause,
    /// Resume
    Resume,
    /// Toggle between play and pause
    TogglePlayPause,
    /// Skip forward
    Next,
    /// Step back
    Previous,
    /// Seek to seconds
    Seek(f64),
    /// Linear volume
    SetVolume(f32),
    /// Mute
    Mute,
    /// Unmute
    Unmute,
    /// Toggle mute
    ToggleMute,
    /// Toggle shuffle
    ToggleShuffle,
    /// Toggle repeat
    ToggleRepeat,
    /// Add to the play queue
    Enqueue(Track),
    /// Drop from the play queue
    RemoveFromQueue(TrackId),
    /// Empty the play queue
    ClearQueue,
    /// Replace the active collection
    SetCollection(Vec<Track>),
    /// Overwrite leading equalizer gains
    SetEqualizerGains(Vec<f32>),
    /// Flatten the equalizer
    ResetEqualizer,
    /// Rehydrate from storage
    Restore,
    /// Something the device reported
    Device(DeviceEvent),
}

/// Cloneable handle to the single playback manager
pub struct PlayerStore<D: PlaybackDevice> {
    manager: Arc<Mutex<PlaybackManager<D>>>,
    snapshots: Arc<watch::Sender<PlaybackSnapshot>>,
}

impl<D: PlaybackDevice> Clone for PlayerStore<D> {
    fn clone(&self) -> Self {
        Self {
            manager: Arc::clone(&self.manager),
            snapshots: Arc::clone(&self.snapshots),
        }
    }
}

impl<D: PlaybackDevice> PlayerStore<D> {
    /// Take ownership of `manager`
    pub fn new(manager: PlaybackManager<D>) -> Self {
        let (snapshots, _) = watch::channel(manager.snapshot());
        Self {
            manager: Arc::new(Mutex::new(manager)),
            snapshots: Arc::new(snapshots),
        }
    }

    /// Apply `action`, publish the new snapshot, and return the events it produced
    pub fn dispatch(&self, action: PlayerAction) -> Vec<PlaybackEvent> {
        let mut manager = self.lock();
        apply(&mut manager, action);
        manager.pump();

        // Publish under the lock so snapshots arrive in dispatch order
        self.snapshots.send_replace(manager.snapshot());
        manager.drain_events()
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshots.subscribe()
    }

    /// Latest published snapshot
    pub fn state(&self) -> PlaybackSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Run a read-only query against the manager
    pub fn read<R>(&self, query: impl FnOnce(&PlaybackManager<D>) -> R) -> R {
        let manager = self.lock();
        query(&manager)
    }

    fn lock(&self) -> MutexGuard<'_, PlaybackManager<D>> {
        self.manager.lock().unwrap_or_else(|poisoned| {
            warn!("Player state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

fn apply<D: PlaybackDevice>(manager: &mut PlaybackManager<D>, action: PlayerAction) {
    match action {
        PlayerAction::Play(track) => manager.play(track),
        PlayerAction::PlayIndex(index) => manager.play_index(index),
        PlayerAction::Pause => manager.pause(),
        PlayerAction::Resume => manager.resume(),
        PlayerAction::TogglePlayPause => manager.toggle_play_pause(),
        PlayerAction::Next => manager.next(),
        PlayerAction::Previous => manager.previous(),
        PlayerAction::Seek(position) => manager.seek(position),
        PlayerAction::SetVolume(level) => manager.set_volume(level),
        PlayerAction::Mute => manager.mute(),
        PlayerAction::Unmute => manager.unmute(),
        PlayerAction::ToggleMute => manager.toggle_mute(),
        PlayerAction::ToggleShuffle => {
            manager.toggle_shuffle();
        }
        PlayerAction::ToggleRepeat => {
            manager.toggle_repeat();
        }
        PlayerAction::Enqueue(track) => {
            manager.enqueue(&track);
        }
        PlayerAction::RemoveFromQueue(id) => {
            manager.remove_from_queue(&id);
        }
        PlayerAction::ClearQueue => manager.clear_queue(),
        PlayerAction::SetCollection(tracks) => manager.set_collection(tracks),
        PlayerAction::SetEqualizerGains(gains) => manager.set_equalizer_gains(&gains),
        PlayerAction::ResetEqualizer => manager.reset_equalizer(),
        PlayerAction::Restore => manager.restore(),
        PlayerAction::Device(event) => manager.handle_device_event(event),
    }
}
