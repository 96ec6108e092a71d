//! Playback manager - core orchestration
//!
//! Coordinates the device, transport, sequencer, queue, recency ledger,
//! volume and equalizer. Public operations never fail: problems are logged,
//! reported as [`PlaybackEvent::Error`] and the state is rolled back.

use crate::{
    device::{DeviceEvent, PlaybackDevice},
    equalizer::Equalizer,
    error::{DeviceError, PlaybackError, Result},
    events::PlaybackEvent,
    history::RecencyLedger,
    queue::PlayQueue,
    shuffle::Sequencer,
    transport::Transport,
    types::{PlaybackConfig, PlaybackSnapshot, TransportState},
    volume::Volume,
};
use cadence_audio::BAND_COUNT;
use cadence_core::{QueueEntry, RecentEntry, Track, TrackId};
use cadence_storage::PlayerStorage;
use tracing::{debug, info, warn};

/// Upper bound on poll rounds in [`PlaybackManager::pump`]
const MAX_PUMP_ROUNDS: usize = 64;

/// Main playback manager
///
/// Owns the single [`PlaybackDevice`]. Device-reported state is the source
/// of truth for whether audio is flowing; the manager only records intent
/// and reconciles when the device reports back.
pub struct PlaybackManager<D: PlaybackDevice> {
    // Output
    device: D,
    transport: Transport,

    // What is loaded
    current_track: Option<Track>,
    current_index: Option<usize>,
    current_time: f64,
    duration: f64,

    // What plays next
    collection: Vec<Track>,
    sequencer: Sequencer,
    queue: PlayQueue,

    // Settings and ledger
    history: RecencyLedger,
    volume: Volume,
    equalizer: Equalizer,

    config: PlaybackConfig,
    storage: Option<PlayerStorage>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<D: PlaybackDevice> PlaybackManager<D> {
    /// Create a manager without persistence
    pub fn new(mut device: D, config: PlaybackConfig) -> Self {
        let mut sequencer = match config.shuffle_seed {
            Some(seed) => Sequencer::seeded(seed),
            None => Sequencer::new(),
        };
        if config.shuffle {
            sequencer.toggle_shuffle(None);
        }
        sequencer.set_repeat(config.repeat);

        let volume = Volume::new(config.volume);
        device.set_volume(volume.gain());
        device.set_loop(config.repeat);
        let equalizer = Equalizer::attach(device.equalizer());

        Self {
            device,
            transport: Transport::new(),
            current_track: None,
            current_index: None,
            current_time: 0.0,
            duration: 0.0,
            collection: Vec::new(),
            sequencer,
            queue: PlayQueue::new(),
            history: RecencyLedger::new(config.history_limit),
            volume,
            equalizer,
            config,
            storage: None,
            pending_events: Vec::new(),
        }
    }

    /// Create a manager that writes every durable surface to `storage`
    ///
    /// Call [`restore`](Self::restore) to pick up the previous session.
    pub fn with_storage(device: D, config: PlaybackConfig, storage: PlayerStorage) -> Self {
        let mut manager = Self::new(device, config);
        manager.storage = Some(storage);
        manager
    }

    // ===== Playback Control =====

    /// Play `track`
    ///
    /// Playing the track that is already loaded toggles pause/resume
    /// instead of reloading it.
    pub fn play(&mut self, track: Track) {
        if self
            .current_track
            .as_ref()
            .is_some_and(|current| current.same_source(&track))
        {
            debug!("'{}' is already loaded, toggling", track.title);
            self.toggle_play_pause();
            return;
        }

        if let Err(e) = self.start_track(track, true) {
            self.report(e);
        }
    }

    /// Play the collection entry at `index`
    pub fn play_index(&mut self, index: usize) {
        match self.collection.get(index).cloned() {
            Some(track) => self.play(track),
            None => debug!("No collection entry at {}", index),
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if !self.transport.is_playing() {
            return;
        }
        self.transport.set_intent(false);
        if self.transport.state() != TransportState::Loading {
            self.device.pause();
        }
        self.emit_state_changed();
    }

    /// Resume playback
    ///
    /// A restored track that was never started is loaded first.
    pub fn resume(&mut self) {
        let Some(url) = self.current_track.as_ref().map(|t| t.file_url.clone()) else {
            debug!("Nothing to resume");
            return;
        };

        match self.transport.state() {
            TransportState::Idle => {
                let request = self.transport.begin_load(true);
                info!("Loading {} for resume as {}", url, request);
                self.device.load(&url, request);
            }
            TransportState::Loading => self.transport.set_intent(true),
            TransportState::Ready | TransportState::Playing if self.transport.play_intent() => {
                return;
            }
            TransportState::Ready
            | TransportState::Playing
            | TransportState::Paused
            | TransportState::Ended => {
                self.transport.set_intent(true);
                self.start_transport();
            }
        }
        self.emit_state_changed();
    }

    /// Toggle between play and pause
    pub fn toggle_play_pause(&mut self) {
        if self.transport.is_playing() {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Skip to the next track (queue first, repeat ignored)
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        self.skip_forward();
    }

    /// Go back one step in the current order
    pub fn previous(&mut self) {
        match self.sequencer.previous_index(self.current_index) {
            Some(index) => self.play_from_collection(index),
            None => debug!("Collection is empty, nothing before the current track"),
        }
    }

    /// Move on after the current track ended
    ///
    /// Repeat replays the current track; otherwise the queue head, then the
    /// shuffle order or natural order, is played.
    pub fn advance(&mut self) {
        if self.sequencer.is_repeating() && self.current_track.is_some() {
            self.restart_current();
            return;
        }
        self.skip_forward();
    }

    /// Replace the tracks the sequencer walks over
    pub fn set_collection(&mut self, tracks: Vec<Track>) {
        self.collection = tracks;
        self.current_index = self.current_track.as_ref().and_then(|t| self.index_of(t));
        self.sequencer.set_len(self.collection.len(), self.current_index);
        if let Some(index) = self.current_index {
            self.sequencer.sync_cursor(index);
        }
        debug!("Collection set to {} tracks", self.collection.len());
    }

    // ===== Seek =====

    /// Seek to `position` seconds, clamped to the known duration
    pub fn seek(&mut self, position: f64) {
        if self.current_track.is_none() || !position.is_finite() {
            return;
        }
        let target = self.clamp_position(position);
        self.device.seek(target);
    }

    // ===== Volume =====

    /// Set linear volume (0.0-1.0); NaN and infinities are ignored
    pub fn set_volume(&mut self, level: f32) {
        if !self.volume.set_level(level) {
            debug!("Ignoring non-finite volume {}", level);
            return;
        }
        self.apply_volume();
    }

    /// Mute audio
    pub fn mute(&mut self) {
        self.volume.mute();
        self.apply_volume();
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.apply_volume();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    // ===== Queue Management =====

    /// Queue `track` to play after the current one
    ///
    /// Returns `false` if it is already queued.
    pub fn enqueue(&mut self, track: &Track) -> bool {
        self.enqueue_entry(QueueEntry::from(track))
    }

    /// Queue a stored entry
    pub fn enqueue_entry(&mut self, entry: QueueEntry) -> bool {
        let id = entry.id.clone();
        if !self.queue.enqueue(entry) {
            debug!("{} is already queued", id);
            return false;
        }
        self.queue_changed();
        true
    }

    /// Drop `id` from the queue
    pub fn remove_from_queue(&mut self, id: &TrackId) -> bool {
        if !self.queue.remove(id) {
            return false;
        }
        self.queue_changed();
        true
    }

    /// Empty the queue
    pub fn clear_queue(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        self.queue.clear();
        self.queue_changed();
    }

    // ===== Shuffle & Repeat =====

    /// Toggle shuffle, returning the new state
    pub fn toggle_shuffle(&mut self) -> bool {
        let enabled = self.sequencer.toggle_shuffle(self.current_index);
        self.pending_events
            .push(PlaybackEvent::ShuffleChanged { enabled });
        enabled
    }

    /// Toggle single-track repeat, returning the new state
    pub fn toggle_repeat(&mut self) -> bool {
        let enabled = self.sequencer.toggle_repeat();
        self.device.set_loop(enabled);
        self.pending_events
            .push(PlaybackEvent::RepeatChanged { enabled });
        enabled
    }

    // ===== Equalizer =====

    /// Overwrite leading band gains (dB)
    pub fn set_equalizer_gains(&mut self, gains: &[f32]) {
        self.equalizer.set_gains(gains);
        self.equalizer_changed();
    }

    /// Flatten every band
    pub fn reset_equalizer(&mut self) {
        self.equalizer.reset();
        self.equalizer_changed();
    }

    // ===== Device Reconciliation =====

    /// Apply something the device reported
    pub fn handle_device_event(&mut self, event: DeviceEvent) {
        match event {
            DeviceEvent::TimeUpdate { position } => {
                if !position.is_finite() {
                    return;
                }
                self.current_time = self.clamp_position(position);
                self.emit_position_update();
            }
            DeviceEvent::MetadataLoaded { request, duration } => {
                if !self.transport.is_current(request) {
                    debug!("Ignoring metadata for stale load {}", request);
                    return;
                }
                self.duration = if duration.is_finite() && duration > 0.0 {
                    duration
                } else {
                    0.0
                };
                self.current_time = self.clamp_position(self.current_time);
                self.emit_position_update();
            }
            DeviceEvent::CanPlay { request } => {
                let was_loading = self.transport.state() == TransportState::Loading;
                if !self.transport.on_can_play(request) {
                    return;
                }
                if was_loading && self.transport.play_intent() {
                    self.start_transport();
                }
                self.emit_state_changed();
            }
            DeviceEvent::Playing => {
                self.transport.on_playing();
                self.emit_state_changed();
            }
            DeviceEvent::Paused => {
                self.transport.on_paused();
                self.emit_state_changed();
            }
            DeviceEvent::Ended => {
                if !self.transport.on_ended() {
                    return;
                }
                if let Some(track) = &self.current_track {
                    let track_id = track.identity().to_string();
                    self.pending_events
                        .push(PlaybackEvent::TrackFinished { track_id });
                }
                self.emit_state_changed();
                self.advance();
            }
            DeviceEvent::Error { request, message } => {
                if !self.transport.is_current(request) {
                    debug!("Ignoring error for stale load {}: {}", request, message);
                    return;
                }
                self.transport.on_failure();
                self.report(DeviceError::Decode(message).into());
                self.emit_state_changed();
            }
        }
    }

    /// Drain events the device queued and apply them
    ///
    /// Handling an event can make the device queue more (readiness leads
    /// to a start), so this polls until the device goes quiet. Returns the
    /// number of events handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        for _ in 0..MAX_PUMP_ROUNDS {
            let events = self.device.poll_events();
            if events.is_empty() {
                return handled;
            }
            handled += events.len();
            for event in events {
                self.handle_device_event(event);
            }
        }
        warn!("Device kept reporting after {} rounds, deferring the rest", MAX_PUMP_ROUNDS);
        handled
    }

    // ===== Persistence =====

    /// Rehydrate the previous session from storage
    ///
    /// The restored track is loaded but not started.
    pub fn restore(&mut self) {
        let Some(storage) = self.storage.clone() else {
            debug!("No storage attached, nothing to restore");
            return;
        };

        self.volume = Volume::from_setting(storage.load_volume());
        self.device.set_volume(self.volume.gain());

        let gains = storage.load_equalizer();
        if !gains.is_empty() {
            self.equalizer.set_gains(&gains);
        }

        self.queue = PlayQueue::from_entries(storage.load_queue());
        self.history = RecencyLedger::from_entries(storage.load_recent(), self.config.history_limit);

        if let Some(track) = storage.load_current_track() {
            match track.validate() {
                Ok(()) => self.load_paused(track),
                Err(e) => warn!("Ignoring stored current track: {}", e),
            }
        }

        info!(
            "Restored session: {} queued, {} recent",
            self.queue.len(),
            self.history.len()
        );

        self.emit_volume_changed();
        self.pending_events.push(PlaybackEvent::EqualizerChanged {
            gains: self.equalizer.gains(),
        });
        self.emit_queue_changed();
        self.emit_history_changed();
        self.emit_state_changed();
    }

    // ===== State Queries =====

    /// Read-only view of everything a UI shows
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_track: self.current_track.clone(),
            is_playing: self.transport.is_playing(),
            current_time: self.current_time,
            duration: self.duration,
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
            is_shuffled: self.sequencer.is_shuffled(),
            is_repeating: self.sequencer.is_repeating(),
            shuffle_order: self.sequencer.order().to_vec(),
            shuffle_cursor: self.sequencer.cursor(),
            transport: self.transport.state(),
            queue: self.queue.entries(),
            equalizer_gains: self.equalizer.gains(),
        }
    }

    /// Loaded track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Playing, or about to once the pending load is ready
    pub fn is_playing(&self) -> bool {
        self.transport.is_playing()
    }

    /// Detailed transport state
    pub fn transport_state(&self) -> TransportState {
        self.transport.state()
    }

    /// Tracks the sequencer walks over
    pub fn collection(&self) -> &[Track] {
        &self.collection
    }

    /// Explicit play queue
    pub fn queue(&self) -> &PlayQueue {
        &self.queue
    }

    /// Recently played entries, most recent first
    pub fn recent_entries(&self) -> Vec<RecentEntry> {
        self.history.entries()
    }

    /// Recently played tracks still present in the collection
    pub fn recent_tracks(&self) -> Vec<&Track> {
        self.history.resolve(&self.collection)
    }

    /// Volume controller
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Equalizer gains in dB
    pub fn equalizer_gains(&self) -> [f32; BAND_COUNT] {
        self.equalizer.gains()
    }

    /// Shuffle enabled
    pub fn is_shuffled(&self) -> bool {
        self.sequencer.is_shuffled()
    }

    /// Repeat enabled
    pub fn is_repeating(&self) -> bool {
        self.sequencer.is_repeating()
    }

    /// The output device
    pub fn device(&self) -> &D {
        &self.device
    }

    // ===== Internals =====

    fn start_track(&mut self, track: Track, sync_cursor: bool) -> Result<()> {
        track.validate()?;

        let previous = self.current_track.as_ref().map(Track::identity);
        let id = track.identity();
        let request = self.transport.begin_load(true);
        info!("Loading '{}' ({}) as {}", track.title, id, request);
        self.device.load(&track.file_url, request);

        self.current_time = 0.0;
        self.duration = 0.0;
        self.current_index = self.index_of(&track);
        if sync_cursor {
            if let Some(index) = self.current_index {
                self.sequencer.sync_cursor(index);
            }
        }
        self.current_track = Some(track);
        self.history.record_play_now(id.clone());

        self.persist("current track", |s, m| s.save_current_track(m.current_track.as_ref()));
        self.persist("recent", |s, m| s.save_recent(&m.history.entries()));

        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: id.to_string(),
            previous_track_id: previous.map(|p| p.to_string()),
        });
        self.emit_history_changed();
        self.emit_state_changed();
        Ok(())
    }

    fn load_paused(&mut self, track: Track) {
        let request = self.transport.begin_load(false);
        info!("Restoring '{}' as {} without starting", track.title, request);
        self.device.load(&track.file_url, request);

        self.current_time = 0.0;
        self.duration = 0.0;
        self.current_index = self.index_of(&track);
        if let Some(index) = self.current_index {
            self.sequencer.sync_cursor(index);
        }
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: track.identity().to_string(),
            previous_track_id: None,
        });
        self.current_track = Some(track);
    }

    fn skip_forward(&mut self) {
        if let Some(entry) = self.queue.dequeue() {
            debug!("Playing queued {}", entry.id);
            self.queue_changed();
            if let Err(e) = self.start_track(entry.to_track(), false) {
                self.report(e);
            }
            return;
        }

        match self.sequencer.next_index(self.current_index) {
            Some(index) => self.play_from_collection(index),
            None => debug!("Queue and collection are empty, staying on the current track"),
        }
    }

    fn play_from_collection(&mut self, index: usize) {
        let Some(track) = self.collection.get(index).cloned() else {
            debug!("No collection entry at {}", index);
            return;
        };
        if let Err(e) = self.start_track(track, false) {
            self.report(e);
        }
    }

    fn restart_current(&mut self) {
        debug!("Repeating current track");
        self.device.seek(0.0);
        self.current_time = 0.0;
        self.transport.rearm();
        self.start_transport();
        self.emit_state_changed();
    }

    fn start_transport(&mut self) {
        if let Err(e) = self.device.play() {
            self.transport.on_failure();
            self.report(e.into());
        }
    }

    fn apply_volume(&mut self) {
        self.device.set_volume(self.volume.gain());
        self.persist("volume", |s, m| s.save_volume(&m.volume.to_setting()));
        self.emit_volume_changed();
    }

    fn queue_changed(&mut self) {
        self.persist("queue", |s, m| s.save_queue(&m.queue.entries()));
        self.emit_queue_changed();
    }

    fn equalizer_changed(&mut self) {
        self.persist("equalizer", |s, m| s.save_equalizer(&m.equalizer.gains()));
        self.pending_events.push(PlaybackEvent::EqualizerChanged {
            gains: self.equalizer.gains(),
        });
    }

    fn index_of(&self, track: &Track) -> Option<usize> {
        let id = track.identity();
        self.collection.iter().position(|t| t.identity() == id)
    }

    fn clamp_position(&self, position: f64) -> f64 {
        if self.duration > 0.0 {
            position.clamp(0.0, self.duration)
        } else {
            position.max(0.0)
        }
    }

    fn persist<F>(&self, surface: &str, save: F)
    where
        F: FnOnce(&PlayerStorage, &Self) -> cadence_storage::Result<()>,
    {
        if let Some(storage) = &self.storage {
            if let Err(e) = save(storage, self) {
                warn!("Failed to persist {}: {}", surface, e);
            }
        }
    }

    fn report(&mut self, error: PlaybackError) {
        warn!("Playback error: {}", error);
        self.pending_events.push(PlaybackEvent::Error {
            message: error.to_string(),
        });
        self.emit_state_changed();
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit_state_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::StateChanged {
            state: self.transport.state(),
            is_playing: self.transport.is_playing(),
        });
    }

    fn emit_position_update(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position: self.current_time,
            duration: self.duration,
        });
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn emit_history_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::HistoryChanged {
            length: self.history.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::MockPlaybackDevice;
    use crate::types::LoadRequestId;
    use cadence_core::Artists;
    use cadence_storage::{MemoryStore, VolumeSetting};
    use mockall::predicate::eq;
    use std::sync::Arc;

    fn track(id: &str) -> Track {
        Track::new(id, format!("Track {id}"), Artists::one("Artist"), format!("u/{id}"))
    }

    /// Mock with the calls every manager makes on construction
    fn device() -> MockPlaybackDevice {
        let mut device = MockPlaybackDevice::new();
        device.expect_set_volume().return_const(());
        device.expect_set_loop().return_const(());
        device.expect_equalizer().return_const(None);
        device
    }

    fn manager(device: MockPlaybackDevice) -> PlaybackManager<MockPlaybackDevice> {
        PlaybackManager::new(device, PlaybackConfig::default())
    }

    #[test]
    fn replaying_loaded_track_toggles_without_reload() {
        let mut device = device();
        device.expect_load().times(1).return_const(());
        device.expect_play().times(2).returning(|| Ok(()));
        device.expect_pause().times(1).return_const(());

        let mut manager = manager(device);
        manager.play(track("a"));
        manager.handle_device_event(DeviceEvent::CanPlay {
            request: LoadRequestId::new(1),
        });
        manager.handle_device_event(DeviceEvent::Playing);
        assert!(manager.is_playing());

        manager.play(track("a"));
        manager.handle_device_event(DeviceEvent::Paused);
        assert!(!manager.is_playing());

        manager.play(track("a"));
        manager.handle_device_event(DeviceEvent::Playing);
        assert!(manager.is_playing());
        assert_eq!(manager.recent_entries().len(), 1);
    }

    #[test]
    fn denied_start_rolls_back() {
        let mut device = device();
        device.expect_load().return_const(());
        device
            .expect_play()
            .times(1)
            .returning(|| Err(DeviceError::PlaybackDenied("no gesture".into())));

        let mut manager = manager(device);
        manager.play(track("a"));
        assert!(manager.is_playing());

        manager.handle_device_event(DeviceEvent::CanPlay {
            request: LoadRequestId::new(1),
        });

        assert!(!manager.is_playing());
        assert_eq!(manager.transport_state(), TransportState::Paused);
        assert!(manager
            .drain_events()
            .iter()
            .any(|e| matches!(e, PlaybackEvent::Error { message } if message.contains("no gesture"))));
    }

    #[test]
    fn seek_is_clamped_to_duration() {
        let mut device = device();
        device.expect_load().return_const(());
        device.expect_seek().with(eq(180.0)).times(1).return_const(());
        device.expect_seek().with(eq(0.0)).times(1).return_const(());

        let mut manager = manager(device);
        manager.seek(30.0); // nothing loaded

        manager.play(track("a"));
        manager.handle_device_event(DeviceEvent::MetadataLoaded {
            request: LoadRequestId::new(1),
            duration: 180.0,
        });
        manager.seek(500.0);
        manager.seek(-4.0);
        manager.seek(f64::NAN);
    }

    #[test]
    fn repeat_mirrors_onto_native_loop() {
        let mut device = MockPlaybackDevice::new();
        device.expect_set_volume().return_const(());
        device.expect_equalizer().return_const(None);
        device.expect_set_loop().with(eq(false)).times(2).return_const(());
        device.expect_set_loop().with(eq(true)).times(1).return_const(());

        let mut manager = manager(device);
        assert!(manager.toggle_repeat());
        assert!(!manager.toggle_repeat());
    }

    #[test]
    fn volume_reaches_device_clamped() {
        let mut device = MockPlaybackDevice::new();
        device.expect_set_loop().return_const(());
        device.expect_equalizer().return_const(None);
        device
            .expect_set_volume()
            .withf(|level| (*level - 1.0).abs() < f32::EPSILON)
            .times(2)
            .return_const(());
        device
            .expect_set_volume()
            .withf(|level| *level == 0.0)
            .times(1)
            .return_const(());

        let mut manager = manager(device);
        manager.set_volume(2.5);
        manager.set_volume(f32::NAN);
        manager.mute();

        assert_eq!(manager.volume().level(), 1.0);
        assert!(manager.snapshot().is_muted);
    }

    #[test]
    fn stale_readiness_does_not_start() {
        let mut device = device();
        device.expect_load().times(2).return_const(());
        device.expect_play().times(1).returning(|| Ok(()));

        let mut manager = manager(device);
        manager.play(track("a"));
        manager.play(track("b"));

        manager.handle_device_event(DeviceEvent::CanPlay {
            request: LoadRequestId::new(1),
        });
        assert_eq!(manager.transport_state(), TransportState::Loading);

        manager.handle_device_event(DeviceEvent::CanPlay {
            request: LoadRequestId::new(2),
        });
        assert_eq!(manager.transport_state(), TransportState::Ready);
        assert_eq!(manager.current_track().map(|t| t.title.as_str()), Some("Track b"));
    }

    #[test]
    fn invalid_track_is_reported_not_loaded() {
        let mut device = device();
        device.expect_load().never();

        let mut manager = manager(device);
        manager.play(Track::from_url("Nowhere", "  "));

        assert!(manager.current_track().is_none());
        assert!(manager
            .drain_events()
            .iter()
            .any(|e| matches!(e, PlaybackEvent::Error { .. })));
    }

    #[test]
    fn mutations_are_persisted() {
        let backend = Arc::new(MemoryStore::new());
        let storage = PlayerStorage::new(backend);
        let mut device = device();
        device.expect_load().return_const(());

        let mut manager =
            PlaybackManager::with_storage(device, PlaybackConfig::default(), storage.clone());
        manager.set_volume(0.5);
        manager.enqueue(&track("q"));
        manager.set_equalizer_gains(&[4.0]);
        manager.play(track("a"));

        assert_eq!(storage.load_volume(), VolumeSetting { level: 0.5, muted: false });
        assert_eq!(storage.load_queue().len(), 1);
        assert_eq!(storage.load_equalizer()[0], 4.0);
        assert_eq!(storage.load_equalizer().len(), BAND_COUNT);
        assert_eq!(storage.load_recent().len(), 1);
        assert_eq!(
            storage.load_current_track().map(|t| t.identity()),
            Some(TrackId::new("a"))
        );
    }
}
