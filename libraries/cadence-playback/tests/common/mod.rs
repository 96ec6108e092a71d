//! Shared helpers for playback integration tests

#![allow(dead_code)]

use cadence_core::{Artists, Track};
use cadence_playback::{
    DeviceError, DeviceEvent, LoadRequestId, PlaybackConfig, PlaybackDevice, PlaybackManager,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Once;

static INIT: Once = Once::new();

/// Route tracing output through the test harness
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Scripted device that behaves like a media element
///
/// Loads report metadata and readiness on the next poll unless
/// `manual_readiness` is set, in which case the test delivers them.
#[derive(Debug, Default)]
pub struct FakeDevice {
    pub loads: Vec<(String, LoadRequestId)>,
    pub play_calls: usize,
    pub pause_calls: usize,
    pub seeks: Vec<f64>,
    pub volume: Option<f32>,
    pub looping: bool,
    pub autoplay_blocked: bool,
    pub manual_readiness: bool,
    pub durations: HashMap<String, f64>,
    pending: VecDeque<DeviceEvent>,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Device that refuses every start, like a browser without a user gesture
    pub fn blocked() -> Self {
        Self {
            autoplay_blocked: true,
            ..Self::default()
        }
    }

    /// Device whose readiness events are delivered by the test
    pub fn manual() -> Self {
        Self {
            manual_readiness: true,
            ..Self::default()
        }
    }

    /// URLs in load order
    pub fn loaded_urls(&self) -> Vec<&str> {
        self.loads.iter().map(|(url, _)| url.as_str()).collect()
    }
}

impl PlaybackDevice for FakeDevice {
    fn load(&mut self, url: &str, request: LoadRequestId) {
        self.loads.push((url.to_string(), request));
        if self.manual_readiness {
            return;
        }
        let duration = self.durations.get(url).copied().unwrap_or(180.0);
        self.pending
            .push_back(DeviceEvent::MetadataLoaded { request, duration });
        self.pending.push_back(DeviceEvent::CanPlay { request });
    }

    fn play(&mut self) -> Result<(), DeviceError> {
        self.play_calls += 1;
        if self.autoplay_blocked {
            return Err(DeviceError::PlaybackDenied(
                "play() requires a user gesture".to_string(),
            ));
        }
        self.pending.push_back(DeviceEvent::Playing);
        Ok(())
    }

    fn pause(&mut self) {
        self.pause_calls += 1;
        self.pending.push_back(DeviceEvent::Paused);
    }

    fn seek(&mut self, position: f64) {
        self.seeks.push(position);
        self.pending.push_back(DeviceEvent::TimeUpdate { position });
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = Some(level);
    }

    fn set_loop(&mut self, enabled: bool) {
        self.looping = enabled;
    }

    fn poll_events(&mut self) -> Vec<DeviceEvent> {
        self.pending.drain(..).collect()
    }
}

pub fn track(id: &str) -> Track {
    Track::new(
        id,
        format!("Track {}", id.to_uppercase()),
        Artists::one("Test Artist"),
        format!("https://cdn.test/{id}.mp3"),
    )
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

/// Manager over a fresh [`FakeDevice`] with `ids` as its collection
pub fn manager_with(ids: &[&str]) -> PlaybackManager<FakeDevice> {
    init_tracing();
    let mut manager = PlaybackManager::new(FakeDevice::new(), PlaybackConfig::default());
    manager.set_collection(tracks(ids));
    manager
}

/// Identity of the loaded track
pub fn current_id(manager: &PlaybackManager<FakeDevice>) -> Option<String> {
    manager.current_track().map(|t| t.identity().to_string())
}

/// Let the current track run to its end and settle
pub fn finish_track(manager: &mut PlaybackManager<FakeDevice>) {
    manager.handle_device_event(DeviceEvent::Ended);
    manager.pump();
}
