//! Simulated output device
//!
//! Stands in for a media element: every call is answered with the events a
//! real element would fire, and sources report the duration given in the
//! catalog. While playing, each poll pushes one block of silence through the
//! output chain so the equalizer sees buffers the way it would on a real
//! output thread.

use cadence_audio::{EffectChain, EqualizerChain, SharedEqualizer};
use cadence_core::Track;
use cadence_playback::{DeviceError, DeviceEvent, LoadRequestId, PlaybackDevice};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::debug;

/// Length reported for sources the catalog gives no duration for
const DEFAULT_DURATION_SECS: f64 = 180.0;

const SAMPLE_RATE: u32 = 44_100;

/// Stereo frames rendered per poll
const BLOCK_FRAMES: usize = 512;

pub struct SimulatedDevice {
    durations: HashMap<String, f64>,
    equalizer: SharedEqualizer,
    output: EffectChain,
    block: Vec<f32>,
    gain: f32,
    playing: bool,
    pending: VecDeque<DeviceEvent>,
    source: Option<String>,
}

impl SimulatedDevice {
    /// Device that knows the durations of `catalog` entries
    pub fn new(catalog: &[(Track, Option<f64>)]) -> Self {
        let durations = catalog
            .iter()
            .filter_map(|(track, secs)| secs.map(|secs| (track.file_url.clone(), secs)))
            .collect();

        let equalizer = EqualizerChain::shared();
        let mut output = EffectChain::new();
        output.add_effect(Box::new(Arc::clone(&equalizer)));

        Self {
            durations,
            equalizer,
            output,
            block: vec![0.0; BLOCK_FRAMES * 2],
            gain: 1.0,
            playing: false,
            pending: VecDeque::new(),
            source: None,
        }
    }

    /// Run `buffer` through the output path at the current gain
    pub fn render(&mut self, buffer: &mut [f32]) {
        self.output.process(buffer, SAMPLE_RATE);
        for sample in buffer.iter_mut() {
            *sample *= self.gain;
        }
    }

    fn render_block(&mut self) {
        let mut block = std::mem::take(&mut self.block);
        block.fill(0.0);
        self.render(&mut block);
        self.block = block;
    }
}

impl PlaybackDevice for SimulatedDevice {
    fn load(&mut self, url: &str, request: LoadRequestId) {
        debug!("Simulating load of {} ({})", url, request);
        let duration = self
            .durations
            .get(url)
            .copied()
            .unwrap_or(DEFAULT_DURATION_SECS);
        self.source = Some(url.to_string());
        self.playing = false;
        self.output.clear_state();
        self.pending
            .push_back(DeviceEvent::MetadataLoaded { request, duration });
        self.pending.push_back(DeviceEvent::CanPlay { request });
    }

    fn play(&mut self) -> Result<(), DeviceError> {
        if self.source.is_none() {
            return Err(DeviceError::Unavailable);
        }
        self.playing = true;
        self.pending.push_back(DeviceEvent::Playing);
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
        self.pending.push_back(DeviceEvent::Paused);
    }

    fn seek(&mut self, position: f64) {
        self.output.clear_state();
        self.pending.push_back(DeviceEvent::TimeUpdate { position });
    }

    fn set_volume(&mut self, level: f32) {
        debug!("Simulated volume {:.2}", level);
        self.gain = level;
    }

    fn set_loop(&mut self, enabled: bool) {
        debug!("Simulated loop {}", enabled);
    }

    fn equalizer(&self) -> Option<SharedEqualizer> {
        Some(Arc::clone(&self.equalizer))
    }

    fn poll_events(&mut self) -> Vec<DeviceEvent> {
        if self.playing {
            self.render_block();
        }
        self.pending.drain(..).collect()
    }
}
