//! Equalizer settings bound to the device's filter chain
//!
//! Gains are always kept here so they can be persisted and shown even when
//! the device has no DSP path. When it does, every change is pushed into
//! the shared chain.

use cadence_audio::{SharedEqualizer, BAND_COUNT};
use std::sync::PoisonError;
use tracing::debug;

/// Stored gains plus the optional live chain
#[derive(Debug, Clone, Default)]
pub struct Equalizer {
    chain: Option<SharedEqualizer>,
    gains: [f32; BAND_COUNT],
}

impl Equalizer {
    /// Bind to a device chain (`None` keeps gains as settings only)
    pub fn attach(chain: Option<SharedEqualizer>) -> Self {
        if chain.is_none() {
            debug!("Device has no filter chain, equalizer gains are stored only");
        }
        Self {
            chain,
            gains: [0.0; BAND_COUNT],
        }
    }

    /// Whether changes reach an audio path
    pub fn is_live(&self) -> bool {
        self.chain.is_some()
    }

    /// Current gains in dB
    pub fn gains(&self) -> [f32; BAND_COUNT] {
        self.gains
    }

    /// Overwrite leading bands with `gains`
    ///
    /// Extra values are ignored. A non-finite value leaves its band as it was.
    pub fn set_gains(&mut self, gains: &[f32]) {
        for (band, (slot, gain)) in self.gains.iter_mut().zip(gains).enumerate() {
            if gain.is_finite() {
                *slot = *gain;
            } else {
                debug!("Ignoring non-finite gain {} for band {}", gain, band);
            }
        }
        self.push();
    }

    /// Flatten every band to 0 dB
    pub fn reset(&mut self) {
        self.gains = [0.0; BAND_COUNT];
        self.push();
    }

    fn push(&self) {
        if let Some(chain) = &self.chain {
            let mut chain = chain.lock().unwrap_or_else(PoisonError::into_inner);
            chain.set_gains(&self.gains);
        }
    }
}
