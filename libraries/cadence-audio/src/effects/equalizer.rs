//! Ten-band equalizer filter chain
//!
//! Ten peaking biquads at fixed octave centres, wired in series. Gains are
//! whatever the caller supplies in dB; the chain does not clamp them.

use super::effect::AudioEffect;
use std::f32::consts::PI;
use std::sync::{Arc, Mutex};

/// Number of bands in the chain
pub const BAND_COUNT: usize = 10;

/// Band centre frequencies (Hz), lowest first
pub const EQ_FREQUENCIES: [f32; BAND_COUNT] = [
    32.0, 64.0, 125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0, 16000.0,
];

/// Quality factor shared by every band
pub const EQ_Q: f32 = 1.4;

/// Handle through which the playback core and the device's output path
/// share one chain
pub type SharedEqualizer = Arc<Mutex<EqualizerChain>>;

/// Peaking biquad band (RBJ cookbook)
#[derive(Debug, Clone)]
struct PeakingBand {
    // Normalized coefficients
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,

    // State (stereo)
    x1_l: f32,
    x2_l: f32,
    y1_l: f32,
    y2_l: f32,
    x1_r: f32,
    x2_r: f32,
    y1_r: f32,
    y2_r: f32,

    frequency: f32,
    gain_db: f32,
    q: f32,
}

impl PeakingBand {
    fn new(frequency: f32, q: f32) -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1_l: 0.0,
            x2_l: 0.0,
            y1_l: 0.0,
            y2_l: 0.0,
            x1_r: 0.0,
            x2_r: 0.0,
            y1_r: 0.0,
            y2_r: 0.0,
            frequency,
            gain_db: 0.0,
            q,
        }
    }

    fn set_flat(&mut self) {
        self.b0 = 1.0;
        self.b1 = 0.0;
        self.b2 = 0.0;
        self.a1 = 0.0;
        self.a2 = 0.0;
    }

    fn update_coefficients(&mut self, sample_rate: f32) {
        if sample_rate < 1.0 || !self.gain_db.is_finite() || self.gain_db.abs() < 0.01 {
            self.set_flat();
            return;
        }

        let a = 10.0_f32.powf(self.gain_db / 40.0);
        // Keep the 16 kHz band below Nyquist at low sample rates
        let freq = self.frequency.min(sample_rate * 0.45);
        let omega = 2.0 * PI * freq / sample_rate;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();
        let alpha = sin_omega / (2.0 * self.q);

        let a0 = 1.0 + alpha / a;
        self.b0 = (1.0 + alpha * a) / a0;
        self.b1 = (-2.0 * cos_omega) / a0;
        self.b2 = (1.0 - alpha * a) / a0;
        self.a1 = (-2.0 * cos_omega) / a0;
        self.a2 = (1.0 - alpha / a) / a0;
    }

    #[inline]
    fn process(&mut self, left: f32, right: f32) -> (f32, f32) {
        let mut out_l = self.b0 * left + self.b1 * self.x1_l + self.b2 * self.x2_l
            - self.a1 * self.y1_l
            - self.a2 * self.y2_l;
        // Flush denormals
        if out_l.abs() < 1e-15 {
            out_l = 0.0;
        }
        self.x2_l = self.x1_l;
        self.x1_l = left;
        self.y2_l = self.y1_l;
        self.y1_l = out_l;

        let mut out_r = self.b0 * right + self.b1 * self.x1_r + self.b2 * self.x2_r
            - self.a1 * self.y1_r
            - self.a2 * self.y2_r;
        if out_r.abs() < 1e-15 {
            out_r = 0.0;
        }
        self.x2_r = self.x1_r;
        self.x1_r = right;
        self.y2_r = self.y1_r;
        self.y1_r = out_r;

        (out_l, out_r)
    }

    fn clear_state(&mut self) {
        self.x1_l = 0.0;
        self.x2_l = 0.0;
        self.y1_l = 0.0;
        self.y2_l = 0.0;
        self.x1_r = 0.0;
        self.x2_r = 0.0;
        self.y1_r = 0.0;
        self.y2_r = 0.0;
    }
}

/// Ten-band peaking equalizer
///
/// Built once per device and kept for the life of the process; changing
/// gains never requires reloading the current track.
#[derive(Debug, Clone)]
pub struct EqualizerChain {
    bands: Vec<PeakingBand>,

    /// Pass-through mode for hosts without DSP support
    bypassed: bool,

    enabled: bool,
    sample_rate: u32,
    needs_update: bool,
}

impl EqualizerChain {
    /// Create the chain with all bands at 0 dB
    pub fn new() -> Self {
        let bands = EQ_FREQUENCIES
            .iter()
            .map(|&freq| PeakingBand::new(freq, EQ_Q))
            .collect();

        Self {
            bands,
            bypassed: false,
            enabled: true,
            sample_rate: 44100,
            needs_update: true,
        }
    }

    /// Create a chain that tracks gains but never touches audio
    ///
    /// Used when the host cannot run the filters. Playback is unaffected and
    /// the stored gains can still be persisted.
    pub fn bypassed() -> Self {
        let mut chain = Self::new();
        chain.bypassed = true;
        tracing::debug!("Equalizer running in pass-through mode");
        chain
    }

    /// Wrap a new chain in a shareable handle
    pub fn shared() -> SharedEqualizer {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Whether the chain is a pass-through
    pub fn is_bypassed(&self) -> bool {
        self.bypassed
    }

    /// Number of bands (always [`BAND_COUNT`])
    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Centre frequencies of the bands
    pub fn frequencies(&self) -> &'static [f32; BAND_COUNT] {
        &EQ_FREQUENCIES
    }

    /// Gain of a band in dB
    pub fn band_gain(&self, index: usize) -> Option<f32> {
        self.bands.get(index).map(|b| b.gain_db)
    }

    /// Set one band; out-of-range indices are ignored
    pub fn set_band_gain(&mut self, index: usize, gain_db: f32) {
        if let Some(band) = self.bands.get_mut(index) {
            band.gain_db = gain_db;
            self.needs_update = true;
        }
    }

    /// Apply a gain vector
    ///
    /// Band `i` takes `gains[i]`. Entries past the last band are ignored and
    /// a shorter vector leaves the remaining bands as they were.
    pub fn set_gains(&mut self, gains: &[f32]) {
        for (band, &gain) in self.bands.iter_mut().zip(gains.iter()) {
            band.gain_db = gain;
        }
        self.needs_update = true;
    }

    /// All band gains in dB
    pub fn gains(&self) -> [f32; BAND_COUNT] {
        let mut gains = [0.0; BAND_COUNT];
        for (slot, band) in gains.iter_mut().zip(self.bands.iter()) {
            *slot = band.gain_db;
        }
        gains
    }

    /// Return every band to 0 dB
    pub fn reset(&mut self) {
        for band in &mut self.bands {
            band.gain_db = 0.0;
        }
        self.needs_update = true;
    }

    /// Whether every band is at 0 dB
    pub fn is_flat(&self) -> bool {
        self.bands.iter().all(|b| b.gain_db == 0.0)
    }

    fn update_coefficients(&mut self) {
        if self.needs_update {
            let sr = self.sample_rate as f32;
            for band in &mut self.bands {
                band.update_coefficients(sr);
            }
            self.needs_update = false;
        }
    }
}

impl Default for EqualizerChain {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEffect for EqualizerChain {
    fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        if self.bypassed || !self.enabled || sample_rate == 0 {
            return;
        }

        if self.sample_rate != sample_rate {
            self.sample_rate = sample_rate;
            for band in &mut self.bands {
                band.clear_state();
            }
            self.needs_update = true;
        }

        self.update_coefficients();

        for chunk in buffer.chunks_exact_mut(2) {
            let mut left = chunk[0];
            let mut right = chunk[1];

            for band in &mut self.bands {
                (left, right) = band.process(left, right);
            }

            chunk[0] = left;
            chunk[1] = right;
        }
    }

    fn clear_state(&mut self) {
        for band in &mut self.bands {
            band.clear_state();
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn name(&self) -> &str {
        "10-Band Equalizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::test_signals::{generate_sine, steady_rms};

    #[test]
    fn frequencies_ascend() {
        for window in EQ_FREQUENCIES.windows(2) {
            assert!(window[0] < window[1]);
        }
        assert_eq!(EqualizerChain::new().band_count(), BAND_COUNT);
    }

    #[test]
    fn new_chain_is_flat() {
        let eq = EqualizerChain::new();
        assert!(eq.is_flat());
        assert_eq!(eq.gains(), [0.0; BAND_COUNT]);
    }

    #[test]
    fn set_gains_ignores_extra_entries() {
        let mut eq = EqualizerChain::new();
        let gains: Vec<f32> = (1..=12).map(|g| g as f32).collect();
        eq.set_gains(&gains);

        assert_eq!(eq.band_gain(9), Some(10.0));
        assert_eq!(eq.band_gain(10), None);
    }

    #[test]
    fn short_vector_leaves_tail_untouched() {
        let mut eq = EqualizerChain::new();
        eq.set_gains(&[3.0; BAND_COUNT]);
        eq.set_gains(&[-1.0, -2.0]);

        assert_eq!(eq.band_gain(0), Some(-1.0));
        assert_eq!(eq.band_gain(1), Some(-2.0));
        assert_eq!(eq.band_gain(2), Some(3.0));
    }

    #[test]
    fn gains_are_not_clamped() {
        let mut eq = EqualizerChain::new();
        eq.set_band_gain(4, 30.0);
        eq.set_band_gain(5, -40.0);

        assert_eq!(eq.band_gain(4), Some(30.0));
        assert_eq!(eq.band_gain(5), Some(-40.0));
    }

    #[test]
    fn out_of_range_band_is_ignored() {
        let mut eq = EqualizerChain::new();
        eq.set_band_gain(10, 6.0);
        assert!(eq.is_flat());
    }

    #[test]
    fn reset_returns_to_flat() {
        let mut eq = EqualizerChain::new();
        eq.set_gains(&[6.0, -3.0, 2.0, 1.0, 0.5, -0.5, -1.0, 4.0, 5.0, -6.0]);
        eq.reset();

        assert!(eq.is_flat());
    }

    #[test]
    fn flat_chain_is_transparent() {
        let mut eq = EqualizerChain::new();
        let input = generate_sine(440.0, 44100, 0.1);
        let mut buffer = input.clone();

        eq.process(&mut buffer, 44100);

        for (a, b) in input.iter().zip(buffer.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn boost_raises_level_at_band_centre() {
        let mut eq = EqualizerChain::new();
        let input = generate_sine(1000.0, 44100, 0.2);
        let reference = steady_rms(&input);

        eq.set_band_gain(5, 6.0); // 1 kHz
        let mut buffer = input.clone();
        eq.process(&mut buffer, 44100);

        let boosted_db = 20.0 * (steady_rms(&buffer) / reference).log10();
        assert!(
            (boosted_db - 6.0).abs() < 1.0,
            "expected ~+6 dB at 1 kHz, got {:.2} dB",
            boosted_db
        );
    }

    #[test]
    fn gain_change_applies_without_reload() {
        let mut eq = EqualizerChain::new();
        let input = generate_sine(1000.0, 44100, 0.2);

        let mut first = input.clone();
        eq.process(&mut first, 44100);

        eq.set_band_gain(5, -12.0);
        let mut second = input.clone();
        eq.process(&mut second, 44100);

        assert!(steady_rms(&second) < steady_rms(&first) * 0.5);
    }

    #[test]
    fn bypassed_chain_passes_audio_but_keeps_gains() {
        let mut eq = EqualizerChain::bypassed();
        eq.set_gains(&[12.0; BAND_COUNT]);

        let input = generate_sine(1000.0, 44100, 0.05);
        let mut buffer = input.clone();
        eq.process(&mut buffer, 44100);

        assert!(eq.is_bypassed());
        assert_eq!(buffer, input);
        assert_eq!(eq.gains(), [12.0; BAND_COUNT]);
    }

    #[test]
    fn zero_sample_rate_is_a_no_op() {
        let mut eq = EqualizerChain::new();
        eq.set_band_gain(0, 6.0);

        let mut buffer = vec![0.5f32; 64];
        eq.process(&mut buffer, 0);

        assert!(buffer.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn disabled_chain_passes_audio() {
        let mut eq = EqualizerChain::new();
        eq.set_band_gain(5, 6.0);
        eq.set_enabled(false);

        let mut buffer = vec![0.5f32; 64];
        eq.process(&mut buffer, 44100);

        assert!(!eq.is_enabled());
        assert!(buffer.iter().all(|&s| s == 0.5));
    }
}
