//! Ordered effect stages for a device's output path

use super::effect::AudioEffect;
use super::equalizer::SharedEqualizer;
use std::sync::{PoisonError, TryLockError};

/// Chain of audio effects processed in order
pub struct EffectChain {
    effects: Vec<Box<dyn AudioEffect>>,
}

impl EffectChain {
    /// Create a new empty effect chain
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Add an effect to the end of the chain
    pub fn add_effect(&mut self, effect: Box<dyn AudioEffect>) {
        self.effects.push(effect);
    }

    /// Process audio through every enabled stage
    ///
    /// # Arguments
    /// * `buffer` - Interleaved stereo samples (L, R, L, R, ...)
    /// * `sample_rate` - Sample rate in Hz
    pub fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        for effect in &mut self.effects {
            if effect.is_enabled() {
                effect.process(buffer, sample_rate);
            }
        }
    }

    /// Clear filter memory in every stage
    pub fn clear_state(&mut self) {
        for effect in &mut self.effects {
            effect.clear_state();
        }
    }

    /// Remove all stages
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Get effect at index
    pub fn get_effect(&self, index: usize) -> Option<&(dyn AudioEffect + 'static)> {
        self.effects.get(index).map(|e| e.as_ref())
    }

    /// Get mutable effect at index
    pub fn get_effect_mut(&mut self, index: usize) -> Option<&mut (dyn AudioEffect + 'static)> {
        self.effects.get_mut(index).map(|e| e.as_mut())
    }
}

impl Default for EffectChain {
    fn default() -> Self {
        Self::new()
    }
}

/// The shared handle sits in the output path while the playback core keeps
/// a clone for gain changes.
///
/// The audio thread never waits on the lock: a buffer that arrives while
/// gains are being written passes through unfiltered.
impl AudioEffect for SharedEqualizer {
    fn process(&mut self, buffer: &mut [f32], sample_rate: u32) {
        match self.try_lock() {
            Ok(mut eq) => eq.process(buffer, sample_rate),
            Err(TryLockError::Poisoned(poisoned)) => {
                poisoned.into_inner().process(buffer, sample_rate);
            }
            Err(TryLockError::WouldBlock) => {}
        }
    }

    fn clear_state(&mut self) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear_state();
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_enabled(enabled);
    }

    fn is_enabled(&self) -> bool {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_enabled()
    }

    fn name(&self) -> &str {
        "Shared Equalizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::test_signals::{generate_sine, steady_rms};
    use crate::effects::EqualizerChain;
    use std::sync::Arc;

    struct GainEffect {
        gain: f32,
        enabled: bool,
    }

    impl AudioEffect for GainEffect {
        fn process(&mut self, buffer: &mut [f32], _sample_rate: u32) {
            for sample in buffer.iter_mut() {
                *sample *= self.gain;
            }
        }

        fn clear_state(&mut self) {}

        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn name(&self) -> &str {
            "Gain"
        }
    }

    #[test]
    fn stages_run_in_order_and_skip_disabled() {
        let mut chain = EffectChain::new();
        chain.add_effect(Box::new(GainEffect {
            gain: 0.5,
            enabled: true,
        }));
        chain.add_effect(Box::new(GainEffect {
            gain: 0.1,
            enabled: false,
        }));

        let mut buffer = vec![1.0; 4];
        chain.process(&mut buffer, 44100);
        assert!(buffer.iter().all(|&s| (s - 0.5).abs() < 1e-6));

        chain.get_effect_mut(1).unwrap().set_enabled(true);
        chain.process(&mut buffer, 44100);
        assert!(buffer.iter().all(|&s| (s - 0.05).abs() < 1e-6));

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.get_effect(0).map(|e| e.name()), Some("Gain"));
        chain.clear();
        assert!(chain.is_empty());
    }

    #[test]
    fn shared_equalizer_follows_gain_changes() {
        let shared = EqualizerChain::shared();
        let mut chain = EffectChain::new();
        chain.add_effect(Box::new(Arc::clone(&shared)));

        let input = generate_sine(1000.0, 44100, 0.5);
        let mut flat = input.clone();
        chain.process(&mut flat, 44100);

        shared.lock().unwrap().set_band_gain(5, 12.0);
        chain.clear_state();
        let mut boosted = input.clone();
        chain.process(&mut boosted, 44100);

        assert!(steady_rms(&boosted) > steady_rms(&flat) * 2.0);
    }

    #[test]
    fn held_lock_passes_audio_through() {
        let shared = EqualizerChain::shared();
        shared.lock().unwrap().set_band_gain(5, 12.0);
        let mut stage: SharedEqualizer = Arc::clone(&shared);

        let input = generate_sine(1000.0, 44100, 0.1);
        let mut buffer = input.clone();
        {
            let _writer = shared.lock().unwrap();
            stage.process(&mut buffer, 44100);
        }

        assert_eq!(buffer, input);
    }
}
