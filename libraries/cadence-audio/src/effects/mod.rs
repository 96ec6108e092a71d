//! Audio effects processing
//!
//! All effects operate in place on interleaved stereo f32 samples.

mod chain;
mod effect;
mod equalizer;

pub use chain::EffectChain;
pub use effect::AudioEffect;
pub use equalizer::{EqualizerChain, SharedEqualizer, BAND_COUNT, EQ_FREQUENCIES, EQ_Q};
