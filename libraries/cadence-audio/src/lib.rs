//! Cadence Audio
//!
//! Output-path signal processing for the Cadence playback engine.
//!
//! The only stage today is the ten-band [`EqualizerChain`]: ten peaking
//! filters wired in series between the decoded source and the output sink.
//! A device that renders audio holds the chain through a
//! [`SharedEqualizer`] handle so gain changes made by the playback core
//! land on the very next buffer.
//!
//! # Example
//!
//! ```rust
//! use cadence_audio::{AudioEffect, EqualizerChain};
//!
//! let mut eq = EqualizerChain::new();
//! eq.set_gains(&[6.0, 4.0, 2.0]); // remaining bands untouched
//! assert_eq!(eq.band_gain(0), Some(6.0));
//!
//! let mut buffer = vec![0.25f32; 512]; // interleaved stereo
//! eq.process(&mut buffer, 44_100);
//!
//! eq.reset();
//! assert!(eq.gains().iter().all(|&g| g == 0.0));
//! ```

#![forbid(unsafe_code)]

pub mod effects;

pub use effects::{
    AudioEffect, EffectChain, EqualizerChain, SharedEqualizer, BAND_COUNT, EQ_FREQUENCIES, EQ_Q,
};
