//! Cadence - Playback Management
//!
//! Device-agnostic playback state engine.
//!
//! This crate provides:
//! - A transport state machine that trusts what the device reports
//! - Stale-load protection through monotonically increasing request ids
//! - Shuffle (cursor over a Fisher-Yates permutation) and single-track repeat
//! - An explicit play queue that drains before the shuffle or natural order
//! - A recently played ledger (most recent first, capped at 20)
//! - Linear volume with mute, and ten-band equalizer settings
//! - A shared store that serializes mutations and publishes snapshots
//!
//! # Architecture
//!
//! The manager never renders audio. The host provides a [`PlaybackDevice`]
//! (a media element bridge, a native decoder, a simulation) and feeds back
//! what it observes as [`DeviceEvent`]s. Durable surfaces are written
//! through [`cadence_storage::PlayerStorage`] when one is attached.
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{Artists, Track};
//! use cadence_playback::{NullDevice, PlaybackConfig, PlaybackManager};
//!
//! let tracks = vec![
//!     Track::new("a", "A", Artists::one("X"), "https://cdn/a.mp3"),
//!     Track::new("b", "B", Artists::one("X"), "https://cdn/b.mp3"),
//! ];
//!
//! let mut manager = PlaybackManager::new(NullDevice::new(), PlaybackConfig::default());
//! manager.set_collection(tracks.clone());
//! manager.play(tracks[0].clone());
//! manager.pump(); // let the device report readiness
//! assert!(manager.is_playing());
//!
//! manager.next();
//! assert_eq!(manager.current_track().map(|t| t.title.as_str()), Some("B"));
//! ```
//!
//! # Example: Shared store
//!
//! ```rust
//! use cadence_playback::{NullDevice, PlaybackConfig, PlaybackManager, PlayerAction, PlayerStore};
//!
//! let store = PlayerStore::new(PlaybackManager::new(NullDevice::new(), PlaybackConfig::default()));
//! let updates = store.subscribe();
//!
//! store.dispatch(PlayerAction::SetVolume(0.5));
//! assert!((updates.borrow().volume - 0.5).abs() < f32::EPSILON);
//! ```

#![forbid(unsafe_code)]

pub mod device;
pub mod equalizer;
pub mod error;
pub mod events;
pub mod history;
pub mod manager;
pub mod queue;
pub mod shuffle;
pub mod store;
pub mod transport;
pub mod types;
pub mod volume;

pub use device::{DeviceEvent, NullDevice, PlaybackDevice};
pub use equalizer::Equalizer;
pub use error::{DeviceError, PlaybackError, Result};
pub use events::PlaybackEvent;
pub use history::{RecencyLedger, HISTORY_LIMIT};
pub use manager::PlaybackManager;
pub use queue::PlayQueue;
pub use shuffle::{generate_shuffle_order, Sequencer};
pub use store::{PlayerAction, PlayerStore};
pub use transport::Transport;
pub use types::{LoadRequestId, PlaybackConfig, PlaybackSnapshot, TransportState};
pub use volume::Volume;
