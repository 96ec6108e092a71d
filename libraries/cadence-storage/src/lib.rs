//! Cadence Storage
//!
//! Durable key/value surfaces for the playback engine.
//!
//! Each surface is one key holding one JSON document: the equalizer gain
//! vector, the volume/mute pair, the play queue, the recently played ledger
//! and the last current track. There is no versioning; a format change needs
//! the reader and writer updated together.
//!
//! Reads never fail from the caller's point of view. A missing key, a
//! backend error or a malformed document all yield the surface's default,
//! and the problem is logged.
//!
//! # Example
//!
//! ```rust
//! use cadence_storage::{MemoryStore, PlayerStorage, VolumeSetting};
//! use std::sync::Arc;
//!
//! let storage = PlayerStorage::new(Arc::new(MemoryStore::new()));
//! assert_eq!(storage.load_volume(), VolumeSetting::default());
//!
//! storage.save_volume(&VolumeSetting { level: 0.4, muted: true }).unwrap();
//! assert!(storage.load_volume().muted);
//! ```

#![forbid(unsafe_code)]

mod error;
mod kv;
mod player_state;
mod redb_store;

pub use error::{Result, StorageError};
pub use kv::{KeyValueStore, MemoryStore};
pub use player_state::{
    PlayerStorage, VolumeSetting, KEY_CURRENT_TRACK, KEY_EQUALIZER, KEY_QUEUE, KEY_RECENT,
    KEY_VOLUME,
};
pub use redb_store::RedbStore;
