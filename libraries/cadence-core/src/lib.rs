//! Cadence Core
//!
//! Catalog-facing types shared by every Cadence crate.
//!
//! The playback engine never talks to the catalog service itself. It is
//! handed an ordered list of [`Track`] descriptors and writes back two small
//! durable lists: the play queue ([`QueueEntry`]) and the recently played
//! ledger ([`RecentEntry`]).
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{Artists, Track, TrackId};
//!
//! let track = Track::new("t1", "Song", Artists::one("Artist"), "https://cdn/t1.mp3");
//! assert_eq!(track.identity(), TrackId::new("t1"));
//!
//! // Identity falls back to the file URL
//! let anonymous = Track::from_url("Loose file", "https://cdn/loose.mp3");
//! assert_eq!(anonymous.identity().as_str(), "https://cdn/loose.mp3");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{Artists, Genre, QueueEntry, RecentEntry, Track, TrackId};
