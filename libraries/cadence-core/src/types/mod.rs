mod entries;
mod ids;
mod track;

pub use entries::{QueueEntry, RecentEntry};
pub use ids::TrackId;
pub use track::{Artists, Genre, Track};
