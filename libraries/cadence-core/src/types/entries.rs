/// Persisted list entries: play queue and recently played ledger
use crate::types::{Artists, Track, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One slot of the user-curated play queue
///
/// Carries enough metadata to render the queue and to start playback
/// without a catalog round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    /// Track identity (unique within a queue)
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Credited artists
    #[serde(default)]
    pub artists: Artists,

    /// Audio file location
    pub file_url: String,

    /// Cover art location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork_url: Option<String>,
}

impl QueueEntry {
    /// Rebuild a playable track descriptor from the entry
    pub fn to_track(&self) -> Track {
        Track {
            id: Some(self.id.clone()),
            title: self.title.clone(),
            artists: self.artists.clone(),
            file_url: self.file_url.clone(),
            artwork_url: self.artwork_url.clone(),
            genre: None,
        }
    }
}

impl From<&Track> for QueueEntry {
    fn from(track: &Track) -> Self {
        Self {
            id: track.identity(),
            title: track.title.clone(),
            artists: track.artists.clone(),
            file_url: track.file_url.clone(),
            artwork_url: track.artwork_url.clone(),
        }
    }
}

/// One row of the recently played ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentEntry {
    /// Identity of the track that started playing
    pub id: TrackId,

    /// When playback of the track began
    pub played_at: DateTime<Utc>,
}

impl RecentEntry {
    /// Create a ledger entry
    pub fn new(id: TrackId, played_at: DateTime<Utc>) -> Self {
        Self { id, played_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn queue_entry_keeps_track_identity() {
        let track = Track::from_url("Loose", "https://cdn/loose.mp3").with_artwork("art");
        let entry = QueueEntry::from(&track);

        assert_eq!(entry.id.as_str(), "https://cdn/loose.mp3");
        assert_eq!(entry.artwork_url.as_deref(), Some("art"));

        let rebuilt = entry.to_track();
        assert_eq!(rebuilt.identity(), track.identity());
        assert!(rebuilt.same_source(&track));
    }

    #[test]
    fn recent_entry_uses_iso8601_timestamps() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let entry = RecentEntry::new(TrackId::new("a"), at);

        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"id":"a","playedAt":"2024-05-01T12:30:00Z"}"#);

        let back: RecentEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
