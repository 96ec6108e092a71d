//! Recently played ledger
//!
//! Bounded, most-recent-first list of track ids. Replaying a track moves it
//! to the front instead of adding a second entry.

use cadence_core::{RecentEntry, Track, TrackId};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Default ledger capacity
pub const HISTORY_LIMIT: usize = 20;

/// Recency ledger with bounded size
#[derive(Debug, Clone)]
pub struct RecencyLedger {
    /// Ledger (most recent = front)
    entries: VecDeque<RecentEntry>,

    /// Maximum ledger size
    limit: usize,
}

impl Default for RecencyLedger {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

impl RecencyLedger {
    /// Create an empty ledger holding at most `limit` entries
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Rebuild from persisted entries (most recent first)
    ///
    /// Later duplicates are dropped and the result is capped to `limit`.
    pub fn from_entries(entries: Vec<RecentEntry>, limit: usize) -> Self {
        let mut ledger = Self::new(limit);
        for entry in entries {
            if ledger.entries.len() >= limit {
                break;
            }
            if !ledger.entries.iter().any(|e| e.id == entry.id) {
                ledger.entries.push_back(entry);
            }
        }
        ledger
    }

    /// Record that `id` started playing at `at`
    pub fn record_play(&mut self, id: TrackId, at: DateTime<Utc>) {
        self.entries.retain(|e| e.id != id);
        self.entries.push_front(RecentEntry::new(id, at));
        self.entries.truncate(self.limit);
    }

    /// Record that `id` started playing now
    pub fn record_play_now(&mut self, id: TrackId) {
        self.record_play(id, Utc::now());
    }

    /// Entries, most recent first
    pub fn entries(&self) -> Vec<RecentEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Ids, most recent first
    pub fn ids(&self) -> impl Iterator<Item = &TrackId> {
        self.entries.iter().map(|e| &e.id)
    }

    /// Map ids to tracks in `available`, skipping ids that are not there
    pub fn resolve<'a>(&self, available: &'a [Track]) -> Vec<&'a Track> {
        self.entries
            .iter()
            .filter_map(|entry| available.iter().find(|t| t.identity() == entry.id))
            .collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if ledger is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum ledger size
    pub fn limit(&self) -> usize {
        self.limit
    }
}
