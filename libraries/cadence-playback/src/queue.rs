//! Explicit play queue
//!
//! Tracks the user asked to hear next. The queue takes priority over the
//! shuffle order and the natural order when the current track ends, and
//! holds each track id at most once.

use cadence_core::{QueueEntry, TrackId};
use std::collections::VecDeque;

/// FIFO of user-queued tracks, unique by id
#[derive(Debug, Clone, Default)]
pub struct PlayQueue {
    entries: VecDeque<QueueEntry>,
}

impl PlayQueue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted entries
    ///
    /// Later duplicates of an id are dropped.
    pub fn from_entries(entries: Vec<QueueEntry>) -> Self {
        let mut queue = Self::new();
        for entry in entries {
            queue.enqueue(entry);
        }
        queue
    }

    /// Append an entry
    ///
    /// Returns `false` when the id is already queued; the earlier position wins.
    pub fn enqueue(&mut self, entry: QueueEntry) -> bool {
        if self.contains(&entry.id) {
            return false;
        }
        self.entries.push_back(entry);
        true
    }

    /// Take the head of the queue
    pub fn dequeue(&mut self) -> Option<QueueEntry> {
        self.entries.pop_front()
    }

    /// Remove the entry with `id`
    pub fn remove(&mut self, id: &TrackId) -> bool {
        match self.entries.iter().position(|e| &e.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Head of the queue without removing it
    pub fn peek(&self) -> Option<&QueueEntry> {
        self.entries.front()
    }

    /// Entries in play order
    pub fn entries(&self) -> Vec<QueueEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Iterate in play order
    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> {
        self.entries.iter()
    }

    /// Number of queued tracks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Check if `id` is queued
    pub fn contains(&self, id: &TrackId) -> bool {
        self.entries.iter().any(|e| &e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::{Artists, Track};

    fn entry(id: &str) -> QueueEntry {
        QueueEntry::from(&Track::new(
            id,
            format!("Track {id}"),
            Artists::one("Artist"),
            format!("u/{id}"),
        ))
    }

    fn ids(queue: &PlayQueue) -> Vec<String> {
        queue.iter().map(|e| e.id.to_string()).collect()
    }

    #[test]
    fn create_empty_queue() {
        let queue = PlayQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert!(queue.peek().is_none());
    }

    #[test]
    fn fifo_order() {
        let mut queue = PlayQueue::new();
        queue.enqueue(entry("a"));
        queue.enqueue(entry("b"));

        assert_eq!(queue.peek().map(|e| e.id.as_str()), Some("a"));
        assert_eq!(queue.dequeue().map(|e| e.id), Some(TrackId::new("a")));
        assert_eq!(queue.dequeue().map(|e| e.id), Some(TrackId::new("b")));
        assert!(queue.dequeue().is_none());
    }

    #[test]
    fn duplicate_keeps_first_position() {
        let mut queue = PlayQueue::new();
        assert!(queue.enqueue(entry("a")));
        assert!(queue.enqueue(entry("b")));
        assert!(!queue.enqueue(entry("a")));

        assert_eq!(ids(&queue), vec!["a", "b"]);
    }

    #[test]
    fn remove_by_id() {
        let mut queue = PlayQueue::new();
        queue.enqueue(entry("a"));
        queue.enqueue(entry("b"));
        queue.enqueue(entry("c"));

        assert!(queue.remove(&TrackId::new("b")));
        assert!(!queue.remove(&TrackId::new("zzz")));
        assert_eq!(ids(&queue), vec!["a", "c"]);
    }

    #[test]
    fn from_entries_deduplicates() {
        let queue = PlayQueue::from_entries(vec![entry("a"), entry("b"), entry("a")]);

        assert_eq!(ids(&queue), vec!["a", "b"]);
        assert!(queue.contains(&TrackId::new("b")));
    }

    #[test]
    fn clear_empties() {
        let mut queue = PlayQueue::from_entries(vec![entry("a"), entry("b")]);
        queue.clear();

        assert!(queue.is_empty());
        assert!(queue.entries().is_empty());
    }
}
