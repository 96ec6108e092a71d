//! Shuffle and repeat sequencing
//!
//! The sequencer never reorders the collection. While shuffled it walks a
//! permutation of collection indices with a cursor; otherwise it steps
//! through the natural order. Both directions wrap around.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Random permutation of `0..n` (Fisher-Yates)
///
/// Every permutation is equally likely.
pub fn generate_shuffle_order<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }
    order
}

/// Decides which collection index plays next
#[derive(Debug, Clone)]
pub struct Sequencer {
    /// Collection length
    len: usize,

    /// Shuffle enabled
    shuffled: bool,

    /// Permutation of `0..len` while shuffled, empty otherwise
    order: Vec<usize>,

    /// Position inside `order`
    cursor: usize,

    /// Single-track repeat
    repeating: bool,

    rng: StdRng,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer {
    /// Linear, non-repeating sequencer over an empty collection
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Sequencer whose shuffle orders are reproducible
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            len: 0,
            shuffled: false,
            order: Vec::new(),
            cursor: 0,
            repeating: false,
            rng,
        }
    }

    /// Collection length the sequencer works over
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Shuffle enabled
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Repeat enabled
    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    /// Current permutation (empty when not shuffled)
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Position inside the permutation
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Flip shuffle; `current` is the collection index playing now
    ///
    /// Turning shuffle on draws a fresh order and parks the cursor on
    /// `current`, so stepping forward visits every other track before
    /// coming back to it. Returns the new state.
    pub fn toggle_shuffle(&mut self, current: Option<usize>) -> bool {
        self.shuffled = !self.shuffled;
        if self.shuffled {
            self.regenerate(current);
        } else {
            self.order.clear();
            self.cursor = 0;
        }
        debug!("Shuffle {}", if self.shuffled { "enabled" } else { "disabled" });
        self.shuffled
    }

    /// Flip single-track repeat, returning the new state
    pub fn toggle_repeat(&mut self) -> bool {
        self.repeating = !self.repeating;
        self.repeating
    }

    /// Set repeat explicitly
    pub fn set_repeat(&mut self, repeating: bool) {
        self.repeating = repeating;
    }

    /// Collection changed size
    pub fn set_len(&mut self, len: usize, current: Option<usize>) {
        if len == self.len {
            return;
        }
        self.len = len;
        if self.shuffled {
            self.regenerate(current);
        }
    }

    /// Point the cursor at `index` (user picked a track directly)
    pub fn sync_cursor(&mut self, index: usize) {
        if let Some(position) = self.order.iter().position(|&i| i == index) {
            self.cursor = position;
        }
    }

    /// Step forward from `current`
    ///
    /// `None` only for an empty collection.
    pub fn next_index(&mut self, current: Option<usize>) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        if self.shuffled && !self.order.is_empty() {
            self.cursor = (self.cursor + 1) % self.order.len();
            return Some(self.order[self.cursor]);
        }
        Some(match current {
            Some(index) => (index + 1) % self.len,
            None => 0,
        })
    }

    /// Step backward from `current`
    pub fn previous_index(&mut self, current: Option<usize>) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        if self.shuffled && !self.order.is_empty() {
            let len = self.order.len();
            self.cursor = (self.cursor + len - 1) % len;
            return Some(self.order[self.cursor]);
        }
        Some(match current {
            Some(index) => (index + self.len - 1) % self.len,
            None => self.len - 1,
        })
    }

    fn regenerate(&mut self, current: Option<usize>) {
        self.order = generate_shuffle_order(self.len, &mut self.rng);
        // Without a current track, park on the last slot so the next step lands on order[0]
        self.cursor = current
            .and_then(|index| self.order.iter().position(|&i| i == index))
            .unwrap_or_else(|| self.order.len().saturating_sub(1));
    }
}
