//! Recall history ring buffer

/// Fixed-capacity circular log of submitted lines.
///
/// The write cursor marks the next slot to fill; the browse cursor tracks the
/// user's position while navigating with the arrow keys, independent of where
/// new lines land. Slots that were never written hold empty text; with the
/// skip-unused policy active the browse cursor refuses to rest on them.
pub struct HistoryBuffer {
    slots: Vec<String>,
    write_idx: usize,
    browse_idx: usize,
    skip_unused: bool,
}

impl HistoryBuffer {
    /// Create a history with `capacity` line slots.
    ///
    /// # Panics
    ///
    /// Panics when `capacity` is zero; recall over an empty ring is
    /// undefined, so this is caught at construction.
    pub fn new(capacity: usize, skip_unused: bool) -> Self {
        assert!(capacity >= 1, "history capacity must be at least 1");
        Self {
            slots: vec![String::new(); capacity],
            write_idx: 0,
            browse_idx: 0,
            skip_unused,
        }
    }

    /// Number of line slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Append a submitted line.
    ///
    /// Trailing whitespace is trimmed. A line equal to the most recently
    /// written entry is dropped (immediate-repeat dedup). Resets browsing to
    /// the write position.
    pub fn push(&mut self, line: &str) {
        let cap = self.slots.len();
        let line = line.trim_end();
        let last = (self.write_idx + cap - 1) % cap;
        if self.slots[last] == line {
            return;
        }
        self.slots[self.write_idx] = line.to_string();
        self.write_idx = (self.write_idx + 1) % cap;
        self.browse_idx = self.write_idx;
    }

    /// Step the browse cursor one entry backward (older) and return the text.
    ///
    /// Landing on a never-written slot undoes the step when the skip-unused
    /// policy is active, so browsing stops at the oldest retained entry
    /// instead of wrapping through unused slots.
    pub fn recall_prev(&mut self) -> &str {
        let cap = self.slots.len();
        self.browse_idx = (self.browse_idx + cap - 1) % cap;
        if self.slots[self.browse_idx].is_empty() && self.skip_unused {
            self.browse_idx = (self.browse_idx + 1) % cap;
        }
        &self.slots[self.browse_idx]
    }

    /// Step the browse cursor one entry forward (newer) and return the text.
    pub fn recall_next(&mut self) -> &str {
        let cap = self.slots.len();
        self.browse_idx = (self.browse_idx + 1) % cap;
        if self.slots[self.browse_idx].is_empty() && self.skip_unused {
            self.browse_idx = (self.browse_idx + cap - 1) % cap;
        }
        &self.slots[self.browse_idx]
    }

    /// Move the browse cursor back to the write position.
    pub fn reset_nav(&mut self) {
        self.browse_idx = self.write_idx;
    }
}
