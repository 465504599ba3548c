//! Trending strip model: the top clicked movies, shown five at a time.

use marquee_proto::model::{MovieSummary, TrendingEntry};

pub const WINDOW: usize = 5;

#[derive(Debug, Default)]
pub struct TrendingFeed {
    entries: Vec<TrendingEntry>,
    window_start: usize,
}

impl TrendingFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entries. A failed fetch arrives here as an empty list.
    pub fn set_entries(&mut self, entries: Vec<TrendingEntry>) {
        self.entries = entries;
        self.window_start = 0;
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn window_start(&self) -> usize {
        self.window_start
    }

    fn max_start(&self) -> usize {
        self.entries.len().saturating_sub(WINDOW)
    }

    pub fn next(&mut self) {
        self.window_start = (self.window_start + WINDOW).min(self.max_start());
    }

    pub fn prev(&mut self) {
        self.window_start = self.window_start.saturating_sub(WINDOW);
    }

    pub fn can_next(&self) -> bool {
        self.window_start + WINDOW < self.entries.len()
    }

    pub fn can_prev(&self) -> bool {
        self.window_start > 0
    }

    /// `(rank, entry)` pairs for the current window; rank is 1-based and
    /// absolute, not relative to the window.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &TrendingEntry)> {
        self.entries
            .iter()
            .enumerate()
            .skip(self.window_start)
            .take(WINDOW)
            .map(|(i, e)| (i + 1, e))
    }

    /// Entry at `offset` within the visible window.
    pub fn entry_in_window(&self, offset: usize) -> Option<&TrendingEntry> {
        if offset >= WINDOW {
            return None;
        }
        self.entries.get(self.window_start + offset)
    }

    /// What to hand the selection controller for the entry at `offset`.
    pub fn selection_for(&self, offset: usize) -> Option<(u64, MovieSummary)> {
        self.entry_in_window(offset)
            .map(|e| (e.movie_id, e.to_summary()))
    }
}
