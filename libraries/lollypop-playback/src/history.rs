//! Shuffle play history
//!
//! Bounded record of the tracks picked in track-shuffle modes, used to step
//! backwards through a random sequence. The most recent entry is always the
//! current track.

use lollypop_core::TrackId;
use std::collections::VecDeque;

/// Play history with bounded size
///
/// Oldest entries are discarded once `max_size` is reached.
#[derive(Debug, Clone)]
pub struct History {
    /// History buffer (most recent = back)
    tracks: VecDeque<TrackId>,

    max_size: usize,
}

impl History {
    /// Create new history with specified maximum size (at least one entry)
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            tracks: VecDeque::with_capacity(max_size.min(64)),
            max_size,
        }
    }

    /// Add track to history, discarding the oldest entry when full
    pub fn push(&mut self, track: TrackId) {
        if self.tracks.len() >= self.max_size {
            self.tracks.pop_front();
        }
        self.tracks.push_back(track);
    }

    /// Most recent track (the current one in shuffle modes)
    pub fn peek(&self) -> Option<TrackId> {
        self.tracks.back().copied()
    }

    /// Drop the current entry and return the one before it
    ///
    /// With fewer than two entries there is nothing to go back to and the
    /// history is left untouched.
    pub fn step_back(&mut self) -> Option<TrackId> {
        if self.tracks.len() < 2 {
            return None;
        }
        self.tracks.pop_back();
        self.peek()
    }

    /// All entries, oldest first
    pub fn get_all(&self) -> Vec<TrackId> {
        self.tracks.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Set maximum history size
    ///
    /// If new size is smaller than current, oldest entries are discarded
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size.max(1);

        while self.tracks.len() > self.max_size {
            self.tracks.pop_front();
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(id: i64) -> TrackId {
        TrackId::new(id)
    }

    #[test]
    fn create_history() {
        let history = History::new(10);
        assert_eq!(history.max_size(), 10);
        assert!(history.is_empty());
    }

    #[test]
    fn peek_is_most_recent() {
        let mut history = History::new(10);
        history.push(t(1));
        history.push(t(2));

        assert_eq!(history.peek(), Some(t(2)));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn step_back_returns_previous_and_keeps_it_current() {
        let mut history = History::new(10);
        history.push(t(1));
        history.push(t(2));
        history.push(t(3));

        assert_eq!(history.step_back(), Some(t(2)));
        assert_eq!(history.peek(), Some(t(2)));
        assert_eq!(history.step_back(), Some(t(1)));

        // Only the current entry is left
        assert_eq!(history.step_back(), None);
        assert_eq!(history.get_all(), vec![t(1)]);
    }

    #[test]
    fn history_bounded() {
        let mut history = History::new(3);
        for id in 1..=4 {
            history.push(t(id));
        }

        assert_eq!(history.get_all(), vec![t(2), t(3), t(4)]);
    }

    #[test]
    fn shrinking_discards_oldest() {
        let mut history = History::new(5);
        for id in 1..=5 {
            history.push(t(id));
        }

        history.set_max_size(3);
        assert_eq!(history.get_all(), vec![t(3), t(4), t(5)]);
    }

    #[test]
    fn zero_size_is_clamped() {
        let mut history = History::new(0);
        history.push(t(1));
        history.push(t(2));
        assert_eq!(history.max_size(), 1);
        assert_eq!(history.get_all(), vec![t(2)]);
    }
}
