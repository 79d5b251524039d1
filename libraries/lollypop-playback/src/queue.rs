//! Explicit play queue
//!
//! Tracks the user asked to hear next. The queue is consumed from the
//! front before any mode-driven selection and is independent of the
//! playback context: a queued track does not need to belong to it.
//!
//! ```text
//! Currently Playing: Track A
//! ─────────────────────────────
//! Queue (play next, in order):
//!   - Track B
//!   - Track C
//! ─────────────────────────────
//! Context (linear / shuffle / party selection)
//! ```

use crate::error::{PlaybackError, Result};
use lollypop_core::TrackId;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: VecDeque<TrackId>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track to the end of the queue
    pub fn push(&mut self, track: TrackId) {
        self.tracks.push_back(track);
    }

    /// Insert a track at `index`; indices past the end append
    pub fn insert(&mut self, index: usize, track: TrackId) {
        let index = index.min(self.tracks.len());
        self.tracks.insert(index, track);
    }

    /// Take the next track to play
    pub fn pop_next(&mut self) -> Option<TrackId> {
        self.tracks.pop_front()
    }

    /// Remove the first occurrence of a track
    ///
    /// Returns whether anything was removed.
    pub fn remove_track(&mut self, track: TrackId) -> bool {
        match self.position(track) {
            Some(index) => {
                self.tracks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the entry at `index`
    pub fn remove(&mut self, index: usize) -> Result<TrackId> {
        let length = self.tracks.len();
        self.tracks
            .remove(index)
            .ok_or(PlaybackError::QueueIndexOutOfBounds { index, length })
    }

    /// Move the entry at `from` so it ends up at `to`
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let length = self.tracks.len();
        if from >= length {
            return Err(PlaybackError::QueueIndexOutOfBounds { index: from, length });
        }
        if to >= length {
            return Err(PlaybackError::QueueIndexOutOfBounds { index: to, length });
        }

        if from != to {
            if let Some(track) = self.tracks.remove(from) {
                self.tracks.insert(to, track);
            }
        }
        Ok(())
    }

    /// Position of the first occurrence of a track
    pub fn position(&self, track: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| *t == track)
    }

    pub fn contains(&self, track: TrackId) -> bool {
        self.tracks.contains(&track)
    }

    /// Queue contents, next to play first
    pub fn get_all(&self) -> Vec<TrackId> {
        self.tracks.iter().copied().collect()
    }

    pub fn peek_next(&self) -> Option<TrackId> {
        self.tracks.front().copied()
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(id: i64) -> TrackId {
        TrackId::new(id)
    }

    fn queue_of(ids: &[i64]) -> Queue {
        let mut queue = Queue::new();
        for id in ids {
            queue.push(t(*id));
        }
        queue
    }

    #[test]
    fn pops_in_fifo_order() {
        let mut queue = queue_of(&[1, 2, 3]);
        assert_eq!(queue.pop_next(), Some(t(1)));
        assert_eq!(queue.pop_next(), Some(t(2)));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn insert_clamps_past_end() {
        let mut queue = queue_of(&[1, 2]);
        queue.insert(0, t(9));
        queue.insert(100, t(8));
        assert_eq!(queue.get_all(), vec![t(9), t(1), t(2), t(8)]);
    }

    #[test]
    fn remove_track_only_drops_first_occurrence() {
        let mut queue = queue_of(&[1, 2, 1]);
        assert!(queue.remove_track(t(1)));
        assert_eq!(queue.get_all(), vec![t(2), t(1)]);
        assert!(!queue.remove_track(t(7)));
    }

    #[test]
    fn reorder_moves_entry() {
        let mut queue = queue_of(&[1, 2, 3, 4]);
        queue.reorder(0, 2).unwrap();
        assert_eq!(queue.get_all(), vec![t(2), t(3), t(1), t(4)]);

        queue.reorder(3, 0).unwrap();
        assert_eq!(queue.get_all(), vec![t(4), t(2), t(3), t(1)]);
    }

    #[test]
    fn reorder_out_of_bounds() {
        let mut queue = queue_of(&[1, 2]);
        let err = queue.reorder(0, 5).unwrap_err();
        assert!(matches!(
            err,
            PlaybackError::QueueIndexOutOfBounds { index: 5, length: 2 }
        ));
    }

    #[test]
    fn remove_by_index() {
        let mut queue = queue_of(&[1, 2, 3]);
        assert_eq!(queue.remove(1).unwrap(), t(2));
        assert!(queue.remove(5).is_err());
        assert_eq!(queue.position(t(3)), Some(1));
        assert!(queue.contains(t(1)));
        assert_eq!(queue.peek_next(), Some(t(1)));
    }
}
