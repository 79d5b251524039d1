//! Playback context
//!
//! The ordered albums eligible for playback, the genre filter their tracks
//! are listed with, the album permutation used while albums are shuffled,
//! and the cursor sequential modes step from.

use crate::shuffle;
use lollypop_core::{AlbumId, GenreFilter, TrackId};
use rand::Rng;

/// Where sequential playback stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cursor {
    /// Nothing played from the context yet
    #[default]
    Unset,

    /// On a track of a context album
    At {
        album: AlbumId,
        track: TrackId,
        /// Index in the album's filtered track list when the cursor was set
        position: usize,
    },

    /// The album under the cursor was removed; the next step starts at
    /// whatever album now sits at `index` of the playback order
    Before { index: usize },
}

#[derive(Debug, Clone, Default)]
pub struct PlaybackContext {
    /// Albums in the order they were added
    albums: Vec<AlbumId>,

    filter: GenreFilter,

    /// Session permutation while albums are shuffled
    shuffled: Option<Vec<AlbumId>>,

    cursor: Cursor,
}

impl PlaybackContext {
    /// Create a context; duplicate albums are dropped, first occurrence wins
    pub fn new(albums: Vec<AlbumId>, filter: GenreFilter) -> Self {
        let mut unique = Vec::with_capacity(albums.len());
        for album in albums {
            if !unique.contains(&album) {
                unique.push(album);
            }
        }

        Self {
            albums: unique,
            filter,
            shuffled: None,
            cursor: Cursor::Unset,
        }
    }

    /// Albums in their original order
    pub fn albums(&self) -> &[AlbumId] {
        &self.albums
    }

    /// Albums in playback order (the permutation while shuffled)
    pub fn order(&self) -> &[AlbumId] {
        self.shuffled.as_deref().unwrap_or(&self.albums)
    }

    pub fn filter(&self) -> &GenreFilter {
        &self.filter
    }

    pub fn contains(&self, album: AlbumId) -> bool {
        self.albums.contains(&album)
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    /// Append an album; while shuffled it lands at a random spot of the
    /// permutation. Returns false if the album was already present.
    pub fn add<R: Rng + ?Sized>(&mut self, album: AlbumId, rng: &mut R) -> bool {
        if self.contains(album) {
            return false;
        }

        self.albums.push(album);
        if let Some(order) = self.shuffled.as_mut() {
            let at = shuffle::insert_at_random(order, album, rng);
            // Keep the parked cursor on the album it was waiting for
            if let Cursor::Before { index } = self.cursor {
                if at <= index {
                    self.cursor = Cursor::Before { index: index + 1 };
                }
            }
        }
        true
    }

    /// Remove an album, keeping the cursor meaningful
    ///
    /// Returns false if the album was not present.
    pub fn remove(&mut self, album: AlbumId) -> bool {
        let Some(index) = self.order().iter().position(|a| *a == album) else {
            return false;
        };

        self.cursor = match self.cursor {
            Cursor::At { album: current, .. } if current == album => Cursor::Before { index },
            Cursor::Before { index: at } if index < at => Cursor::Before { index: at - 1 },
            other => other,
        };

        self.albums.retain(|a| *a != album);
        if let Some(order) = self.shuffled.as_mut() {
            order.retain(|a| *a != album);
        }
        true
    }

    /// Keep only the albums matching `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(AlbumId) -> bool) {
        let gone: Vec<AlbumId> = self.albums.iter().copied().filter(|a| !keep(*a)).collect();
        for album in gone {
            self.remove(album);
        }
    }

    /// Compute a fresh album permutation
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.shuffled = Some(shuffle::shuffled(&self.albums, rng));
    }

    /// Drop the permutation and go back to the original order
    pub fn unshuffle(&mut self) {
        self.shuffled = None;
        if let Cursor::Before { .. } = self.cursor {
            self.cursor = Cursor::Unset;
        }
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled.is_some()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn set_cursor(&mut self, album: AlbumId, track: TrackId, position: usize) {
        self.cursor = Cursor::At {
            album,
            track,
            position,
        };
    }

    /// Park the cursor so the next step starts at album `index` of the
    /// playback order
    pub fn park_cursor(&mut self, index: usize) {
        self.cursor = Cursor::Before { index };
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = Cursor::Unset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn a(id: i64) -> AlbumId {
        AlbumId::new(id)
    }

    fn context(ids: &[i64]) -> PlaybackContext {
        PlaybackContext::new(ids.iter().copied().map(a).collect(), GenreFilter::All)
    }

    #[test]
    fn duplicates_are_dropped() {
        let ctx = context(&[1, 2, 1, 3]);
        assert_eq!(ctx.albums(), &[a(1), a(2), a(3)]);
    }

    #[test]
    fn removing_cursor_album_leaves_a_gap_marker() {
        let mut ctx = context(&[1, 2, 3]);
        ctx.set_cursor(a(2), TrackId::new(20), 0);

        assert!(ctx.remove(a(2)));
        assert_eq!(ctx.cursor(), Cursor::Before { index: 1 });
        assert_eq!(ctx.order(), &[a(1), a(3)]);

        // Removing an earlier album shifts the marker
        ctx.remove(a(1));
        assert_eq!(ctx.cursor(), Cursor::Before { index: 0 });
    }

    #[test]
    fn removing_other_album_keeps_cursor() {
        let mut ctx = context(&[1, 2, 3]);
        ctx.set_cursor(a(2), TrackId::new(20), 0);

        ctx.remove(a(3));
        assert!(matches!(ctx.cursor(), Cursor::At { album, .. } if album == a(2)));
        assert!(!ctx.remove(a(3)));
    }

    #[test]
    fn shuffle_then_unshuffle_restores_order() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut ctx = context(&[1, 2, 3, 4, 5, 6]);

        ctx.shuffle(&mut rng);
        assert!(ctx.is_shuffled());
        let mut sorted = ctx.order().to_vec();
        sorted.sort();
        assert_eq!(sorted, ctx.albums());

        ctx.add(a(7), &mut rng);
        assert!(ctx.order().contains(&a(7)));

        ctx.unshuffle();
        assert_eq!(ctx.order(), &[a(1), a(2), a(3), a(4), a(5), a(6), a(7)]);
    }

    #[test]
    fn shuffled_insert_keeps_parked_album_next() {
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut ctx = context(&[1, 2, 3, 4]);
            ctx.shuffle(&mut rng);
            ctx.park_cursor(2);
            let waiting = ctx.order()[2];

            assert!(ctx.add(a(9), &mut rng));

            let Cursor::Before { index } = ctx.cursor() else {
                panic!("cursor should stay parked");
            };
            assert_eq!(ctx.order()[index], waiting);
        }
    }

    #[test]
    fn retain_drops_missing_albums() {
        let mut ctx = context(&[1, 2, 3]);
        ctx.retain(|album| album != a(2));
        assert_eq!(ctx.albums(), &[a(1), a(3)]);
    }
}
