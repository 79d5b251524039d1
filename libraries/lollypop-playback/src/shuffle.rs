//! Shuffle bookkeeping and selection
//!
//! Track shuffle draws a random album, then a random track of that album
//! that has not been played in the current cycle. Albums with nothing left
//! are marked exhausted; once every album is exhausted the caller starts a
//! new cycle.
//!
//! Album shuffle keeps one permutation of the context for the whole
//! session, so only the permutation helpers live here.

use lollypop_core::{AlbumId, GenreFilter, TrackId, TrackStore};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Per-cycle record of what shuffle has already played
#[derive(Debug, Clone, Default)]
pub struct AlreadyPlayed {
    played: HashMap<AlbumId, HashSet<TrackId>>,
    exhausted: Vec<AlbumId>,
}

impl AlreadyPlayed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a track as played from its album
    pub fn record(&mut self, album: AlbumId, track: TrackId) {
        self.played.entry(album).or_default().insert(track);
    }

    pub fn is_played(&self, album: AlbumId, track: TrackId) -> bool {
        self.played
            .get(&album)
            .is_some_and(|tracks| tracks.contains(&track))
    }

    /// Number of tracks recorded for an album
    pub fn played_count(&self, album: AlbumId) -> usize {
        self.played.get(&album).map_or(0, HashSet::len)
    }

    pub fn mark_exhausted(&mut self, album: AlbumId) {
        if !self.exhausted.contains(&album) {
            self.exhausted.push(album);
        }
    }

    pub fn is_exhausted(&self, album: AlbumId) -> bool {
        self.exhausted.contains(&album)
    }

    /// Albums fully played in this cycle, in the order they ran out
    pub fn exhausted(&self) -> &[AlbumId] {
        &self.exhausted
    }

    /// Drop everything known about an album (it left the context)
    pub fn forget_album(&mut self, album: AlbumId) {
        self.played.remove(&album);
        self.exhausted.retain(|a| *a != album);
    }

    /// Start a new cycle
    pub fn clear(&mut self) {
        self.played.clear();
        self.exhausted.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.played.is_empty() && self.exhausted.is_empty()
    }
}

/// Pick a random unplayed track from the given albums
///
/// Albums are visited in random order; the first one with unplayed tracks
/// wins and one of those tracks is drawn uniformly. Albums found empty
/// (under `filter`) are marked exhausted along the way. Returns `None` when
/// every album is exhausted. Nothing is recorded for the returned track.
pub fn pick_unplayed<R: Rng + ?Sized>(
    store: &dyn TrackStore,
    albums: &[AlbumId],
    filter: &GenreFilter,
    played: &mut AlreadyPlayed,
    rng: &mut R,
) -> Option<(AlbumId, TrackId)> {
    let mut candidates: Vec<AlbumId> = albums
        .iter()
        .copied()
        .filter(|a| !played.is_exhausted(*a))
        .collect();
    candidates.shuffle(rng);

    for album in candidates {
        let remaining: Vec<TrackId> = store
            .tracks_of(album, filter)
            .into_iter()
            .filter(|t| !played.is_played(album, *t))
            .collect();

        match remaining.choose(rng) {
            Some(track) => return Some((album, *track)),
            None => played.mark_exhausted(album),
        }
    }

    None
}

/// A random permutation of `albums`
pub fn shuffled<R: Rng + ?Sized>(albums: &[AlbumId], rng: &mut R) -> Vec<AlbumId> {
    let mut order = albums.to_vec();
    order.shuffle(rng);
    order
}

/// Insert an album at a random position of an existing permutation
pub fn insert_at_random<R: Rng + ?Sized>(
    order: &mut Vec<AlbumId>,
    album: AlbumId,
    rng: &mut R,
) -> usize {
    let index = rng.gen_range(0..=order.len());
    order.insert(index, album);
    index
}
