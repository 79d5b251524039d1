//! Property-based tests for the sequencer
//!
//! Uses proptest to check sequencing invariants across random libraries,
//! seeds and play modes.

use lollypop_core::{
    Album, AlbumId, GenreFilter, Library, PlayMode, PlaybackSettings, Track, TrackId,
};
use lollypop_playback::{Sequencer, SequencerConfig};
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Helpers =====

/// Album `n` (1-based) gets `shape[n - 1]` tracks with ids `n * 100 + k`
fn library(shape: &[usize]) -> Library {
    let mut albums = Vec::new();
    let mut tracks = Vec::new();

    for (index, count) in shape.iter().enumerate() {
        let album = AlbumId::new(index as i64 + 1);
        albums.push(Album::new(album, format!("Album {}", album)));
        for k in 0..*count {
            let id = TrackId::new(album.get() * 100 + k as i64);
            tracks.push(Track::new(id, "Track").on_album(album, 1, k as u32 + 1));
        }
    }

    Library::new(albums, tracks).unwrap()
}

fn all_tracks(shape: &[usize]) -> Vec<TrackId> {
    shape
        .iter()
        .enumerate()
        .flat_map(|(index, count)| {
            (0..*count).map(move |k| TrackId::new((index as i64 + 1) * 100 + k as i64))
        })
        .collect()
}

fn sequencer(shape: &[usize], mode: PlayMode, seed: u64) -> Sequencer {
    let settings = PlaybackSettings {
        mode,
        ..PlaybackSettings::default()
    };
    let mut sequencer = Sequencer::new(
        Box::new(library(shape)),
        Box::new(settings),
        SequencerConfig::seeded(seed),
    );
    let albums = (1..=shape.len() as i64).map(AlbumId::new).collect();
    sequencer.set_context(albums, GenreFilter::All);
    sequencer
}

fn shape() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..5, 1..7)
}

fn any_mode() -> impl Strategy<Value = PlayMode> {
    prop_oneof![
        Just(PlayMode::Linear),
        Just(PlayMode::ShuffleTracks),
        Just(PlayMode::ShuffleAlbums),
        Just(PlayMode::Party),
    ]
}

// ===== Property Tests =====

proptest! {
    /// Property: a non-empty queue is always consumed first, in order
    #[test]
    fn queue_always_wins(
        shape in shape(),
        mode in any_mode(),
        seed in any::<u64>(),
        queued in prop::collection::vec(1000i64..2000, 1..10)
    ) {
        let mut seq = sequencer(&shape, mode, seed);
        for id in &queued {
            seq.enqueue(TrackId::new(*id));
        }

        for id in &queued {
            prop_assert_eq!(seq.next(), Some(TrackId::new(*id)));
        }
        prop_assert_eq!(seq.queue_len(), 0);
    }

    /// Property: linear playback cycles through every track, then wraps
    #[test]
    fn linear_cycle_wraps_to_first_track(shape in shape()) {
        let tracks = all_tracks(&shape);
        prop_assume!(!tracks.is_empty());

        let mut seq = sequencer(&shape, PlayMode::Linear, 0);
        let first = tracks[0];
        seq.set_current(first);

        let played: Vec<TrackId> = (0..tracks.len()).filter_map(|_| seq.next()).collect();
        prop_assert_eq!(played.len(), tracks.len());
        prop_assert_eq!(played[tracks.len() - 1], first);
        prop_assert_eq!(&played[..tracks.len() - 1], &tracks[1..]);
    }

    /// Property: track shuffle plays every track exactly once per cycle
    #[test]
    fn shuffle_never_repeats_before_exhaustion(shape in shape(), seed in any::<u64>()) {
        let tracks = all_tracks(&shape);
        prop_assume!(!tracks.is_empty());

        let mut seq = sequencer(&shape, PlayMode::ShuffleTracks, seed);
        let played: Vec<TrackId> = (0..tracks.len()).filter_map(|_| seq.next()).collect();

        let unique: HashSet<TrackId> = played.iter().copied().collect();
        prop_assert_eq!(played.len(), tracks.len());
        prop_assert_eq!(unique, tracks.into_iter().collect::<HashSet<_>>());
    }

    /// Property: prev undoes next in shuffle modes once history has two entries
    #[test]
    fn prev_reverses_next_under_shuffle(
        shape in shape(),
        seed in any::<u64>(),
        party in any::<bool>(),
        steps in 1usize..20
    ) {
        prop_assume!(!all_tracks(&shape).is_empty());
        let mode = if party { PlayMode::Party } else { PlayMode::ShuffleTracks };
        let mut seq = sequencer(&shape, mode, seed);
        seq.next();

        for _ in 0..steps {
            let before = seq.current();
            seq.next();
            if seq.history().len() >= 2 {
                prop_assert_eq!(seq.prev(), before);
                seq.next();
            }
        }
    }

    /// Property: album shuffle never loses or duplicates albums
    #[test]
    fn album_permutation_is_stable(shape in shape(), seed in any::<u64>(), steps in 0usize..15) {
        let mut seq = sequencer(&shape, PlayMode::ShuffleAlbums, seed);
        let permutation = seq.context_albums();

        for _ in 0..steps {
            seq.next();
        }
        prop_assert_eq!(seq.context_albums(), permutation.clone());

        let mut sorted = permutation;
        sorted.sort();
        let expected: Vec<AlbumId> = (1..=shape.len() as i64).map(AlbumId::new).collect();
        prop_assert_eq!(sorted, expected);
    }
}
