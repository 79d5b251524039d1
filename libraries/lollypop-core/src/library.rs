//! In-memory library snapshot
//!
//! The sequencer asks the track store for album contents on every step, so
//! the database is read once into a `Library` and the snapshot is what
//! playback queries. A rescan produces a new snapshot that replaces the old
//! one wholesale.

use crate::error::{LollypopError, Result};
use crate::traits::TrackStore;
use crate::types::{Album, AlbumId, GenreFilter, Track, TrackId};
use std::collections::HashMap;

/// Albums and tracks, with per-album track order precomputed
#[derive(Debug, Clone, Default)]
pub struct Library {
    /// Albums in library order
    albums: Vec<Album>,

    tracks: HashMap<TrackId, Track>,

    /// Track ids per album, sorted by disc then track number
    album_tracks: HashMap<AlbumId, Vec<TrackId>>,
}

impl Library {
    /// Build a snapshot from albums (kept in the given order) and tracks
    ///
    /// Fails if a track references an album that is not in `albums`.
    pub fn new(albums: Vec<Album>, tracks: Vec<Track>) -> Result<Self> {
        let mut album_tracks: HashMap<AlbumId, Vec<Track>> =
            albums.iter().map(|a| (a.id, Vec::new())).collect();

        for track in &tracks {
            if let Some(album_id) = track.album_id {
                album_tracks
                    .get_mut(&album_id)
                    .ok_or(LollypopError::AlbumNotFound(album_id))?
                    .push(track.clone());
            }
        }

        let album_tracks = album_tracks
            .into_iter()
            .map(|(album, mut list)| {
                list.sort_by(Track::album_order);
                (album, list.into_iter().map(|t| t.id).collect())
            })
            .collect();

        Ok(Self {
            albums,
            tracks: tracks.into_iter().map(|t| (t.id, t)).collect(),
            album_tracks,
        })
    }

    pub fn album(&self, id: AlbumId) -> Option<&Album> {
        self.albums.iter().find(|a| a.id == id)
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn album_count(&self) -> usize {
        self.albums.len()
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }
}

impl TrackStore for Library {
    fn tracks_of(&self, album: AlbumId, filter: &GenreFilter) -> Vec<TrackId> {
        let Some(ids) = self.album_tracks.get(&album) else {
            return Vec::new();
        };

        ids.iter()
            .copied()
            .filter(|id| {
                self.tracks
                    .get(id)
                    .is_some_and(|t| filter.accepts(&t.genre_ids))
            })
            .collect()
    }

    fn albums(&self, filter: &GenreFilter) -> Vec<AlbumId> {
        self.albums
            .iter()
            .map(|a| a.id)
            .filter(|id| !self.tracks_of(*id, filter).is_empty())
            .collect()
    }

    fn album_of(&self, track: TrackId) -> Option<AlbumId> {
        self.tracks.get(&track).and_then(|t| t.album_id)
    }

    fn contains_album(&self, album: AlbumId) -> bool {
        self.album_tracks.contains_key(&album)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenreId;

    fn album(id: i64) -> Album {
        Album::new(AlbumId::new(id), format!("Album {}", id))
    }

    fn track(id: i64, album_id: i64, disc: u32, number: u32) -> Track {
        Track::new(TrackId::new(id), format!("Track {}", id)).on_album(
            AlbumId::new(album_id),
            disc,
            number,
        )
    }

    #[test]
    fn tracks_ordered_by_disc_then_number() {
        let library = Library::new(
            vec![album(1)],
            vec![
                track(10, 1, 2, 1),
                track(11, 1, 1, 2),
                track(12, 1, 1, 1),
            ],
        )
        .unwrap();

        let ids = library.tracks_of(AlbumId::new(1), &GenreFilter::All);
        assert_eq!(ids, vec![TrackId::new(12), TrackId::new(11), TrackId::new(10)]);
    }

    #[test]
    fn genre_filter_hides_tracks_and_empty_albums() {
        let rock = GenreId::new(1);
        let jazz = GenreId::new(2);
        let library = Library::new(
            vec![album(1), album(2)],
            vec![
                track(10, 1, 1, 1).with_genres([rock]),
                track(11, 1, 1, 2).with_genres([jazz]),
                track(20, 2, 1, 1).with_genres([jazz]),
            ],
        )
        .unwrap();

        let rock_only = GenreFilter::from_ids(&[rock]);
        assert_eq!(
            library.tracks_of(AlbumId::new(1), &rock_only),
            vec![TrackId::new(10)]
        );
        assert_eq!(library.albums(&rock_only), vec![AlbumId::new(1)]);
        assert_eq!(
            library.albums(&GenreFilter::All),
            vec![AlbumId::new(1), AlbumId::new(2)]
        );
    }

    #[test]
    fn unknown_album_reference_is_rejected() {
        let err = Library::new(vec![album(1)], vec![track(10, 9, 1, 1)]).unwrap_err();
        assert!(matches!(err, LollypopError::AlbumNotFound(id) if id == AlbumId::new(9)));
    }

    #[test]
    fn album_of_and_lookups() {
        let library = Library::new(vec![album(1)], vec![track(10, 1, 1, 1)]).unwrap();
        assert_eq!(library.album_of(TrackId::new(10)), Some(AlbumId::new(1)));
        assert_eq!(library.album_of(TrackId::new(99)), None);
        assert!(library.contains_album(AlbumId::new(1)));
        assert_eq!(library.album(AlbumId::new(1)).unwrap().name, "Album 1");
        assert_eq!(library.track_count(), 1);
    }
}
