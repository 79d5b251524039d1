//! Track types

use super::{AlbumId, GenreId, TrackId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Duration;

/// A track as the sequencer sees it
///
/// Loaded once from the database and never mutated by playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,

    /// Owning album (tracks without album tags have none)
    pub album_id: Option<AlbumId>,

    pub title: String,

    /// Disc number, 0 when untagged
    pub disc_number: u32,

    /// Track number on its disc, 0 when untagged
    pub track_number: u32,

    pub duration: Duration,

    pub genre_ids: Vec<GenreId>,
}

impl Track {
    /// Create a track with no album, genres or numbering
    pub fn new(id: TrackId, title: impl Into<String>) -> Self {
        Self {
            id,
            album_id: None,
            title: title.into(),
            disc_number: 0,
            track_number: 0,
            duration: Duration::ZERO,
            genre_ids: Vec::new(),
        }
    }

    /// Attach the track to an album at a given disc/track position
    #[must_use]
    pub fn on_album(mut self, album_id: AlbumId, disc_number: u32, track_number: u32) -> Self {
        self.album_id = Some(album_id);
        self.disc_number = disc_number;
        self.track_number = track_number;
        self
    }

    #[must_use]
    pub fn with_genres(mut self, genre_ids: impl IntoIterator<Item = GenreId>) -> Self {
        self.genre_ids = genre_ids.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Album ordering: disc number, then track number, then id for stability
    pub fn album_order(&self, other: &Self) -> Ordering {
        (self.disc_number, self.track_number, self.id).cmp(&(
            other.disc_number,
            other.track_number,
            other.id,
        ))
    }
}

/// Data for inserting a new track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrack {
    pub album_id: Option<AlbumId>,
    pub title: String,
    pub disc_number: u32,
    pub track_number: u32,
    pub duration: Duration,
    pub genre_ids: Vec<GenreId>,
}
