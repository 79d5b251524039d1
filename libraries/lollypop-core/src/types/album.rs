//! Album types

use super::{AlbumId, ArtistId};
use serde::{Deserialize, Serialize};

/// An album
///
/// Track order is not stored here; the track store derives it from
/// disc and track numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub artist_ids: Vec<ArtistId>,
}

impl Album {
    pub fn new(id: AlbumId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            artist_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_artists(mut self, artist_ids: impl IntoIterator<Item = ArtistId>) -> Self {
        self.artist_ids = artist_ids.into_iter().collect();
        self
    }
}

/// Data for inserting a new album
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlbum {
    pub name: String,
    pub artist_ids: Vec<ArtistId>,
}
