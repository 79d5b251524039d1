//! Genre types

use super::GenreId;
use serde::{Deserialize, Serialize};

/// A music genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Genre restriction applied when listing albums or album tracks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenreFilter {
    /// No restriction
    #[default]
    All,

    /// Only tracks tagged with at least one of these genres
    Genres(Vec<GenreId>),
}

impl GenreFilter {
    /// Build a filter from an allowlist; an empty list means no restriction
    pub fn from_ids(ids: &[GenreId]) -> Self {
        if ids.is_empty() {
            Self::All
        } else {
            Self::Genres(ids.to_vec())
        }
    }

    /// Check whether a track with the given genres passes the filter
    pub fn accepts(&self, track_genres: &[GenreId]) -> bool {
        match self {
            Self::All => true,
            Self::Genres(allowed) if allowed.is_empty() => true,
            Self::Genres(allowed) => track_genres.iter().any(|g| allowed.contains(g)),
        }
    }
}
