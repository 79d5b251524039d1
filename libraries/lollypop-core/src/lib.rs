//! Lollypop Core
//!
//! Domain types, collaborator traits and settings shared by the playback
//! sequencer, the storage layer and the front ends.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Album`, `Genre` and their rowid newtypes
//! - **Collaborator Traits**: `TrackStore` (read-only library view) and
//!   `SettingsReader` (persisted playback settings)
//! - **Library Snapshot**: `Library`, the in-memory `TrackStore`
//! - **Error Handling**: Unified `LollypopError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use lollypop_core::{Album, AlbumId, GenreFilter, Library, Track, TrackId, TrackStore};
//!
//! let album = Album::new(AlbumId::new(1), "Blue Train");
//! let tracks = vec![
//!     Track::new(TrackId::new(2), "Moment's Notice").on_album(AlbumId::new(1), 1, 2),
//!     Track::new(TrackId::new(1), "Blue Train").on_album(AlbumId::new(1), 1, 1),
//! ];
//!
//! let library = Library::new(vec![album], tracks).unwrap();
//! assert_eq!(
//!     library.tracks_of(AlbumId::new(1), &GenreFilter::All),
//!     vec![TrackId::new(1), TrackId::new(2)]
//! );
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod library;
pub mod settings;
pub mod traits;
pub mod types;

pub use error::{LollypopError, Result};
pub use library::Library;
pub use settings::{PlayMode, PlaybackSettings, RepeatMode, SharedSettings};
pub use traits::{SettingsReader, TrackStore};
pub use types::{
    Album, AlbumId, ArtistId, CreateAlbum, CreateTrack, Genre, GenreFilter, GenreId, Track,
    TrackId,
};
