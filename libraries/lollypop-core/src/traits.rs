/// Collaborator traits consumed by the playback sequencer
use crate::settings::PlaybackSettings;
use crate::types::{AlbumId, GenreFilter, TrackId};

/// Read-only view of the music library
///
/// The sequencer queries this on every step, so implementations are
/// expected to answer from memory. Database-backed libraries load a
/// [`Library`](crate::Library) snapshot off-thread and hand it over.
pub trait TrackStore {
    /// Ordered tracks of an album (disc number, then track number),
    /// restricted to tracks passing `filter`
    fn tracks_of(&self, album: AlbumId, filter: &GenreFilter) -> Vec<TrackId>;

    /// Albums in library order that have at least one track passing `filter`
    fn albums(&self, filter: &GenreFilter) -> Vec<AlbumId>;

    /// Album the track belongs to, if any
    fn album_of(&self, track: TrackId) -> Option<AlbumId>;

    /// Check whether the store knows about an album
    fn contains_album(&self, album: AlbumId) -> bool;
}

/// Read access to the persisted playback settings
///
/// The UI owns writes; the sequencer only ever reads.
pub trait SettingsReader {
    /// Current playback settings
    fn playback(&self) -> PlaybackSettings;
}

impl SettingsReader for PlaybackSettings {
    fn playback(&self) -> PlaybackSettings {
        self.clone()
    }
}
