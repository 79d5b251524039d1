//! Playback settings
//!
//! The persisted key/value configuration the sequencer reads before every
//! step. Defaults match a fresh install: linear playback that wraps around
//! the context.

use crate::traits::SettingsReader;
use crate::types::{GenreFilter, GenreId};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

/// How the next track is chosen when the queue is empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    /// Albums in context order, tracks in album order
    #[default]
    Linear,

    /// Random track from a random album, no repeats until exhaustion
    ShuffleTracks,

    /// Albums in a shuffled order, tracks in album order
    ShuffleAlbums,

    /// `ShuffleTracks` over the party genre allowlist, never stops
    Party,
}

impl PlayMode {
    /// Modes that pick individual tracks at random and keep a history
    pub fn shuffles_tracks(self) -> bool {
        matches!(self, Self::ShuffleTracks | Self::Party)
    }

    /// Modes that walk albums track by track
    pub fn is_sequential(self) -> bool {
        matches!(self, Self::Linear | Self::ShuffleAlbums)
    }
}

/// What happens at the end of the context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// Stop after the last track of the last album
    None,

    /// Wrap around to the first album
    #[default]
    All,

    /// Replay the current track
    Track,
}

/// Settings consumed by the playback sequencer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Active play mode (default: linear)
    pub mode: PlayMode,

    /// Genres party mode is restricted to (default: empty = all albums)
    pub party_genres: Vec<GenreId>,

    /// End-of-context behaviour (default: all)
    pub repeat: RepeatMode,

    /// Stop instead of crossing an album boundary (default: false)
    pub stop_after_album: bool,

    /// Maximum shuffle history length (default: 500)
    pub history_size: usize,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            mode: PlayMode::Linear,
            party_genres: Vec::new(),
            repeat: RepeatMode::All,
            stop_after_album: false,
            history_size: 500,
        }
    }
}

impl PlaybackSettings {
    /// Genre filter party mode applies to the library
    pub fn party_filter(&self) -> GenreFilter {
        GenreFilter::from_ids(&self.party_genres)
    }
}

/// Settings shared between the UI (writer) and the sequencer (reader)
///
/// Cloning shares the same underlying value.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<RwLock<PlaybackSettings>>,
}

impl SharedSettings {
    pub fn new(settings: PlaybackSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// Mutate the settings in place
    pub fn update(&self, f: impl FnOnce(&mut PlaybackSettings)) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }

    /// Replace the settings wholesale
    pub fn replace(&self, settings: PlaybackSettings) {
        self.update(|s| *s = settings);
    }

    /// Snapshot of the current settings
    pub fn get(&self) -> PlaybackSettings {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SettingsReader for SharedSettings {
    fn playback(&self) -> PlaybackSettings {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = PlaybackSettings::default();
        assert_eq!(settings.mode, PlayMode::Linear);
        assert_eq!(settings.repeat, RepeatMode::All);
        assert!(settings.party_genres.is_empty());
        assert!(!settings.stop_after_album);
        assert_eq!(settings.history_size, 500);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: PlaybackSettings =
            serde_json::from_str(r#"{"mode": "party", "party_genres": [4]}"#).unwrap();
        assert_eq!(settings.mode, PlayMode::Party);
        assert_eq!(settings.party_genres, vec![GenreId::new(4)]);
        assert_eq!(settings.repeat, RepeatMode::All);
    }

    #[test]
    fn shared_settings_are_seen_by_every_clone() {
        let writer = SharedSettings::default();
        let reader = writer.clone();

        writer.update(|s| s.mode = PlayMode::ShuffleAlbums);

        assert_eq!(reader.playback().mode, PlayMode::ShuffleAlbums);
    }

    #[test]
    fn mode_classification() {
        assert!(PlayMode::Party.shuffles_tracks());
        assert!(PlayMode::ShuffleTracks.shuffles_tracks());
        assert!(!PlayMode::ShuffleAlbums.shuffles_tracks());
        assert!(PlayMode::ShuffleAlbums.is_sequential());
        assert!(PlayMode::Linear.is_sequential());
    }
}
