//! Core types for playback sequencing

use serde::{Deserialize, Serialize};

/// Construction-time options for the sequencer
///
/// Everything the user can change at runtime lives in
/// [`PlaybackSettings`](lollypop_core::PlaybackSettings) instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerConfig {
    /// Fixed RNG seed for reproducible shuffles (default: OS entropy)
    pub seed: Option<u64>,
}

impl SequencerConfig {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

/// Player state as seen by the front end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Nothing loaded
    #[default]
    Stopped,

    /// A track is loaded in the engine
    Playing,
}
