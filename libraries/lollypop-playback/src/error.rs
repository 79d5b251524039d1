//! Error types for playback sequencing
//!
//! Choosing the next or previous track never fails: running out of
//! tracks is reported as `None`. Errors only come from queue editing with
//! bad indices and from the playback engine.

use lollypop_core::LollypopError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Queue index out of bounds
    #[error("Queue index out of bounds: {index} (queue length {length})")]
    QueueIndexOutOfBounds { index: usize, length: usize },

    /// The engine could not load or play a track
    #[error("Playback engine error: {0}")]
    Engine(String),

    /// Core error from a collaborator
    #[error(transparent)]
    Core(#[from] LollypopError),
}

impl PlaybackError {
    /// Create an engine error
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
