//! Lollypop - Playback Sequencing
//!
//! Decides which track plays next. This crate provides:
//! - A user queue that always takes precedence
//! - Linear playback over album order (with repeat and stop-after-album)
//! - Track shuffle without repeats until every track has played
//! - Album shuffle with one permutation per session
//! - Party mode: track shuffle over a genre allowlist
//! - Shuffle history for stepping back
//! - Events for queue/current-track views
//!
//! # Architecture
//!
//! `lollypop-playback` knows nothing about databases or audio output:
//! - Track lookups go through [`TrackStore`](lollypop_core::TrackStore)
//! - Settings are read through [`SettingsReader`](lollypop_core::SettingsReader)
//! - Audio backends implement [`PlaybackEngine`]
//!
//! The sequencer is owned by one thread. Library reloads arrive as new
//! snapshots handed to [`Sequencer::replace_store`].
//!
//! # Example: Linear Playback
//!
//! ```rust
//! use lollypop_core::{Album, AlbumId, GenreFilter, Library, PlaybackSettings, Track, TrackId};
//! use lollypop_playback::{Sequencer, SequencerConfig};
//!
//! let album = AlbumId::new(1);
//! let library = Library::new(
//!     vec![Album::new(album, "Album")],
//!     vec![
//!         Track::new(TrackId::new(1), "First").on_album(album, 1, 1),
//!         Track::new(TrackId::new(2), "Second").on_album(album, 1, 2),
//!     ],
//! )?;
//!
//! let mut sequencer = Sequencer::new(
//!     Box::new(library),
//!     Box::new(PlaybackSettings::default()),
//!     SequencerConfig::default(),
//! );
//! sequencer.set_context(vec![album], GenreFilter::All);
//!
//! assert_eq!(sequencer.next(), Some(TrackId::new(1)));
//! assert_eq!(sequencer.next(), Some(TrackId::new(2)));
//!
//! // Queued tracks always win
//! sequencer.enqueue(TrackId::new(1));
//! assert_eq!(sequencer.next(), Some(TrackId::new(1)));
//! # Ok::<(), lollypop_core::LollypopError>(())
//! ```
//!
//! # Example: Switching Modes
//!
//! ```rust
//! use lollypop_core::{Library, PlayMode, SharedSettings};
//! use lollypop_playback::{Sequencer, SequencerConfig};
//!
//! let settings = SharedSettings::default();
//! let mut sequencer = Sequencer::new(
//!     Box::new(Library::default()),
//!     Box::new(settings.clone()),
//!     SequencerConfig::seeded(7),
//! );
//!
//! settings.update(|s| s.mode = PlayMode::ShuffleTracks);
//! sequencer.sync_settings();
//! assert_eq!(sequencer.mode(), PlayMode::ShuffleTracks);
//!
//! // Nothing in the context: the sentinel, never a panic
//! assert_eq!(sequencer.next(), None);
//! ```

pub mod context;
mod error;
pub mod events;
mod history;
mod player;
mod queue;
mod sequencer;
pub mod shuffle;
pub mod types;

pub use context::{Cursor, PlaybackContext};
pub use error::{PlaybackError, Result};
pub use events::SequencerEvent;
pub use history::History;
pub use player::{PlaybackEngine, Player};
pub use queue::Queue;
pub use sequencer::Sequencer;
pub use shuffle::AlreadyPlayed;
pub use types::{PlayerState, SequencerConfig};
