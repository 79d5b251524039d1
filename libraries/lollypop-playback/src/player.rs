//! Player driver
//!
//! Glue between the sequencer and whatever actually decodes audio. The
//! engine is told what to load; the player feeds it the sequencer's picks
//! and skips tracks that fail to load.

use crate::{
    error::{PlaybackError, Result},
    sequencer::Sequencer,
    types::PlayerState,
};
use lollypop_core::TrackId;
use tracing::{info, warn};

/// Audio backend the player drives
///
/// Implementors resolve a track id to a stream and start it. End of stream
/// and stream errors come back through [`Player::on_end_of_stream`] and
/// [`Player::on_stream_error`].
pub trait PlaybackEngine {
    /// Load and start a track
    fn load(&mut self, track: TrackId) -> Result<()>;

    /// Stop output and unload the current stream
    fn stop(&mut self);
}

/// Drives a [`PlaybackEngine`] from a [`Sequencer`]
pub struct Player<E: PlaybackEngine> {
    sequencer: Sequencer,
    engine: E,
    state: PlayerState,
}

impl<E: PlaybackEngine> Player<E> {
    pub fn new(sequencer: Sequencer, engine: E) -> Self {
        Self {
            sequencer,
            engine,
            state: PlayerState::Stopped,
        }
    }

    /// Advance to the next loadable track
    pub fn play_next(&mut self) -> Option<TrackId> {
        self.advance(Sequencer::next)
    }

    /// Step back to the previous loadable track
    pub fn play_prev(&mut self) -> Option<TrackId> {
        self.advance(Sequencer::prev)
    }

    /// Load a user-selected track
    ///
    /// On failure the player stops and the engine error is returned.
    pub fn play_track(&mut self, track: TrackId) -> Result<()> {
        self.sequencer.set_current(track);

        match self.engine.load(track) {
            Ok(()) => {
                self.state = PlayerState::Playing;
                info!(%track, "playing selected track");
                Ok(())
            }
            Err(error) => {
                warn!(%track, %error, "selected track failed to load");
                self.sequencer.stop();
                self.halt();
                Err(error)
            }
        }
    }

    /// The current stream played to its end
    pub fn on_end_of_stream(&mut self) -> Option<TrackId> {
        if let Some(track) = self.sequencer.current() {
            self.sequencer.track_finished(track);
        }
        self.play_next()
    }

    /// The current stream failed mid-play; skip forward
    pub fn on_stream_error(&mut self, track: TrackId, error: &PlaybackError) -> Option<TrackId> {
        warn!(%track, %error, "stream error, skipping");
        self.play_next()
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn sequencer_mut(&mut self) -> &mut Sequencer {
        &mut self.sequencer
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn into_parts(self) -> (Sequencer, E) {
        (self.sequencer, self.engine)
    }

    /// Ask the sequencer with `step` until the engine accepts a track
    ///
    /// Bounded by the number of tracks the sequencer knows about plus one,
    /// so a library of unloadable tracks stops instead of cycling forever.
    fn advance(&mut self, step: fn(&mut Sequencer) -> Option<TrackId>) -> Option<TrackId> {
        let attempts = self.sequencer.known_track_count() + 1;

        for _ in 0..attempts {
            let Some(track) = step(&mut self.sequencer) else {
                self.halt();
                return None;
            };

            match self.engine.load(track) {
                Ok(()) => {
                    self.state = PlayerState::Playing;
                    info!(%track, "now playing");
                    return Some(track);
                }
                Err(error) => warn!(%track, %error, "track failed to load, skipping"),
            }
        }

        warn!(attempts, "no loadable track found, stopping");
        self.sequencer.stop();
        self.halt();
        None
    }

    fn halt(&mut self) {
        self.engine.stop();
        self.state = PlayerState::Stopped;
    }
}
