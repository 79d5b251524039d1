//! Sequencer events
//!
//! Notifications for the queue view and the playback engine. Events are
//! delivered synchronously to subscribed listeners and also kept in a
//! pending list for callers that poll with `drain_events`.

use lollypop_core::{AlbumId, PlayMode, TrackId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Events emitted by the sequencer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequencerEvent {
    /// Queue changed (tracks added/removed/reordered/consumed)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// A new current track was chosen
    CurrentChanged {
        track: TrackId,
        previous: Option<TrackId>,
    },

    /// Play mode changed after a settings update
    ModeChanged { mode: PlayMode },

    /// Context albums changed
    ContextChanged {
        /// Albums in playback order
        albums: Vec<AlbumId>,
    },

    /// The engine reported a track played to the end
    TrackFinished { track: TrackId },

    /// Nothing left to play
    Stopped,
}

type Listener = Box<dyn FnMut(&SequencerEvent)>;

/// Listener registry plus pending event list
#[derive(Default)]
pub struct EventBus {
    pending: Vec<SequencerEvent>,
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener called for every event from now on
    pub fn subscribe(&mut self, listener: impl FnMut(&SequencerEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, event: SequencerEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
        self.pending.push(event);
    }

    /// Take all events emitted since the last drain
    pub fn drain(&mut self) -> Vec<SequencerEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("pending", &self.pending)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
