//! Playback sequencer - decides what plays next
//!
//! Owns the queue, the playback context, shuffle bookkeeping and history.
//! Every call runs on the thread that owns the sequencer, does no I/O
//! beyond asking the in-memory track store, and never fails: running out
//! of tracks is reported as `None`.

use crate::{
    context::{Cursor, PlaybackContext},
    error::Result,
    events::{EventBus, SequencerEvent},
    history::History,
    queue::Queue,
    shuffle::{self, AlreadyPlayed},
    types::SequencerConfig,
};
use lollypop_core::{
    AlbumId, GenreFilter, PlayMode, PlaybackSettings, RepeatMode, SettingsReader, TrackId,
    TrackStore,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Next/previous track selection over a queue and a playback context
pub struct Sequencer {
    store: Box<dyn TrackStore>,
    settings: Box<dyn SettingsReader>,

    /// Settings as of the last sync
    active: PlaybackSettings,

    mode: PlayMode,

    context: PlaybackContext,

    /// User context parked while party mode owns the context
    saved_context: Option<PlaybackContext>,

    queue: Queue,

    // Track-shuffle state
    history: History,
    played: AlreadyPlayed,

    current: Option<TrackId>,

    rng: StdRng,

    events: EventBus,
}

impl Sequencer {
    /// Create a sequencer and apply the current settings
    pub fn new(
        store: Box<dyn TrackStore>,
        settings: Box<dyn SettingsReader>,
        config: SequencerConfig,
    ) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let initial = PlaybackSettings::default();

        let mut sequencer = Self {
            store,
            settings,
            history: History::new(initial.history_size),
            active: initial,
            mode: PlayMode::Linear,
            context: PlaybackContext::default(),
            saved_context: None,
            queue: Queue::new(),
            played: AlreadyPlayed::new(),
            current: None,
            rng,
            events: EventBus::new(),
        };
        sequencer.sync_settings();
        sequencer.events.drain();
        sequencer
    }

    // ===== Stepping =====

    /// Choose the next track
    ///
    /// The queue always wins. Otherwise the play mode decides; `None` means
    /// nothing is left to play and the current track is cleared.
    pub fn next(&mut self) -> Option<TrackId> {
        self.sync_settings();

        if let Some(track) = self.queue.pop_next() {
            debug!(%track, remaining = self.queue.len(), "playing from queue");
            self.emit_queue_changed();
            return Some(self.make_current(track));
        }

        if self.mode != PlayMode::Party && self.active.repeat == RepeatMode::Track {
            if let Some(track) = self.current {
                return Some(self.make_current(track));
            }
        }

        let chosen = if self.mode.is_sequential() {
            self.sequential_next()
        } else {
            self.shuffle_next()
        };

        match chosen {
            Some(track) => Some(self.make_current(track)),
            None => {
                self.stop();
                None
            }
        }
    }

    /// Choose the previous track
    ///
    /// Track-shuffle modes walk back through history; sequential modes step
    /// back through the album order, wrapping at the start. The queue is
    /// never consumed.
    pub fn prev(&mut self) -> Option<TrackId> {
        self.sync_settings();

        if self.context.is_empty() {
            self.stop();
            return None;
        }

        let chosen = if self.mode.shuffles_tracks() {
            self.history.step_back().or(self.current)
        } else {
            self.sequential_prev()
        };

        match chosen {
            Some(track) if Some(track) == self.current => Some(track),
            Some(track) => Some(self.make_current(track)),
            None => {
                self.stop();
                None
            }
        }
    }

    /// Make a user-selected track current
    pub fn set_current(&mut self, track: TrackId) {
        self.make_current(track);
    }

    /// The engine played a track to its end
    pub fn track_finished(&mut self, track: TrackId) {
        if self.mode.shuffles_tracks() {
            if let Some(album) = self.context_album_of(track) {
                self.played.record(album, track);
            }
        }
        self.events.emit(SequencerEvent::TrackFinished { track });
    }

    /// Clear the current track
    pub fn stop(&mut self) {
        if let Some(track) = self.current.take() {
            debug!(%track, "playback stopped");
        }
        self.events.emit(SequencerEvent::Stopped);
    }

    fn sequential_next(&mut self) -> Option<TrackId> {
        let wrap = self.active.repeat != RepeatMode::None;

        let from = match self.context.cursor() {
            Cursor::Unset => 0,
            Cursor::Before { index } => index,
            Cursor::At {
                album,
                track,
                position,
            } => match self.context.order().iter().position(|a| *a == album) {
                None => 0,
                Some(album_index) => {
                    let tracks = self.store.tracks_of(album, self.context.filter());
                    let position = tracks.iter().position(|t| *t == track).unwrap_or(position);
                    if let Some(next) = tracks.get(position + 1) {
                        return Some(*next);
                    }

                    // Resuming after the stop starts at the following album
                    if self.active.stop_after_album {
                        debug!(%album, "end of album, stopping");
                        self.context.park_cursor(album_index + 1);
                        return None;
                    }
                    album_index + 1
                }
            },
        };

        let next = self.scan_forward(from, wrap);
        if next.is_none() {
            self.context.reset_cursor();
        }
        next
    }

    fn sequential_prev(&self) -> Option<TrackId> {
        let order = self.context.order();
        let n = order.len();

        match self.context.cursor() {
            Cursor::Unset if self.current.is_some() => self.current,
            Cursor::Unset => n.checked_sub(1).and_then(|last| self.scan_backward(last)),
            Cursor::Before { index } => self.scan_backward((index + n - 1) % n),
            Cursor::At {
                album,
                track,
                position,
            } => {
                // Coming back from a queued track: replay the context track
                if self.current != Some(track) {
                    return Some(track);
                }

                let Some(album_index) = order.iter().position(|a| *a == album) else {
                    return self.current;
                };

                let tracks = self.store.tracks_of(album, self.context.filter());
                let position = tracks.iter().position(|t| *t == track).unwrap_or(position);
                if position > 0 {
                    if let Some(previous) = tracks.get(position - 1) {
                        return Some(*previous);
                    }
                }

                self.scan_backward((album_index + n - 1) % n)
            }
        }
    }

    /// First track of the first non-empty album at or after `from`
    fn scan_forward(&self, from: usize, wrap: bool) -> Option<TrackId> {
        let order = self.context.order();
        let n = order.len();

        for step in 0..n {
            let index = from + step;
            if index >= n && !wrap {
                debug!("end of context, stopping");
                return None;
            }

            let album = order[index % n];
            if let Some(first) = self.store.tracks_of(album, self.context.filter()).first() {
                return Some(*first);
            }
        }

        None
    }

    /// Last track of the first non-empty album at or before `from`, wrapping
    fn scan_backward(&self, from: usize) -> Option<TrackId> {
        let order = self.context.order();
        let n = order.len();

        for step in 0..n {
            let album = order[(from + n - step) % n];
            if let Some(last) = self.store.tracks_of(album, self.context.filter()).last() {
                return Some(*last);
            }
        }

        None
    }

    fn shuffle_next(&mut self) -> Option<TrackId> {
        let albums = self.context.albums().to_vec();
        let filter = self.context.filter().clone();

        if let Some((_, track)) = shuffle::pick_unplayed(
            self.store.as_ref(),
            &albums,
            &filter,
            &mut self.played,
            &mut self.rng,
        ) {
            return Some(track);
        }

        if albums.is_empty() {
            return None;
        }

        if self.mode != PlayMode::Party && self.active.repeat == RepeatMode::None {
            info!("every track played, shuffle cycle complete");
            // The next call starts a fresh cycle
            self.played.clear();
            self.history.clear();
            return None;
        }

        // One retry only: an empty result after a reset means no album in
        // the context has a playable track
        warn!(
            albums = albums.len(),
            "every album exhausted, starting a new shuffle cycle"
        );
        self.played.clear();
        self.history.clear();

        shuffle::pick_unplayed(
            self.store.as_ref(),
            &albums,
            &filter,
            &mut self.played,
            &mut self.rng,
        )
        .map(|(_, track)| track)
    }

    fn make_current(&mut self, track: TrackId) -> TrackId {
        let previous = self.current.replace(track);
        self.place_cursor(track);
        if self.mode.shuffles_tracks() {
            self.note_shuffle_play(track);
        }

        debug!(%track, mode = ?self.mode, "current track changed");
        self.events
            .emit(SequencerEvent::CurrentChanged { track, previous });
        track
    }

    /// Record a track in the already-played map and history
    fn note_shuffle_play(&mut self, track: TrackId) {
        if let Some(album) = self.context_album_of(track) {
            self.played.record(album, track);
        }
        if self.history.peek() != Some(track) {
            self.history.push(track);
        }
    }

    /// Move the cursor onto a track if it belongs to the context
    fn place_cursor(&mut self, track: TrackId) {
        let Some(album) = self.context_album_of(track) else {
            return;
        };

        let tracks = self.store.tracks_of(album, self.context.filter());
        if let Some(position) = tracks.iter().position(|t| *t == track) {
            self.context.set_cursor(album, track, position);
        }
    }

    fn realign_cursor(&mut self) {
        if let Some(track) = self.current {
            self.place_cursor(track);
        }
    }

    fn context_album_of(&self, track: TrackId) -> Option<AlbumId> {
        self.store
            .album_of(track)
            .filter(|album| self.context.contains(*album))
    }

    // ===== Settings & Modes =====

    /// Re-read settings and apply any mode or party-genre change
    ///
    /// Called at the start of every step; the UI may also call it right
    /// after writing settings so events fire immediately.
    pub fn sync_settings(&mut self) {
        let settings = self.settings.playback();
        self.history.set_max_size(settings.history_size);

        let party_changed = settings.party_genres != self.active.party_genres;
        let previous_mode = self.mode;
        self.active = settings;

        if self.active.mode != previous_mode {
            self.switch_mode(previous_mode, self.active.mode);
        } else if self.mode == PlayMode::Party && party_changed {
            info!(genres = ?self.active.party_genres, "party genres changed");
            self.context = self.party_context();
            self.history.clear();
            self.played.clear();
            if let Some(track) = self.current {
                self.note_shuffle_play(track);
            }
            self.realign_cursor();
            self.emit_context_changed();
        }
    }

    fn switch_mode(&mut self, from: PlayMode, to: PlayMode) {
        let mut context_changed = false;

        if from == PlayMode::ShuffleAlbums {
            self.context.unshuffle();
        }
        if from.shuffles_tracks() {
            self.history.clear();
            self.played.clear();
        }
        if from == PlayMode::Party {
            self.context = self.saved_context.take().unwrap_or_default();
            context_changed = true;
        }

        self.mode = to;

        if to == PlayMode::Party {
            let party = self.party_context();
            self.saved_context = Some(std::mem::replace(&mut self.context, party));
            context_changed = true;
        }
        if to == PlayMode::ShuffleAlbums {
            self.context.shuffle(&mut self.rng);
        }
        if to.shuffles_tracks() {
            if let Some(track) = self.current {
                self.note_shuffle_play(track);
            }
        }

        self.realign_cursor();

        info!(?from, ?to, "play mode changed");
        self.events.emit(SequencerEvent::ModeChanged { mode: to });
        if context_changed {
            self.emit_context_changed();
        }
    }

    fn party_context(&self) -> PlaybackContext {
        let filter = self.active.party_filter();
        PlaybackContext::new(self.store.albums(&filter), filter)
    }

    // ===== Context =====

    /// Replace the playback context wholesale
    ///
    /// In party mode the new context is kept aside and takes over when
    /// party mode ends.
    pub fn set_context(&mut self, albums: Vec<AlbumId>, filter: GenreFilter) {
        let mut context = PlaybackContext::new(albums, filter);

        if self.mode == PlayMode::Party {
            info!(
                albums = context.len(),
                "party mode active, new context applies when it ends"
            );
            self.saved_context = Some(context);
            return;
        }

        if self.mode == PlayMode::ShuffleAlbums {
            context.shuffle(&mut self.rng);
        }
        self.context = context;
        self.history.clear();
        self.played.clear();
        if let Some(track) = self.current.filter(|_| self.mode.shuffles_tracks()) {
            self.note_shuffle_play(track);
        }
        self.realign_cursor();

        info!(albums = self.context.len(), "playback context replaced");
        self.emit_context_changed();
    }

    /// Add an album to the context
    pub fn add_album(&mut self, album: AlbumId) -> bool {
        let added = self.context.add(album, &mut self.rng);
        if added {
            debug!(%album, "album added to context");
            self.emit_context_changed();
        }
        added
    }

    /// Remove an album from the context
    pub fn remove_album(&mut self, album: AlbumId) -> bool {
        let removed = self.context.remove(album);
        if removed {
            self.played.forget_album(album);
            debug!(%album, "album removed from context");
            self.emit_context_changed();
        }
        removed
    }

    /// Empty the context and forget shuffle state
    pub fn clear_context(&mut self) {
        self.context = PlaybackContext::default();
        if self.mode == PlayMode::ShuffleAlbums {
            self.context.shuffle(&mut self.rng);
        }
        self.history.clear();
        self.played.clear();
        self.emit_context_changed();
    }

    /// Context albums in playback order
    pub fn context_albums(&self) -> Vec<AlbumId> {
        self.context.order().to_vec()
    }

    pub fn context(&self) -> &PlaybackContext {
        &self.context
    }

    /// Swap in a new library snapshot
    ///
    /// Albums that no longer exist leave the context; party mode rebuilds
    /// its context from the new library.
    pub fn replace_store(&mut self, store: Box<dyn TrackStore>) {
        self.store = store;

        let store = &self.store;
        let before = self.context.albums().to_vec();
        self.context.retain(|album| store.contains_album(album));
        if let Some(saved) = self.saved_context.as_mut() {
            saved.retain(|album| store.contains_album(album));
        }

        for album in before {
            if !self.context.contains(album) {
                self.played.forget_album(album);
            }
        }

        if self.mode == PlayMode::Party {
            self.context = self.party_context();
            self.played.clear();
            self.history.clear();
            if let Some(track) = self.current {
                self.note_shuffle_play(track);
            }
        }
        self.realign_cursor();

        info!(albums = self.context.len(), "library snapshot replaced");
        self.emit_context_changed();
    }

    /// Tracks reachable without repeating: queue plus every context track
    pub fn known_track_count(&self) -> usize {
        let filter = self.context.filter();
        self.queue.len()
            + self
                .context
                .albums()
                .iter()
                .map(|album| self.store.tracks_of(*album, filter).len())
                .sum::<usize>()
    }

    // ===== Queue =====

    /// Append a track to the queue
    pub fn enqueue(&mut self, track: TrackId) {
        self.queue.push(track);
        self.emit_queue_changed();
    }

    /// Insert a track into the queue at `index` (clamped to the end)
    pub fn insert_in_queue(&mut self, index: usize, track: TrackId) {
        self.queue.insert(index, track);
        self.emit_queue_changed();
    }

    /// Remove the first occurrence of a track from the queue
    pub fn dequeue(&mut self, track: TrackId) -> bool {
        let removed = self.queue.remove_track(track);
        if removed {
            self.emit_queue_changed();
        }
        removed
    }

    /// Remove the queue entry at `index`
    pub fn remove_from_queue(&mut self, index: usize) -> Result<TrackId> {
        let track = self.queue.remove(index)?;
        self.emit_queue_changed();
        Ok(track)
    }

    /// Move a queue entry
    pub fn move_in_queue(&mut self, from: usize, to: usize) -> Result<()> {
        self.queue.reorder(from, to)?;
        self.emit_queue_changed();
        Ok(())
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.emit_queue_changed();
    }

    /// Queue contents, next to play first
    pub fn queue_contents(&self) -> Vec<TrackId> {
        self.queue.get_all()
    }

    pub fn queue_position(&self, track: TrackId) -> Option<usize> {
        self.queue.position(track)
    }

    pub fn is_queued(&self, track: TrackId) -> bool {
        self.queue.contains(track)
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    // ===== State Queries =====

    pub fn current(&self) -> Option<TrackId> {
        self.current
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Settings as of the last sync
    pub fn settings(&self) -> &PlaybackSettings {
        &self.active
    }

    /// Shuffle history, oldest first
    pub fn history(&self) -> Vec<TrackId> {
        self.history.get_all()
    }

    pub fn already_played(&self) -> &AlreadyPlayed {
        &self.played
    }

    // ===== Events =====

    /// Register a listener for every future event
    pub fn subscribe(&mut self, listener: impl FnMut(&SequencerEvent) + 'static) {
        self.events.subscribe(listener);
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<SequencerEvent> {
        self.events.drain()
    }

    pub fn has_pending_events(&self) -> bool {
        self.events.has_pending()
    }

    fn emit_queue_changed(&mut self) {
        let length = self.queue.len();
        self.events.emit(SequencerEvent::QueueChanged { length });
    }

    fn emit_context_changed(&mut self) {
        let albums = self.context_albums();
        self.events.emit(SequencerEvent::ContextChanged { albums });
    }
}
