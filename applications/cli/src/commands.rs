//! Subcommand implementations
//!
//! Each command takes an open pool so tests can drive them against a
//! temporary database.

use crate::error::{CliError, Result};
use lollypop_core::{
    CreateAlbum, CreateTrack, GenreFilter, GenreId, Library, PlayMode, PlaybackSettings, TrackId,
    TrackStore,
};
use lollypop_playback::{PlaybackEngine, Player, Sequencer, SequencerConfig};
use lollypop_storage::{albums, genres, settings, tracks, StorageError};
use sqlx::SqlitePool;
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, info};

/// Library and settings as loaded by the background task
type Snapshot = std::result::Result<(Library, PlaybackSettings), StorageError>;

/// Create an album with `track_count` numbered tracks
///
/// Tracks are tagged with `genre` (created on first use) when given.
pub async fn add_album(
    pool: &SqlitePool,
    name: &str,
    track_count: u32,
    genre: Option<&str>,
) -> Result<lollypop_core::AlbumId> {
    if name.trim().is_empty() {
        return Err(CliError::InvalidArgument("album name is empty".to_string()));
    }

    let genre_ids = match genre {
        Some(genre) => vec![genres::get_or_create(pool, genre).await?.id],
        None => Vec::new(),
    };

    let album = albums::create(
        pool,
        CreateAlbum {
            name: name.to_string(),
            artist_ids: Vec::new(),
        },
    )
    .await?;

    for number in 1..=track_count {
        tracks::create(
            pool,
            CreateTrack {
                album_id: Some(album.id),
                title: format!("{} {}", name, number),
                disc_number: 1,
                track_number: number,
                duration: Duration::from_secs(180),
                genre_ids: genre_ids.clone(),
            },
        )
        .await?;
    }

    info!(album = %album.id, tracks = track_count, "album added");
    Ok(album.id)
}

/// Persist the play mode
pub async fn set_mode(pool: &SqlitePool, mode: PlayMode) -> Result<()> {
    let mut playback = settings::load_playback_settings(pool).await?;
    playback.mode = mode;
    settings::save_playback_settings(pool, &playback).await?;

    info!(?mode, "play mode saved");
    Ok(())
}

/// Persist the party mode genre allowlist
///
/// Every id must name an existing genre.
pub async fn set_party_genres(pool: &SqlitePool, ids: &[GenreId]) -> Result<()> {
    for id in ids {
        if genres::get_by_id(pool, *id).await?.is_none() {
            return Err(CliError::InvalidArgument(format!("unknown genre id {}", id)));
        }
    }

    let mut playback = settings::load_playback_settings(pool).await?;
    playback.party_genres = ids.to_vec();
    settings::save_playback_settings(pool, &playback).await?;

    info!(genres = ?ids, "party genres saved");
    Ok(())
}

/// A track the `play` command sequenced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedTrack {
    pub id: TrackId,
    pub title: String,
}

/// Options for [`play`]
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    pub count: usize,
    pub queue: Vec<TrackId>,
    pub seed: Option<u64>,
}

/// Sequence `count` tracks over the whole library
///
/// The library is read on a tokio task and handed over a channel to the
/// thread that owns the sequencer.
pub async fn play(pool: SqlitePool, options: PlayOptions) -> Result<Vec<PlayedTrack>> {
    let (tx, rx) = mpsc::channel::<Snapshot>();

    let loader = tokio::spawn(async move {
        let snapshot = load_snapshot(&pool).await;
        if tx.send(snapshot).is_err() {
            debug!("sequencer thread gone before the library arrived");
        }
    });

    let sequencer = tokio::task::spawn_blocking(move || run_sequence(&rx, options));

    loader.await?;
    sequencer.await?
}

async fn load_snapshot(pool: &SqlitePool) -> Snapshot {
    let library = lollypop_storage::load_library(pool).await?;
    let playback = settings::load_playback_settings(pool).await?;
    Ok((library, playback))
}

/// Engine that only records what it was asked to load
#[derive(Debug, Default)]
struct DryRunEngine {
    loaded: usize,
}

impl PlaybackEngine for DryRunEngine {
    fn load(&mut self, track: TrackId) -> lollypop_playback::Result<()> {
        self.loaded += 1;
        debug!(%track, "dry run load");
        Ok(())
    }

    fn stop(&mut self) {
        debug!(loaded = self.loaded, "dry run stopped");
    }
}

fn run_sequence(rx: &mpsc::Receiver<Snapshot>, options: PlayOptions) -> Result<Vec<PlayedTrack>> {
    let (library, playback) = rx.recv().map_err(|_| CliError::LoaderGone)??;

    let albums = library.albums(&GenreFilter::All);
    let titles = library.clone();

    let mut sequencer = Sequencer::new(
        Box::new(library),
        Box::new(playback),
        SequencerConfig {
            seed: options.seed,
        },
    );
    sequencer.set_context(albums, GenreFilter::All);
    for track in options.queue {
        sequencer.enqueue(track);
    }

    let mut player = Player::new(sequencer, DryRunEngine::default());
    let played = (0..options.count)
        .map_while(|_| player.play_next())
        .map(|id| PlayedTrack {
            id,
            title: titles
                .track(id)
                .map_or_else(|| format!("track {}", id), |t| t.title.clone()),
        })
        .collect();

    Ok(played)
}
