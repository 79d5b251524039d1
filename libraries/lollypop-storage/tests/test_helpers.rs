//! Test helpers and fixtures for storage integration tests
//!
//! Databases are real SQLite files in a temp dir so migrations, foreign
//! keys and WAL mode behave as in production.

#![allow(dead_code)]

use lollypop_core::{AlbumId, CreateAlbum, CreateTrack, GenreId, Track};
use sqlx::SqlitePool;
use std::time::Duration;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = lollypop_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        lollypop_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: an album with `count` numbered tracks tagged with `genres`
pub async fn create_test_album(
    pool: &SqlitePool,
    name: &str,
    count: u32,
    genres: &[GenreId],
) -> (AlbumId, Vec<Track>) {
    let album = lollypop_storage::albums::create(
        pool,
        CreateAlbum {
            name: name.to_string(),
            artist_ids: Vec::new(),
        },
    )
    .await
    .expect("Failed to create album");

    let mut tracks = Vec::new();
    for number in 1..=count {
        let track = lollypop_storage::tracks::create(
            pool,
            CreateTrack {
                album_id: Some(album.id),
                title: format!("{} - {}", name, number),
                disc_number: 1,
                track_number: number,
                duration: Duration::from_secs(180),
                genre_ids: genres.to_vec(),
            },
        )
        .await
        .expect("Failed to create track");
        tracks.push(track);
    }

    (album.id, tracks)
}
