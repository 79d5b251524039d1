use crate::error::{Result, StorageError};
use lollypop_core::{Genre, GenreId, TrackId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn from_row(row: &SqliteRow) -> Result<Genre> {
    Ok(Genre {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Genre>> {
    let rows = sqlx::query("SELECT id, name FROM genres ORDER BY name")
        .fetch_all(pool)
        .await?;

    rows.iter().map(from_row).collect()
}

pub async fn get_by_id(pool: &SqlitePool, id: GenreId) -> Result<Option<Genre>> {
    let row = sqlx::query("SELECT id, name FROM genres WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Genre>> {
    let row = sqlx::query("SELECT id, name FROM genres WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

pub async fn create(pool: &SqlitePool, name: &str) -> Result<Genre> {
    let result = sqlx::query("INSERT INTO genres (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;

    let id = GenreId::new(result.last_insert_rowid());
    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("genre", id))
}

/// Find a genre by name, creating it when missing
pub async fn get_or_create(pool: &SqlitePool, name: &str) -> Result<Genre> {
    match find_by_name(pool, name).await? {
        Some(genre) => Ok(genre),
        None => create(pool, name).await,
    }
}

/// Get all genres for a specific track
pub async fn get_by_track(pool: &SqlitePool, track_id: TrackId) -> Result<Vec<Genre>> {
    let rows = sqlx::query(
        "SELECT g.id, g.name
         FROM genres g
         INNER JOIN track_genres tg ON g.id = tg.genre_id
         WHERE tg.track_id = ?
         ORDER BY g.name",
    )
    .bind(track_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Tag a track with a genre
pub async fn add_to_track(pool: &SqlitePool, track_id: TrackId, genre_id: GenreId) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO track_genres (track_id, genre_id) VALUES (?, ?)")
        .bind(track_id)
        .bind(genre_id)
        .execute(pool)
        .await?;

    Ok(())
}
