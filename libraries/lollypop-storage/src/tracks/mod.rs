use crate::error::{Result, StorageError};
use lollypop_core::{AlbumId, CreateTrack, GenreId, Track, TrackId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use std::time::Duration;

const SELECT_TRACKS: &str = "SELECT id, album_id, title, disc_number, track_number, duration_ms
     FROM tracks";

fn from_row(row: &SqliteRow, genres: &mut HashMap<TrackId, Vec<GenreId>>) -> Result<Track> {
    let id: TrackId = row.try_get("id")?;
    let duration_ms: i64 = row.try_get("duration_ms")?;

    Ok(Track {
        id,
        album_id: row.try_get("album_id")?,
        title: row.try_get("title")?,
        disc_number: row.try_get("disc_number")?,
        track_number: row.try_get("track_number")?,
        duration: Duration::from_millis(duration_ms.max(0) as u64),
        genre_ids: genres.remove(&id).unwrap_or_default(),
    })
}

/// All tracks, in album order
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Track>> {
    let rows = sqlx::query(&format!(
        "{SELECT_TRACKS} ORDER BY album_id, disc_number, track_number, id"
    ))
    .fetch_all(pool)
    .await?;
    let mut genres = genre_links(pool, None).await?;

    rows.iter().map(|row| from_row(row, &mut genres)).collect()
}

/// Tracks of one album, in album order
pub async fn get_by_album(pool: &SqlitePool, album_id: AlbumId) -> Result<Vec<Track>> {
    let rows = sqlx::query(&format!(
        "{SELECT_TRACKS} WHERE album_id = ? ORDER BY disc_number, track_number, id"
    ))
    .bind(album_id)
    .fetch_all(pool)
    .await?;
    let mut genres = genre_links(pool, Some(album_id)).await?;

    rows.iter().map(|row| from_row(row, &mut genres)).collect()
}

pub async fn get_by_id(pool: &SqlitePool, id: TrackId) -> Result<Option<Track>> {
    let row = sqlx::query(&format!("{SELECT_TRACKS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let genre_ids: Vec<GenreId> =
        sqlx::query_scalar("SELECT genre_id FROM track_genres WHERE track_id = ? ORDER BY genre_id")
            .bind(id)
            .fetch_all(pool)
            .await?;
    let mut genres = HashMap::from([(id, genre_ids)]);

    from_row(&row, &mut genres).map(Some)
}

/// Create a track and its genre links
pub async fn create(pool: &SqlitePool, track: CreateTrack) -> Result<Track> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO tracks (album_id, title, disc_number, track_number, duration_ms)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(track.album_id)
    .bind(&track.title)
    .bind(track.disc_number)
    .bind(track.track_number)
    .bind(track.duration.as_millis() as i64)
    .execute(&mut *tx)
    .await?;
    let id = TrackId::new(result.last_insert_rowid());

    for genre in &track.genre_ids {
        sqlx::query("INSERT OR IGNORE INTO track_genres (track_id, genre_id) VALUES (?, ?)")
            .bind(id)
            .bind(*genre)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("track", id))
}

pub async fn delete(pool: &SqlitePool, id: TrackId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM tracks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM tracks")
        .fetch_one(pool)
        .await?)
}

/// Genre links per track, optionally limited to one album
async fn genre_links(
    pool: &SqlitePool,
    album_id: Option<AlbumId>,
) -> Result<HashMap<TrackId, Vec<GenreId>>> {
    let rows = match album_id {
        Some(album_id) => {
            sqlx::query(
                "SELECT tg.track_id, tg.genre_id
                 FROM track_genres tg
                 INNER JOIN tracks t ON t.id = tg.track_id
                 WHERE t.album_id = ?
                 ORDER BY tg.genre_id",
            )
            .bind(album_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query("SELECT track_id, genre_id FROM track_genres ORDER BY genre_id")
                .fetch_all(pool)
                .await?
        }
    };

    let mut links: HashMap<TrackId, Vec<GenreId>> = HashMap::new();
    for row in rows {
        links
            .entry(row.try_get("track_id")?)
            .or_default()
            .push(row.try_get("genre_id")?);
    }
    Ok(links)
}
