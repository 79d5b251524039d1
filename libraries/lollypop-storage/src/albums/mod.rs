use crate::error::{Result, StorageError};
use lollypop_core::{Album, AlbumId, ArtistId, CreateAlbum};
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Album>> {
    let rows = sqlx::query("SELECT id, name FROM albums ORDER BY id")
        .fetch_all(pool)
        .await?;
    let mut artists = all_artists(pool).await?;

    rows.into_iter()
        .map(|row| -> Result<Album> {
            let id: AlbumId = row.try_get("id")?;
            let name: String = row.try_get("name")?;
            Ok(Album::new(id, name).with_artists(artists.remove(&id).unwrap_or_default()))
        })
        .collect()
}

pub async fn get_by_id(pool: &SqlitePool, id: AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query("SELECT id, name FROM albums WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let artist_ids: Vec<ArtistId> = sqlx::query_scalar(
        "SELECT artist_id FROM album_artists WHERE album_id = ? ORDER BY position",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(
        Album::new(row.try_get("id")?, row.try_get::<String, _>("name")?).with_artists(artist_ids),
    ))
}

/// Create an album together with its artist links
pub async fn create(pool: &SqlitePool, album: CreateAlbum) -> Result<Album> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("INSERT INTO albums (name) VALUES (?)")
        .bind(&album.name)
        .execute(&mut *tx)
        .await?;
    let id = AlbumId::new(result.last_insert_rowid());

    for (position, artist) in album.artist_ids.iter().enumerate() {
        sqlx::query(
            "INSERT OR IGNORE INTO album_artists (album_id, artist_id, position) VALUES (?, ?, ?)",
        )
        .bind(id)
        .bind(*artist)
        .bind(position as i64)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("album", id))
}

/// Delete an album; its tracks go with it
pub async fn delete(pool: &SqlitePool, id: AlbumId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

async fn all_artists(pool: &SqlitePool) -> Result<HashMap<AlbumId, Vec<ArtistId>>> {
    let rows = sqlx::query("SELECT album_id, artist_id FROM album_artists ORDER BY album_id, position")
        .fetch_all(pool)
        .await?;

    let mut artists: HashMap<AlbumId, Vec<ArtistId>> = HashMap::new();
    for row in rows {
        artists
            .entry(row.try_get("album_id")?)
            .or_default()
            .push(row.try_get("artist_id")?);
    }
    Ok(artists)
}
