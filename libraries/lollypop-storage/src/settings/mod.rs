//! Settings persistence
//!
//! Settings are stored as key-value pairs with JSON-serialized values.
//! Playback settings are spread over the `playback.*` keys; missing keys
//! fall back to their defaults.
//!
//! # Example
//!
//! ```rust,no_run
//! use lollypop_core::PlayMode;
//! use lollypop_storage::settings;
//! # async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//! let mut playback = settings::load_playback_settings(pool).await?;
//! playback.mode = PlayMode::Party;
//! settings::save_playback_settings(pool, &playback).await?;
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use lollypop_core::PlaybackSettings;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

// Setting key constants
/// Active play mode (`"linear"`, `"shuffle_tracks"`, `"shuffle_albums"`, `"party"`)
pub const SETTING_MODE: &str = "playback.mode";

/// Party mode genre allowlist (array of genre ids)
pub const SETTING_PARTY_GENRES: &str = "playback.party_genres";

/// Repeat mode (`"none"`, `"all"`, `"track"`)
pub const SETTING_REPEAT: &str = "playback.repeat";

/// Stop at album boundaries
pub const SETTING_STOP_AFTER_ALBUM: &str = "playback.stop_after_album";

/// Shuffle history length
pub const SETTING_HISTORY_SIZE: &str = "playback.history_size";

/// Setting entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: serde_json::Value,
}

/// Get a single setting value
///
/// Returns `Ok(None)` if the key was never set.
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<serde_json::Value>> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(value.map(|v| serde_json::from_str(&v)).transpose()?)
}

/// Set a setting value, replacing any previous one
pub async fn set_setting(pool: &SqlitePool, key: &str, value: &serde_json::Value) -> Result<()> {
    let value = serde_json::to_string(value)?;

    sqlx::query(
        "INSERT INTO settings (key, value, updated_at)
         VALUES (?, ?, strftime('%s', 'now'))
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a setting; returns whether it existed
pub async fn delete_setting(pool: &SqlitePool, key: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM settings WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// All stored settings, ordered by key
pub async fn get_all_settings(pool: &SqlitePool) -> Result<Vec<Setting>> {
    let rows = sqlx::query("SELECT key, value FROM settings ORDER BY key")
        .fetch_all(pool)
        .await?;

    rows.into_iter()
        .map(|row| -> Result<Setting> {
            let value: String = row.try_get("value")?;
            Ok(Setting {
                key: row.try_get("key")?,
                value: serde_json::from_str(&value)?,
            })
        })
        .collect()
}

async fn get_typed<T: DeserializeOwned>(pool: &SqlitePool, key: &str) -> Result<Option<T>> {
    match get_setting(pool, key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Load playback settings, defaulting every missing key
pub async fn load_playback_settings(pool: &SqlitePool) -> Result<PlaybackSettings> {
    let mut settings = PlaybackSettings::default();

    if let Some(mode) = get_typed(pool, SETTING_MODE).await? {
        settings.mode = mode;
    }
    if let Some(genres) = get_typed(pool, SETTING_PARTY_GENRES).await? {
        settings.party_genres = genres;
    }
    if let Some(repeat) = get_typed(pool, SETTING_REPEAT).await? {
        settings.repeat = repeat;
    }
    if let Some(stop) = get_typed(pool, SETTING_STOP_AFTER_ALBUM).await? {
        settings.stop_after_album = stop;
    }
    if let Some(size) = get_typed(pool, SETTING_HISTORY_SIZE).await? {
        settings.history_size = size;
    }

    Ok(settings)
}

/// Write every playback setting key
pub async fn save_playback_settings(pool: &SqlitePool, settings: &PlaybackSettings) -> Result<()> {
    let entries = [
        (SETTING_MODE, serde_json::to_value(settings.mode)?),
        (
            SETTING_PARTY_GENRES,
            serde_json::to_value(&settings.party_genres)?,
        ),
        (SETTING_REPEAT, serde_json::to_value(settings.repeat)?),
        (
            SETTING_STOP_AFTER_ALBUM,
            serde_json::Value::Bool(settings.stop_after_album),
        ),
        (
            SETTING_HISTORY_SIZE,
            serde_json::to_value(settings.history_size)?,
        ),
    ];

    for (key, value) in &entries {
        set_setting(pool, key, value).await?;
    }

    Ok(())
}
