//! In-memory library snapshots

use crate::error::Result;
use crate::{albums, tracks};
use lollypop_core::Library;
use sqlx::SqlitePool;
use tracing::info;

/// Read every album and track into a [`Library`]
pub async fn load_library(pool: &SqlitePool) -> Result<Library> {
    let albums = albums::get_all(pool).await?;
    let tracks = tracks::get_all(pool).await?;

    let library = Library::new(albums, tracks)?;
    info!(
        albums = library.album_count(),
        tracks = library.track_count(),
        "library snapshot loaded"
    );
    Ok(library)
}
