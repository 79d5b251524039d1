//! Lollypop Storage
//!
//! `SQLite` persistence for the Lollypop library and playback settings.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each table family owns its queries (`albums`,
//!   `tracks`, `genres`, `settings`)
//! - **Snapshots**: [`load_library`] reads the whole library into an
//!   in-memory [`Library`](lollypop_core::Library) the sequencer can query
//!   without touching the database
//!
//! # Example
//!
//! ```rust,no_run
//! use lollypop_storage::{create_pool, load_library, run_migrations, settings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://lollypop.db").await?;
//! run_migrations(&pool).await?;
//!
//! let library = load_library(&pool).await?;
//! let playback = settings::load_playback_settings(&pool).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod snapshot;

// Vertical slices
pub mod albums;
pub mod genres;
pub mod settings;
pub mod tracks;

pub use error::{Result, StorageError};
pub use snapshot::load_library;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use tracing::{debug, info};

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup, before any other query.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    debug!("database migrations applied");
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://lollypop.db`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    // Every in-memory connection is its own database
    let max_connections = if database_url.contains(":memory:") {
        1
    } else {
        5
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    info!(url = database_url, "database pool created");
    Ok(pool)
}
