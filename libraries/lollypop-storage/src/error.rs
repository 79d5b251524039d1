/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Stored rows the library model rejects
    #[error(transparent)]
    Core(#[from] lollypop_core::LollypopError),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StorageError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Migration(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<StorageError> for lollypop_core::LollypopError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => Self::NotFound { entity, id },
            StorageError::Core(inner) => inner,
            other => Self::storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lollypop_core::{AlbumId, LollypopError};

    #[test]
    fn core_errors_keep_their_variant() {
        let err: StorageError = LollypopError::AlbumNotFound(AlbumId::new(7)).into();
        assert!(matches!(
            err,
            StorageError::Core(LollypopError::AlbumNotFound(id)) if id == AlbumId::new(7)
        ));

        let back: LollypopError = err.into();
        assert!(matches!(back, LollypopError::AlbumNotFound(_)));
    }

    #[test]
    fn not_found_maps_to_core_not_found() {
        let err: LollypopError = StorageError::not_found("Album", 3).into();
        assert!(matches!(err, LollypopError::NotFound { ref id, .. } if id == "3"));
    }
}
