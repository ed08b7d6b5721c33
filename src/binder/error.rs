use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum BinderError {
    #[error("Tab not found: {0}")]
    TabNotFound(Uuid),

    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unresolvable storage roots or an unopenable store. Fatal at startup;
    /// callers are not expected to retry.
    #[error("Store configuration error: {0}")]
    Config(String),

    /// The one-shot store relocation failed past the point of rollback.
    #[error("Store migration failed: {0}")]
    Migration(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, BinderError>;
