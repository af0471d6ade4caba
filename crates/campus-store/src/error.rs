use thiserror::Error;

/// Errors produced by the store layer.
///
/// Marketplace operations never return these: persistence failures are
/// logged and swallowed at the durable-value boundary.  They surface only
/// from opening a storage medium and from restoring a backup.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded or decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// The storage medium refused the operation outright.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A write would push the medium past its byte quota.
    #[error("Quota exceeded writing {key}: {size} bytes (limit {limit})")]
    QuotaExceeded {
        key: String,
        size: usize,
        limit: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
