use thiserror::Error;

/// Errors that can occur during object storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The object key is empty or escapes the store's namespace.
    #[error("invalid object key: {0}")]
    InvalidKey(String),
    /// The object exceeds the configured size limit.
    #[error("object exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },
    /// The remote provider rejected the request or could not be configured.
    #[error("storage backend error: {0}")]
    Backend(String),
}
