use async_trait::async_trait;

use super::error::StorageError;

/// Key-addressed object storage for uploaded media.
///
/// Keys are relative, slash-separated paths such as `articles/cover_1a2b3c4d5e.jpg`.
/// Every implementation must reject keys that fail [`validate_key`].
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Provider name recorded on file records (e.g. `local`, `aws-s3`).
    fn provider(&self) -> &'static str;

    /// Origin URL under which the object with this key is reachable.
    fn url_for(&self, key: &str) -> String;

    /// Store bytes under `key` and return the object's origin URL.
    ///
    /// Existing objects with the same key are overwritten.
    async fn put(&self, key: &str, data: &[u8], content_type: &str)
    -> Result<String, StorageError>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// Delete an object.
    ///
    /// Returns `true` if the object was deleted, `false` if it did not exist.
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;
}

/// Validates an object key.
pub fn validate_key(key: &str) -> Result<&str, StorageError> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key cannot be empty".into()));
    }
    if key.starts_with('/') || key.ends_with('/') {
        return Err(StorageError::InvalidKey(format!(
            "key must not start or end with '/': {key}"
        )));
    }
    if key.contains('\0') || key.contains('\\') {
        return Err(StorageError::InvalidKey(format!(
            "key contains forbidden characters: {key:?}"
        )));
    }
    if key.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..") {
        return Err(StorageError::InvalidKey(format!(
            "key contains an empty or relative segment: {key}"
        )));
    }
    Ok(key)
}
