use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::error::StorageError;
use super::traits::{ObjectStore, validate_key};

/// Filesystem-backed object store for the `local` upload provider.
///
/// Objects live at `{base_path}/{key}` and are served by the HTTP layer under
/// `{public_base}/{key}`.
pub struct FilesystemObjectStore {
    base_path: PathBuf,
    public_base: String,
    max_size: u64,
}

impl FilesystemObjectStore {
    /// Create a new filesystem object store.
    pub async fn new(
        base_path: PathBuf,
        public_base: impl Into<String>,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        let public_base = public_base.into().trim_end_matches('/').to_string();
        Ok(Self {
            base_path,
            public_base,
            max_size,
        })
    }

    fn object_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        Ok(self.base_path.join(validate_key(key)?))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl ObjectStore for FilesystemObjectStore {
    fn provider(&self) -> &'static str {
        "local"
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }

    async fn put(
        &self,
        key: &str,
        data: &[u8],
        _content_type: &str,
    ) -> Result<String, StorageError> {
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let object_path = self.object_path(key)?;
        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Some(parent) = object_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        if let Err(e) = fs::rename(&temp_path, &object_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(self.url_for(key))
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let object_path = self.object_path(key)?;
        Ok(fs::try_exists(&object_path).await?)
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let object_path = self.object_path(key)?;
        match fs::remove_file(&object_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
