//! Upload service: stores file bytes in the configured object store, registers
//! a `file` row per upload and runs the hook pipeline around it.

pub mod hooks;
pub mod key;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use common::storage::{ContentHash, ObjectStore, StorageError};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use thiserror::Error;

use crate::entity::file;
use crate::models::file::FileRecord;

pub use hooks::UploadHook;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{name} is {actual} bytes, the limit is {limit}")]
    TooLarge { name: String, actual: u64, limit: u64 },

    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Database(#[from] DbErr),
}

/// One file in an upload request.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Original file name, with extension.
    pub file_name: String,
    /// MIME type reported by the client. Guessed from the name when absent.
    pub mime: Option<String>,
    pub data: Vec<u8>,
}

/// Metadata applied to every file of a request.
#[derive(Debug, Clone, Default)]
pub struct FileInfo {
    /// Display name. Defaults to the file name without extension.
    pub name: Option<String>,
    pub alternative_text: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub files: Vec<UploadFile>,
    pub info: FileInfo,
    pub folder_path: Option<String>,
}

pub struct UploadService {
    db: DatabaseConnection,
    store: Arc<dyn ObjectStore>,
    hooks: Vec<Box<dyn UploadHook>>,
    max_file_size: u64,
}

impl UploadService {
    pub fn new(db: DatabaseConnection, store: Arc<dyn ObjectStore>, max_file_size: u64) -> Self {
        Self {
            db,
            store,
            hooks: Vec::new(),
            max_file_size,
        }
    }

    /// Append a hook. Hooks run in the order they were added.
    pub fn with_hook(mut self, hook: impl UploadHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn hook_names(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    pub fn provider(&self) -> &'static str {
        self.store.provider()
    }

    /// Store every file of the request and register it. Returns one record
    /// per file, in request order, after the `after` hooks have run.
    pub async fn upload(&self, mut request: UploadRequest) -> Result<Vec<FileRecord>, UploadError> {
        let started = Instant::now();
        let result = self.run_pipeline(&mut request, started).await;
        if let Err(err) = &result {
            for hook in &self.hooks {
                hook.on_error(&request, err, started.elapsed());
            }
        }
        result
    }

    async fn run_pipeline(
        &self,
        request: &mut UploadRequest,
        started: Instant,
    ) -> Result<Vec<FileRecord>, UploadError> {
        for hook in &self.hooks {
            hook.before(request)?;
        }
        if request.files.is_empty() {
            return Err(UploadError::InvalidInput("No files were provided".into()));
        }

        let folder = key::normalize_folder(request.folder_path.as_deref());
        let mut records = Vec::with_capacity(request.files.len());
        for upload in &request.files {
            records.push(self.store_one(upload, &request.info, folder.as_deref()).await?);
        }

        for hook in &self.hooks {
            hook.after(request, &mut records, started.elapsed())?;
        }
        Ok(records)
    }

    async fn store_one(
        &self,
        upload: &UploadFile,
        info: &FileInfo,
        folder: Option<&str>,
    ) -> Result<FileRecord, UploadError> {
        let size = upload.data.len() as u64;
        if size > self.max_file_size {
            return Err(UploadError::TooLarge {
                name: upload.file_name.clone(),
                actual: size,
                limit: self.max_file_size,
            });
        }
        if upload.file_name.trim().is_empty() {
            return Err(UploadError::InvalidInput("File name must not be empty".into()));
        }

        let name = info
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| match key::base_name(&upload.file_name) {
                "" => upload.file_name.clone(),
                base => base.to_string(),
            });
        let ext = key::extension_of(&upload.file_name);
        let mime = upload
            .mime
            .clone()
            .filter(|m| !m.is_empty() && m != "application/octet-stream")
            .or_else(|| {
                mime_guess::from_path(&upload.file_name)
                    .first()
                    .map(|m| m.to_string())
            })
            .unwrap_or_else(|| "application/octet-stream".into());

        let hash = key::file_hash(&name, &ContentHash::compute(&upload.data));
        let object_key = key::object_key(folder, &hash, &ext);
        let url = self.store.put(&object_key, &upload.data, &mime).await?;

        let model = file::ActiveModel {
            name: Set(name),
            alternative_text: Set(info.alternative_text.clone()),
            caption: Set(info.caption.clone()),
            hash: Set(hash),
            ext: Set(ext),
            mime: Set(mime),
            size: Set(size as i64),
            url: Set(url),
            object_key: Set(object_key.clone()),
            folder_path: Set(folder.map_or_else(|| "/".to_string(), |f| format!("/{f}"))),
            provider: Set(self.store.provider().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(saved) => Ok(saved.into()),
            Err(e) => {
                // No row references the object.
                if let Err(cleanup) = self.store.delete(&object_key).await {
                    tracing::warn!(key = %object_key, error = %cleanup, "Failed to remove orphaned object");
                }
                Err(e.into())
            }
        }
    }

    /// First file registered under `name` (the display name, without extension).
    pub async fn find_by_name(&self, name: &str) -> Result<Option<FileRecord>, DbErr> {
        Ok(file::Entity::find()
            .filter(file::Column::Name.eq(name))
            .order_by_asc(file::Column::Id)
            .one(&self.db)
            .await?
            .map(FileRecord::from))
    }

    pub async fn get(&self, id: i32) -> Result<Option<FileRecord>, DbErr> {
        Ok(file::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(FileRecord::from))
    }

    /// Files ordered by id, newest last, with the total count.
    pub async fn list(&self, page: u64, page_size: u64) -> Result<(Vec<FileRecord>, u64), DbErr> {
        let paginator = file::Entity::find()
            .order_by_asc(file::Column::Id)
            .paginate(&self.db, page_size);
        let total = paginator.num_items().await?;
        let files = paginator
            .fetch_page(page.saturating_sub(1))
            .await?
            .into_iter()
            .map(FileRecord::from)
            .collect();
        Ok((files, total))
    }
}
