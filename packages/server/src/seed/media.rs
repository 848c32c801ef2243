//! Name-deduplicated media registration for seed data.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::SeedError;
use crate::models::file::FileRecord;
use crate::upload::key::base_name;
use crate::upload::{FileInfo, UploadError, UploadFile, UploadRequest, UploadService};

/// The media operations seeding needs.
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// A file registered under exactly this base name.
    async fn find_by_name(&self, name: &str) -> Result<Option<FileRecord>, UploadError>;

    async fn upload(&self, request: UploadRequest) -> Result<Vec<FileRecord>, UploadError>;
}

#[async_trait]
impl MediaLibrary for UploadService {
    async fn find_by_name(&self, name: &str) -> Result<Option<FileRecord>, UploadError> {
        Ok(UploadService::find_by_name(self, name).await?)
    }

    async fn upload(&self, request: UploadRequest) -> Result<Vec<FileRecord>, UploadError> {
        UploadService::upload(self, request).await
    }
}

/// A media field: file names before resolution, records after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaRef {
    Name(String),
    Names(Vec<String>),
    File(FileRecord),
    Files(Vec<FileRecord>),
}

impl MediaRef {
    /// File names still waiting to be resolved, or `None` once resolved.
    pub fn pending_names(&self) -> Option<Vec<String>> {
        match self {
            MediaRef::Name(name) => Some(vec![name.clone()]),
            MediaRef::Names(names) => Some(names.clone()),
            MediaRef::File(_) | MediaRef::Files(_) => None,
        }
    }
}

/// Outcome of resolving a set of names: one record, or a list when the set
/// did not resolve to exactly one.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaSelection {
    One(FileRecord),
    Many(Vec<FileRecord>),
}

impl MediaSelection {
    pub fn records(&self) -> &[FileRecord] {
        match self {
            MediaSelection::One(record) => std::slice::from_ref(record),
            MediaSelection::Many(records) => records,
        }
    }
}

impl From<MediaSelection> for MediaRef {
    fn from(selection: MediaSelection) -> Self {
        match selection {
            MediaSelection::One(record) => MediaRef::File(record),
            MediaSelection::Many(records) => MediaRef::Files(records),
        }
    }
}

impl From<MediaSelection> for serde_json::Value {
    fn from(selection: MediaSelection) -> Self {
        let result = match selection {
            MediaSelection::One(record) => serde_json::to_value(record),
            MediaSelection::Many(records) => serde_json::to_value(records),
        };
        // FileRecord has only string, integer and timestamp fields.
        result.unwrap_or(serde_json::Value::Null)
    }
}

/// Resolve seed file names to file records.
///
/// Names whose base name is already registered reuse the existing record;
/// the rest are read from `uploads_dir` and uploaded. Existing records come
/// first, then uploaded ones, each in input order. An upload failure is
/// returned as is; files uploaded earlier in the call stay registered.
pub async fn resolve_files(
    library: &dyn MediaLibrary,
    uploads_dir: &Path,
    names: &[String],
) -> Result<MediaSelection, SeedError> {
    let mut existing = Vec::new();
    let mut uploaded = Vec::new();

    for name in names {
        let base = base_name(name);
        if let Some(record) = library.find_by_name(base).await? {
            tracing::debug!(file = %name, id = record.id, "Reusing registered file");
            existing.push(record);
            continue;
        }

        let request = seed_upload(uploads_dir, name).await?;
        let record = library
            .upload(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SeedError::EmptyUpload(name.clone()))?;
        uploaded.push(record);
    }

    existing.extend(uploaded);
    Ok(if existing.len() == 1 {
        MediaSelection::One(existing.remove(0))
    } else {
        MediaSelection::Many(existing)
    })
}

async fn seed_upload(uploads_dir: &Path, name: &str) -> Result<UploadRequest, UploadError> {
    let path = uploads_dir.join(name);
    let data = tokio::fs::read(&path)
        .await
        .map_err(|source| UploadError::Read { path, source })?;
    let base = base_name(name).to_string();

    Ok(UploadRequest {
        files: vec![UploadFile {
            file_name: name.to_string(),
            mime: mime_guess::from_path(name).first().map(|m| m.to_string()),
            data,
        }],
        info: FileInfo {
            alternative_text: Some(format!("An image uploaded to the CMS called {base}")),
            caption: Some(base.clone()),
            name: Some(base),
        },
        folder_path: None,
    })
}
