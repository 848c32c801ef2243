//! Hooks run around every upload.

use std::time::Duration;

use common::UrlRewriter;

use super::{UploadError, UploadRequest};
use crate::models::file::FileRecord;

/// Interception points of the upload pipeline.
///
/// `before` runs ahead of storage and may adjust the request. `after` runs on
/// the produced records. `on_error` runs for every hook when any step fails,
/// including another hook; the original error is still returned.
pub trait UploadHook: Send + Sync {
    fn name(&self) -> &'static str;

    fn before(&self, _request: &mut UploadRequest) -> Result<(), UploadError> {
        Ok(())
    }

    fn after(
        &self,
        _request: &UploadRequest,
        _records: &mut Vec<FileRecord>,
        _elapsed: Duration,
    ) -> Result<(), UploadError> {
        Ok(())
    }

    fn on_error(&self, _request: &UploadRequest, _error: &UploadError, _elapsed: Duration) {}
}

/// Logs each upload: the request, timing and a summary of every result.
pub struct LoggingHook {
    provider: &'static str,
}

impl LoggingHook {
    pub fn new(provider: &'static str) -> Self {
        Self { provider }
    }
}

impl UploadHook for LoggingHook {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn before(&self, request: &mut UploadRequest) -> Result<(), UploadError> {
        let files: Vec<(&str, usize)> = request
            .files
            .iter()
            .map(|f| (f.file_name.as_str(), f.data.len()))
            .collect();
        tracing::info!(
            provider = self.provider,
            folder = ?request.folder_path,
            name = ?request.info.name,
            ?files,
            "Upload started"
        );
        Ok(())
    }

    fn after(
        &self,
        _request: &UploadRequest,
        records: &mut Vec<FileRecord>,
        elapsed: Duration,
    ) -> Result<(), UploadError> {
        for record in records.iter() {
            tracing::info!(
                id = record.id,
                name = %record.name,
                url = %record.url,
                provider = %record.provider,
                size = record.size,
                "Stored file"
            );
        }
        tracing::info!(
            duration_ms = elapsed.as_millis() as u64,
            count = records.len(),
            "Upload completed"
        );
        Ok(())
    }

    fn on_error(&self, request: &UploadRequest, error: &UploadError, elapsed: Duration) {
        let files: Vec<&str> = request.files.iter().map(|f| f.file_name.as_str()).collect();
        tracing::error!(
            provider = self.provider,
            duration_ms = elapsed.as_millis() as u64,
            ?files,
            error = %error,
            "Upload failed"
        );
        if let UploadError::Storage(storage) = error {
            tracing::error!(provider = self.provider, detail = ?storage, "Storage provider error");
        }
    }
}

/// Puts uploads that do not name a folder into a default one.
pub struct FolderPathHook {
    folder: String,
}

impl FolderPathHook {
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
        }
    }
}

impl UploadHook for FolderPathHook {
    fn name(&self) -> &'static str {
        "folder-path"
    }

    fn before(&self, request: &mut UploadRequest) -> Result<(), UploadError> {
        let unset = request
            .folder_path
            .as_deref()
            .is_none_or(|p| p.trim().is_empty());
        if unset {
            request.folder_path = Some(self.folder.clone());
        }
        Ok(())
    }
}

/// Rewrites the URLs of the returned records to the CDN.
pub struct CdnUrlHook {
    urls: UrlRewriter,
}

impl CdnUrlHook {
    pub fn new(urls: UrlRewriter) -> Self {
        Self { urls }
    }
}

impl UploadHook for CdnUrlHook {
    fn name(&self) -> &'static str {
        "cdn-url"
    }

    fn after(
        &self,
        _request: &UploadRequest,
        records: &mut Vec<FileRecord>,
        _elapsed: Duration,
    ) -> Result<(), UploadError> {
        for record in records.iter_mut() {
            record.url = self.urls.rewrite(&record.url);
        }
        Ok(())
    }
}
