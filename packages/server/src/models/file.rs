use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use common::UrlRewriter;

use crate::entity::file;

/// An uploaded media file as presented to clients and embedded in content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    #[schema(example = 12)]
    pub id: i32,
    /// Display name, without extension.
    #[schema(example = "beautiful-picture")]
    pub name: String,
    #[schema(example = "An image uploaded to the CMS called beautiful-picture")]
    pub alternative_text: Option<String>,
    pub caption: Option<String>,
    #[schema(example = "beautiful_picture_3f2a9c1b0d")]
    pub hash: String,
    #[schema(example = ".jpg")]
    pub ext: String,
    #[schema(example = "image/jpeg")]
    pub mime: String,
    /// Size in bytes.
    #[schema(example = 48213)]
    pub size: i64,
    #[schema(example = "https://cdn.example.com/beautiful_picture_3f2a9c1b0d.jpg")]
    pub url: String,
    #[schema(example = "/")]
    pub folder_path: String,
    #[schema(example = "aws-s3")]
    pub provider: String,
    pub created_at: DateTime<Utc>,
}

impl FileRecord {
    /// Point the URL at the CDN.
    pub fn rewritten(mut self, urls: &UrlRewriter) -> Self {
        self.url = urls.rewrite(&self.url);
        self
    }
}

impl From<file::Model> for FileRecord {
    fn from(model: file::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            alternative_text: model.alternative_text,
            caption: model.caption,
            hash: model.hash,
            ext: model.ext,
            mime: model.mime,
            size: model.size,
            url: model.url,
            folder_path: model.folder_path,
            provider: model.provider,
            created_at: model.created_at,
        }
    }
}

/// Response DTO for listing files.
#[derive(Serialize, utoipa::ToSchema)]
pub struct FileListResponse {
    pub files: Vec<FileRecord>,
    pub total: u64,
}
