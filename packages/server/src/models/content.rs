use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::entry;
use crate::models::shared::Pagination;

/// A published content entry.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "article")]
    pub content_type: String,
    /// Entry fields. Media objects carry CDN URLs.
    #[schema(value_type = Object)]
    pub document: serde_json::Value,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<entry::Model> for EntryResponse {
    fn from(model: entry::Model) -> Self {
        Self {
            id: model.id,
            content_type: model.content_type,
            document: model.document,
            published_at: model.published_at,
            created_at: model.created_at,
        }
    }
}

/// Response DTO for collection types.
#[derive(Serialize, utoipa::ToSchema)]
pub struct EntryListResponse {
    pub data: Vec<EntryResponse>,
    pub pagination: Pagination,
}

/// Response DTO for a single entry.
#[derive(Serialize, utoipa::ToSchema)]
pub struct EntryEnvelope {
    pub data: EntryResponse,
}
