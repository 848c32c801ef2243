use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An uploaded media file.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "file")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name without extension. Seeding deduplicates on this column.
    #[sea_orm(indexed)]
    pub name: String,

    pub alternative_text: Option<String>,
    pub caption: Option<String>,

    /// `{slug}_{short content hash}`, unique per stored object.
    pub hash: String,

    /// Extension including the leading dot (`.jpg`), or empty.
    pub ext: String,
    pub mime: String,

    /// Size in bytes.
    pub size: i64,

    /// URL reported by the storage provider at upload time.
    pub url: String,

    /// Key of the object in the store.
    pub object_key: String,

    pub folder_path: String,

    /// `local` or `aws-s3`.
    pub provider: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
