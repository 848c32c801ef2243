use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A published content entry. The document shape depends on `content_type`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// One of: category, author, article, global, about.
    #[sea_orm(indexed)]
    pub content_type: String,

    #[sea_orm(column_type = "JsonBinary")]
    pub document: Json,

    pub published_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

/// Content types that entries can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Category,
    Author,
    Article,
    Global,
    About,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::Category,
        ContentType::Author,
        ContentType::Article,
        ContentType::Global,
        ContentType::About,
    ];

    /// Singular API id, as stored in `entry.content_type` and used in
    /// permission actions.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Category => "category",
            ContentType::Author => "author",
            ContentType::Article => "article",
            ContentType::Global => "global",
            ContentType::About => "about",
        }
    }

    /// Single types hold exactly one entry.
    pub fn is_single(self) -> bool {
        matches!(self, ContentType::Global | ContentType::About)
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
