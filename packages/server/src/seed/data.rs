//! The `data.json` seed document.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::SeedError;
use super::blocks::ContentBlock;

pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub categories: Vec<Fields>,
    #[serde(default)]
    pub authors: Vec<AuthorSeed>,
    #[serde(default)]
    pub articles: Vec<ArticleSeed>,
    #[serde(default)]
    pub global: Option<GlobalSeed>,
    #[serde(default)]
    pub about: Option<AboutSeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorSeed {
    /// Avatar file name under `uploads/`.
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(flatten)]
    pub fields: Fields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleSeed {
    pub slug: String,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
    #[serde(flatten)]
    pub fields: Fields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GlobalSeed {
    #[serde(rename = "defaultSeo", default)]
    pub default_seo: Fields,
    #[serde(flatten)]
    pub fields: Fields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AboutSeed {
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
    #[serde(flatten)]
    pub fields: Fields,
}

/// Read and parse the seed document. A missing file yields `None`.
pub async fn load(path: &Path) -> Result<Option<SeedData>, SeedError> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SeedError::Data {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_slice(&raw)
        .map(Some)
        .map_err(|source| SeedError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
