use std::sync::Arc;

use anyhow::Context;
use common::UrlRewriter;
use common::storage::ObjectStore;
use common::storage::filesystem::FilesystemObjectStore;
use common::storage::s3::S3ObjectStore;
use marketing::MarketingClient;
use sea_orm::DatabaseConnection;

use crate::config::{AppConfig, StorageProvider};
use crate::upload::UploadService;
use crate::upload::hooks::{CdnUrlHook, FolderPathHook, LoggingHook};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub uploads: Arc<UploadService>,
    pub marketing: MarketingClient,
    pub urls: UrlRewriter,
}

impl AppState {
    /// Build the shared state: object store, upload pipeline and the
    /// marketing client.
    pub async fn new(config: AppConfig, db: DatabaseConnection) -> anyhow::Result<Self> {
        let store = build_object_store(&config).await?;
        let urls = UrlRewriter::from_settings(
            config.storage.cdn.as_deref(),
            config.server.public_url.as_deref(),
        );

        let mut uploads = UploadService::new(db.clone(), store.clone(), config.storage.max_file_size);
        if config.storage.log_uploads {
            uploads = uploads.with_hook(LoggingHook::new(store.provider()));
        }
        if let Some(folder) = &config.storage.folder_path {
            uploads = uploads.with_hook(FolderPathHook::new(folder.clone()));
        }
        uploads = uploads.with_hook(CdnUrlHook::new(urls.clone()));
        tracing::info!(hooks = ?uploads.hook_names(), provider = uploads.provider(), "Upload pipeline ready");

        let marketing = MarketingClient::new(config.marketing.clone())
            .context("Failed to build the marketing client")?;

        Ok(Self {
            db,
            config,
            uploads: Arc::new(uploads),
            marketing,
            urls,
        })
    }
}

async fn build_object_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ObjectStore>> {
    let max = config.storage.max_file_size;
    Ok(match config.storage.provider {
        StorageProvider::Local => {
            let local = &config.storage.local;
            let store = FilesystemObjectStore::new(local.root.clone(), local.public_path.clone(), max)
                .await
                .with_context(|| format!("Failed to open upload directory {}", local.root.display()))?;
            Arc::new(store)
        }
        StorageProvider::S3 => {
            let settings = config.storage.s3_settings()?;
            let store = S3ObjectStore::new(&settings, max)
                .with_context(|| format!("Failed to configure S3 bucket {}", settings.bucket))?;
            Arc::new(store)
        }
    })
}
