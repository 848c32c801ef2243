//! First-run import of demo content.
//!
//! On the first start of an environment the seeder grants the public role
//! read access to the content API and the marketing endpoints, uploads the
//! media referenced by `data.json` (reusing files already registered under
//! the same name), and creates one published entry per seed record. Later
//! starts find the `setup.init_has_run` flag and do nothing.

pub mod blocks;
pub mod data;
pub mod media;
pub mod store;

use std::path::PathBuf;

use sea_orm::DbErr;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::entity::entry::ContentType;
use crate::entity::permission;
use crate::state::AppState;
use crate::upload::UploadError;

use self::blocks::resolve_blocks;
use self::data::SeedData;
use self::media::{MediaLibrary, resolve_files};
use self::store::{DatabaseSeedStore, SeedStore};

pub use store::ensure_default_roles;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("could not read seed data at {}: {source}", path.display())]
    Data {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid seed data in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("upload of {0} returned no file")]
    EmptyUpload(String),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("could not build entry document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("could not create {content_type} entry: {source}")]
    Entry {
        content_type: ContentType,
        #[source]
        source: DbErr,
    },

    #[error("the public role does not exist")]
    MissingPublicRole,

    #[error(transparent)]
    Database(#[from] DbErr),
}

/// Marketing handlers open to the public role.
const MARKETING_HANDLERS: [&str; 3] = ["sendNewsletter", "contact", "interest"];

/// Every action granted to the public role on first run.
pub fn public_actions() -> Vec<String> {
    let mut actions: Vec<String> = ContentType::ALL
        .iter()
        .flat_map(|ct| {
            ["find", "findOne"]
                .into_iter()
                .map(move |handler| permission::action(ct.as_str(), handler))
        })
        .collect();
    actions.extend(
        MARKETING_HANDLERS
            .iter()
            .map(|handler| permission::action("marketing", handler)),
    );
    actions
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    /// Entries whose creation failed.
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded(SeedReport),
    AlreadySeeded,
    /// No `data.json` in the data directory.
    NoData,
}

pub struct Seeder<'a> {
    store: &'a dyn SeedStore,
    media: &'a dyn MediaLibrary,
    data_dir: PathBuf,
    environment: String,
}

impl<'a> Seeder<'a> {
    pub fn new(
        store: &'a dyn SeedStore,
        media: &'a dyn MediaLibrary,
        data_dir: impl Into<PathBuf>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            store,
            media,
            data_dir: data_dir.into(),
            environment: environment.into(),
        }
    }

    /// Import the seed data unless this environment was already seeded.
    ///
    /// The flag is checked before the data file is read, and set before any
    /// content is written, so a failed import is not retried on the next start.
    pub async fn run(&self) -> Result<SeedOutcome, SeedError> {
        if self.store.is_initialized(&self.environment).await? {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let path = self.data_dir.join("data.json");
        let Some(data) = data::load(&path).await? else {
            warn!(path = %path.display(), "No seed data found, skipping import");
            return Ok(SeedOutcome::NoData);
        };

        if self.store.mark_initialized(&self.environment).await? {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        self.grant_public_permissions().await?;
        let report = self.import(data).await?;
        Ok(SeedOutcome::Seeded(report))
    }

    async fn grant_public_permissions(&self) -> Result<(), SeedError> {
        let role_id = self
            .store
            .public_role()
            .await?
            .ok_or(SeedError::MissingPublicRole)?;

        let mut granted = 0u32;
        for action in public_actions() {
            if self.store.grant_permission(role_id, &action).await? {
                granted += 1;
            }
        }
        if granted > 0 {
            info!("Granted {} permissions to the public role", granted);
        }
        Ok(())
    }

    async fn import(&self, data: SeedData) -> Result<SeedReport, SeedError> {
        let uploads = self.data_dir.join("uploads");
        let mut report = SeedReport::default();

        for category in data.categories {
            self.create(ContentType::Category, Value::Object(category), &mut report)
                .await;
        }

        for author in data.authors {
            let mut document = author.fields;
            if let Some(avatar) = author.avatar {
                let selection = resolve_files(self.media, &uploads, &[avatar]).await?;
                document.insert("avatar".into(), selection.into());
            }
            self.create(ContentType::Author, Value::Object(document), &mut report)
                .await;
        }

        for article in data.articles {
            let cover = format!("{}.jpg", article.slug);
            let cover = resolve_files(self.media, &uploads, &[cover]).await?;
            let blocks = resolve_blocks(self.media, &uploads, &article.blocks).await?;

            let mut document = article.fields;
            document.insert("slug".into(), Value::String(article.slug));
            document.insert("cover".into(), cover.into());
            document.insert("blocks".into(), serde_json::to_value(blocks)?);
            self.create(ContentType::Article, Value::Object(document), &mut report)
                .await;
        }

        if let Some(global) = data.global {
            let favicon = resolve_files(self.media, &uploads, &["favicon.png".into()]).await?;
            let share_image =
                resolve_files(self.media, &uploads, &["default-image.png".into()]).await?;

            let mut seo = global.default_seo;
            seo.insert("shareImage".into(), share_image.into());
            let mut document = global.fields;
            document.insert("favicon".into(), favicon.into());
            document.insert("defaultSeo".into(), Value::Object(seo));
            self.create(ContentType::Global, Value::Object(document), &mut report)
                .await;
        }

        if let Some(about) = data.about {
            let blocks = resolve_blocks(self.media, &uploads, &about.blocks).await?;
            let mut document = about.fields;
            document.insert("blocks".into(), serde_json::to_value(blocks)?);
            self.create(ContentType::About, Value::Object(document), &mut report)
                .await;
        }

        Ok(report)
    }

    async fn create(&self, content_type: ContentType, document: Value, report: &mut SeedReport) {
        match self.store.create_entry(content_type, document).await {
            Ok(id) => {
                tracing::debug!(%content_type, id, "Created seed entry");
                report.created += 1;
            }
            Err(source) => {
                let err = SeedError::Entry {
                    content_type,
                    source,
                };
                error!(error = %err, "Skipping seed entry");
                report.skipped += 1;
            }
        }
    }
}

/// Run the first-run import if enabled. Failures are logged; startup
/// continues either way.
pub async fn seed_on_startup(state: &AppState) {
    let config = &state.config.seed;
    if !config.enabled {
        info!("Seed import is disabled");
        return;
    }

    let store = DatabaseSeedStore::new(state.db.clone());
    let seeder = Seeder::new(
        &store,
        state.uploads.as_ref(),
        &config.data_dir,
        &state.config.environment,
    );

    match seeder.run().await {
        Ok(SeedOutcome::Seeded(report)) => info!(
            created = report.created,
            skipped = report.skipped,
            "Imported seed data"
        ),
        Ok(SeedOutcome::AlreadySeeded) => info!(
            "Seed data has already been imported. We cannot reimport unless you clear your database first."
        ),
        Ok(SeedOutcome::NoData) => {}
        Err(e) => error!(error = %e, "Could not import seed data"),
    }
}
