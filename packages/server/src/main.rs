use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;

use cms_server::config::{AppConfig, StorageProvider, mask_secret};
use cms_server::database::init_db;
use cms_server::seed::{ensure_default_roles, seed_on_startup};
use cms_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(environment = %config.environment, "Configuration loaded");
    log_storage(&config);

    let db = init_db(&config.database.url)
        .await
        .context("Failed to connect to the database")?;
    ensure_default_roles(&db)
        .await
        .context("Failed to create default roles")?;

    let state = AppState::new(config, db).await?;
    seed_on_startup(&state).await;

    let addr: SocketAddr = format!("{}:{}", state.config.server.host, state.config.server.port)
        .parse()
        .context("Invalid server.host or server.port")?;
    let app = cms_server::build_router(state);

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn log_storage(config: &AppConfig) {
    let storage = &config.storage;
    match storage.provider {
        StorageProvider::Local => info!(
            root = %storage.local.root.display(),
            public_path = %storage.local.public_path,
            "Using local upload storage"
        ),
        StorageProvider::S3 => {
            let s3 = &storage.s3;
            info!(
                bucket = s3.bucket.as_deref().unwrap_or_default(),
                region = s3.region.as_deref().unwrap_or_default(),
                access_key_id = %s3.access_key_id.as_deref().map(mask_secret).unwrap_or_default(),
                "Using S3 upload storage"
            );
        }
    }
    match storage.cdn.as_deref() {
        Some(cdn) => info!(cdn, "Media URLs point at the CDN"),
        None => info!("No CDN configured, media URLs are served as stored"),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
