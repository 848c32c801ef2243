pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod security;
pub mod seed;
pub mod state;
pub mod upload;
pub mod utils;

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{AppConfig, StorageProvider};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CMS API",
        version = "1.0.0",
        description = "Content, media and marketing API for the blog"
    ),
    tags(
        (name = "Content", description = "Published categories, authors, articles and pages"),
        (name = "Upload", description = "Media library uploads"),
        (name = "Marketing", description = "Newsletter and form forwarding to Mailchimp"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "admin_token",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let cors = &config.server.cors;
    let origins = if cors.allow_origins.is_empty() || cors.allow_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            cors.allow_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(cors.max_age))
}

fn csp_layer(config: &AppConfig) -> Option<SetResponseHeaderLayer<HeaderValue>> {
    match HeaderValue::from_str(&security::content_security_policy(config)) {
        Ok(value) => Some(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("content-security-policy"),
            value,
        )),
        Err(e) => {
            tracing::warn!("Content-Security-Policy not applied: {}", e);
            None
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let config = state.config.clone();
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes(&config))
        .split_for_parts();

    let mut router = router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api));

    if config.storage.provider == StorageProvider::Local {
        let local = &config.storage.local;
        router = router.nest_service(&local.public_path, ServeDir::new(&local.root));
    }

    if let Some(csp) = csp_layer(&config) {
        router = router.layer(csp);
    }
    router
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http())
}
