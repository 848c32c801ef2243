use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/marketing", marketing_routes())
        .nest("/upload", upload_routes(config))
        .merge(content_routes())
}

fn marketing_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::marketing::send_newsletter))
        .routes(routes!(handlers::marketing::contact))
        .routes(routes!(handlers::marketing::interest))
}

fn upload_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::upload::upload_files))
        .routes(routes!(handlers::upload::list_files))
        .routes(routes!(handlers::upload::get_file))
        .layer(handlers::upload::upload_body_limit(
            config.storage.max_file_size,
        ))
}

fn content_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::content::list_categories))
        .routes(routes!(handlers::content::get_category))
        .routes(routes!(handlers::content::list_authors))
        .routes(routes!(handlers::content::get_author))
        .routes(routes!(handlers::content::list_articles))
        .routes(routes!(handlers::content::get_article))
        .routes(routes!(handlers::content::get_global))
        .routes(routes!(handlers::content::get_about))
}
