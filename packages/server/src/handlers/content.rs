use axum::Json;
use axum::extract::{Path, Query, State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::entry::{self, ContentType};
use crate::entity::permission;
use crate::error::{AppError, ErrorBody};
use crate::models::content::{EntryEnvelope, EntryListResponse, EntryResponse};
use crate::models::shared::{PageQuery, Pagination};
use crate::state::AppState;
use crate::utils::media::rewrite_media_urls;
use crate::utils::permission::require_public_permission;

fn present(state: &AppState, model: entry::Model) -> EntryResponse {
    let mut response = EntryResponse::from(model);
    rewrite_media_urls(&state.urls, &mut response.document);
    response
}

async fn find_entries(
    state: &AppState,
    content_type: ContentType,
    query: &PageQuery,
) -> Result<EntryListResponse, AppError> {
    require_public_permission(&state.db, &permission::action(content_type.as_str(), "find"))
        .await?;
    let (page, page_size) = query.resolve()?;

    let paginator = entry::Entity::find()
        .filter(entry::Column::ContentType.eq(content_type.as_str()))
        .order_by_asc(entry::Column::Id)
        .paginate(&state.db, page_size);
    let total = paginator.num_items().await?;
    let data = paginator
        .fetch_page(page - 1)
        .await?
        .into_iter()
        .map(|model| present(state, model))
        .collect();

    Ok(EntryListResponse {
        data,
        pagination: Pagination::new(page, page_size, total),
    })
}

async fn find_entry(
    state: &AppState,
    content_type: ContentType,
    id: i32,
) -> Result<EntryEnvelope, AppError> {
    require_public_permission(&state.db, &permission::action(content_type.as_str(), "findOne"))
        .await?;

    let model = entry::Entity::find_by_id(id)
        .filter(entry::Column::ContentType.eq(content_type.as_str()))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{content_type} {id} not found")))?;

    Ok(EntryEnvelope {
        data: present(state, model),
    })
}

async fn find_single(state: &AppState, content_type: ContentType) -> Result<EntryEnvelope, AppError> {
    require_public_permission(&state.db, &permission::action(content_type.as_str(), "find"))
        .await?;

    let model = entry::Entity::find()
        .filter(entry::Column::ContentType.eq(content_type.as_str()))
        .order_by_asc(entry::Column::Id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{content_type} has no content yet")))?;

    Ok(EntryEnvelope {
        data: present(state, model),
    })
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "Content",
    operation_id = "listCategories",
    summary = "List categories",
    params(PageQuery),
    responses(
        (status = 200, description = "Categories", body = EntryListResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<EntryListResponse>, AppError> {
    Ok(Json(find_entries(&state, ContentType::Category, &query).await?))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "Content",
    operation_id = "getCategory",
    summary = "Get a category",
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Category", body = EntryEnvelope),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EntryEnvelope>, AppError> {
    Ok(Json(find_entry(&state, ContentType::Category, id).await?))
}

#[utoipa::path(
    get,
    path = "/authors",
    tag = "Content",
    operation_id = "listAuthors",
    summary = "List authors",
    params(PageQuery),
    responses(
        (status = 200, description = "Authors", body = EntryListResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_authors(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<EntryListResponse>, AppError> {
    Ok(Json(find_entries(&state, ContentType::Author, &query).await?))
}

#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "Content",
    operation_id = "getAuthor",
    summary = "Get an author",
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Author", body = EntryEnvelope),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EntryEnvelope>, AppError> {
    Ok(Json(find_entry(&state, ContentType::Author, id).await?))
}

#[utoipa::path(
    get,
    path = "/articles",
    tag = "Content",
    operation_id = "listArticles",
    summary = "List articles",
    description = "Articles in creation order. Cover images and media blocks carry CDN URLs.",
    params(PageQuery),
    responses(
        (status = 200, description = "Articles", body = EntryListResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<EntryListResponse>, AppError> {
    Ok(Json(find_entries(&state, ContentType::Article, &query).await?))
}

#[utoipa::path(
    get,
    path = "/articles/{id}",
    tag = "Content",
    operation_id = "getArticle",
    summary = "Get an article",
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Article", body = EntryEnvelope),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EntryEnvelope>, AppError> {
    Ok(Json(find_entry(&state, ContentType::Article, id).await?))
}

#[utoipa::path(
    get,
    path = "/global",
    tag = "Content",
    operation_id = "getGlobal",
    summary = "Get site-wide settings",
    responses(
        (status = 200, description = "Global settings", body = EntryEnvelope),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not created yet (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_global(State(state): State<AppState>) -> Result<Json<EntryEnvelope>, AppError> {
    Ok(Json(find_single(&state, ContentType::Global).await?))
}

#[utoipa::path(
    get,
    path = "/about",
    tag = "Content",
    operation_id = "getAbout",
    summary = "Get the about page",
    responses(
        (status = 200, description = "About page", body = EntryEnvelope),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not created yet (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_about(State(state): State<AppState>) -> Result<Json<EntryEnvelope>, AppError> {
    Ok(Json(find_single(&state, ContentType::About).await?))
}
