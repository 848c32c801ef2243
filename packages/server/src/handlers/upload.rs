use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminToken;
use crate::models::file::{FileListResponse, FileRecord};
use crate::models::shared::PageQuery;
use crate::state::AppState;
use crate::upload::{FileInfo, UploadFile, UploadRequest};

/// Multipart overhead allowed on top of the per-file limit.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn upload_body_limit(max_file_size: u64) -> DefaultBodyLimit {
    let limit = usize::try_from(max_file_size).unwrap_or(usize::MAX);
    DefaultBodyLimit::max(limit.saturating_add(MULTIPART_OVERHEAD))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Upload",
    operation_id = "uploadFiles",
    summary = "Upload media files",
    description = "Stores every `files` part in the configured object store and registers it in \
        the media library. Optional `name`, `alternativeText` and `caption` fields apply to \
        every file of the request; `path` sets the folder. Returned URLs point at the CDN when \
        one is configured.",
    request_body(content_type = "multipart/form-data", description = "One or more `files` parts with optional metadata"),
    responses(
        (status = 201, description = "Files stored", body = Vec<FileRecord>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Admin access is not configured (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("admin_token" = [])),
)]
#[instrument(skip(state, _admin, multipart))]
pub async fn upload_files(
    _admin: AdminToken,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut request = UploadRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "files" => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;
                let mime = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read {file_name}: {e}")))?;
                request.files.push(UploadFile {
                    file_name,
                    mime,
                    data: data.to_vec(),
                });
            }
            "name" | "alternativeText" | "caption" | "path" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))?;
                let value = Some(text).filter(|t| !t.trim().is_empty());
                match name.as_str() {
                    "name" => request.info.name = value,
                    "alternativeText" => request.info.alternative_text = value,
                    "caption" => request.info.caption = value,
                    _ => request.folder_path = value,
                }
            }
            _ => {}
        }
    }

    let records = state.uploads.upload(request).await?;
    Ok((StatusCode::CREATED, Json(records)))
}

#[utoipa::path(
    get,
    path = "/files",
    tag = "Upload",
    operation_id = "listFiles",
    summary = "List registered media files",
    params(PageQuery),
    responses(
        (status = 200, description = "Files, oldest first", body = FileListResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("admin_token" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn list_files(
    _admin: AdminToken,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<FileListResponse>, AppError> {
    let (page, page_size) = query.resolve()?;
    let (files, total) = state.uploads.list(page, page_size).await?;

    Ok(Json(FileListResponse {
        files: files
            .into_iter()
            .map(|f| f.rewritten(&state.urls))
            .collect(),
        total,
    }))
}

#[utoipa::path(
    get,
    path = "/files/{id}",
    tag = "Upload",
    operation_id = "getFile",
    summary = "Get a media file",
    params(("id" = i32, Path, description = "File ID")),
    responses(
        (status = 200, description = "File", body = FileRecord),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "File not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("admin_token" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn get_file(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FileRecord>, AppError> {
    let file = state
        .uploads
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("File {id} not found")))?;
    Ok(Json(file.rewritten(&state.urls)))
}
