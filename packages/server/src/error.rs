use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use marketing::MarketingError;
use sea_orm::DbErr;
use serde::Serialize;

use crate::upload::UploadError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `TOKEN_MISSING`,
    /// `TOKEN_INVALID`, `PERMISSION_DENIED`, `NOT_FOUND`, `CONFIG_ERROR`,
    /// `UPSTREAM_UNAUTHORIZED`, `UPSTREAM_ERROR`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Email format is not valid")]
    pub message: String,
    /// Detail reported by an upstream service, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    TokenMissing,
    TokenInvalid,
    PermissionDenied,
    NotFound(String),
    /// Server-side configuration is missing or invalid.
    Config(String),
    /// An upstream service rejected our credentials.
    UpstreamUnauthorized(String),
    Upstream {
        message: String,
        detail: String,
    },
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        let (status, code, message, error) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg, None),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_MISSING",
                "Authentication required".into(),
                None,
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_INVALID",
                "Invalid token".into(),
                None,
            ),
            AppError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                "PERMISSION_DENIED",
                "Insufficient permissions".into(),
                None,
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR", msg, None)
            }
            AppError::UpstreamUnauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UPSTREAM_UNAUTHORIZED", msg, None)
            }
            AppError::Upstream { message, detail } => {
                tracing::warn!(%detail, "Upstream error: {}", message);
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", message, Some(detail))
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".into(),
                    None,
                )
            }
        };
        (
            status,
            ErrorBody {
                code,
                message,
                error,
            },
        )
    }

    /// Map a marketing client failure, naming the operation in the message.
    pub fn from_marketing(operation: &str, err: MarketingError) -> Self {
        match err {
            MarketingError::Validation(msg) => AppError::Validation(msg),
            MarketingError::Config(msg) => AppError::Config(msg),
            MarketingError::Upstream { status: 401, .. } => AppError::UpstreamUnauthorized(
                "Authentication with the marketing service failed. Check the Mailchimp API key"
                    .into(),
            ),
            other => AppError::Upstream {
                message: format!("Failed to {operation}"),
                detail: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<MarketingError> for AppError {
    fn from(err: MarketingError) -> Self {
        AppError::from_marketing("reach the marketing service", err)
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::InvalidInput(msg) => AppError::Validation(msg),
            UploadError::TooLarge { .. }
            | UploadError::Storage(StorageError::SizeLimitExceeded { .. })
            | UploadError::Storage(StorageError::InvalidKey(_)) => {
                AppError::Validation(err.to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}
