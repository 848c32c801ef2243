use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::state::AppState;

/// Caller holding the admin token from `auth.admin_token`, presented as
/// `Authorization: Bearer <token>`.
///
/// Add this as a handler parameter to require admin access.
pub struct AdminToken;

impl FromRequestParts<AppState> for AdminToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenInvalid)?;

        // No configured token means the admin endpoints are closed.
        let expected = state
            .config
            .auth
            .admin_token
            .as_deref()
            .ok_or(AppError::PermissionDenied)?;

        if token.trim() != expected {
            return Err(AppError::TokenInvalid);
        }
        Ok(AdminToken)
    }
}
