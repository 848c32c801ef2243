use axum::Json;
use axum::extract::State;
use marketing::{ContactForm, InterestForm};
use tracing::instrument;

use crate::entity::permission;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::marketing::*;
use crate::state::AppState;
use crate::utils::permission::require_public_permission;

#[utoipa::path(
    post,
    path = "/send-newsletter",
    tag = "Marketing",
    operation_id = "sendNewsletter",
    summary = "Subscribe an address to the newsletter audience",
    description = "Adds the email to the audience of the configured campaign as `pending`, so \
        Mailchimp sends its confirmation email. An address that is already a member is set \
        back to `subscribed`.",
    request_body = NewsletterRequest,
    responses(
        (status = 200, description = "Subscription sent", body = NewsletterResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Mailchimp rejected the API key (UPSTREAM_UNAUTHORIZED)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Campaign not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Campaign or API key not configured (CONFIG_ERROR)", body = ErrorBody),
        (status = 502, description = "Mailchimp request failed (UPSTREAM_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn send_newsletter(
    State(state): State<AppState>,
    AppJson(payload): AppJson<NewsletterRequest>,
) -> Result<Json<NewsletterResponse>, AppError> {
    require_public_permission(&state.db, &permission::action("marketing", "sendNewsletter"))
        .await?;

    let receipt = state
        .marketing
        .send_newsletter(payload.email.as_deref())
        .await
        .map_err(|e| match e.upstream_status() {
            Some(404) => AppError::NotFound(format!("Campaign not found: {e}")),
            _ => AppError::from_marketing("send newsletter", e),
        })?;

    Ok(Json(NewsletterResponse {
        success: true,
        message: "Newsletter sent successfully".into(),
        data: receipt.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/contact",
    tag = "Marketing",
    operation_id = "submitContactForm",
    summary = "Forward a contact request to the hosted contact form",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Form accepted", body = ContactResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 502, description = "Form endpoint rejected the submission (UPSTREAM_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn contact(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ContactRequest>,
) -> Result<Json<ContactResponse>, AppError> {
    require_public_permission(&state.db, &permission::action("marketing", "contact")).await?;

    let form = ContactForm {
        email: payload.email,
        name: payload.name,
        phone: payload.phone,
        description: payload.description,
    };
    let result = state
        .marketing
        .submit_contact(&form)
        .await
        .map_err(|e| AppError::from_marketing("submit contact form", e))?;

    Ok(Json(ContactResponse {
        success: true,
        message: "Contact form submitted successfully".into(),
        data: ContactData {
            email: form.email.unwrap_or_default().trim().to_string(),
            name: form.name,
            phone: form.phone,
            result: result.into(),
        },
    }))
}

#[utoipa::path(
    post,
    path = "/interest",
    tag = "Marketing",
    operation_id = "submitInterestForm",
    summary = "Forward an expression of interest to the hosted interest form",
    request_body = InterestRequest,
    responses(
        (status = 200, description = "Form accepted", body = InterestResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 502, description = "Form endpoint rejected the submission (UPSTREAM_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn interest(
    State(state): State<AppState>,
    AppJson(payload): AppJson<InterestRequest>,
) -> Result<Json<InterestResponse>, AppError> {
    require_public_permission(&state.db, &permission::action("marketing", "interest")).await?;

    let form = InterestForm {
        email: payload.email,
        country: payload.country,
        description: payload.description,
    };
    let result = state
        .marketing
        .submit_interest(&form)
        .await
        .map_err(|e| AppError::from_marketing("submit interest form", e))?;

    Ok(Json(InterestResponse {
        success: true,
        message: "Interest form submitted successfully".into(),
        data: InterestData {
            email: form.email.unwrap_or_default().trim().to_string(),
            country: form.country,
            result: result.into(),
        },
    }))
}
