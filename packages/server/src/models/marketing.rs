use serde::{Deserialize, Serialize};

use marketing::{FormSubmission, NewsletterReceipt};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewsletterRequest {
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ContactRequest {
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    #[schema(example = "+57 300 000 0000")]
    pub phone: Option<String>,
    #[schema(example = "I would like a demo")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct InterestRequest {
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    #[schema(example = "Colombia")]
    pub country: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterData {
    pub email: String,
    #[schema(example = "b1c2d3e4f5")]
    pub campaign_id: String,
    #[schema(example = "a1b2c3d4e5")]
    pub list_id: String,
}

impl From<NewsletterReceipt> for NewsletterData {
    fn from(receipt: NewsletterReceipt) -> Self {
        Self {
            email: receipt.email,
            campaign_id: receipt.campaign_id,
            list_id: receipt.list_id,
        }
    }
}

/// Outcome of posting a hosted subscription form.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FormResult {
    pub success: bool,
    pub message: String,
    /// Status returned by the form endpoint (2xx or 3xx).
    #[schema(example = 302)]
    pub status: u16,
    pub url: String,
}

impl From<FormSubmission> for FormResult {
    fn from(s: FormSubmission) -> Self {
        Self {
            success: s.success,
            message: s.message,
            status: s.status,
            url: s.url,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ContactData {
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub result: FormResult,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct InterestData {
    pub email: String,
    pub country: Option<String>,
    pub result: FormResult,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct NewsletterResponse {
    pub success: bool,
    #[schema(example = "Newsletter subscription sent")]
    pub message: String,
    pub data: NewsletterData,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub data: ContactData,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct InterestResponse {
    pub success: bool,
    pub message: String,
    pub data: InterestData,
}
