//! Submissions to the hosted subscription forms.

use serde::Serialize;
use url::Url;

use crate::client::MarketingClient;
use crate::email::validate_email;
use crate::error::MarketingError;

/// A contact request.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

/// An interest registration.
#[derive(Debug, Clone, Default)]
pub struct InterestForm {
    pub email: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
}

/// Result of posting a hosted form.
#[derive(Debug, Clone, Serialize)]
pub struct FormSubmission {
    pub success: bool,
    pub message: String,
    pub status: u16,
    pub url: String,
}

/// Tag the interest form applies to new registrations.
const INTEREST_TAG: &str = "133";

impl ContactForm {
    fn fields(&self, email: &str) -> Vec<(String, String)> {
        vec![
            ("EMAIL".into(), email.to_string()),
            ("FNAME".into(), self.name.clone().unwrap_or_default()),
            ("PHONE".into(), self.phone.clone().unwrap_or_default()),
            ("DESCRIPT".into(), self.description.clone().unwrap_or_default()),
            ("subscribe".into(), "Subscribe".into()),
        ]
    }
}

impl InterestForm {
    fn fields(&self, email: &str) -> Vec<(String, String)> {
        vec![
            ("EMAIL".into(), email.to_string()),
            ("COUNTRY".into(), self.country.clone().unwrap_or_default()),
            ("DESCRIPT".into(), self.description.clone().unwrap_or_default()),
            ("tags".into(), INTEREST_TAG.into()),
        ]
    }
}

/// Name of the anti-bot field the hosted form expects to be present and
/// empty: `b_{u}_{id}` from the form URL's query.
pub fn honeypot_field(form_url: &Url) -> Option<String> {
    let mut u = None;
    let mut id = None;
    for (key, value) in form_url.query_pairs() {
        match key.as_ref() {
            "u" => u = Some(value.into_owned()),
            "id" => id = Some(value.into_owned()),
            _ => {}
        }
    }
    Some(format!("b_{}_{}", u?, id?))
}

impl MarketingClient {
    #[tracing::instrument(skip_all)]
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<FormSubmission, MarketingError> {
        let email = validate_email(form.email.as_deref())?;
        let url = self.config.contact_form_url.clone();
        self.post_form(&url, form.fields(email), "Contact form submitted")
            .await
    }

    #[tracing::instrument(skip_all)]
    pub async fn submit_interest(
        &self,
        form: &InterestForm,
    ) -> Result<FormSubmission, MarketingError> {
        let email = validate_email(form.email.as_deref())?;
        let url = self.config.interest_form_url.clone();
        self.post_form(&url, form.fields(email), "Interest form submitted")
            .await
    }

    async fn post_form(
        &self,
        form_url: &str,
        mut fields: Vec<(String, String)>,
        success_message: &str,
    ) -> Result<FormSubmission, MarketingError> {
        let parsed = Url::parse(form_url)
            .map_err(|e| MarketingError::Config(format!("invalid form URL {form_url}: {e}")))?;
        if let Some(honeypot) = honeypot_field(&parsed) {
            fields.push((honeypot, String::new()));
        }

        let endpoint = format!("POST {}", parsed.path());
        let response = self
            .http
            .post(parsed)
            .form(&fields)
            .send()
            .await
            .map_err(|source| MarketingError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if status.is_success() || status.is_redirection() {
            tracing::info!(status = status.as_u16(), "{success_message}");
            return Ok(FormSubmission {
                success: true,
                message: success_message.to_string(),
                status: status.as_u16(),
                url: form_url.to_string(),
            });
        }

        let detail = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "Hosted form rejected submission");
        Err(MarketingError::Upstream {
            endpoint,
            status: status.as_u16(),
            title: status.canonical_reason().unwrap_or_default().to_string(),
            detail,
        })
    }
}
