use std::time::Duration;

use reqwest::redirect;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::MarketingConfig;
use crate::error::MarketingError;

/// HTTP client for the marketing API and the hosted subscription forms.
///
/// Redirects are never followed: the hosted forms answer a successful post
/// with a redirect to a thank-you page, which counts as success.
#[derive(Debug, Clone)]
pub struct MarketingClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: MarketingConfig,
}

/// Problem document returned by the marketing API on errors.
#[derive(Debug, Default, Deserialize)]
struct ProblemDetail {
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: String,
}

impl MarketingClient {
    pub fn new(config: MarketingConfig) -> Result<Self, MarketingError> {
        let mut builder = reqwest::Client::builder().redirect(redirect::Policy::none());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| MarketingError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &MarketingConfig {
        &self.config
    }

    /// Base URL and API key, or a config error when either is missing.
    pub(crate) fn api(&self) -> Result<(String, &str), MarketingError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| MarketingError::Config("Mailchimp API key is not configured".into()))?;
        let base = self.config.api_base_url().ok_or_else(|| {
            MarketingError::Config("Mailchimp API key has no datacenter suffix".into())
        })?;
        Ok((base, api_key))
    }

    /// Send an authenticated API request and decode a JSON response.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
        api_key: &str,
    ) -> Result<T, MarketingError> {
        let response = request
            .basic_auth("anystring", Some(api_key))
            .send()
            .await
            .map_err(|source| MarketingError::Http {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let problem: ProblemDetail = serde_json::from_str(&body).unwrap_or_default();
            let title = if problem.title.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                problem.title
            };
            return Err(MarketingError::Upstream {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                title,
                detail: if problem.detail.is_empty() { body } else { problem.detail },
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| MarketingError::Deserialization {
                endpoint: endpoint.to_string(),
                source,
            })
    }
}
