//! Newsletter sign-up against the audience of a campaign.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::MarketingClient;
use crate::email::{subscriber_hash, validate_email};
use crate::error::MarketingError;

/// Audience member state as reported by the marketing API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Subscribed,
    Unsubscribed,
    Cleaned,
    Pending,
    Transactional,
    Archived,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub id: String,
    pub email_address: String,
    pub status: MemberStatus,
}

/// Outcome of a newsletter sign-up.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterReceipt {
    pub email: String,
    pub campaign_id: String,
    pub list_id: String,
    pub status: MemberStatus,
}

#[derive(Debug, Deserialize)]
struct Campaign {
    recipients: Recipients,
}

#[derive(Debug, Deserialize)]
struct Recipients {
    list_id: String,
}

const MEMBER_EXISTS: &str = "Member Exists";

impl MarketingClient {
    /// Subscribe `email` to the audience of the configured campaign.
    ///
    /// New addresses are added as `pending` (double opt-in). Addresses that
    /// are already members are moved to `subscribed`. Validation and config
    /// errors are raised before any request is sent.
    #[tracing::instrument(skip(self))]
    pub async fn send_newsletter(
        &self,
        email: Option<&str>,
    ) -> Result<NewsletterReceipt, MarketingError> {
        let email = validate_email(email)?;
        let campaign_id = self
            .config
            .campaign_id()
            .ok_or_else(|| MarketingError::Config("Mailchimp campaign ID is not configured".into()))?
            .to_string();

        let list_id = self.campaign_list_id(&campaign_id).await?;
        let member = self.add_member(&list_id, email).await?;

        tracing::info!(%campaign_id, %list_id, status = ?member.status, "Newsletter sign-up recorded");
        Ok(NewsletterReceipt {
            email: email.to_string(),
            campaign_id,
            list_id,
            status: member.status,
        })
    }

    /// Audience (list) id that a campaign sends to.
    pub async fn campaign_list_id(&self, campaign_id: &str) -> Result<String, MarketingError> {
        let (base, api_key) = self.api()?;
        let endpoint = format!("GET /campaigns/{campaign_id}");
        let request = self.http.get(format!("{base}/campaigns/{campaign_id}"));
        let campaign: Campaign = self.send_json(&endpoint, request, api_key).await?;
        Ok(campaign.recipients.list_id)
    }

    /// Add `email` to a list as pending, or mark an existing member subscribed.
    pub async fn add_member(&self, list_id: &str, email: &str) -> Result<Member, MarketingError> {
        let (base, api_key) = self.api()?;
        let endpoint = format!("POST /lists/{list_id}/members");
        let request = self
            .http
            .post(format!("{base}/lists/{list_id}/members"))
            .json(&json!({ "email_address": email, "status": "pending" }));

        match self.send_json::<Member>(&endpoint, request, api_key).await {
            Err(MarketingError::Upstream { status: 400, title, .. }) if title == MEMBER_EXISTS => {
                tracing::debug!(%list_id, "Address is already a member, updating status");
                self.update_member_status(list_id, email, MemberStatus::Subscribed)
                    .await
            }
            other => other,
        }
    }

    pub async fn update_member_status(
        &self,
        list_id: &str,
        email: &str,
        status: MemberStatus,
    ) -> Result<Member, MarketingError> {
        let (base, api_key) = self.api()?;
        let hash = subscriber_hash(email);
        let endpoint = format!("PATCH /lists/{list_id}/members/{hash}");
        let request = self
            .http
            .patch(format!("{base}/lists/{list_id}/members/{hash}"))
            .json(&json!({ "status": status }));
        self.send_json(&endpoint, request, api_key).await
    }
}
