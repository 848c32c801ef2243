//! Campaign listing.

use serde::{Deserialize, Serialize};

use crate::client::MarketingClient;
use crate::error::MarketingError;

/// Sort direction for campaign listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDir {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

/// Filters for [`MarketingClient::list_campaigns`]. Unset filters are not sent.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignQuery {
    pub count: u32,
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// e.g. `create_time` or `send_time`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_dir: Option<SortDir>,
}

impl Default for CampaignQuery {
    fn default() -> Self {
        Self {
            count: 10,
            offset: 0,
            status: None,
            kind: None,
            sort_field: None,
            sort_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CampaignRecipients {
    pub list_id: String,
    #[serde(default)]
    pub list_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CampaignSummary {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub send_time: Option<String>,
    #[serde(default)]
    pub recipients: Option<CampaignRecipients>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CampaignPage {
    #[serde(default)]
    pub campaigns: Vec<CampaignSummary>,
    #[serde(default)]
    pub total_items: u64,
}

impl MarketingClient {
    /// One page of the account's campaigns.
    #[tracing::instrument(skip(self))]
    pub async fn list_campaigns(&self, query: &CampaignQuery) -> Result<CampaignPage, MarketingError> {
        let (base, api_key) = self.api()?;
        let request = self.http.get(format!("{base}/campaigns")).query(query);
        let page: CampaignPage = self.send_json("GET /campaigns", request, api_key).await?;
        tracing::debug!(returned = page.campaigns.len(), total = page.total_items, "Listed campaigns");
        Ok(page)
    }
}
