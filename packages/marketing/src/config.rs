use serde::Deserialize;

/// Hosted subscription form that receives contact requests.
pub const DEFAULT_CONTACT_FORM_URL: &str = "https://antpack.us19.list-manage.com/subscribe/post?u=1f207d6d7e9745dca48c572fd&id=981ba743b6&f_id=00f2c2e1f0";

/// Hosted subscription form that receives interest registrations.
pub const DEFAULT_INTEREST_FORM_URL: &str = "https://antpack.us19.list-manage.com/subscribe/post?u=1f207d6d7e9745dca48c572fd&id=981ba743b6&f_id=00f1c2e1f0";

/// Mailchimp settings.
#[derive(Debug, Deserialize, Clone)]
pub struct MarketingConfig {
    /// Marketing API key, `{key}-{datacenter}` (e.g. `abc123-us19`).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Campaign whose audience receives newsletter sign-ups.
    #[serde(default)]
    pub campaign_id: Option<String>,
    /// Overrides `https://{datacenter}.api.mailchimp.com/3.0`.
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default = "default_contact_form_url")]
    pub contact_form_url: String,
    #[serde(default = "default_interest_form_url")]
    pub interest_form_url: String,
    /// Request timeout for outbound calls. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_contact_form_url() -> String {
    DEFAULT_CONTACT_FORM_URL.into()
}
fn default_interest_form_url() -> String {
    DEFAULT_INTEREST_FORM_URL.into()
}

impl Default for MarketingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            campaign_id: None,
            api_base_url: None,
            contact_form_url: default_contact_form_url(),
            interest_form_url: default_interest_form_url(),
            timeout_secs: None,
        }
    }
}

impl MarketingConfig {
    /// The configured campaign id, ignoring blank values.
    pub fn campaign_id(&self) -> Option<&str> {
        self.campaign_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Base URL of the marketing API, derived from the API key's datacenter
    /// suffix unless overridden.
    pub fn api_base_url(&self) -> Option<String> {
        if let Some(url) = self.api_base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Some(url.trim().trim_end_matches('/').to_string());
        }
        let datacenter = self.api_key.as_deref()?.rsplit_once('-')?.1;
        if datacenter.is_empty() {
            return None;
        }
        Some(format!("https://{datacenter}.api.mailchimp.com/3.0"))
    }
}
