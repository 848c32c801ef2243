//! Client for the Mailchimp marketing API and hosted subscription forms.
//!
//! ```ignore
//! let client = MarketingClient::new(config)?;
//! let receipt = client.send_newsletter(Some("jane@example.com")).await?;
//! ```

pub mod audience;
pub mod campaigns;
pub mod client;
pub mod config;
pub mod email;
pub mod error;
pub mod forms;

pub use audience::{Member, MemberStatus, NewsletterReceipt};
pub use campaigns::{CampaignPage, CampaignQuery, CampaignSummary, SortDir};
pub use client::MarketingClient;
pub use config::MarketingConfig;
pub use email::{subscriber_hash, validate_email};
pub use error::MarketingError;
pub use forms::{ContactForm, FormSubmission, InterestForm};
