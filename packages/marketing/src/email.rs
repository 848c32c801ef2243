use std::sync::LazyLock;

use regex::Regex;

use crate::error::MarketingError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Check that an email is present and shaped like `local@domain.tld`.
pub fn validate_email(email: Option<&str>) -> Result<&str, MarketingError> {
    let email = email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| MarketingError::Validation("Email is required".into()))?;

    if !EMAIL_RE.is_match(email) {
        return Err(MarketingError::Validation("Email format is not valid".into()));
    }
    Ok(email)
}

/// Subscriber hash used to address audience members: MD5 of the lowercase email.
pub fn subscriber_hash(email: &str) -> String {
    format!("{:x}", md5::compute(email.to_lowercase()))
}
