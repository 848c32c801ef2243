use thiserror::Error;

/// Errors from the marketing client.
#[derive(Debug, Error)]
pub enum MarketingError {
    /// Bad or missing caller input. No request was sent.
    #[error("{0}")]
    Validation(String),

    /// Required configuration is missing or malformed. No request was sent.
    #[error("{0}")]
    Config(String),

    /// The remote service answered with a non-success status.
    #[error("{endpoint} returned {status}: {title}")]
    Upstream {
        endpoint: String,
        status: u16,
        title: String,
        detail: String,
    },

    /// The request could not be sent or the connection failed.
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote service answered with a body we could not decode.
    #[error("unexpected response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

impl MarketingError {
    /// Upstream HTTP status, when the remote service answered.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
