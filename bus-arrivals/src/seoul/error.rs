//! Arrival feed error types.

use std::fmt;

/// Errors from fetching or decoding the arrival feed.
#[derive(Debug)]
pub enum ArrivalFeedError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// XML deserialization failed
    Xml {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status or result code
    Api { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,

    /// Service key missing, unregistered or expired
    Unauthorized,

    /// Client configuration is unusable
    NotConfigured(String),

    /// Mock data could not be read
    MockData(String),
}

impl ArrivalFeedError {
    /// Whether retrying with other routes can possibly help.
    ///
    /// Credential and configuration problems affect every route equally,
    /// so they end the run instead of being treated as an empty route.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ArrivalFeedError::Unauthorized | ArrivalFeedError::NotConfigured(_)
        )
    }
}

impl fmt::Display for ArrivalFeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrivalFeedError::Http(e) => write!(f, "HTTP error: {e}"),
            ArrivalFeedError::Xml { message, body } => {
                write!(f, "XML parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            ArrivalFeedError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            ArrivalFeedError::RateLimited => write!(f, "rate limited by arrival feed"),
            ArrivalFeedError::Unauthorized => {
                write!(f, "unauthorized (check SERVICE_KEY)")
            }
            ArrivalFeedError::NotConfigured(msg) => write!(f, "not configured: {msg}"),
            ArrivalFeedError::MockData(msg) => write!(f, "mock data error: {msg}"),
        }
    }
}

impl std::error::Error for ArrivalFeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArrivalFeedError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ArrivalFeedError {
    fn from(err: reqwest::Error) -> Self {
        ArrivalFeedError::Http(err)
    }
}
