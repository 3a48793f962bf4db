// src/error.rs
// =============================================================================
// Typed errors for the two places where callers need to know *which* thing
// went wrong, not just that something did:
//
// - ConfigError: bad input, reported before any crawl starts
// - FetchError: a single page could not be fetched; mapped to a status code
//   and recorded on that page, the crawl keeps going
//
// Everything else in the application uses anyhow::Result.
// =============================================================================

use thiserror::Error;

// Input validation failures
//
// These are fatal: the run stops before a single request is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("startUrl is required")]
    MissingStartUrl,

    #[error("invalid startUrl '{url}': {reason}")]
    InvalidStartUrl { url: String, reason: String },
}

// Why a page fetch failed
//
// The variants follow the network failure kinds we can tell apart.
// status_code() turns each one into the status recorded on the page result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("could not resolve host: {0}")]
    Dns(String),

    #[error("connection refused: {0}")]
    ConnectionRefused(String),

    #[error("request timed out")]
    Timeout,

    #[error("connection reset: {0}")]
    ConnectionReset(String),

    /// The server answered, but with a status we don't analyze (>= 500)
    #[error("HTTP {0}")]
    Status(u16),

    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Status code recorded on the error page result
    pub fn status_code(&self) -> u16 {
        match self {
            FetchError::Dns(_) | FetchError::ConnectionRefused(_) => 404,
            FetchError::Timeout => 408,
            FetchError::ConnectionReset(_) => 503,
            FetchError::Status(code) => *code,
            FetchError::Other(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(FetchError::Dns("nope.invalid".into()).status_code(), 404);
        assert_eq!(FetchError::ConnectionRefused("x".into()).status_code(), 404);
        assert_eq!(FetchError::Timeout.status_code(), 408);
        assert_eq!(FetchError::ConnectionReset("x".into()).status_code(), 503);
        assert_eq!(FetchError::Status(502).status_code(), 502);
        assert_eq!(FetchError::Other("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(ConfigError::MissingStartUrl.to_string(), "startUrl is required");
        let err = ConfigError::InvalidStartUrl {
            url: "nope".into(),
            reason: "relative URL without a base".into(),
        };
        assert!(err.to_string().contains("'nope'"));
    }
}
