//! Error taxonomy for the provider and storage layers.
//!
//! Every failure a provider can surface maps onto exactly one
//! [`ProviderError`] variant, so callers can match on the kind instead of
//! parsing message strings. Persistence failures use the separate
//! [`StoreError`] so they never abort a completed inference call.

use thiserror::Error;

/// Errors surfaced by backend providers and the provider factory.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Missing or invalid configuration: blank fields, unknown backend id,
    /// wrong config variant, or use before `initialize`.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// The backend rejected the credentials (HTTP 401).
    #[error("Invalid credentials for {provider}")]
    Authentication {
        /// Backend that rejected the request.
        provider: String,
    },

    /// The backend rate-limited the request (HTTP 429).
    #[error(
        "{provider} rate limited{hint}",
        hint = Self::retry_suffix(.retry_after)
    )]
    RateLimited {
        /// Backend that throttled the request.
        provider: String,
        /// Retry hint in seconds, when the backend supplied one.
        retry_after: Option<u64>,
    },

    /// Any other non-success status from the backend.
    #[error("{provider} API error (status {status}): {body}")]
    Backend {
        /// Backend that failed.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// Success status, but no answer text could be extracted.
    #[error("Invalid response format from {provider}")]
    ResponseFormat {
        /// Backend whose response could not be normalized.
        provider: String,
        /// Full raw response, kept for diagnostics.
        raw: serde_json::Value,
    },

    /// Transport-level failure: no response was received at all.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ProviderError {
    /// Shorthand for a [`ProviderError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        ProviderError::Configuration {
            message: message.into(),
        }
    }

    fn retry_suffix(retry_after: &Option<u64>) -> String {
        match retry_after {
            Some(secs) => format!(", retry after {secs}s"),
            None => String::new(),
        }
    }
}

/// Errors surfaced by analysis result stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The remote store returned a non-success status.
    #[error("Remote store error (status {status}): {body}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// Filesystem failure in the file-backed store.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record (de)serialization failure.
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport-level failure reaching the remote store.
    #[error("Store transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_display_with_hint() {
        let err = ProviderError::RateLimited {
            provider: "Claude".to_string(),
            retry_after: Some(30),
        };
        let display = format!("{err}");
        assert!(display.contains("rate limited"));
        assert!(display.contains("retry after 30s"));
    }

    #[test]
    fn test_rate_limited_display_without_hint() {
        let err = ProviderError::RateLimited {
            provider: "Groq".to_string(),
            retry_after: None,
        };
        assert_eq!(format!("{err}"), "Groq rate limited");
    }

    #[test]
    fn test_backend_display_carries_status_and_body() {
        let err = ProviderError::Backend {
            provider: "Qwen".to_string(),
            status: 500,
            body: "internal error".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("500"));
        assert!(display.contains("internal error"));
    }

    #[test]
    fn test_response_format_keeps_raw_payload() {
        let raw = serde_json::json!({ "unexpected": { "shape": [1, 2, 3] } });
        let err = ProviderError::ResponseFormat {
            provider: "Azure OpenAI".to_string(),
            raw: raw.clone(),
        };
        match err {
            ProviderError::ResponseFormat { raw: kept, .. } => assert_eq!(kept, raw),
            _ => panic!("expected ResponseFormat"),
        }
    }
}
