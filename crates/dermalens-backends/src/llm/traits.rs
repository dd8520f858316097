//! The provider capability contract and shared status interpretation.

use async_trait::async_trait;
use dermalens_core::error::ProviderError;
use dermalens_core::types::config::{ProviderConfig, ProviderKind};

/// Capability contract every backend provider satisfies.
///
/// Instances start uninitialized: both the stored config and the backend
/// client handle are absent until [`initialize`](AiProvider::initialize)
/// succeeds. A failed `initialize` leaves the instance uninitialized; a
/// configured instance serves unlimited calls and has no teardown.
///
/// One [`generate_response`](AiProvider::generate_response) call issues
/// exactly one outbound request. The layer never retries and sets no
/// timeout; callers wrap calls externally when they need either.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Store the configuration and construct the backend client handle.
    ///
    /// Fails with [`ProviderError::Configuration`] when required fields are
    /// absent or the config targets a different backend.
    async fn initialize(&mut self, config: ProviderConfig) -> Result<(), ProviderError>;

    /// Issue one inference request and return the normalized answer text.
    ///
    /// Fails with [`ProviderError::Configuration`] when called before
    /// `initialize`.
    async fn generate_response(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Display name of this provider.
    fn name(&self) -> &'static str;

    /// Backend kind this provider wraps.
    fn kind(&self) -> ProviderKind;

    /// True iff both config and client handle are present.
    fn is_configured(&self) -> bool;
}

/// Map a non-success HTTP status onto the uniform error taxonomy.
///
/// 429 becomes [`ProviderError::RateLimited`] (carrying the retry hint when
/// one was supplied), 401 becomes [`ProviderError::Authentication`], and
/// anything else becomes [`ProviderError::Backend`] with the status and raw
/// body.
pub(crate) fn classify_status(
    provider: &str,
    status: u16,
    retry_after: Option<u64>,
    body: String,
) -> ProviderError {
    match status {
        429 => ProviderError::RateLimited {
            provider: provider.to_string(),
            retry_after,
        },
        401 => ProviderError::Authentication {
            provider: provider.to_string(),
        },
        _ => ProviderError::Backend {
            provider: provider.to_string(),
            status,
            body,
        },
    }
}

/// Check a response's status, consuming it into an error for non-success.
///
/// Returns the response untouched on success so the caller can read the
/// body. Transport failures while draining the error body fall back to a
/// placeholder body text.
pub(crate) async fn check_status(
    provider: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(classify_status(provider, status.as_u16(), retry_after, body))
}

/// Parse a successful response body as JSON, or surface it as a format error.
pub(crate) async fn read_json_body(
    provider: &str,
    response: reqwest::Response,
) -> Result<serde_json::Value, ProviderError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|_| ProviderError::ResponseFormat {
        provider: provider.to_string(),
        raw: serde_json::Value::String(text),
    })
}
