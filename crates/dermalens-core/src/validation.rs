//! Provider configuration validation.
//!
//! [`validate`] is pure and total: every rule is evaluated independently and
//! every violation is collected, so a caller sees all missing fields at
//! once rather than one per attempt.

use crate::types::config::ProviderConfig;
use serde::{Deserialize, Serialize};
use url::Url;

/// Outcome of validating a [`ProviderConfig`].
///
/// `valid` is true iff `errors` is empty; the only constructor enforces it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Build a report from collected violations.
    pub fn from_errors(errors: Vec<String>) -> Self {
        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// Validate a provider configuration against its backend-specific rules.
pub fn validate(config: &ProviderConfig) -> ValidationReport {
    let mut errors = Vec::new();

    if is_blank(config.api_key()) {
        errors.push("API Key is required".to_string());
    }

    match config {
        ProviderConfig::AzureOpenAi {
            endpoint,
            deployment,
            ..
        } => {
            if is_blank(endpoint) {
                errors.push("Endpoint is required for Azure OpenAI".to_string());
            } else if !is_valid_url(endpoint) {
                errors.push("Endpoint must be a valid URL".to_string());
            }
            if is_blank(deployment) {
                errors.push("Deployment name is required for Azure OpenAI".to_string());
            }
        }
        ProviderConfig::GoogleGemini { model, .. } => {
            if is_blank(model) {
                errors.push("Model is required for Google Gemini".to_string());
            }
        }
        ProviderConfig::Groq { model, .. } => {
            if is_blank(model) {
                errors.push("Model is required for Groq".to_string());
            }
        }
        ProviderConfig::Claude { api_key, model, .. } => {
            if !is_blank(api_key) && !api_key.starts_with("sk-ant-") {
                errors.push("Claude API key must start with \"sk-ant-\"".to_string());
            }
            if is_blank(model) {
                errors.push("Model is required for Claude".to_string());
            }
        }
        ProviderConfig::Qwen {
            model, endpoint, ..
        } => {
            if is_blank(model) {
                errors.push("Model is required for Qwen".to_string());
            }
            if let Some(endpoint) = endpoint
                && !is_blank(endpoint)
                && !is_valid_url(endpoint)
            {
                errors.push("Endpoint must be a valid URL".to_string());
            }
        }
    }

    ValidationReport::from_errors(errors)
}
