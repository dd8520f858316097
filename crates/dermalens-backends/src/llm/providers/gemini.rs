//! Google Gemini backend provider.

use crate::llm::extract::extract_text;
use crate::llm::traits::{AiProvider, check_status, read_json_body};
use async_trait::async_trait;
use dermalens_core::error::ProviderError;
use dermalens_core::log_debug;
use dermalens_core::log_error;
use dermalens_core::types::config::{ProviderConfig, ProviderKind};
use dermalens_core::validation::validate;
use serde_json::json;

const PROVIDER_NAME: &str = "Google Gemini";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    fn request_url(&self) -> String {
        format!("{BASE_URL}/models/{}:generateContent", self.model)
    }

    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }
            ]
        })
    }
}

/// Google Gemini provider.
pub struct GeminiProvider {
    config: Option<ProviderConfig>,
    client: Option<GeminiClient>,
}

impl GeminiProvider {
    pub fn new() -> Self {
        GeminiProvider {
            config: None,
            client: None,
        }
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn initialize(&mut self, config: ProviderConfig) -> Result<(), ProviderError> {
        let ProviderConfig::GoogleGemini { api_key, model } = &config else {
            return Err(ProviderError::configuration(
                "Google Gemini provider expects a google-gemini configuration",
            ));
        };

        let report = validate(&config);
        if !report.valid {
            return Err(ProviderError::configuration(report.errors.join("; ")));
        }

        self.client = Some(GeminiClient {
            http: reqwest::Client::new(),
            api_key: api_key.clone(),
            model: model.clone(),
        });
        self.config = Some(config);
        Ok(())
    }

    async fn generate_response(&self, prompt: &str) -> Result<String, ProviderError> {
        let client = self.client.as_ref().ok_or_else(|| {
            ProviderError::configuration(
                "Google Gemini provider is not configured. Call initialize() first.",
            )
        })?;

        log_debug!(
            "llm::gemini",
            model = %client.model,
            "Sending request to Google Gemini"
        );

        let response = client
            .http
            .post(client.request_url())
            .header("x-goog-api-key", &client.api_key)
            .json(&client.build_request_body(prompt))
            .send()
            .await?;

        let response = check_status(PROVIDER_NAME, response).await?;
        let raw = read_json_body(PROVIDER_NAME, response).await?;

        match extract_text(&raw) {
            Some(text) => Ok(text),
            None => {
                log_error!(
                    "llm::gemini",
                    raw = %raw,
                    "No extractable text in Google Gemini response"
                );
                Err(ProviderError::ResponseFormat {
                    provider: PROVIDER_NAME.to_string(),
                    raw,
                })
            }
        }
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::GoogleGemini
    }

    fn is_configured(&self) -> bool {
        self.config.is_some() && self.client.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_lifecycle() -> Result<(), ProviderError> {
        let mut provider = GeminiProvider::new();
        assert!(!provider.is_configured());

        provider
            .initialize(ProviderConfig::GoogleGemini {
                api_key: "test-key".to_string(),
                model: "gemini-1.5-flash".to_string(),
            })
            .await?;
        assert!(provider.is_configured());
        Ok(())
    }

    #[tokio::test]
    async fn test_initialize_rejects_blank_model() {
        let mut provider = GeminiProvider::new();
        let result = provider
            .initialize(ProviderConfig::GoogleGemini {
                api_key: "test-key".to_string(),
                model: String::new(),
            })
            .await;

        match result {
            Err(ProviderError::Configuration { message }) => {
                assert!(message.contains("Model is required for Google Gemini"));
            }
            other => panic!("expected Configuration error, got {other:?}"),
        }
        assert!(!provider.is_configured());
    }

    #[tokio::test]
    async fn test_generate_before_initialize_fails() {
        let provider = GeminiProvider::new();
        assert!(matches!(
            provider.generate_response("hello").await,
            Err(ProviderError::Configuration { .. })
        ));
    }

    #[test]
    fn test_request_url_targets_model() {
        let client = GeminiClient {
            http: reqwest::Client::new(),
            api_key: "k".to_string(),
            model: "gemini-1.5-pro".to_string(),
        };
        assert_eq!(
            client.request_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn test_build_request_body() {
        let client = GeminiClient {
            http: reqwest::Client::new(),
            api_key: "k".to_string(),
            model: "gemini-1.5-flash".to_string(),
        };
        let body = client.build_request_body("Describe the rash");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Describe the rash");
    }
}
