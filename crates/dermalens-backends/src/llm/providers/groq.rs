//! Groq backend provider (OpenAI-compatible chat completions).

use crate::llm::extract::extract_text;
use crate::llm::traits::{AiProvider, check_status, read_json_body};
use async_trait::async_trait;
use dermalens_core::error::ProviderError;
use dermalens_core::log_debug;
use dermalens_core::log_error;
use dermalens_core::types::config::{ProviderConfig, ProviderKind};
use dermalens_core::validation::validate;
use serde_json::json;

const PROVIDER_NAME: &str = "Groq";
const CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

struct GroqClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GroqClient {
    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        })
    }
}

/// Groq provider.
pub struct GroqProvider {
    config: Option<ProviderConfig>,
    client: Option<GroqClient>,
}

impl GroqProvider {
    pub fn new() -> Self {
        GroqProvider {
            config: None,
            client: None,
        }
    }
}

impl Default for GroqProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for GroqProvider {
    async fn initialize(&mut self, config: ProviderConfig) -> Result<(), ProviderError> {
        let ProviderConfig::Groq { api_key, model } = &config else {
            return Err(ProviderError::configuration(
                "Groq provider expects a groq configuration",
            ));
        };

        let report = validate(&config);
        if !report.valid {
            return Err(ProviderError::configuration(report.errors.join("; ")));
        }

        self.client = Some(GroqClient {
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
                "Groq provider is not configured. Call initialize() first.",
            )
        })?;

        log_debug!(
            "llm::groq",
            model = %client.model,
            "Sending request to Groq"
        );

        let response = client
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&client.api_key)
            .json(&client.build_request_body(prompt))
            .send()
            .await?;

        let response = check_status(PROVIDER_NAME, response).await?;
        let raw = read_json_body(PROVIDER_NAME, response).await?;

        match extract_text(&raw) {
            Some(text) => Ok(text),
            None => {
                log_error!(
                    "llm::groq",
                    raw = %raw,
                    "No extractable text in Groq response"
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
        ProviderKind::Groq
    }

    fn is_configured(&self) -> bool {
        self.config.is_some() && self.client.is_some()
    }
}
