//! Claude (Anthropic) backend provider.
//!
//! Key-format and model checks happen at initialization so a misconfigured
//! instance never reaches the wire.

use crate::llm::extract::extract_text;
use crate::llm::traits::{AiProvider, check_status, read_json_body};
use async_trait::async_trait;
use dermalens_core::error::ProviderError;
use dermalens_core::log_debug;
use dermalens_core::log_error;
use dermalens_core::metadata::metadata_for;
use dermalens_core::types::config::{ProviderConfig, ProviderKind};
use dermalens_core::validation::validate;
use serde_json::json;

const PROVIDER_NAME: &str = "Claude (Anthropic)";
const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TEMPERATURE: f64 = 0.3;

struct ClaudeClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl ClaudeClient {
    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        })
    }
}

/// Claude provider.
pub struct ClaudeProvider {
    config: Option<ProviderConfig>,
    client: Option<ClaudeClient>,
}

impl ClaudeProvider {
    pub fn new() -> Self {
        ClaudeProvider {
            config: None,
            client: None,
        }
    }
}

impl Default for ClaudeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for ClaudeProvider {
    async fn initialize(&mut self, config: ProviderConfig) -> Result<(), ProviderError> {
        let ProviderConfig::Claude {
            api_key,
            model,
            max_tokens,
            temperature,
        } = &config
        else {
            return Err(ProviderError::configuration(
                "Claude provider expects a claude configuration",
            ));
        };

        let report = validate(&config);
        if !report.valid {
            return Err(ProviderError::configuration(report.errors.join("; ")));
        }

        let supported = metadata_for(ProviderKind::Claude).models;
        if !supported.contains(&model.as_str()) {
            return Err(ProviderError::configuration(format!(
                "Unsupported Claude model: {model}. Supported models: {}",
                supported.join(", ")
            )));
        }

        self.client = Some(ClaudeClient {
            http: reqwest::Client::new(),
            api_key: api_key.clone(),
            model: model.clone(),
            max_tokens: max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: temperature.unwrap_or(DEFAULT_TEMPERATURE),
        });
        self.config = Some(config);
        Ok(())
    }

    async fn generate_response(&self, prompt: &str) -> Result<String, ProviderError> {
        let client = self.client.as_ref().ok_or_else(|| {
            ProviderError::configuration(
                "Claude provider is not configured. Call initialize() first.",
            )
        })?;

        log_debug!(
            "llm::claude",
            model = %client.model,
            "Sending request to Claude"
        );

        let response = client
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", &client.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&client.build_request_body(prompt))
            .send()
            .await?;

        let response = check_status(PROVIDER_NAME, response).await?;
        let raw = read_json_body(PROVIDER_NAME, response).await?;

        match extract_text(&raw) {
            Some(text) => Ok(text),
            None => {
                log_error!(
                    "llm::claude",
                    raw = %raw,
                    "No extractable text in Claude response"
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
        ProviderKind::Claude
    }

    fn is_configured(&self) -> bool {
        self.config.is_some() && self.client.is_some()
    }
}
