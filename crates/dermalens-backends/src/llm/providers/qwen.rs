//! Qwen backend provider (Alibaba Cloud DashScope).
//!
//! DashScope wraps chat messages in an `input` envelope and sampling
//! parameters in a `parameters` envelope; the generation endpoint itself is
//! overridable for private deployments.

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

const PROVIDER_NAME: &str = "Qwen";
const DEFAULT_ENDPOINT: &str =
    "https://dashscope.aliyuncs.com/api/v1/services/aigc/text-generation/generation";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TEMPERATURE: f64 = 0.3;

struct QwenClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
    max_tokens: u32,
    temperature: f64,
}

impl QwenClient {
    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        json!({
            "model": self.model,
            "input": {
                "messages": [
                    {
                        "role": "user",
                        "content": prompt
                    }
                ]
            },
            "parameters": {
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
                "result_format": "message"
            }
        })
    }
}

/// Qwen provider.
pub struct QwenProvider {
    config: Option<ProviderConfig>,
    client: Option<QwenClient>,
}

impl QwenProvider {
    pub fn new() -> Self {
        QwenProvider {
            config: None,
            client: None,
        }
    }
}

impl Default for QwenProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for QwenProvider {
    async fn initialize(&mut self, config: ProviderConfig) -> Result<(), ProviderError> {
        let ProviderConfig::Qwen {
            api_key,
            model,
            endpoint,
            max_tokens,
            temperature,
        } = &config
        else {
            return Err(ProviderError::configuration(
                "Qwen provider expects a qwen configuration",
            ));
        };

        let report = validate(&config);
        if !report.valid {
            return Err(ProviderError::configuration(report.errors.join("; ")));
        }

        let supported = metadata_for(ProviderKind::Qwen).models;
        if !supported.contains(&model.as_str()) {
            return Err(ProviderError::configuration(format!(
                "Unsupported Qwen model: {model}. Supported models: {}",
                supported.join(", ")
            )));
        }

        self.client = Some(QwenClient {
            http: reqwest::Client::new(),
            api_key: api_key.clone(),
            model: model.clone(),
            endpoint: endpoint
                .clone()
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            max_tokens: max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: temperature.unwrap_or(DEFAULT_TEMPERATURE),
        });
        self.config = Some(config);
        Ok(())
    }

    async fn generate_response(&self, prompt: &str) -> Result<String, ProviderError> {
        let client = self.client.as_ref().ok_or_else(|| {
            ProviderError::configuration(
                "Qwen provider is not configured. Call initialize() first.",
            )
        })?;

        log_debug!(
            "llm::qwen",
            model = %client.model,
            endpoint = %client.endpoint,
            "Sending request to Qwen"
        );

        let response = client
            .http
            .post(&client.endpoint)
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
                    "llm::qwen",
                    raw = %raw,
                    "No extractable text in Qwen response"
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
        ProviderKind::Qwen
    }

    fn is_configured(&self) -> bool {
        self.config.is_some() && self.client.is_some()
    }
}
