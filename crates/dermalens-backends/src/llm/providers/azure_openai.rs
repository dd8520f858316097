//! Azure OpenAI backend provider (hosted-deployment style).
//!
//! The endpoint identifies an Azure resource; the model is addressed by
//! deployment name in the URL path rather than in the request body.

use crate::llm::extract::extract_text;
use crate::llm::traits::{AiProvider, check_status, read_json_body};
use async_trait::async_trait;
use dermalens_core::error::ProviderError;
use dermalens_core::log_debug;
use dermalens_core::log_error;
use dermalens_core::types::config::{ProviderConfig, ProviderKind};
use dermalens_core::validation::validate;
use serde_json::json;
use url::Url;

const PROVIDER_NAME: &str = "Azure OpenAI";
const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

struct AzureClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    /// First label of the endpoint host, e.g. `my-resource` for
    /// `https://my-resource.openai.azure.com`.
    resource: String,
    deployment: String,
    api_version: String,
}

impl AzureClient {
    fn request_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }

    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        json!({
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        })
    }
}

/// Azure OpenAI provider.
pub struct AzureOpenAiProvider {
    config: Option<ProviderConfig>,
    client: Option<AzureClient>,
}

impl AzureOpenAiProvider {
    pub fn new() -> Self {
        AzureOpenAiProvider {
            config: None,
            client: None,
        }
    }
}

impl Default for AzureOpenAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the resource identifier from the endpoint's host name.
fn resource_from_endpoint(endpoint: &str) -> Result<String, ProviderError> {
    let url = Url::parse(endpoint)
        .map_err(|e| ProviderError::configuration(format!("Invalid Azure OpenAI endpoint: {e}")))?;
    let host = url.host_str().ok_or_else(|| {
        ProviderError::configuration("Azure OpenAI endpoint has no host".to_string())
    })?;
    let resource = host.split('.').next().unwrap_or(host);
    Ok(resource.to_string())
}

#[async_trait]
impl AiProvider for AzureOpenAiProvider {
    async fn initialize(&mut self, config: ProviderConfig) -> Result<(), ProviderError> {
        let ProviderConfig::AzureOpenAi {
            api_key,
            endpoint,
            deployment,
            api_version,
        } = &config
        else {
            return Err(ProviderError::configuration(
                "Azure OpenAI provider expects an azure-openai configuration",
            ));
        };

        let report = validate(&config);
        if !report.valid {
            return Err(ProviderError::configuration(report.errors.join("; ")));
        }

        let resource = resource_from_endpoint(endpoint)?;

        self.client = Some(AzureClient {
            http: reqwest::Client::new(),
            api_key: api_key.clone(),
            endpoint: endpoint.clone(),
            resource,
            deployment: deployment.clone(),
            api_version: api_version
                .clone()
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        });
        self.config = Some(config);
        Ok(())
    }

    async fn generate_response(&self, prompt: &str) -> Result<String, ProviderError> {
        let client = self.client.as_ref().ok_or_else(|| {
            ProviderError::configuration(
                "Azure OpenAI provider is not configured. Call initialize() first.",
            )
        })?;

        let url = client.request_url();
        log_debug!(
            "llm::azure_openai",
            resource = %client.resource,
            deployment = %client.deployment,
            "Sending request to Azure OpenAI"
        );

        let response = client
            .http
            .post(&url)
            .header("api-key", &client.api_key)
            .json(&client.build_request_body(prompt))
            .send()
            .await?;

        let response = check_status(PROVIDER_NAME, response).await?;
        let raw = read_json_body(PROVIDER_NAME, response).await?;

        match extract_text(&raw) {
            Some(text) => Ok(text),
            None => {
                log_error!(
                    "llm::azure_openai",
                    raw = %raw,
                    "No extractable text in Azure OpenAI response"
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
        ProviderKind::AzureOpenAi
    }

    fn is_configured(&self) -> bool {
        self.config.is_some() && self.client.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProviderConfig {
        ProviderConfig::AzureOpenAi {
            api_key: "test-key".to_string(),
            endpoint: "https://demo-resource.openai.azure.com".to_string(),
            deployment: "gpt-4o-mini".to_string(),
            api_version: None,
        }
    }

    #[tokio::test]
    async fn test_initialize_builds_client() -> Result<(), ProviderError> {
        let mut provider = AzureOpenAiProvider::new();
        assert!(!provider.is_configured());

        provider.initialize(config()).await?;
        assert!(provider.is_configured());

        let client = provider.client.as_ref().unwrap();
        assert_eq!(client.resource, "demo-resource");
        assert_eq!(client.api_version, DEFAULT_API_VERSION);
        Ok(())
    }

    #[tokio::test]
    async fn test_initialize_rejects_incomplete_config() {
        let mut provider = AzureOpenAiProvider::new();
        let result = provider
            .initialize(ProviderConfig::AzureOpenAi {
                api_key: "key".to_string(),
                endpoint: String::new(),
                deployment: String::new(),
                api_version: None,
            })
            .await;

        match result {
            Err(ProviderError::Configuration { message }) => {
                assert!(message.contains("Endpoint is required"));
                assert!(message.contains("Deployment name is required"));
            }
            other => panic!("expected Configuration error, got {other:?}"),
        }
        assert!(!provider.is_configured());
    }

    #[tokio::test]
    async fn test_initialize_rejects_wrong_variant() {
        let mut provider = AzureOpenAiProvider::new();
        let result = provider
            .initialize(ProviderConfig::Groq {
                api_key: "key".to_string(),
                model: "llama-3.3-70b-versatile".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ProviderError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_generate_before_initialize_fails() {
        let provider = AzureOpenAiProvider::new();
        let result = provider.generate_response("hello").await;
        match result {
            Err(ProviderError::Configuration { message }) => {
                assert!(message.contains("not configured"));
            }
            other => panic!("expected Configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_request_url_includes_deployment_and_version() {
        let client = AzureClient {
            http: reqwest::Client::new(),
            api_key: "k".to_string(),
            endpoint: "https://demo-resource.openai.azure.com/".to_string(),
            resource: "demo-resource".to_string(),
            deployment: "gpt-4o".to_string(),
            api_version: "2024-02-15-preview".to_string(),
        };
        assert_eq!(
            client.request_url(),
            "https://demo-resource.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-02-15-preview"
        );
    }

    #[test]
    fn test_build_request_body() {
        let client = AzureClient {
            http: reqwest::Client::new(),
            api_key: "k".to_string(),
            endpoint: "https://demo.openai.azure.com".to_string(),
            resource: "demo".to_string(),
            deployment: "gpt-4o-mini".to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        };
        let body = client.build_request_body("Describe the lesion");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Describe the lesion");
    }

    #[test]
    fn test_resource_from_endpoint() -> Result<(), ProviderError> {
        assert_eq!(
            resource_from_endpoint("https://acme.openai.azure.com")?,
            "acme"
        );
        assert!(resource_from_endpoint("not a url").is_err());
        Ok(())
    }
}
