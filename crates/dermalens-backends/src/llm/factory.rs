//! Provider factory and environment-driven configuration.

use crate::llm::providers::{
    AzureOpenAiProvider, ClaudeProvider, GeminiProvider, GroqProvider, QwenProvider,
};
use crate::llm::traits::AiProvider;
use dermalens_core::error::ProviderError;
use dermalens_core::log_info;
use dermalens_core::metadata::{PROVIDER_METADATA, ProviderMetadata, metadata_for};
use dermalens_core::types::config::{ProviderConfig, ProviderKind};
use std::env;

/// Factory for backend providers.
///
/// Selection is an exhaustive match over the closed [`ProviderKind`] enum:
/// adding a backend without wiring it here is a compile error, so no kind
/// can silently fall through to "unknown type".
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create an uninitialized provider for the given backend kind.
    pub fn create(kind: ProviderKind) -> Box<dyn AiProvider> {
        match kind {
            ProviderKind::AzureOpenAi => Box::new(AzureOpenAiProvider::new()),
            ProviderKind::GoogleGemini => Box::new(GeminiProvider::new()),
            ProviderKind::Groq => Box::new(GroqProvider::new()),
            ProviderKind::Claude => Box::new(ClaudeProvider::new()),
            ProviderKind::Qwen => Box::new(QwenProvider::new()),
        }
    }

    /// Create an uninitialized provider from a backend id string.
    ///
    /// Fails with a configuration error naming the unknown id.
    pub fn create_by_name(name: &str) -> Result<Box<dyn AiProvider>, ProviderError> {
        let kind = name
            .parse::<ProviderKind>()
            .map_err(ProviderError::configuration)?;
        Ok(Self::create(kind))
    }

    /// Create an uninitialized provider matching a configuration's kind.
    pub fn create_for(config: &ProviderConfig) -> Box<dyn AiProvider> {
        Self::create(config.kind())
    }

    /// Create and initialize a provider in one step.
    ///
    /// Either returns a configured provider or propagates the
    /// initialization failure; a partially constructed provider is never
    /// returned.
    pub async fn create_and_initialize(
        config: ProviderConfig,
    ) -> Result<Box<dyn AiProvider>, ProviderError> {
        let mut provider = Self::create_for(&config);
        provider.initialize(config).await?;
        Ok(provider)
    }

    /// Metadata for every supported backend, for presentation only.
    pub fn available_providers() -> &'static [ProviderMetadata] {
        PROVIDER_METADATA
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn default_model(kind: ProviderKind) -> &'static str {
    metadata_for(kind).models[0]
}

/// Build the default provider configuration from the environment.
///
/// Backends are probed in metadata order; the first one whose API key
/// variable is set wins. When no recognized credential is present this
/// fails fast with an error listing every recognized variable, rather than
/// silently defaulting.
pub fn config_from_env() -> Result<ProviderConfig, ProviderError> {
    for meta in PROVIDER_METADATA {
        let Some(api_key) = env_non_empty(meta.api_key_env) else {
            continue;
        };

        let config = match meta.kind {
            ProviderKind::AzureOpenAi => {
                let endpoint = env_non_empty("AZURE_OPENAI_ENDPOINT").ok_or_else(|| {
                    ProviderError::configuration(
                        "Azure OpenAI endpoint is required. Set AZURE_OPENAI_ENDPOINT.",
                    )
                })?;
                ProviderConfig::AzureOpenAi {
                    api_key,
                    endpoint,
                    deployment: env_non_empty("AZURE_OPENAI_DEPLOYMENT")
                        .unwrap_or_else(|| default_model(ProviderKind::AzureOpenAi).to_string()),
                    api_version: env_non_empty("AZURE_OPENAI_API_VERSION"),
                }
            }
            ProviderKind::GoogleGemini => ProviderConfig::GoogleGemini {
                api_key,
                model: env_non_empty("GEMINI_MODEL")
                    .unwrap_or_else(|| default_model(ProviderKind::GoogleGemini).to_string()),
            },
            ProviderKind::Groq => ProviderConfig::Groq {
                api_key,
                model: env_non_empty("GROQ_MODEL")
                    .unwrap_or_else(|| default_model(ProviderKind::Groq).to_string()),
            },
            ProviderKind::Claude => ProviderConfig::Claude {
                api_key,
                model: env_non_empty("ANTHROPIC_MODEL")
                    .unwrap_or_else(|| default_model(ProviderKind::Claude).to_string()),
                max_tokens: None,
                temperature: None,
            },
            ProviderKind::Qwen => ProviderConfig::Qwen {
                api_key,
                model: env_non_empty("QWEN_MODEL")
                    .unwrap_or_else(|| default_model(ProviderKind::Qwen).to_string()),
                endpoint: env_non_empty("QWEN_ENDPOINT"),
                max_tokens: None,
                temperature: None,
            },
        };

        log_info!(
            "llm::factory",
            provider = %meta.kind,
            "Selected default provider from environment"
        );
        return Ok(config);
    }

    let recognized: Vec<&str> = PROVIDER_METADATA.iter().map(|m| m.api_key_env).collect();
    Err(ProviderError::configuration(format!(
        "No AI backend credentials found. Set one of: {}",
        recognized.join(", ")
    )))
}
