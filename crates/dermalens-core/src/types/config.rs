//! Provider configuration model.
//!
//! [`ProviderConfig`] is a tagged union keyed by backend kind. The set of
//! kinds is closed: serde rejects unknown `type` tags and
//! [`ProviderKind::from_str`] rejects unknown ids before any provider code
//! runs. Required string fields default to empty on deserialization so that
//! structurally incomplete input still reaches the validator, which reports
//! missing fields instead of a parse failure.

use serde::{Deserialize, Serialize};

/// Identifier for each supported inference backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    #[serde(rename = "azure-openai")]
    AzureOpenAi,
    GoogleGemini,
    Groq,
    Claude,
    Qwen,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::AzureOpenAi => "azure-openai",
            ProviderKind::GoogleGemini => "google-gemini",
            ProviderKind::Groq => "groq",
            ProviderKind::Claude => "claude",
            ProviderKind::Qwen => "qwen",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "azure-openai" => Ok(ProviderKind::AzureOpenAi),
            "google-gemini" => Ok(ProviderKind::GoogleGemini),
            "groq" => Ok(ProviderKind::Groq),
            "claude" => Ok(ProviderKind::Claude),
            "qwen" => Ok(ProviderKind::Qwen),
            _ => Err(format!("Unknown provider type: '{s}'")),
        }
    }
}

/// Per-backend configuration, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ProviderConfig {
    /// Hosted-deployment backend: resource endpoint plus deployment name.
    #[serde(rename = "azure-openai")]
    AzureOpenAi {
        #[serde(default)]
        api_key: String,
        #[serde(default)]
        endpoint: String,
        #[serde(default)]
        deployment: String,
        #[serde(default)]
        api_version: Option<String>,
    },
    GoogleGemini {
        #[serde(default)]
        api_key: String,
        #[serde(default)]
        model: String,
    },
    Groq {
        #[serde(default)]
        api_key: String,
        #[serde(default)]
        model: String,
    },
    /// Anthropic backend. Keys carry the `sk-ant-` prefix.
    Claude {
        #[serde(default)]
        api_key: String,
        #[serde(default)]
        model: String,
        #[serde(default)]
        max_tokens: Option<u32>,
        #[serde(default)]
        temperature: Option<f64>,
    },
    /// DashScope backend with an overridable endpoint.
    Qwen {
        #[serde(default)]
        api_key: String,
        #[serde(default)]
        model: String,
        #[serde(default)]
        endpoint: Option<String>,
        #[serde(default)]
        max_tokens: Option<u32>,
        #[serde(default)]
        temperature: Option<f64>,
    },
}

impl ProviderConfig {
    /// The backend kind this configuration targets.
    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderConfig::AzureOpenAi { .. } => ProviderKind::AzureOpenAi,
            ProviderConfig::GoogleGemini { .. } => ProviderKind::GoogleGemini,
            ProviderConfig::Groq { .. } => ProviderKind::Groq,
            ProviderConfig::Claude { .. } => ProviderKind::Claude,
            ProviderConfig::Qwen { .. } => ProviderKind::Qwen,
        }
    }

    /// The API key, common to every variant.
    pub fn api_key(&self) -> &str {
        match self {
            ProviderConfig::AzureOpenAi { api_key, .. }
            | ProviderConfig::GoogleGemini { api_key, .. }
            | ProviderConfig::Groq { api_key, .. }
            | ProviderConfig::Claude { api_key, .. }
            | ProviderConfig::Qwen { api_key, .. } => api_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("azure-openai".parse::<ProviderKind>()?, ProviderKind::AzureOpenAi);
        assert_eq!("google-gemini".parse::<ProviderKind>()?, ProviderKind::GoogleGemini);
        assert_eq!("groq".parse::<ProviderKind>()?, ProviderKind::Groq);
        assert_eq!("claude".parse::<ProviderKind>()?, ProviderKind::Claude);
        assert_eq!("qwen".parse::<ProviderKind>()?, ProviderKind::Qwen);
        assert_eq!("GROQ".parse::<ProviderKind>()?, ProviderKind::Groq);
        Ok(())
    }

    #[test]
    fn test_unknown_kind_rejected_by_name() {
        let err = "mistral".parse::<ProviderKind>().unwrap_err();
        assert!(err.contains("mistral"));
    }

    #[test]
    fn test_config_tagged_round_trip() -> Result<(), serde_json::Error> {
        let config = ProviderConfig::Groq {
            api_key: "gsk-test".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
        };
        let json = serde_json::to_value(&config)?;
        assert_eq!(json["type"], "groq");

        let back: ProviderConfig = serde_json::from_value(json)?;
        assert_eq!(back, config);
        Ok(())
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let result: Result<ProviderConfig, _> =
            serde_json::from_value(serde_json::json!({ "type": "mystery", "api_key": "k" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_fields_deserialize_as_blank() -> Result<(), serde_json::Error> {
        // Incomplete input must still construct, so validation can report
        // the missing fields instead of a parse error.
        let config: ProviderConfig =
            serde_json::from_value(serde_json::json!({ "type": "azure-openai" }))?;
        match config {
            ProviderConfig::AzureOpenAi {
                api_key,
                endpoint,
                deployment,
                api_version,
            } => {
                assert!(api_key.is_empty());
                assert!(endpoint.is_empty());
                assert!(deployment.is_empty());
                assert!(api_version.is_none());
            }
            _ => panic!("expected azure-openai variant"),
        }
        Ok(())
    }

    #[test]
    fn test_api_key_accessor() {
        let config = ProviderConfig::Claude {
            api_key: "sk-ant-test".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: None,
            temperature: None,
        };
        assert_eq!(config.api_key(), "sk-ant-test");
        assert_eq!(config.kind(), ProviderKind::Claude);
    }
}
