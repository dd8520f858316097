//! Data-driven provider metadata.
//!
//! One const entry per supported backend, describing its human-facing
//! configuration fields, known models, and the environment variable that
//! carries its API key. The table is presentation and env-resolution data
//! only; behavior never branches on it.

use crate::types::config::ProviderKind;

/// One configuration field a backend expects from the user.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Config field key (e.g. `api_key`).
    pub key: &'static str,
    /// Human-facing label.
    pub label: &'static str,
    /// Example value shown in input widgets.
    pub placeholder: &'static str,
    /// Whether the field holds a secret.
    pub sensitive: bool,
    /// Whether the field must be filled in.
    pub required: bool,
}

/// Static metadata for one backend.
#[derive(Debug, Clone, Copy)]
pub struct ProviderMetadata {
    pub kind: ProviderKind,
    /// Display name (also the provider's `name()`).
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
    /// Known model identifiers for this backend.
    pub models: &'static [&'static str],
    /// Environment variable holding the backend's API key.
    pub api_key_env: &'static str,
}

const API_KEY_FIELD: FieldSpec = FieldSpec {
    key: "api_key",
    label: "API Key",
    placeholder: "Enter your API key",
    sensitive: true,
    required: true,
};

const MODEL_FIELD: FieldSpec = FieldSpec {
    key: "model",
    label: "Model",
    placeholder: "model identifier",
    sensitive: false,
    required: true,
};

/// Metadata for every supported backend, in default-selection order.
pub const PROVIDER_METADATA: &[ProviderMetadata] = &[
    ProviderMetadata {
        kind: ProviderKind::AzureOpenAi,
        name: "Azure OpenAI",
        description: "Microsoft Azure OpenAI Service with GPT-4o models",
        fields: &[
            API_KEY_FIELD,
            FieldSpec {
                key: "endpoint",
                label: "Endpoint",
                placeholder: "https://your-resource.openai.azure.com",
                sensitive: false,
                required: true,
            },
            FieldSpec {
                key: "deployment",
                label: "Deployment Name",
                placeholder: "gpt-4o-mini",
                sensitive: false,
                required: true,
            },
            FieldSpec {
                key: "api_version",
                label: "API Version",
                placeholder: "2024-02-15-preview",
                sensitive: false,
                required: false,
            },
        ],
        models: &["gpt-4o-mini", "gpt-4o", "gpt-4"],
        api_key_env: "AZURE_OPENAI_API_KEY",
    },
    ProviderMetadata {
        kind: ProviderKind::GoogleGemini,
        name: "Google Gemini",
        description: "Google AI Gemini models via AI Studio",
        fields: &[
            API_KEY_FIELD,
            FieldSpec {
                placeholder: "gemini-1.5-flash",
                ..MODEL_FIELD
            },
        ],
        models: &["gemini-1.5-flash", "gemini-1.5-pro", "gemini-2.0-flash"],
        api_key_env: "GEMINI_API_KEY",
    },
    ProviderMetadata {
        kind: ProviderKind::Groq,
        name: "Groq",
        description: "Groq fast inference with LLaMA and Mixtral models",
        fields: &[
            API_KEY_FIELD,
            FieldSpec {
                placeholder: "llama-3.3-70b-versatile",
                ..MODEL_FIELD
            },
        ],
        models: &[
            "llama-3.3-70b-versatile",
            "mixtral-8x7b-32768",
            "llama-3.1-70b-versatile",
        ],
        api_key_env: "GROQ_API_KEY",
    },
    ProviderMetadata {
        kind: ProviderKind::Claude,
        name: "Claude (Anthropic)",
        description: "Anthropic Claude models via the Messages API",
        fields: &[
            FieldSpec {
                placeholder: "sk-ant-...",
                ..API_KEY_FIELD
            },
            FieldSpec {
                placeholder: "claude-3-5-sonnet-20241022",
                ..MODEL_FIELD
            },
        ],
        models: &[
            "claude-3-5-sonnet-20241022",
            "claude-3-opus-20240229",
            "claude-3-sonnet-20240229",
            "claude-3-haiku-20240307",
        ],
        api_key_env: "ANTHROPIC_API_KEY",
    },
    ProviderMetadata {
        kind: ProviderKind::Qwen,
        name: "Qwen",
        description: "Alibaba Cloud Qwen models via DashScope",
        fields: &[
            API_KEY_FIELD,
            FieldSpec {
                placeholder: "qwen-max",
                ..MODEL_FIELD
            },
            FieldSpec {
                key: "endpoint",
                label: "Endpoint",
                placeholder: "https://dashscope.aliyuncs.com/api/v1/services/aigc/text-generation/generation",
                sensitive: false,
                required: false,
            },
        ],
        models: &["qwen-max", "qwen-plus", "qwen-turbo", "qwen-max-longcontext"],
        api_key_env: "DASHSCOPE_API_KEY",
    },
];

/// Look up the metadata entry for a backend kind.
pub fn metadata_for(kind: ProviderKind) -> &'static ProviderMetadata {
    PROVIDER_METADATA
        .iter()
        .find(|meta| meta.kind == kind)
        .expect("every ProviderKind has a metadata entry")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_an_entry() {
        for kind in [
            ProviderKind::AzureOpenAi,
            ProviderKind::GoogleGemini,
            ProviderKind::Groq,
            ProviderKind::Claude,
            ProviderKind::Qwen,
        ] {
            assert_eq!(metadata_for(kind).kind, kind);
        }
    }

    #[test]
    fn test_entries_are_unique() {
        let mut kinds: Vec<&str> = PROVIDER_METADATA.iter().map(|m| m.kind.as_str()).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), PROVIDER_METADATA.len());
    }

    #[test]
    fn test_api_key_field_is_sensitive_and_required() {
        for meta in PROVIDER_METADATA {
            let key_field = meta
                .fields
                .iter()
                .find(|f| f.key == "api_key")
                .unwrap_or_else(|| panic!("{} is missing an api_key field", meta.name));
            assert!(key_field.sensitive);
            assert!(key_field.required);
        }
    }

    #[test]
    fn test_azure_requires_endpoint_and_deployment() {
        let meta = metadata_for(ProviderKind::AzureOpenAi);
        for key in ["endpoint", "deployment"] {
            let field = meta.fields.iter().find(|f| f.key == key).unwrap();
            assert!(field.required, "{key} should be required");
        }
        let version = meta.fields.iter().find(|f| f.key == "api_version").unwrap();
        assert!(!version.required);
    }

    #[test]
    fn test_env_vars_are_distinct() {
        let mut envs: Vec<&str> = PROVIDER_METADATA.iter().map(|m| m.api_key_env).collect();
        envs.sort_unstable();
        envs.dedup();
        assert_eq!(envs.len(), PROVIDER_METADATA.len());
    }
}
