//! LLM provider implementations and shared plumbing.
//!
//! This module provides:
//! - [`AiProvider`] trait: the capability contract every backend satisfies
//! - Provider implementations: Azure OpenAI, Google Gemini, Groq, Claude, Qwen
//! - [`ProviderFactory`]: create and initialize providers from configuration
//! - [`extract_text`]: the shared response text normalizer

pub mod extract;
pub mod factory;
pub mod providers;
pub mod traits;

pub use extract::extract_text;
pub use factory::{ProviderFactory, config_from_env};
pub use providers::{
    AzureOpenAiProvider, ClaudeProvider, GeminiProvider, GroqProvider, QwenProvider,
};
pub use traits::AiProvider;
