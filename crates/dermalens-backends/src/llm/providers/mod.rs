//! Backend provider implementations.
//!
//! A flat set of sibling implementations of [`crate::llm::AiProvider`], one
//! per backend. Each owns its configuration and client handle, builds its
//! own request body, and interprets its own status codes; all funnel the
//! raw response through [`crate::llm::extract_text`].

pub mod azure_openai;
pub mod claude;
pub mod gemini;
pub mod groq;
pub mod qwen;

pub use azure_openai::AzureOpenAiProvider;
pub use claude::ClaudeProvider;
pub use gemini::GeminiProvider;
pub use groq::GroqProvider;
pub use qwen::QwenProvider;
