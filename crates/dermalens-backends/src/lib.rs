//! Dermalens Backends - AI provider integration and result persistence.
//!
//! This crate holds the two runtime halves of the provider layer:
//!
//! - [`llm`]: one provider per inference backend behind the [`llm::AiProvider`]
//!   trait, the factory that validates and builds them, and the heuristic
//!   normalizer that recovers a plain text answer from any backend's
//!   response shape.
//! - [`storage`]: the analysis result stores (remote Supabase table or local
//!   JSON file) and the environment-driven selector between them.

pub mod llm;
pub mod storage;

pub use llm::{AiProvider, ProviderFactory, config_from_env, extract_text};
pub use storage::{AnalysisStore, FileStore, SupabaseStore, analysis_store, is_remote_configured};
