//! Dermalens Core - shared types for the AI provider layer.
//!
//! This crate is the dependency-free leaf of the workspace. It defines:
//! - The tagged provider configuration union and its validation rules
//! - The provider metadata table used for presentation and env resolution
//! - The error taxonomy surfaced by providers and result stores
//! - The persisted analysis record model
//! - Logging macros shared across crates

pub mod error;
pub mod logging;
pub mod metadata;
pub mod types;
pub mod validation;

pub use error::{ProviderError, StoreError};
pub use metadata::{FieldSpec, PROVIDER_METADATA, ProviderMetadata, metadata_for};
pub use types::config::{ProviderConfig, ProviderKind};
pub use types::record::{AnalysisRecord, DiagnosticReport, Differential, PrimaryDiagnosis};
pub use validation::{ValidationReport, validate};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
