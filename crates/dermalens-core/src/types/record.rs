//! Persisted analysis result records.
//!
//! An [`AnalysisRecord`] is created by the caller after a successful
//! inference call and never mutated afterwards; `id` and `created_at` are
//! assigned by whichever store accepts the record.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One ranked alternative diagnosis in a report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Differential {
    pub condition: String,
    /// Probability estimate, 0-100.
    pub probability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

/// The leading diagnosis in a report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrimaryDiagnosis {
    pub condition: String,
    /// Confidence estimate, 0-100.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Structured diagnostic report parsed out of a model answer.
///
/// Field names are camelCase on the wire; this is the JSON contract the
/// model is prompted to produce.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    pub summary: String,
    pub primary_diagnosis: PrimaryDiagnosis,
    #[serde(default)]
    pub differentials: Vec<Differential>,
    #[serde(default)]
    pub cultural_considerations: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// A persisted analysis outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRecord {
    /// Assigned by the store on save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Assigned by the store on save (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub provider_name: String,
    /// Raw text answer returned by the provider.
    pub model_output: String,
    /// Structured report, when the raw answer parsed.
    #[serde(default)]
    pub parsed_output: Option<DiagnosticReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl AnalysisRecord {
    /// Create an unsaved record for the given provider and raw answer.
    pub fn new(provider_name: impl Into<String>, model_output: impl Into<String>) -> Self {
        AnalysisRecord {
            id: None,
            created_at: None,
            provider_name: provider_name.into(),
            model_output: model_output.into(),
            parsed_output: None,
            image_url: None,
            metadata: HashMap::new(),
        }
    }

    /// Attach a parsed report.
    pub fn with_parsed_output(mut self, report: DiagnosticReport) -> Self {
        self.parsed_output = Some(report);
        self
    }

    /// Attach the analyzed image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}
