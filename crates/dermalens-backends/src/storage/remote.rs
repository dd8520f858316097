//! Supabase-backed analysis store.
//!
//! Talks PostgREST directly: one `analysis_results` table, `apikey` plus
//! bearer headers on every call.

use crate::storage::store::AnalysisStore;
use async_trait::async_trait;
use dermalens_core::error::StoreError;
use dermalens_core::log_debug;
use dermalens_core::types::record::AnalysisRecord;
use std::env;

const BACKEND_KIND: &str = "supabase";
const TABLE: &str = "analysis_results";

const URL_VAR: &str = "SUPABASE_URL";
const KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Read the remote-store credentials from the environment.
pub(crate) fn supabase_env() -> Option<(String, String)> {
    let url = env::var(URL_VAR).ok().filter(|v| !v.trim().is_empty())?;
    let key = env::var(KEY_VAR).ok().filter(|v| !v.trim().is_empty())?;
    Some((url, key))
}

/// Supabase store for analysis results.
pub struct SupabaseStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SupabaseStore {
    /// Build from explicit credentials.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        SupabaseStore {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build from `SUPABASE_URL`/`SUPABASE_ANON_KEY`, when both are set.
    pub fn from_env() -> Option<Self> {
        supabase_env().map(|(url, key)| Self::new(url, key))
    }

    fn rows_url(&self) -> String {
        format!("{}/rest/v1/{TABLE}", self.base_url)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Remote {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl AnalysisStore for SupabaseStore {
    async fn save(&self, record: AnalysisRecord) -> Result<AnalysisRecord, StoreError> {
        log_debug!("storage::supabase", table = TABLE, "Inserting analysis result");

        let response = self
            .request(self.http.post(self.rows_url()))
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await?;
        let response = Self::check(response).await?;

        // PostgREST returns the inserted rows as an array.
        let mut rows: Vec<AnalysisRecord> = response.json().await?;
        Ok(rows.pop().unwrap_or(record))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<AnalysisRecord>, StoreError> {
        let response = self
            .request(self.http.get(self.rows_url()))
            .query(&[("id", format!("eq.{id}")), ("select", "*".to_string())])
            .send()
            .await?;
        let response = Self::check(response).await?;

        let mut rows: Vec<AnalysisRecord> = response.json().await?;
        Ok(rows.pop())
    }

    async fn get_all(&self, limit: usize) -> Result<Vec<AnalysisRecord>, StoreError> {
        let response = self
            .request(self.http.get(self.rows_url()))
            .query(&[
                ("select", "*".to_string()),
                ("order", "created_at.desc".to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;
        let response = Self::check(response).await?;

        Ok(response.json().await?)
    }

    fn backend_kind(&self) -> &'static str {
        BACKEND_KIND
    }
}
