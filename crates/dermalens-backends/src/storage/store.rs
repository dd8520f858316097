//! The analysis store contract.

use async_trait::async_trait;
use dermalens_core::error::StoreError;
use dermalens_core::types::record::AnalysisRecord;

/// Persistence contract for analysis results.
///
/// Both implementations satisfy it identically; errors are returned as
/// values so a persistence failure never aborts a completed inference call.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Persist a record, returning it with `id` and `created_at` assigned.
    async fn save(&self, record: AnalysisRecord) -> Result<AnalysisRecord, StoreError>;

    /// Fetch a record by id; `None` when absent.
    async fn get_by_id(&self, id: &str) -> Result<Option<AnalysisRecord>, StoreError>;

    /// Fetch up to `limit` records, most recent first.
    async fn get_all(&self, limit: usize) -> Result<Vec<AnalysisRecord>, StoreError>;

    /// Which implementation is active (`"supabase"` or `"file"`).
    fn backend_kind(&self) -> &'static str;
}
