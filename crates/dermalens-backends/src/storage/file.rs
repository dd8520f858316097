//! File-backed analysis store.
//!
//! Records live in one JSON document on disk. Writes are a full
//! read-modify-rewrite with no locking: concurrent writers can drop each
//! other's appends. That is an accepted limitation for low-volume demo
//! deployments; callers needing durability under contention should use the
//! remote store.

use crate::storage::store::AnalysisStore;
use async_trait::async_trait;
use chrono::Utc;
use dermalens_core::error::StoreError;
use dermalens_core::log_warn;
use dermalens_core::types::record::AnalysisRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const BACKEND_KIND: &str = "file";
const SCHEMA_VERSION: u32 = 1;

/// On-disk document: a version tag around the record array.
#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    schema_version: u32,
    records: Vec<AnalysisRecord>,
}

impl StoreDocument {
    fn new(records: Vec<AnalysisRecord>) -> Self {
        StoreDocument {
            schema_version: SCHEMA_VERSION,
            records,
        }
    }
}

/// File-backed store rooted at a data directory.
pub struct FileStore {
    data_dir: PathBuf,
    file_path: PathBuf,
}

impl FileStore {
    /// Store under `./data/results.json` in the working directory.
    pub fn new() -> Self {
        Self::at("data")
    }

    /// Store under the given data directory.
    pub fn at(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        let file_path = data_dir.join("results.json");
        FileStore {
            data_dir,
            file_path,
        }
    }

    /// Read every record currently on disk.
    ///
    /// A missing, unreadable, or corrupt file reads as an empty collection.
    fn read_records(&self) -> Vec<AnalysisRecord> {
        let content = match fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };

        // Versioned document first, legacy bare array second.
        if let Ok(document) = serde_json::from_str::<StoreDocument>(&content) {
            return document.records;
        }
        match serde_json::from_str::<Vec<AnalysisRecord>>(&content) {
            Ok(records) => records,
            Err(error) => {
                log_warn!(
                    "storage::file",
                    path = %self.file_path.display(),
                    error = %error,
                    "Corrupt results file, treating as empty"
                );
                Vec::new()
            }
        }
    }

    fn write_records(&self, records: Vec<AnalysisRecord>) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)?;
        let json = serde_json::to_string_pretty(&StoreDocument::new(records))?;
        fs::write(&self.file_path, json)?;
        Ok(())
    }

    fn next_id() -> String {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default()
            .to_string()
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisStore for FileStore {
    async fn save(&self, record: AnalysisRecord) -> Result<AnalysisRecord, StoreError> {
        let mut records = self.read_records();

        let stored = AnalysisRecord {
            id: Some(Self::next_id()),
            created_at: Some(Utc::now().to_rfc3339()),
            ..record
        };
        records.push(stored.clone());
        self.write_records(records)?;

        Ok(stored)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<AnalysisRecord>, StoreError> {
        Ok(self
            .read_records()
            .into_iter()
            .find(|record| record.id.as_deref() == Some(id)))
    }

    async fn get_all(&self, limit: usize) -> Result<Vec<AnalysisRecord>, StoreError> {
        let records = self.read_records();
        let start = records.len().saturating_sub(limit);
        Ok(records[start..].iter().rev().cloned().collect())
    }

    fn backend_kind(&self) -> &'static str {
        BACKEND_KIND
    }
}
