//! Analysis result stores.
//!
//! Two interchangeable implementations of [`AnalysisStore`]: a remote
//! Supabase table and a local JSON file. [`analysis_store`] picks between
//! them from the environment, building a fresh value per call so tests can
//! toggle the selection deterministically.

mod file;
mod remote;
mod store;

pub use file::FileStore;
pub use remote::SupabaseStore;
pub use store::AnalysisStore;

/// True when both remote-store environment variables are present.
pub fn is_remote_configured() -> bool {
    remote::supabase_env().is_some()
}

/// Select the active analysis store.
///
/// Returns the remote implementation when Supabase credentials are present
/// in the environment, and the file-backed implementation otherwise.
/// Callers never branch on which one is active.
pub fn analysis_store() -> Box<dyn AnalysisStore> {
    match SupabaseStore::from_env() {
        Some(remote) => Box::new(remote),
        None => Box::new(FileStore::new()),
    }
}
