//! Persistent translation storage with per-user overrides.

mod schema;
mod sqlite;

use std::path::PathBuf;

pub use rusqlite::InterruptHandle;
pub use sqlite::TranslationStore;
use thiserror::Error;

/// Errors of the storage layer, tagged with the stage that failed.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open database '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to prepare schema: {0}")]
    Schema(#[source] rusqlite::Error),

    /// Writing the batch into the staging table failed.
    #[error("Failed to stage translations: {0}")]
    Stage(#[source] rusqlite::Error),

    /// Merging staged rows into the translation table failed.
    #[error("Failed to merge staged translations: {0}")]
    Merge(#[source] rusqlite::Error),

    #[error("Translation query failed: {0}")]
    Query(#[source] rusqlite::Error),

    #[error("Translation not found: '{key_path}' ({lang})")]
    NotFound { key_path: String, lang: String },
}
