//! `SQLite`-backed translation store.

use std::collections::hash_map::Entry;
use std::path::Path;

use chrono::{
    SecondsFormat,
    Utc,
};
use rusqlite::{
    Connection,
    InterruptHandle,
    OptionalExtension,
    params,
};

use super::StoreError;
use super::schema;
use crate::types::{
    EntryMap,
    FlatMap,
    Translation,
    TranslationEntry,
    UserScope,
};

/// Translation store over a single `SQLite` connection.
///
/// Reads resolve user overrides against global defaults: a row owned by the
/// requesting user masks the global row for the same key and language.
#[derive(Debug)]
pub struct TranslationStore {
    /// `SQLite` 接続
    conn: Connection,
}

impl TranslationStore {
    /// Opens (or creates) a database file and prepares the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Opening translation store");

        let conn = Connection::open(path)
            .map_err(|source| StoreError::Open { path: path.to_path_buf(), source })?;
        Self::from_connection(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|source| StoreError::Open { path: ":memory:".into(), source })?;
        Self::from_connection(conn)
    }

    /// Wraps an existing connection and prepares the schema.
    pub fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Creates the translation table and indexes if they are missing.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(schema::CREATE_SCHEMA).map_err(StoreError::Schema)
    }

    /// Handle that aborts the statement currently running on this store.
    ///
    /// The interrupted call returns the error of the stage it was in.
    #[must_use]
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.conn.get_interrupt_handle()
    }

    /// Inserts or updates a batch of translations.
    ///
    /// The batch is staged and merged inside one transaction, so the table
    /// holds either none or all of it. On an identity collision
    /// (`user_id`, `key_path`, `lang`) only `value`, `tooltip` and
    /// `updated_at` change. The staging table is dropped afterwards whether
    /// or not the merge succeeded.
    ///
    /// Returns the number of rows written. An empty batch touches nothing.
    pub fn upsert(&mut self, translations: &[Translation]) -> Result<usize, StoreError> {
        if translations.is_empty() {
            return Ok(0);
        }

        tracing::debug!(count = translations.len(), "Upserting translations");

        let outcome = self.stage_and_merge(translations);
        self.drop_staging();
        outcome
    }

    /// Stages the batch and merges it into the translation table in one transaction.
    fn stage_and_merge(&mut self, translations: &[Translation]) -> Result<usize, StoreError> {
        let updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let tx = self.conn.transaction().map_err(StoreError::Stage)?;

        tx.execute_batch(schema::CREATE_STAGING).map_err(StoreError::Stage)?;
        {
            let mut insert = tx.prepare(schema::INSERT_STAGING).map_err(StoreError::Stage)?;
            for translation in translations {
                insert
                    .execute(params![
                        translation.user.as_user_id(),
                        translation.key_path,
                        translation.lang,
                        translation.value,
                        translation.tooltip,
                        updated_at,
                    ])
                    .map_err(StoreError::Stage)?;
            }
        }

        let merged = tx.execute(schema::MERGE_STAGING, []).map_err(StoreError::Merge)?;
        tx.commit().map_err(StoreError::Merge)?;

        tracing::debug!(merged, "Merged staged translations");
        Ok(merged)
    }

    /// Removes the staging table. Failure is logged, never returned.
    fn drop_staging(&self) {
        if let Err(e) = self.conn.execute(schema::DROP_STAGING, []) {
            tracing::warn!("Failed to drop staging table: {e}");
        }
    }

    /// Looks up one translation, preferring the user's row over the global one.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] when neither a user nor a global row exists.
    pub fn get(&self, user: &UserScope, key_path: &str, lang: &str) -> Result<String, StoreError> {
        self.conn
            .query_row(schema::SELECT_ONE, params![user.as_user_id(), key_path, lang], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .map_err(StoreError::Query)?
            .ok_or_else(|| StoreError::NotFound {
                key_path: key_path.to_string(),
                lang: lang.to_string(),
            })
    }

    /// Exports every key of `lang` resolved for `user`.
    ///
    /// An unknown language yields an empty map.
    pub fn export(&self, lang: &str, user: &UserScope) -> Result<FlatMap, StoreError> {
        Ok(self
            .export_with_tooltips(lang, user)?
            .into_iter()
            .map(|(key_path, entry)| (key_path, entry.value))
            .collect())
    }

    /// Exports every key of `lang` resolved for `user`, with tooltips.
    ///
    /// Rows without a tooltip report an empty one.
    pub fn export_with_tooltips(
        &self,
        lang: &str,
        user: &UserScope,
    ) -> Result<EntryMap, StoreError> {
        let mut stmt = self.conn.prepare(schema::SELECT_LANGUAGE).map_err(StoreError::Query)?;
        let rows = stmt
            .query_map(params![lang, user.as_user_id()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            })
            .map_err(StoreError::Query)?;

        let mut result = EntryMap::new();
        for row in rows {
            let (key_path, value, tooltip) = row.map_err(StoreError::Query)?;
            // User rows come first; the first row per key wins.
            if let Entry::Vacant(slot) = result.entry(key_path) {
                slot.insert(TranslationEntry { value, tooltip: Some(tooltip.unwrap_or_default()) });
            }
        }

        tracing::debug!(lang, user = %user, count = result.len(), "Exported translations");
        Ok(result)
    }
}
