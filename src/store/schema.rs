//! Table layout of the translation store.

/// Creates the translation table and its identity index.
///
/// A plain `UNIQUE (user_id, key_path, lang)` treats NULLs as distinct and
/// would allow duplicate global rows, so identity is enforced on an
/// expression index that folds NULL into a value no user id can produce.
pub(super) const CREATE_SCHEMA: &str = r"
    CREATE TABLE IF NOT EXISTS ui_translations (
        user_id    TEXT,
        key_path   TEXT NOT NULL,
        lang       TEXT NOT NULL,
        value      TEXT NOT NULL,
        tooltip    TEXT,
        updated_at TEXT NOT NULL
    );

    CREATE UNIQUE INDEX IF NOT EXISTS ui_translations_identity
        ON ui_translations (user_id IS NULL, ifnull(user_id, ''), key_path, lang);

    CREATE INDEX IF NOT EXISTS ui_translations_lang
        ON ui_translations (lang, key_path);
";

/// Per-connection staging table for one batch, emptied on creation.
pub(super) const CREATE_STAGING: &str = r"
    CREATE TEMP TABLE IF NOT EXISTS ui_translations_staging (
        seq        INTEGER PRIMARY KEY,
        user_id    TEXT,
        key_path   TEXT NOT NULL,
        lang       TEXT NOT NULL,
        value      TEXT NOT NULL,
        tooltip    TEXT,
        updated_at TEXT NOT NULL
    );
    DELETE FROM temp.ui_translations_staging;
";

/// Stages one row; `seq` records batch order.
pub(super) const INSERT_STAGING: &str = r"
    INSERT INTO temp.ui_translations_staging (user_id, key_path, lang, value, tooltip, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
";

/// Merges staged rows into the durable table.
///
/// `WHERE true` keeps SQLite from parsing `ON CONFLICT` as a join constraint.
/// Rows are merged in staging order, so a triple repeated within one batch
/// ends with its last value.
pub(super) const MERGE_STAGING: &str = r"
    INSERT INTO ui_translations (user_id, key_path, lang, value, tooltip, updated_at)
    SELECT user_id, key_path, lang, value, tooltip, updated_at
    FROM temp.ui_translations_staging
    WHERE true
    ORDER BY seq
    ON CONFLICT DO UPDATE SET
        value = excluded.value,
        tooltip = excluded.tooltip,
        updated_at = excluded.updated_at
";

/// Removes the staging table.
pub(super) const DROP_STAGING: &str = "DROP TABLE IF EXISTS temp.ui_translations_staging";

/// Single value, user row before global row.
pub(super) const SELECT_ONE: &str = r"
    SELECT value FROM ui_translations
    WHERE (user_id = ?1 OR user_id IS NULL)
      AND key_path = ?2 AND lang = ?3
    ORDER BY user_id IS NULL
    LIMIT 1
";

/// Every key of a language, user rows before global rows.
pub(super) const SELECT_LANGUAGE: &str = r"
    SELECT key_path, value, tooltip FROM ui_translations
    WHERE lang = ?1 AND (user_id = ?2 OR user_id IS NULL)
    ORDER BY user_id IS NULL, key_path
";
