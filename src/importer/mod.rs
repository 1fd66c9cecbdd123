//! Loading translation files into the store.

mod workspace;

use std::path::Path;

use thiserror::Error;

pub use self::workspace::{
    ImportSummary,
    find_translation_files,
    import_workspace,
};
use crate::config::MatcherError;
use crate::input::{
    LoadError,
    load_and_flatten,
};
use crate::store::{
    StoreError,
    TranslationStore,
};
use crate::types::{
    FlatMap,
    Translation,
    UserScope,
};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    /// The language could not be derived from the file name.
    #[error("Cannot determine language of '{}'", .0.display())]
    UnknownLanguage(std::path::PathBuf),
}

/// Turns a flat map into translation rows for one language and user.
#[must_use]
pub fn to_translations(flat: FlatMap, lang: &str, user: &UserScope) -> Vec<Translation> {
    flat.into_iter()
        .map(|(key_path, value)| Translation::new(user.clone(), lang, key_path, value))
        .collect()
}

/// Loads a translation file, flattens it and upserts every key.
///
/// Returns the number of rows written.
pub fn load_and_save(
    store: &mut TranslationStore,
    file_path: &Path,
    lang: &str,
    user: &UserScope,
    delimiter: char,
) -> Result<usize, ImportError> {
    let flat = load_and_flatten(file_path, delimiter)?;
    tracing::debug!(path = %file_path.display(), lang, keys = flat.len(), "Importing translation file");

    let translations = to_translations(flat, lang, user);
    Ok(store.upsert(&translations)?)
}

/// Same as [`load_and_save`], taking the language from the file stem (`en.json` -> `en`).
pub fn load_and_save_auto_lang(
    store: &mut TranslationStore,
    file_path: &Path,
    user: &UserScope,
    delimiter: char,
) -> Result<usize, ImportError> {
    let lang = file_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| ImportError::UnknownLanguage(file_path.to_path_buf()))?;

    load_and_save(store, file_path, &lang, user, delimiter)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn load_and_save_stores_every_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("strings.json");
        fs::write(&path, r#"{"topbar": {"profile": "Profile", "logout": "Log Out"}}"#).unwrap();
        let mut store = TranslationStore::open_in_memory().unwrap();

        let written = load_and_save(&mut store, &path, "en", &UserScope::Global, '.').unwrap();

        assert_that!(written, eq(2));
        assert_that!(store.get(&UserScope::Global, "topbar.logout", "en").unwrap(), eq("Log Out"));
    }

    #[rstest]
    fn load_and_save_auto_lang_uses_file_stem() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("es.json");
        fs::write(&path, r#"{"topbar": {"profile": "Perfil"}}"#).unwrap();
        let mut store = TranslationStore::open_in_memory().unwrap();

        load_and_save_auto_lang(&mut store, &path, &UserScope::user("alice"), '|').unwrap();

        assert_that!(
            store.get(&UserScope::user("alice"), "topbar|profile", "es").unwrap(),
            eq("Perfil")
        );
        assert!(store.get(&UserScope::Global, "topbar|profile", "es").is_err());
    }

    #[rstest]
    fn load_and_save_invalid_file_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("en.json");
        fs::write(&path, "{invalid json}").unwrap();
        let mut store = TranslationStore::open_in_memory().unwrap();

        let result = load_and_save_auto_lang(&mut store, &path, &UserScope::Global, '.');

        assert!(matches!(result, Err(ImportError::Load(_))), "got {result:?}");
        assert_that!(store.export("en", &UserScope::Global).unwrap().len(), eq(0));
    }
}
