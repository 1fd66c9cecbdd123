//! Workspace-wide import of translation files.

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use super::ImportError;
use crate::codec::flatten;
use crate::config::{
    FileMatcher,
    StoreSettings,
};
use crate::input::{
    detect_language_from_path,
    detect_namespace_from_path,
    load_document,
};
use crate::store::TranslationStore;
use crate::types::{
    Translation,
    UserScope,
};

/// Outcome of [`import_workspace`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Files whose keys were written.
    pub files: Vec<PathBuf>,
    /// Files that matched the patterns but could not be imported.
    pub skipped: Vec<PathBuf>,
    /// Rows written by the merge.
    pub written: usize,
}

/// ワークスペース内の翻訳ファイルを検索
///
/// `.gitignore` を尊重し、結果はパス順にソートされる
pub fn find_translation_files(
    workspace_path: &Path,
    settings: &StoreSettings,
) -> Result<Vec<PathBuf>, ImportError> {
    let matcher = FileMatcher::new(workspace_path.to_path_buf(), settings)?;
    let mut found_files = Vec::new();

    // ignore クレートでファイルを走査
    for result in WalkBuilder::new(workspace_path)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        // ファイルのみを対象
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        if matcher.is_translation_file(entry.path()) {
            found_files.push(entry.path().to_path_buf());
        }
    }

    found_files.sort();
    Ok(found_files)
}

/// Imports every translation file of a workspace in a single batch.
///
/// Language comes from the file or directory name. When the file stem is not
/// the language it becomes a namespace prefix, so `locales/en/common.json`
/// stores `common.<key>`. Files that cannot be read, parsed or attributed to a
/// language are skipped with a warning.
pub fn import_workspace(
    store: &mut TranslationStore,
    workspace_path: &Path,
    settings: &StoreSettings,
    user: &UserScope,
) -> Result<ImportSummary, ImportError> {
    tracing::debug!(workspace_path = %workspace_path.display(), "Importing workspace");
    let delimiter = settings.key_separator;

    let mut summary = ImportSummary::default();
    let mut translations = Vec::new();

    for file_path in find_translation_files(workspace_path, settings)? {
        let Some(lang) = detect_language_from_path(&file_path) else {
            tracing::warn!("Cannot determine language of {:?}, skipping", file_path);
            summary.skipped.push(file_path);
            continue;
        };

        let tree = match load_document(&file_path) {
            Ok(tree) => tree,
            Err(e) => {
                tracing::warn!("Skipping translation file: {}", e);
                summary.skipped.push(file_path);
                continue;
            }
        };

        let namespace = detect_namespace_from_path(&file_path);
        translations.extend(flatten(&tree, delimiter).into_iter().map(|(key_path, value)| {
            let key_path = match &namespace {
                Some(ns) => format!("{ns}{delimiter}{key_path}"),
                None => key_path,
            };
            Translation::new(user.clone(), lang.as_str(), key_path, value)
        }));
        summary.files.push(file_path);
    }

    summary.written = store.upsert(&translations)?;
    tracing::info!(
        files = summary.files.len(),
        skipped = summary.skipped.len(),
        written = summary.written,
        "Workspace import finished"
    );

    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn workspace() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "locales/en.json", r#"{"topbar": {"profile": "Profile"}}"#);
        write(dir.path(), "locales/es.json", r#"{"topbar": {"profile": "Perfil"}}"#);
        write(dir.path(), "locales/ja/errors.json", r#"{"notFound": "見つかりません"}"#);
        write(dir.path(), "locales/broken/en.json", "{ not json");
        write(dir.path(), "node_modules/pkg/locales/en.json", r#"{"vendor": "x"}"#);
        write(dir.path(), "src/config.json", r#"{"not": "a translation"}"#);
        dir
    }

    #[rstest]
    fn find_translation_files_respects_patterns() {
        let dir = workspace();

        let files = find_translation_files(dir.path(), &StoreSettings::default()).unwrap();

        let relative: Vec<PathBuf> =
            files.iter().map(|f| f.strip_prefix(dir.path()).unwrap().to_path_buf()).collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("locales/broken/en.json"),
                PathBuf::from("locales/en.json"),
                PathBuf::from("locales/es.json"),
                PathBuf::from("locales/ja/errors.json"),
            ]
        );
    }

    #[rstest]
    fn import_workspace_writes_all_languages() {
        let dir = workspace();
        let mut store = TranslationStore::open_in_memory().unwrap();

        let summary =
            import_workspace(&mut store, dir.path(), &StoreSettings::default(), &UserScope::Global)
                .unwrap();

        assert_that!(summary.files.len(), eq(3));
        assert_that!(summary.skipped, elements_are![eq(&dir.path().join("locales/broken/en.json"))]);
        assert_that!(summary.written, eq(3));
        assert_that!(store.get(&UserScope::Global, "topbar.profile", "es").unwrap(), eq("Perfil"));
        assert_that!(
            store.get(&UserScope::Global, "errors.notFound", "ja").unwrap(),
            eq("見つかりません")
        );
    }

    #[rstest]
    fn import_empty_workspace_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = TranslationStore::open_in_memory().unwrap();

        let summary =
            import_workspace(&mut store, dir.path(), &StoreSettings::default(), &UserScope::Global)
                .unwrap();

        assert_eq!(summary, ImportSummary::default());
    }
}
