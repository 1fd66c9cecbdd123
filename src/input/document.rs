//! Translation document loading

use std::path::{
    Path,
    PathBuf,
};

use jsonc_parser::ParseOptions;
use serde_json::Value;
use thiserror::Error;

use crate::codec::{
    Node,
    flatten,
};
use crate::types::FlatMap;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read translation file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse translation document: {0}")]
    Parse(String),

    /// The document parsed but its top level is not an object.
    #[error("Translation document must be a JSON object")]
    NotAnObject,

    #[error("Invalid translation file '{}': {source}", .path.display())]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: Box<Self>,
    },
}

/// Parse translation document text into a tree.
///
/// Comments and trailing commas are accepted.
///
/// # Errors
/// - Text is not valid JSON(C)
/// - The top level is not an object
pub fn parse_document(text: &str) -> Result<Node, LoadError> {
    let value = jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
        .map_err(|e| LoadError::Parse(e.to_string()))?;

    match value {
        Some(json @ Value::Object(_)) => Node::from_json(&json).ok_or(LoadError::NotAnObject),
        _ => Err(LoadError::NotAnObject),
    }
}

/// Read and parse a translation file.
///
/// # Errors
/// Returns error if file read or parse fails.
pub fn load_document(file_path: &Path) -> Result<Node, LoadError> {
    tracing::debug!(path = %file_path.display(), "Loading translation document");

    let content = std::fs::read_to_string(file_path)
        .map_err(|source| LoadError::Read { path: file_path.to_path_buf(), source })?;

    parse_document(&content).map_err(|source| LoadError::InvalidFile {
        path: file_path.to_path_buf(),
        source: Box::new(source),
    })
}

/// Read a translation file and flatten its keys.
///
/// # Errors
/// Returns error if file read or parse fails. No partial result is returned.
pub fn load_and_flatten(file_path: &Path, delimiter: char) -> Result<FlatMap, LoadError> {
    let tree = load_document(file_path)?;
    Ok(flatten(&tree, delimiter))
}

/// Check whether a path segment looks like a BCP 47 language tag.
///
/// Accepts `en`, `ja-JP`, `en_US`, `zh-Hant-TW`, `kok`. Matching is purely
/// syntactic; the tag is never validated against a registry.
fn looks_like_language_tag(candidate: &str) -> bool {
    let mut subtags = candidate.split(&['-', '_']);

    let Some(primary) = subtags.next() else {
        return false;
    };
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    subtags.all(|subtag| {
        (2..=8).contains(&subtag.len()) && subtag.chars().all(|c| c.is_ascii_alphanumeric())
    })
}

/// Detect language from file path.
///
/// The file stem wins when it looks like a language tag, otherwise the parent
/// directory name is tried.
///
/// # Examples
/// - `locales/en.json` → `en`
/// - `messages/ja-JP.json` → `ja-JP`
/// - `translations/en_US/common.json` → `en_US`
#[must_use]
pub fn detect_language_from_path(file_path: &Path) -> Option<String> {
    let file_stem = file_path.file_stem()?.to_string_lossy();
    if looks_like_language_tag(&file_stem) {
        return Some(file_stem.into_owned());
    }

    let parent_name = file_path.parent()?.file_name()?.to_string_lossy();
    looks_like_language_tag(&parent_name).then(|| parent_name.into_owned())
}

/// Detect namespace from file path.
///
/// The file stem is the namespace unless it is the language itself.
///
/// # Examples
/// - `locales/en/common.json` -> Some("common")
/// - `locales/en.json` -> None
#[must_use]
pub fn detect_namespace_from_path(file_path: &Path) -> Option<String> {
    let file_stem = file_path.file_stem()?.to_string_lossy();
    (!looks_like_language_tag(&file_stem)).then(|| file_stem.into_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[googletest::test]
    fn load_and_flatten_simple_nested() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "test.json", r#"{"greetings": {"hello": "Hello!", "bye": "Goodbye!"}}"#);

        let result = load_and_flatten(&path, '.').unwrap();

        expect_that!(result.get("greetings.hello"), some(eq(&"Hello!".to_string())));
        expect_that!(result.get("greetings.bye"), some(eq(&"Goodbye!".to_string())));
        expect_that!(result.len(), eq(2));
    }

    #[googletest::test]
    fn load_and_flatten_multi_level() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "test.json",
            r#"{"menu": {"file": {"open": "Open", "close": "Close"}}}"#,
        );

        let result = load_and_flatten(&path, '.').unwrap();

        expect_that!(result.get("menu.file.open"), some(eq(&"Open".to_string())));
        expect_that!(result.get("menu.file.close"), some(eq(&"Close".to_string())));
    }

    #[googletest::test]
    fn load_and_flatten_accepts_comments_and_trailing_commas() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "test.json",
            "{\n  // shown in the header\n  \"title\": \"Dashboard\",\n}\n",
        );

        let result = load_and_flatten(&path, '.').unwrap();

        expect_that!(result.get("title"), some(eq(&"Dashboard".to_string())));
    }

    #[rstest]
    fn load_and_flatten_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "invalid.json", "{invalid json}");

        let result = load_and_flatten(&path, '.');

        assert!(matches!(result, Err(LoadError::InvalidFile { .. })), "got {result:?}");
    }

    #[rstest]
    fn load_and_flatten_file_not_found() {
        let result = load_and_flatten(Path::new("non_existent_file.json"), '.');

        assert!(matches!(result, Err(LoadError::Read { .. })), "got {result:?}");
    }

    #[rstest]
    #[case("[\"a\", \"b\"]")]
    #[case("\"text\"")]
    #[case("")]
    fn parse_document_requires_object(#[case] text: &str) {
        let result = parse_document(text);

        assert!(matches!(result, Err(LoadError::NotAnObject)), "got {result:?}");
    }

    #[rstest]
    #[case("/path/to/locales/en.json", Some("en"))]
    #[case("/path/to/messages/ja-JP.json", Some("ja-JP"))]
    #[case("/path/to/translations/en_US/common.json", Some("en_US"))]
    #[case("/path/to/locales/zh-Hant-TW/common.json", Some("zh-Hant-TW"))]
    #[case("/path/to/locales/common/trans.json", None)]
    #[case("/path/to/locales/english.json", None)]
    fn test_detect_language_from_path(#[case] path: &str, #[case] expected: Option<&str>) {
        let result = detect_language_from_path(Path::new(path));
        assert_eq!(result.as_deref(), expected);
    }

    #[rstest]
    #[case("/path/to/locales/en/common.json", Some("common"))]
    #[case("/path/to/locales/ja/errors.json", Some("errors"))]
    #[case("/path/to/locales/en.json", None)]
    #[case("/path/to/i18n/pt-BR.json", None)]
    fn test_detect_namespace_from_path(#[case] path: &str, #[case] expected: Option<&str>) {
        let result = detect_namespace_from_path(Path::new(path));
        assert_eq!(result.as_deref(), expected);
    }
}
