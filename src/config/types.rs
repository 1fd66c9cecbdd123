use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::codec::DEFAULT_DELIMITER;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., `translationFiles.includePatterns[0]`)
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Renders validation errors as a numbered list, one per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    /// Joins nested segments into key paths (`topbar.profile`).
    pub key_separator: char,

    pub database: DatabaseConfig,
    pub translation_files: TranslationFilesConfig,

    /// Applied to every workspace walk, on top of `translationFiles.excludePatterns`.
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseConfig {
    /// `SQLite` database file, relative to the workspace root.
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "translations.db".to_string() }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self {
            include_patterns: vec!["**/{locales,messages}/**/*.json".to_string()],
            exclude_patterns: Vec::new(),
        }
    }
}

impl StoreSettings {
    /// # Errors
    /// - Invalid separator
    /// - Required field is empty
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        // `_` は `_tooltip` サフィックスと衝突する
        if self.key_separator.is_whitespace()
            || self.key_separator.is_alphanumeric()
            || self.key_separator == '_'
        {
            errors.push(ValidationError::new(
                "keySeparator",
                format!(
                    "'{}' cannot be used as a separator. Use a punctuation character, for example: \".\" (dot) or \"|\"",
                    self.key_separator.escape_default()
                ),
            ));
        }

        if self.database.path.trim().is_empty() {
            errors.push(ValidationError::new(
                "database.path",
                "The path cannot be empty. Example: \"translations.db\"",
            ));
        }

        if self.translation_files.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.includePatterns",
                "At least one pattern is required. Example: [\"**/locales/**/*.json\"]",
            ));
        }

        let pattern_groups = [
            ("translationFiles.includePatterns", &self.translation_files.include_patterns),
            ("translationFiles.excludePatterns", &self.translation_files.exclude_patterns),
            ("excludePatterns", &self.exclude_patterns),
        ];
        for (field, patterns) in pattern_groups {
            for (index, pattern) in patterns.iter().enumerate() {
                if let Err(e) = globset::Glob::new(pattern) {
                    errors.push(ValidationError::new(
                        format!("{field}[{index}]"),
                        format!("Invalid glob pattern '{pattern}': {e}"),
                    ));
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            key_separator: DEFAULT_DELIMITER,
            database: DatabaseConfig::default(),
            translation_files: TranslationFilesConfig::default(),
            exclude_patterns: vec!["node_modules/**".to_string()],
        }
    }
}
