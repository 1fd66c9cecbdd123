//! Core types used throughout the project.

use std::collections::HashMap;
use std::fmt;

/// Flattened translation map (e.g., `"topbar.profile"` -> `"My Profile"`).
pub type FlatMap = HashMap<String, String>;

/// Flattened translation map carrying the tooltip side-channel.
pub type EntryMap = HashMap<String, TranslationEntry>;

/// Owner of a translation row.
///
/// `Global` is the default every user falls back to. It is not "unset":
/// lookups for any user also consider global rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum UserScope {
    #[default]
    Global,
    User(String),
}

impl UserScope {
    #[must_use]
    pub fn user(id: impl Into<String>) -> Self {
        Self::User(id.into())
    }

    /// The user identifier as stored in the `user_id` column (`None` for global rows).
    #[must_use]
    pub fn as_user_id(&self) -> Option<&str> {
        match self {
            Self::Global => None,
            Self::User(id) => Some(id),
        }
    }

    #[must_use]
    pub const fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }
}

impl From<Option<String>> for UserScope {
    fn from(user_id: Option<String>) -> Self {
        user_id.map_or(Self::Global, Self::User)
    }
}

impl fmt::Display for UserScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("<global>"),
            Self::User(id) => f.write_str(id),
        }
    }
}

/// A single translation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub user: UserScope,
    pub lang: String,
    pub key_path: String,
    pub value: String,
    pub tooltip: Option<String>,
}

impl Translation {
    #[must_use]
    pub fn new(
        user: UserScope,
        lang: impl Into<String>,
        key_path: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            user,
            lang: lang.into(),
            key_path: key_path.into(),
            value: value.into(),
            tooltip: None,
        }
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// Value of one key together with its optional tooltip.
///
/// `tooltip: None` and `tooltip: Some("")` are different: only the latter
/// produces a `<key>_tooltip` field when unflattened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationEntry {
    pub value: String,
    pub tooltip: Option<String>,
}

impl TranslationEntry {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(), tooltip: None }
    }

    #[must_use]
    pub fn with_tooltip(value: impl Into<String>, tooltip: impl Into<String>) -> Self {
        Self { value: value.into(), tooltip: Some(tooltip.into()) }
    }
}
