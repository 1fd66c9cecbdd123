//! Conversion between nested translation documents and flat key-path maps.

mod flatten;
mod node;
mod unflatten;

use thiserror::Error;

pub use flatten::{
    flatten,
    flatten_json,
};
pub use node::Node;
pub use unflatten::{
    TOOLTIP_SUFFIX,
    unflatten,
    unflatten_to_string,
    unflatten_values,
};

/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: char = '.';

#[derive(Error, Debug)]
pub enum CodecError {
    /// A key path needs a segment to be both text and an object.
    #[error("Key path '{key_path}' conflicts with another key sharing its prefix")]
    PathConflict { key_path: String },

    #[error("Failed to render JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}
