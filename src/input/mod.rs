//! Translation file input

pub mod document;

pub use document::{
    LoadError,
    detect_language_from_path,
    detect_namespace_from_path,
    load_and_flatten,
    load_document,
    parse_document,
};
