//! Flat key-path map -> nested JSON document.

use serde_json::{
    Map,
    Value,
};

use super::CodecError;
use crate::types::{
    EntryMap,
    FlatMap,
    TranslationEntry,
};

/// Suffix of the sibling field holding a key's tooltip.
pub const TOOLTIP_SUFFIX: &str = "_tooltip";

/// Rebuild a nested document from flat entries.
///
/// Each key is split on `delimiter`; every segment but the last becomes an
/// object (shared between keys with a common prefix) and the last segment
/// holds `value`. When the entry has a tooltip, `<last>_tooltip` is set next
/// to it, even if the tooltip is empty.
///
/// # Errors
/// [`CodecError::PathConflict`] when one key needs a segment to be an object
/// while another key stores text there (e.g. `a` and `a.b`).
pub fn unflatten(entries: &EntryMap, delimiter: char) -> Result<Value, CodecError> {
    let mut keys: Vec<&String> = entries.keys().collect();
    keys.sort();

    let mut root = Map::new();
    for key_path in keys {
        if let Some(entry) = entries.get(key_path) {
            insert_entry(&mut root, key_path, entry, delimiter)?;
        }
    }

    Ok(Value::Object(root))
}

/// Rebuild a nested document from plain values (no tooltips).
pub fn unflatten_values(flat: &FlatMap, delimiter: char) -> Result<Value, CodecError> {
    let entries: EntryMap = flat
        .iter()
        .map(|(key, value)| (key.clone(), TranslationEntry::new(value.clone())))
        .collect();
    unflatten(&entries, delimiter)
}

/// Rebuild a nested document and render it as pretty-printed JSON text.
pub fn unflatten_to_string(entries: &EntryMap, delimiter: char) -> Result<String, CodecError> {
    let document = unflatten(entries, delimiter)?;
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Places one entry into `root`, creating intermediate objects on demand.
fn insert_entry(
    root: &mut Map<String, Value>,
    key_path: &str,
    entry: &TranslationEntry,
    delimiter: char,
) -> Result<(), CodecError> {
    let conflict = || CodecError::PathConflict { key_path: key_path.to_string() };

    let (parents, field) = match key_path.rsplit_once(delimiter) {
        Some((parents, field)) => (Some(parents), field),
        None => (None, key_path),
    };

    let mut current = root;
    for segment in parents.into_iter().flat_map(|p| p.split(delimiter)) {
        let child =
            current.entry(segment.to_string()).or_insert_with(|| Value::Object(Map::new()));
        current = match child {
            Value::Object(map) => map,
            _ => return Err(conflict()),
        };
    }

    if matches!(current.get(field), Some(Value::Object(_))) {
        return Err(conflict());
    }
    current.insert(field.to_string(), Value::String(entry.value.clone()));

    if let Some(tooltip) = &entry.tooltip {
        current.insert(format!("{field}{TOOLTIP_SUFFIX}"), Value::String(tooltip.clone()));
    }

    Ok(())
}
