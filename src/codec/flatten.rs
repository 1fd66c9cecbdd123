//! Nested tree -> flat key-path map.

use serde_json::Value;

use super::Node;
use crate::types::FlatMap;

/// Flatten a nested translation tree into a delimiter-joined key map.
///
/// Empty branches contribute no keys. In a well-formed tree every leaf has a
/// unique path, so the last-write-wins behaviour of the underlying map is never
/// observed.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use i18n_store::codec::{Node, flatten};
///
/// let tree = Node::from_json(&json!({
///     "topbar": {
///         "profile": "My Profile",
///         "logout": "Log Out"
///     }
/// }))
/// .unwrap_or(Node::Branch(Default::default()));
///
/// let flattened = flatten(&tree, '|');
/// assert_eq!(flattened.get("topbar|profile"), Some(&"My Profile".to_string()));
/// assert_eq!(flattened.get("topbar|logout"), Some(&"Log Out".to_string()));
/// ```
#[must_use]
pub fn flatten(tree: &Node, delimiter: char) -> FlatMap {
    let mut result = FlatMap::new();
    flatten_node(tree, delimiter, None, &mut result);
    result
}

/// Flatten a parsed JSON document. See [`Node::from_json`] for scalar conversion.
#[must_use]
pub fn flatten_json(json: &Value, delimiter: char) -> FlatMap {
    Node::from_json(json).map_or_else(FlatMap::new, |tree| flatten(&tree, delimiter))
}

/// Walks `node`, writing every leaf under `prefix` into `result`.
fn flatten_node(node: &Node, delimiter: char, prefix: Option<&str>, result: &mut FlatMap) {
    match node {
        Node::Branch(children) => {
            for (segment, child) in children {
                let full_key = prefix
                    .map_or_else(|| segment.clone(), |p| format!("{p}{delimiter}{segment}"));
                flatten_node(child, delimiter, Some(&full_key), result);
            }
        }
        Node::Leaf(text) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), text.clone());
            }
        }
    }
}
