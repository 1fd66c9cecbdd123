//! Nested translation tree.

use std::collections::BTreeMap;

use serde_json::{
    Map,
    Number,
    Value,
};

/// A node of a nested translation document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(String),
    Branch(BTreeMap<String, Self>),
}

impl Node {
    /// Builds a tree from a parsed JSON document.
    ///
    /// Non-string scalars are converted to text (`1.0` -> `"1"`, `true` -> `"true"`).
    /// Arrays become branches keyed by element index. `null` yields `None` and is
    /// dropped by the enclosing branch, like an empty object.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::Leaf(s.clone())),
            Value::Bool(b) => Some(Self::Leaf(b.to_string())),
            Value::Number(n) => Some(Self::Leaf(number_to_text(n))),
            Value::Array(items) => Some(Self::Branch(
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(index, item)| {
                        Self::from_json(item).map(|node| (index.to_string(), node))
                    })
                    .collect(),
            )),
            Value::Object(map) => Some(Self::Branch(
                map.iter()
                    .filter_map(|(key, item)| Self::from_json(item).map(|node| (key.clone(), node)))
                    .collect(),
            )),
        }
    }

    /// Converts the tree back into a JSON value with string leaves.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Leaf(text) => Value::String(text.clone()),
            Self::Branch(children) => Value::Object(
                children.iter().map(|(key, node)| (key.clone(), node.to_json())).collect::<Map<_, _>>(),
            ),
        }
    }
}

/// Canonical text for a JSON number.
///
/// Integers print in decimal; floats use the shortest representation that
/// round-trips, which drops a trailing `.0`.
fn number_to_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(json!(1.0), "1")]
    #[case(json!(1.5), "1.5")]
    #[case(json!(42), "42")]
    #[case(json!(-7), "-7")]
    #[case(json!(u64::MAX), "18446744073709551615")]
    #[case(json!(true), "true")]
    #[case(json!(false), "false")]
    #[case(json!("text"), "text")]
    fn scalar_becomes_leaf(#[case] value: Value, #[case] expected: &str) {
        assert_that!(Node::from_json(&value), some(eq(&Node::Leaf(expected.to_string()))));
    }

    #[rstest]
    fn null_is_dropped() {
        let tree = Node::from_json(&json!({ "a": null, "b": "B" }));

        let expected = Node::Branch(BTreeMap::from([("b".to_string(), Node::Leaf("B".to_string()))]));
        assert_that!(tree, some(eq(&expected)));
    }

    #[rstest]
    fn array_elements_are_indexed() {
        let tree = Node::from_json(&json!({ "items": ["apple", "banana"] }));

        let items = Node::Branch(BTreeMap::from([
            ("0".to_string(), Node::Leaf("apple".to_string())),
            ("1".to_string(), Node::Leaf("banana".to_string())),
        ]));
        let expected = Node::Branch(BTreeMap::from([("items".to_string(), items)]));
        assert_that!(tree, some(eq(&expected)));
    }

    #[rstest]
    fn to_json_round_trips_string_trees() {
        let value = json!({ "topbar": { "profile": "My Profile", "logout": "Log Out" } });

        let tree = Node::from_json(&value);

        assert_eq!(tree.map(|node| node.to_json()), Some(value));
    }
}
