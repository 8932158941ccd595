// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Validation error data
//!
//! Validation failures are data, not `Err` values. An [`ErrorMap`] mirrors the
//! shape of the validated value tree; an [`ErrorEntry`] is the per-path record
//! a form keeps for display.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::schema::FieldPath;

/// Errors of an object, keyed by field name
pub type ErrorMap = BTreeMap<String, ErrorNode>;

/// One node of an error tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorNode {
    Message(String),
    Object(ErrorMap),
    /// Sparse per-element errors; `None` where the element is valid
    List(Vec<Option<ErrorNode>>),
}

impl ErrorNode {
    pub fn message(&self) -> Option<&str> {
        match self {
            ErrorNode::Message(msg) => Some(msg),
            _ => None,
        }
    }

    fn collect(&self, path: FieldPath, out: &mut Vec<(FieldPath, String)>) {
        match self {
            ErrorNode::Message(msg) => out.push((path, msg.clone())),
            ErrorNode::Object(map) => collect_map(map, &path, out),
            ErrorNode::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if let Some(node) = item {
                        node.collect(path.index(index), out);
                    }
                }
            }
        }
    }
}

fn collect_map(map: &ErrorMap, prefix: &FieldPath, out: &mut Vec<(FieldPath, String)>) {
    for (field, node) in map {
        node.collect(prefix.child(field.clone()), out);
    }
}

/// Flatten an error tree into `(path, message)` pairs, depth first
pub fn flatten_errors(map: &ErrorMap) -> Vec<(FieldPath, String)> {
    let mut out = Vec::new();
    collect_map(map, &FieldPath::root(), &mut out);
    out
}

/// Errors recorded for a single field path.
///
/// By convention the raw (invalid) user input comes first and the human
/// readable messages follow; [`ErrorEntry::to_list`] produces that list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub path: FieldPath,
    pub raw_value: Value,
    pub messages: Vec<String>,
}

impl ErrorEntry {
    pub fn new(path: FieldPath, raw_value: Value, message: impl Into<String>) -> Self {
        Self {
            path,
            raw_value,
            messages: vec![message.into()],
        }
    }

    /// The first human readable message
    pub fn message(&self) -> Option<&str> {
        self.messages.first().map(String::as_str)
    }

    /// `[raw_value, message, ...]`
    pub fn to_list(&self) -> Vec<Value> {
        std::iter::once(self.raw_value.clone())
            .chain(self.messages.iter().cloned().map(Value::String))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_tree() {
        let mut inner = ErrorMap::new();
        inner.insert("city".into(), ErrorNode::Message("Required".into()));

        let mut map = ErrorMap::new();
        map.insert("name".into(), ErrorNode::Message("Required".into()));
        map.insert(
            "addresses".into(),
            ErrorNode::List(vec![None, Some(ErrorNode::Object(inner))]),
        );

        let flat: Vec<(String, String)> = flatten_errors(&map)
            .into_iter()
            .map(|(p, m)| (p.to_string(), m))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("addresses.1.city".to_string(), "Required".to_string()),
                ("name".to_string(), "Required".to_string()),
            ]
        );
    }

    #[test]
    fn test_error_tree_serializes_like_values() {
        let mut map = ErrorMap::new();
        map.insert(
            "scores".into(),
            ErrorNode::List(vec![None, Some(ErrorNode::Message("Invalid integer".into()))]),
        );
        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            json!({"scores": [null, "Invalid integer"]})
        );
    }

    #[test]
    fn test_entry_list_convention() {
        let entry = ErrorEntry::new(FieldPath::parse("age").unwrap(), json!("abc"), "Invalid integer");
        assert_eq!(entry.to_list(), vec![json!("abc"), json!("Invalid integer")]);
        assert_eq!(entry.message(), Some("Invalid integer"));
    }
}
