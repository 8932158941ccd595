// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
// Boolean scalar converter

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{is_blank, ScalarConverter};

static BOOLEAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(true|false)$").expect("boolean pattern is valid"));

/// `Boolean`: displayed as `"true"` / `"false"`, JSON booleans accepted as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanConverter;

impl ScalarConverter for BooleanConverter {
    fn validate(&self, value: &Value) -> Option<String> {
        match value {
            Value::Bool(_) => None,
            Value::String(s) if !is_blank(value) && !BOOLEAN_RE.is_match(s) => {
                Some("Invalid boolean".to_string())
            }
            Value::String(_) | Value::Null => None,
            _ => Some("Invalid boolean".to_string()),
        }
    }

    fn scalar_to_value(&self, scalar: &Value) -> Value {
        match scalar {
            Value::Bool(b) => Value::String(b.to_string()),
            other => other.clone(),
        }
    }

    fn value_to_scalar(&self, value: &Value) -> Value {
        match value {
            Value::Bool(b) => Value::Bool(*b),
            Value::String(_) if is_blank(value) => Value::Null,
            Value::String(s) => Value::Bool(s == "true"),
            _ => Value::Null,
        }
    }
}
