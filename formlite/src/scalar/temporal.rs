// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
// Date and timestamp scalar converters

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{is_blank, ScalarConverter};

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

static TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}(:\d{2}(\.\d{1,9})?)?(Z|[+-]\d{2}:?\d{2})?$")
        .expect("timestamp pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
    Date,
    Timestamp,
}

/// ISO-8601 date / timestamp scalar. Values pass through unchanged; only the
/// shape (and calendar validity) of the display string is checked.
#[derive(Debug, Clone, Copy)]
pub struct TemporalConverter {
    kind: TemporalKind,
}

impl TemporalConverter {
    pub fn new(kind: TemporalKind) -> Self {
        Self { kind }
    }

    fn is_valid(&self, text: &str) -> bool {
        match self.kind {
            TemporalKind::Date => {
                DATE_RE.is_match(text) && NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
            }
            TemporalKind::Timestamp => {
                if DATE_RE.is_match(text) {
                    return NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok();
                }
                TIMESTAMP_RE.is_match(text) && calendar_valid(text)
            }
        }
    }
}

fn calendar_valid(text: &str) -> bool {
    if DateTime::parse_from_rfc3339(text).is_ok() {
        return true;
    }
    // No offset, or minutes-only precision
    let normalized = text.replacen(' ', "T", 1);
    let without_zone = normalized.trim_end_matches('Z');
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(without_zone, format).is_ok())
}

impl ScalarConverter for TemporalConverter {
    fn validate(&self, value: &Value) -> Option<String> {
        if is_blank(value) {
            return None;
        }
        let valid = value.as_str().map(|s| self.is_valid(s.trim())).unwrap_or(false);
        if valid {
            None
        } else {
            Some(match self.kind {
                TemporalKind::Date => "Invalid date".to_string(),
                TemporalKind::Timestamp => "Invalid timestamp".to_string(),
            })
        }
    }

    fn value_to_scalar(&self, value: &Value) -> Value {
        if is_blank(value) {
            Value::Null
        } else {
            value.clone()
        }
    }
}
