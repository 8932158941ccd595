// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Per-scalar wire converters

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde_json::Value;
use std::fmt;

use super::value::GraphValue;
use crate::error::{FormError, FormResult};

/// Converts one scalar type between graph values and wire JSON.
///
/// The defaults are a plain structural conversion.
pub trait WireConverter: Send + Sync + fmt::Debug {
    fn to_wire(&self, value: &GraphValue) -> FormResult<Value> {
        Ok(value.to_json())
    }

    fn from_wire(&self, wire: &Value) -> FormResult<GraphValue> {
        Ok(GraphValue::from_json(wire))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConverter;

impl WireConverter for IdentityConverter {}

/// `Date`: UTC midnight ISO string, e.g. `2024-03-05T00:00:00.000Z`
#[derive(Debug, Clone, Copy, Default)]
pub struct DateWireConverter;

impl DateWireConverter {
    pub fn format(date: NaiveDate) -> String {
        format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
    }

    fn parse(text: &str) -> Option<NaiveDate> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.with_timezone(&Utc).date_naive());
        }
        // bare dates, or anything starting with one
        text.get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    }
}

impl WireConverter for DateWireConverter {
    fn to_wire(&self, value: &GraphValue) -> FormResult<Value> {
        match value {
            GraphValue::Null => Ok(Value::Null),
            GraphValue::Date(dt) => Ok(Value::String(Self::format(dt.date_naive()))),
            GraphValue::String(s) => Self::parse(s)
                .map(|date| Value::String(Self::format(date)))
                .ok_or_else(|| invalid("Date", format!("not a date: '{}'", s))),
            other => Err(invalid("Date", format!("cannot encode {:?}", other))),
        }
    }

    fn from_wire(&self, wire: &Value) -> FormResult<GraphValue> {
        match wire {
            Value::Null => Ok(GraphValue::Null),
            Value::String(s) => Self::parse(s)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|midnight| GraphValue::Date(Utc.from_utc_datetime(&midnight)))
                .ok_or_else(|| invalid("Date", format!("not a date: '{}'", s))),
            other => Err(invalid("Date", format!("expected a string, got {}", other))),
        }
    }
}

/// `Timestamp`: millisecond precision ISO-8601 UTC string
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampWireConverter;

impl WireConverter for TimestampWireConverter {
    fn to_wire(&self, value: &GraphValue) -> FormResult<Value> {
        match value {
            GraphValue::Null => Ok(Value::Null),
            GraphValue::Date(dt) => Ok(Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true))),
            GraphValue::String(s) => DateTime::parse_from_rfc3339(s)
                .map(|dt| {
                    Value::String(
                        dt.with_timezone(&Utc)
                            .to_rfc3339_opts(SecondsFormat::Millis, true),
                    )
                })
                .map_err(|e| invalid("Timestamp", e.to_string())),
            other => Err(invalid("Timestamp", format!("cannot encode {:?}", other))),
        }
    }

    fn from_wire(&self, wire: &Value) -> FormResult<GraphValue> {
        match wire {
            Value::Null => Ok(GraphValue::Null),
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .map(|dt| GraphValue::Date(dt.with_timezone(&Utc)))
                .map_err(|e| invalid("Timestamp", e.to_string())),
            other => Err(invalid("Timestamp", format!("expected a string, got {}", other))),
        }
    }
}

fn invalid(scalar: &str, message: String) -> FormError {
    FormError::InvalidWireValue {
        scalar: scalar.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_date_normalized_to_midnight() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 5, 17, 45, 12).unwrap();
        assert_eq!(
            DateWireConverter.to_wire(&GraphValue::Date(dt)).unwrap(),
            json!("2024-03-05T00:00:00.000Z")
        );
        assert_eq!(
            DateWireConverter.from_wire(&json!("2024-03-05")).unwrap(),
            GraphValue::Date(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap())
        );
        assert!(DateWireConverter.from_wire(&json!("yesterday")).is_err());
        assert!(DateWireConverter.from_wire(&json!(5)).is_err());
    }

    #[test]
    fn test_timestamp_millis() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 5, 17, 45, 12).unwrap();
        let wire = TimestampWireConverter.to_wire(&GraphValue::Date(dt)).unwrap();
        assert_eq!(wire, json!("2024-03-05T17:45:12.000Z"));
        assert_eq!(TimestampWireConverter.from_wire(&wire).unwrap(), GraphValue::Date(dt));
        assert_eq!(
            TimestampWireConverter
                .from_wire(&json!("2024-03-05T18:45:12+01:00"))
                .unwrap(),
            GraphValue::Date(dt)
        );
    }

    #[test]
    fn test_identity() {
        assert_eq!(IdentityConverter.to_wire(&GraphValue::Int(3)).unwrap(), json!(3));
        assert_eq!(
            IdentityConverter.from_wire(&json!("x")).unwrap(),
            GraphValue::String("x".into())
        );
    }
}
