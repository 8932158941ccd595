// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Typed object graph values

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};

/// A value of a typed object graph
#[derive(Debug, Clone, PartialEq)]
pub enum GraphValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(DateTime<Utc>),
    List(Vec<GraphValue>),
    Object(TypedObject),
}

impl GraphValue {
    pub fn is_null(&self) -> bool {
        matches!(self, GraphValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GraphValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            GraphValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            GraphValue::Date(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&TypedObject> {
        match self {
            GraphValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Plain structural conversion from JSON; objects come out untyped
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => GraphValue::Null,
            Value::Bool(b) => GraphValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => GraphValue::Int(i),
                None => GraphValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => GraphValue::String(s.clone()),
            Value::Array(items) => GraphValue::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => {
                let mut obj = TypedObject::untyped();
                for (name, value) in map {
                    obj.set(name.clone(), Self::from_json(value));
                }
                GraphValue::Object(obj)
            }
        }
    }

    /// Plain structural conversion to JSON. Type names are dropped, dates
    /// become millisecond ISO-8601 strings and non-finite floats become null.
    pub fn to_json(&self) -> Value {
        match self {
            GraphValue::Null => Value::Null,
            GraphValue::Bool(b) => Value::Bool(*b),
            GraphValue::Int(n) => Value::Number((*n).into()),
            GraphValue::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
            GraphValue::String(s) => Value::String(s.clone()),
            GraphValue::Date(dt) => Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            GraphValue::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            GraphValue::Object(obj) => Value::Object(
                obj.fields()
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

impl From<TypedObject> for GraphValue {
    fn from(obj: TypedObject) -> Self {
        GraphValue::Object(obj)
    }
}

impl From<&str> for GraphValue {
    fn from(s: &str) -> Self {
        GraphValue::String(s.to_string())
    }
}

impl From<i64> for GraphValue {
    fn from(n: i64) -> Self {
        GraphValue::Int(n)
    }
}

impl From<bool> for GraphValue {
    fn from(b: bool) -> Self {
        GraphValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for GraphValue {
    fn from(dt: DateTime<Utc>) -> Self {
        GraphValue::Date(dt)
    }
}

/// Object with an optional schema type name and fields in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypedObject {
    type_name: Option<String>,
    fields: Vec<(String, GraphValue)>,
}

impl TypedObject {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            fields: Vec::new(),
        }
    }

    pub fn untyped() -> Self {
        Self::default()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn is_typed(&self) -> bool {
        self.type_name.is_some()
    }

    pub fn fields(&self) -> &[(String, GraphValue)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&GraphValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set a field, replacing an existing value in place
    pub fn set(&mut self, name: impl Into<String>, value: GraphValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<GraphValue>) -> Self {
        self.set(name, value.into());
        self
    }
}
