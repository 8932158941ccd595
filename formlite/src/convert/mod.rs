// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Conversion between wire values and display values
//!
//! Wire values are schema-native (`Int` is a JSON number, `Currency` a scaled
//! integer). Display values are what a form control edits, mostly strings.
//! The walk follows the type graph: NON_NULL unwraps, INPUT_OBJECT recurses
//! over every declared field, LIST maps element-wise, SCALAR goes through the
//! scalar registry and ENUM passes through.

use serde_json::{Map, Value};

use crate::error::{FormError, FormResult};
use crate::scalar::ScalarRegistry;
use crate::schema::{Schema, TypeKind, TypeRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Wire value -> display value
    ToDisplay,
    /// Display value -> wire value
    ToWire,
}

/// Convert a single value of the given type
pub fn convert_value(
    schema: &Schema,
    registry: &ScalarRegistry,
    type_ref: &TypeRef,
    value: &Value,
    direction: Direction,
) -> FormResult<Value> {
    match type_ref.kind {
        TypeKind::NonNull => match type_ref.of_type.as_deref() {
            Some(inner) => convert_value(schema, registry, inner, value, direction),
            None => Ok(value.clone()),
        },
        TypeKind::Scalar => Ok(convert_scalar(registry, type_ref, value, direction)),
        TypeKind::Enum => Ok(value.clone()),
        TypeKind::List => {
            let items = match value {
                Value::Array(items) => items,
                _ => return Ok(Value::Null),
            };
            let element = match type_ref.of_type.as_deref() {
                Some(element) => element,
                None => return Ok(value.clone()),
            };
            items
                .iter()
                .map(|item| convert_value(schema, registry, element, item, direction))
                .collect::<FormResult<Vec<_>>>()
                .map(Value::Array)
        }
        TypeKind::InputObject => {
            let map = match value {
                Value::Object(map) => map,
                _ => return Ok(Value::Null),
            };
            let type_name = type_ref.name.as_deref().unwrap_or_default();
            convert_object(schema, registry, type_name, map, direction).map(Value::Object)
        }
        TypeKind::Object | TypeKind::Interface | TypeKind::Union => Ok(value.clone()),
    }
}

fn convert_scalar(
    registry: &ScalarRegistry,
    type_ref: &TypeRef,
    value: &Value,
    direction: Direction,
) -> Value {
    let name = type_ref.name.as_deref().unwrap_or_default();
    let converter = registry.get(name);

    match direction {
        Direction::ToDisplay => {
            let converted = match (converter, value) {
                (_, Value::Null) => Value::Null,
                (Some(converter), value) => converter.scalar_to_value(value),
                (None, value) => value.clone(),
            };
            // Text inputs never see a missing value
            if converted.is_null() && name != "Boolean" {
                Value::String(String::new())
            } else {
                converted
            }
        }
        Direction::ToWire => match converter {
            Some(converter) => converter.value_to_scalar(value),
            None => value.clone(),
        },
    }
}

fn convert_object(
    schema: &Schema,
    registry: &ScalarRegistry,
    type_name: &str,
    values: &Map<String, Value>,
    direction: Direction,
) -> FormResult<Map<String, Value>> {
    let definition = schema
        .get_type(type_name)
        .filter(|def| def.is_input_object())
        .ok_or_else(|| FormError::UnknownInputType(type_name.to_string()))?;

    let mut out = Map::new();
    for field in definition.input_fields.iter().flatten() {
        let value = values.get(&field.name).unwrap_or(&Value::Null);
        out.insert(
            field.name.clone(),
            convert_value(schema, registry, &field.type_ref, value, direction)?,
        );
    }
    Ok(out)
}

fn convert_root(
    schema: &Schema,
    registry: &ScalarRegistry,
    type_name: &str,
    root: &Value,
    direction: Direction,
) -> FormResult<Value> {
    if !schema
        .get_type(type_name)
        .map(|def| def.is_input_object())
        .unwrap_or(false)
    {
        return Err(FormError::UnknownInputType(type_name.to_string()));
    }

    match root {
        Value::Object(map) if !map.is_empty() => {
            convert_object(schema, registry, type_name, map, direction).map(Value::Object)
        }
        _ => Err(FormError::EmptyRoot(type_name.to_string())),
    }
}

/// Convert a wire value tree of an input type to display values
pub fn to_display_values(
    schema: &Schema,
    registry: &ScalarRegistry,
    type_name: &str,
    wire: &Value,
) -> FormResult<Value> {
    convert_root(schema, registry, type_name, wire, Direction::ToDisplay)
}

/// Convert a display value tree of an input type back to wire values
pub fn to_wire_values(
    schema: &Schema,
    registry: &ScalarRegistry,
    type_name: &str,
    display: &Value,
) -> FormResult<Value> {
    convert_root(schema, registry, type_name, display, Direction::ToWire)
}
