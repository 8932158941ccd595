// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Wire format conversion
//!
//! Converts typed object graphs ([`GraphValue`]) to and from their plain JSON
//! wire shape. The walk follows the schema's object field lists; scalars go
//! through a converter table of their own, separate from the form scalar
//! registry. Typed objects carry their type name in a tag property (`_type`
//! unless configured otherwise).

pub mod converters;
pub mod value;

pub use converters::{DateWireConverter, IdentityConverter, TimestampWireConverter, WireConverter};
pub use value::{GraphValue, TypedObject};

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{FormError, FormResult};
use crate::schema::{FieldDefinition, Schema, TypeKind, TypeRef};

/// Default name of the type tag property
pub const DEFAULT_TYPE_TAG: &str = "_type";

/// Creates the prototype instance of a type on decode
pub type ObjectFactory = dyn Fn() -> TypedObject + Send + Sync;

#[derive(Clone, Copy)]
enum Direction {
    Encode,
    Decode,
}

pub struct WireFormat {
    schema: Arc<Schema>,
    converters: HashMap<String, Arc<dyn WireConverter>>,
    factories: HashMap<String, Arc<ObjectFactory>>,
    type_tag: String,
}

impl WireFormat {
    /// Wire format with the `Date` and `Timestamp` converters registered
    pub fn new(schema: Arc<Schema>) -> Self {
        let mut format = Self {
            schema,
            converters: HashMap::new(),
            factories: HashMap::new(),
            type_tag: DEFAULT_TYPE_TAG.to_string(),
        };
        format.register_converter("Date", Arc::new(DateWireConverter));
        format.register_converter("Timestamp", Arc::new(TimestampWireConverter));
        format
    }

    pub fn with_type_tag(mut self, tag: impl Into<String>) -> Self {
        self.type_tag = tag.into();
        self
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn register_converter(&mut self, scalar: impl Into<String>, converter: Arc<dyn WireConverter>) {
        let scalar = scalar.into();
        log::debug!("Registering wire converter for '{}'", scalar);
        self.converters.insert(scalar, converter);
    }

    /// Decode objects of `type_name` into instances built by `factory`
    pub fn register_factory<F>(&mut self, type_name: impl Into<String>, factory: F)
    where
        F: Fn() -> TypedObject + Send + Sync + 'static,
    {
        self.factories.insert(type_name.into(), Arc::new(factory));
    }

    /// Encode a graph value. The type name is taken from `type_name` or, for
    /// typed objects, from the object itself.
    pub fn to_wire(&self, type_name: Option<&str>, value: &GraphValue) -> FormResult<Value> {
        match value {
            GraphValue::Null => Ok(Value::Null),
            GraphValue::List(items) => items
                .iter()
                .map(|item| self.to_wire(type_name, item))
                .collect::<FormResult<Vec<_>>>()
                .map(Value::Array),
            GraphValue::Object(obj) => {
                let name = type_name
                    .or_else(|| obj.type_name())
                    .ok_or_else(|| self.missing_tag())?;
                self.encode_object(name, obj).map(Value::Object)
            }
            other => Err(FormError::InvalidWireValue {
                scalar: type_name.unwrap_or("?").to_string(),
                message: format!("expected an object, got {:?}", other),
            }),
        }
    }

    /// Decode a wire value. The type name is taken from `type_name` or from
    /// the object's type tag property.
    pub fn from_wire(&self, type_name: Option<&str>, wire: &Value) -> FormResult<GraphValue> {
        match wire {
            Value::Null => Ok(GraphValue::Null),
            Value::Array(items) => items
                .iter()
                .map(|item| self.from_wire(type_name, item))
                .collect::<FormResult<Vec<_>>>()
                .map(GraphValue::List),
            Value::Object(map) => {
                let name = match type_name {
                    Some(name) => name,
                    None => self.tag_of(map).ok_or_else(|| self.missing_tag())?,
                };
                self.decode_object(name, map).map(GraphValue::Object)
            }
            other => Err(FormError::InvalidWireValue {
                scalar: type_name.unwrap_or("?").to_string(),
                message: format!("expected an object, got {}", other),
            }),
        }
    }

    fn encode_object(&self, type_name: &str, obj: &TypedObject) -> FormResult<Map<String, Value>> {
        let fields = self.field_list(type_name, Direction::Encode)?;

        let mut out = Map::new();
        if let Some(name) = obj.type_name() {
            out.insert(self.type_tag.clone(), Value::String(name.to_string()));
        }
        for field in fields {
            if let Some(value) = obj.get(&field.name) {
                out.insert(field.name.clone(), self.encode_typed(&field.type_ref, value)?);
            }
        }
        Ok(out)
    }

    fn encode_typed(&self, type_ref: &TypeRef, value: &GraphValue) -> FormResult<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        match type_ref.kind {
            TypeKind::NonNull | TypeKind::List => {
                let inner = match type_ref.of_type.as_deref() {
                    Some(inner) => inner,
                    None => return Ok(value.to_json()),
                };
                match (type_ref.kind, value) {
                    (TypeKind::List, GraphValue::List(items)) => items
                        .iter()
                        .map(|item| self.encode_typed(inner, item))
                        .collect::<FormResult<Vec<_>>>()
                        .map(Value::Array),
                    _ => self.encode_typed(inner, value),
                }
            }
            TypeKind::Scalar => self.converter(type_ref).to_wire(value),
            TypeKind::Enum => Ok(value.to_json()),
            TypeKind::Object | TypeKind::InputObject | TypeKind::Interface | TypeKind::Union => {
                match value {
                    GraphValue::Object(obj) => {
                        let name = obj
                            .type_name()
                            .or(type_ref.name.as_deref())
                            .ok_or_else(|| self.missing_tag())?;
                        self.encode_object(name, obj).map(Value::Object)
                    }
                    other => Ok(other.to_json()),
                }
            }
        }
    }

    fn decode_object(&self, type_name: &str, map: &Map<String, Value>) -> FormResult<TypedObject> {
        let fields = self.field_list(type_name, Direction::Decode)?;

        let mut obj = match self.factories.get(type_name) {
            Some(factory) => factory(),
            None => TypedObject::untyped(),
        };
        for field in fields {
            if let Some(value) = map.get(&field.name) {
                obj.set(field.name.clone(), self.decode_typed(&field.type_ref, value)?);
            }
        }
        Ok(obj)
    }

    fn decode_typed(&self, type_ref: &TypeRef, wire: &Value) -> FormResult<GraphValue> {
        if wire.is_null() {
            return Ok(GraphValue::Null);
        }
        match type_ref.kind {
            TypeKind::NonNull | TypeKind::List => {
                let inner = match type_ref.of_type.as_deref() {
                    Some(inner) => inner,
                    None => return Ok(GraphValue::from_json(wire)),
                };
                match (type_ref.kind, wire) {
                    (TypeKind::List, Value::Array(items)) => items
                        .iter()
                        .map(|item| self.decode_typed(inner, item))
                        .collect::<FormResult<Vec<_>>>()
                        .map(GraphValue::List),
                    _ => self.decode_typed(inner, wire),
                }
            }
            TypeKind::Scalar => self.converter(type_ref).from_wire(wire),
            TypeKind::Enum => Ok(GraphValue::from_json(wire)),
            TypeKind::Object | TypeKind::InputObject | TypeKind::Interface | TypeKind::Union => {
                match wire {
                    Value::Object(map) => {
                        let name = self
                            .tag_of(map)
                            .or(type_ref.name.as_deref())
                            .ok_or_else(|| self.missing_tag())?;
                        self.decode_object(name, map).map(GraphValue::Object)
                    }
                    other => Ok(GraphValue::from_json(other)),
                }
            }
        }
    }

    /// Decoding reads `fields`; encoding falls back to `inputFields` for
    /// input object types
    fn field_list(&self, type_name: &str, direction: Direction) -> FormResult<&[FieldDefinition]> {
        let definition = self
            .schema
            .get_type(type_name)
            .ok_or_else(|| FormError::UnknownType(type_name.to_string()))?;

        let fields = match direction {
            Direction::Decode => definition.fields.as_deref(),
            Direction::Encode => definition
                .fields
                .as_deref()
                .or(definition.input_fields.as_deref()),
        };
        fields.ok_or_else(|| FormError::MissingFields {
            type_name: type_name.to_string(),
            expected: match direction {
                Direction::Decode => "fields",
                Direction::Encode => "fields or inputFields",
            },
        })
    }

    fn converter(&self, type_ref: &TypeRef) -> &dyn WireConverter {
        type_ref
            .name
            .as_deref()
            .and_then(|name| self.converters.get(name))
            .map(|converter| converter.as_ref())
            .unwrap_or(&IdentityConverter)
    }

    fn tag_of<'m>(&self, map: &'m Map<String, Value>) -> Option<&'m str> {
        map.get(&self.type_tag).and_then(Value::as_str)
    }

    fn missing_tag(&self) -> FormError {
        FormError::MissingTypeTag {
            tag: self.type_tag.clone(),
        }
    }
}

impl fmt::Debug for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut converters: Vec<&String> = self.converters.keys().collect();
        converters.sort();
        let mut factories: Vec<&String> = self.factories.keys().collect();
        factories.sort();
        f.debug_struct("WireFormat")
            .field("schema_types", &self.schema.len())
            .field("converters", &converters)
            .field("factories", &factories)
            .field("type_tag", &self.type_tag)
            .finish()
    }
}
