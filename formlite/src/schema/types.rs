// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
// Core schema type definitions (GraphQL introspection shape)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Kind of a type definition or type reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Enum,
    InputObject,
    Object,
    List,
    NonNull,
    // Present in real introspection documents, never walked by the form core
    Interface,
    Union,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
            TypeKind::Object => "OBJECT",
            TypeKind::List => "LIST",
            TypeKind::NonNull => "NON_NULL",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
        }
    }

    /// Wrapper kinds carry an `ofType` instead of a name
    pub fn is_wrapper(&self) -> bool {
        matches!(self, TypeKind::List | TypeKind::NonNull)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A possibly wrapped reference to a named type definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            of_type: None,
        }
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::named(TypeKind::Scalar, name)
    }

    pub fn input_object(name: impl Into<String>) -> Self {
        Self::named(TypeKind::InputObject, name)
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self::named(TypeKind::Object, name)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::named(TypeKind::Enum, name)
    }

    pub fn non_null(inner: TypeRef) -> Self {
        Self {
            kind: TypeKind::NonNull,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    pub fn list(inner: TypeRef) -> Self {
        Self {
            kind: TypeKind::List,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    pub fn is_non_null(&self) -> bool {
        self.kind == TypeKind::NonNull
    }

    /// Strip NON_NULL wrappers. Idempotent.
    pub fn unwrap_non_null(&self) -> &TypeRef {
        let mut current = self;
        while current.kind == TypeKind::NonNull {
            match current.of_type.as_deref() {
                Some(inner) => current = inner,
                None => break,
            }
        }
        current
    }

    /// Element type of a LIST reference (NON_NULL on the list itself is skipped)
    pub fn element_type(&self) -> Option<&TypeRef> {
        let unwrapped = self.unwrap_non_null();
        if unwrapped.kind == TypeKind::List {
            unwrapped.of_type.as_deref()
        } else {
            None
        }
    }

    /// Innermost named reference, through all LIST and NON_NULL wrappers
    pub fn named_type(&self) -> &TypeRef {
        let mut current = self;
        while current.kind.is_wrapper() {
            match current.of_type.as_deref() {
                Some(inner) => current = inner,
                None => break,
            }
        }
        current
    }

    /// Name of the innermost named type
    pub fn type_name(&self) -> Option<&str> {
        self.named_type().name.as_deref()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.of_type.as_deref()) {
            (TypeKind::NonNull, Some(inner)) => write!(f, "{}!", inner),
            (TypeKind::List, Some(inner)) => write!(f, "[{}]", inner),
            _ => f.write_str(self.name.as_deref().unwrap_or("?")),
        }
    }
}

/// A named, typed field of an input object or output object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            type_ref,
            default_value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A named type definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    pub kind: TypeKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldDefinition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_fields: Option<Vec<FieldDefinition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<EnumValue>>,
}

impl TypeDefinition {
    fn bare(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: None,
            fields: None,
            input_fields: None,
            enum_values: None,
        }
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::bare(TypeKind::Scalar, name)
    }

    pub fn input_object(name: impl Into<String>, input_fields: Vec<FieldDefinition>) -> Self {
        Self {
            input_fields: Some(input_fields),
            ..Self::bare(TypeKind::InputObject, name)
        }
    }

    pub fn object(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            fields: Some(fields),
            ..Self::bare(TypeKind::Object, name)
        }
    }

    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enum_values: Some(
                values
                    .into_iter()
                    .map(|v| EnumValue {
                        name: v.into(),
                        description: None,
                    })
                    .collect(),
            ),
            ..Self::bare(TypeKind::Enum, name)
        }
    }

    pub fn is_input_object(&self) -> bool {
        self.kind == TypeKind::InputObject
    }

    pub fn input_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.input_fields
            .as_ref()
            .and_then(|fields| fields.iter().find(|f| f.name == name))
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields
            .as_ref()
            .and_then(|fields| fields.iter().find(|f| f.name == name))
    }

    pub fn enum_value_names(&self) -> Vec<&str> {
        self.enum_values
            .as_ref()
            .map(|values| values.iter().map(|v| v.name.as_str()).collect())
            .unwrap_or_default()
    }
}

/// Immutable collection of type definitions, queried by name
#[derive(Debug, Clone, Default)]
pub struct Schema {
    types: Vec<TypeDefinition>,
    by_name: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema from type definitions. A later definition with the same
    /// name shadows an earlier one.
    pub fn new(types: Vec<TypeDefinition>) -> Self {
        let by_name = types
            .iter()
            .enumerate()
            .map(|(index, def)| (def.name.clone(), index))
            .collect();
        Self { types, by_name }
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.by_name.get(name).map(|&index| &self.types[index])
    }

    /// Look up the named type a reference points at (through wrappers)
    pub fn lookup(&self, type_ref: &TypeRef) -> Option<&TypeDefinition> {
        type_ref.type_name().and_then(|name| self.get_type(name))
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_non_null_is_idempotent() {
        let t = TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::scalar("Int"))));
        let once = t.unwrap_non_null();
        assert_eq!(once.kind, TypeKind::List);
        assert_eq!(once.unwrap_non_null(), once);
    }

    #[test]
    fn test_named_type_and_display() {
        let t = TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::scalar("Int"))));
        assert_eq!(t.type_name(), Some("Int"));
        assert_eq!(t.to_string(), "[Int!]!");
        assert_eq!(t.element_type().map(|e| e.to_string()).as_deref(), Some("Int!"));
    }

    #[test]
    fn test_type_ref_deserializes_introspection_shape() {
        let json = r#"{"kind":"NON_NULL","name":null,"ofType":{"kind":"SCALAR","name":"String","ofType":null}}"#;
        let t: TypeRef = serde_json::from_str(json).unwrap();
        assert!(t.is_non_null());
        assert_eq!(t.type_name(), Some("String"));
    }

    #[test]
    fn test_schema_lookup() {
        let schema = Schema::new(vec![
            TypeDefinition::scalar("Int"),
            TypeDefinition::input_object(
                "PointInput",
                vec![FieldDefinition::new("x", TypeRef::scalar("Int"))],
            ),
        ]);
        assert_eq!(schema.len(), 2);
        let point = schema.get_type("PointInput").unwrap();
        assert!(point.is_input_object());
        assert!(point.input_field("x").is_some());
        assert!(point.input_field("y").is_none());
        assert!(schema.get_type("Missing").is_none());
    }
}
