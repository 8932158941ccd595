// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Field type resolution
//!
//! Walks the schema type graph from a root input type along a field path and
//! returns the declared type reference of the field the path points at.

use crate::error::{FormError, FormResult};
use crate::schema::path::{FieldPath, PathSegment};
use crate::schema::types::{Schema, TypeKind, TypeRef};

/// Resolve the type of `path` starting at the input type named `root_type_name`.
///
/// List indices in the path are consumed by the list unwrap and never need to
/// match anything; a named segment directly after a list continues in the
/// list's element type.
pub fn resolve_type(schema: &Schema, root_type_name: &str, path: &FieldPath) -> FormResult<TypeRef> {
    let root = schema
        .get_type(root_type_name)
        .ok_or_else(|| FormError::UnknownType(root_type_name.to_string()))?;

    let mut current = TypeRef::named(root.kind, root.name.clone());
    let segments = path.segments();
    let mut position = 0;

    while position < segments.len() {
        let mut unwrapped = current.unwrap_non_null().clone();

        if unwrapped.kind == TypeKind::List {
            unwrapped = match unwrapped.of_type.take() {
                Some(element) => *element,
                None => return Err(invalid_schema_type(path, position, &unwrapped)),
            };
            if let PathSegment::Index(_) = segments[position] {
                position += 1;
                current = unwrapped;
                continue;
            }
            unwrapped = unwrapped.unwrap_non_null().clone();
        }

        let field_name = match &segments[position] {
            PathSegment::Field(name) => name,
            PathSegment::Index(_) => return Err(invalid_schema_type(path, position, &unwrapped)),
        };

        let type_name = match (unwrapped.kind, unwrapped.name.as_deref()) {
            (TypeKind::InputObject, Some(name)) => name,
            _ => return Err(invalid_schema_type(path, position, &unwrapped)),
        };

        let definition = schema
            .get_type(type_name)
            .ok_or_else(|| FormError::UnknownType(type_name.to_string()))?;
        if !definition.is_input_object() {
            return Err(invalid_schema_type(path, position, &unwrapped));
        }

        let field = definition
            .input_field(field_name)
            .ok_or_else(|| FormError::UnknownField {
                type_name: type_name.to_string(),
                field: field_name.clone(),
            })?;

        current = field.type_ref.clone();
        position += 1;
    }

    Ok(current)
}

fn invalid_schema_type(path: &FieldPath, position: usize, type_ref: &TypeRef) -> FormError {
    let prefix = FieldPath::from_segments(path.segments()[..position].to_vec());
    FormError::InvalidSchemaType {
        path: prefix.to_string(),
        type_name: type_ref.to_string(),
    }
}
