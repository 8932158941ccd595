// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
// Schema module - type definitions, field paths and field type resolution
//
// The schema is supplied once (usually as a GraphQL introspection document)
// and is read-only from the form core's point of view.

pub mod loader;
pub mod path;
pub mod resolver;
pub mod types;

pub use path::{FieldPath, PathSegment};
pub use resolver::resolve_type;
pub use types::{EnumValue, FieldDefinition, Schema, TypeDefinition, TypeKind, TypeRef};
