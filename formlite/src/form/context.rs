// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Field context handed to renderers

use serde::Serialize;

use super::mode::FieldMode;
use crate::schema::{FieldPath, TypeKind};

/// Everything a renderer needs to know about one form field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldContext {
    /// Input type of the form the field belongs to
    pub form_type: String,
    pub path: FieldPath,
    /// Last named path segment
    pub name: String,
    /// Kind of the field type with NON_NULL stripped
    pub kind: TypeKind,
    /// Innermost named type, e.g. `Int` for `[Int!]`
    pub field_type: Option<String>,
    pub required: bool,
    pub mode: FieldMode,
    pub label: String,
}

impl FieldContext {
    pub fn is_list(&self) -> bool {
        self.kind == TypeKind::List
    }

    pub fn is_editable(&self) -> bool {
        self.mode.is_editable()
    }
}
