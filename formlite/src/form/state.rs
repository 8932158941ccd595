// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Form state access

use serde_json::Value;

use crate::error::FormResult;
use crate::schema::FieldPath;

/// The form state store a form reads wire values from and writes converted
/// scalars back to. The root path addresses the whole value tree.
pub trait FormState {
    fn value_at(&self, path: &FieldPath) -> Option<&Value>;

    /// Fails when `path` addresses a list element more than one past the end
    fn set_value_at(&mut self, path: &FieldPath, value: Value) -> FormResult<()>;
}

impl FormState for Value {
    fn value_at(&self, path: &FieldPath) -> Option<&Value> {
        path.get(self)
    }

    fn set_value_at(&mut self, path: &FieldPath, value: Value) -> FormResult<()> {
        path.set(self, value)
    }
}
