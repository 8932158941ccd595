// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Immutable form configuration
//!
//! A [`FormConfig`] is rebuilt on every change: every mutating operation
//! returns a new value and leaves the original untouched. It keeps at most one
//! [`ErrorEntry`] per field path.

use serde_json::{Map, Value};
use std::sync::Arc;

use super::context::FieldContext;
use super::mode::FieldMode;
use super::state::FormState;
use crate::config::FormEnvironment;
use crate::convert::Direction;
use crate::error::{FormError, FormResult};
use crate::input_schema::InputSchema;
use crate::schema::FieldPath;
use crate::validation::{flatten_errors, ErrorEntry};

#[derive(Debug, Clone)]
pub struct FormConfig {
    schema: Arc<InputSchema>,
    type_name: String,
    mode: FieldMode,
    errors: Vec<ErrorEntry>,
}

impl FormConfig {
    /// Configuration for a form editing values of the input type `type_name`
    pub fn new(schema: Arc<InputSchema>, type_name: impl Into<String>) -> FormResult<Self> {
        let type_name = type_name.into();
        if !schema
            .schema()
            .get_type(&type_name)
            .map(|def| def.is_input_object())
            .unwrap_or(false)
        {
            return Err(FormError::UnknownInputType(type_name));
        }
        Ok(Self {
            schema,
            type_name,
            mode: FieldMode::Normal,
            errors: Vec::new(),
        })
    }

    pub fn input_schema(&self) -> &Arc<InputSchema> {
        &self.schema
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn mode(&self) -> FieldMode {
        self.mode
    }

    pub fn errors(&self) -> &[ErrorEntry] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn with_mode(&self, mode: FieldMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    /// Replace all error entries. A later entry for the same path replaces an
    /// earlier one.
    pub fn with_errors(&self, entries: Vec<ErrorEntry>) -> Self {
        let mut errors: Vec<ErrorEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            match errors.iter_mut().find(|e| e.path == entry.path) {
                Some(existing) => *existing = entry,
                None => errors.push(entry),
            }
        }
        Self {
            errors,
            ..self.clone()
        }
    }

    pub fn error_entry(&self, path: &FieldPath) -> Option<&ErrorEntry> {
        self.errors.iter().find(|e| e.path == *path)
    }

    /// Messages for a field; empty when the field is valid
    pub fn get_errors(&self, path: &FieldPath) -> &[String] {
        self.error_entry(path)
            .map(|e| e.messages.as_slice())
            .unwrap_or(&[])
    }

    /// Create or update the error entry of a field
    pub fn with_error(&self, path: &FieldPath, raw_value: Value, message: impl Into<String>) -> Self {
        let entry = ErrorEntry::new(path.clone(), raw_value, message);
        let mut errors = self.errors.clone();
        match errors.iter_mut().find(|e| e.path == *path) {
            Some(existing) => *existing = entry,
            None => errors.push(entry),
        }
        Self {
            errors,
            ..self.clone()
        }
    }

    pub fn without_error(&self, path: &FieldPath) -> Self {
        Self {
            errors: self
                .errors
                .iter()
                .filter(|e| e.path != *path)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    /// Value shown in the field's control. A field with an active error shows
    /// the raw input that failed, otherwise the stored wire value converted
    /// for display.
    pub fn field_display_value<S: FormState + ?Sized>(
        &self,
        path: &FieldPath,
        state: &S,
    ) -> FormResult<Value> {
        if let Some(entry) = self.error_entry(path) {
            return Ok(entry.raw_value.clone());
        }
        let wire = state.value_at(path).unwrap_or(&Value::Null);
        self.schema
            .convert_field(&self.type_name, path, wire, Direction::ToDisplay)
    }

    /// Apply a display value entered into a field. Invalid input is recorded
    /// as the field's error entry; valid input clears the entry and the
    /// converted wire value is written to `state`.
    pub fn handle_change<S: FormState + ?Sized>(
        &self,
        path: &FieldPath,
        display: Value,
        state: &mut S,
    ) -> FormResult<Self> {
        match self.schema.validate_field(&self.type_name, path, &display)? {
            Some(message) => {
                log::debug!("Invalid value for '{}': {}", path, message);
                Ok(self.with_error(path, display, message))
            }
            None => {
                let wire = self
                    .schema
                    .convert_field(&self.type_name, path, &display, Direction::ToWire)?;
                state.set_value_at(path, wire)?;
                Ok(self.without_error(path))
            }
        }
    }

    /// Validate the whole value tree held by `state`. Fields that already
    /// carry an error keep it (their raw input never reached the state);
    /// every other failure gets a new entry whose raw value is the stored
    /// value converted for display.
    pub fn validate_values<S: FormState + ?Sized>(&self, state: &S) -> FormResult<Self> {
        let values = match state.value_at(&FieldPath::root()) {
            Some(root) if root.is_object() => root.clone(),
            _ => Value::Object(Map::new()),
        };
        let display = match self.schema.to_display_values(&self.type_name, &values) {
            Ok(display) => display,
            Err(FormError::EmptyRoot(_)) => values.clone(),
            Err(err) => return Err(err),
        };

        let mut config = self.clone();
        if let Some(tree) = self.schema.validate(&self.type_name, &values)? {
            for (path, message) in flatten_errors(&tree) {
                if config.error_entry(&path).is_none() {
                    let raw = path.get(&display).cloned().unwrap_or(Value::Null);
                    config.errors.push(ErrorEntry::new(path, raw, message));
                }
            }
        }
        Ok(config)
    }

    /// Context of a field for renderer selection
    pub fn field_context(
        &self,
        path: &FieldPath,
        env: &FormEnvironment,
        field_override: Option<FieldMode>,
    ) -> FormResult<FieldContext> {
        let info = self.schema.field_type(&self.type_name, path)?;
        let required = info.is_required();
        Ok(FieldContext {
            form_type: self.type_name.clone(),
            path: path.clone(),
            name: path.field_name().unwrap_or_default().to_string(),
            kind: info.kind,
            field_type: info.type_name,
            required,
            mode: FieldMode::effective(self.mode, field_override),
            label: env.lookup_label(&self.type_name, path),
        })
    }
}

impl PartialEq for FormConfig {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.schema, &other.schema)
            && self.type_name == other.type_name
            && self.mode == other.mode
            && self.errors == other.errors
    }
}
