// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Validation plan compilation
//!
//! A validation plan is a flat list of `(field, check)` entries compiled once
//! per input object type. Nested input objects and lists of input objects get
//! their own (cached) plans embedded as tagged checks. A type reached again
//! while it is still being compiled (recursive input types) is referenced by
//! name and looked up when the plan runs, so a cached plan never depends on
//! which type happened to be compiled first.

use std::sync::Arc;

use super::cache::PlanCache;
use crate::error::{FormError, FormResult};
use crate::scalar::{ScalarConverter, ScalarRegistry};
use crate::schema::{Schema, TypeKind, TypeRef};

/// How a NON_NULL field checks for presence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredCheck {
    /// JS-style truthiness: `null`, `""`, `0` and `false` all count as missing
    Truthy,
    /// Boolean fields: any boolean (or `"true"` / `"false"`) is present
    Boolean,
}

/// A scalar converter's validation hook bound to its scalar name
#[derive(Debug, Clone)]
pub struct ScalarValidator {
    scalar: String,
    converter: Arc<dyn ScalarConverter>,
}

impl ScalarValidator {
    pub fn new(scalar: impl Into<String>, converter: Arc<dyn ScalarConverter>) -> Self {
        Self {
            scalar: scalar.into(),
            converter,
        }
    }

    pub fn scalar(&self) -> &str {
        &self.scalar
    }

    pub fn validate(&self, value: &serde_json::Value) -> Option<String> {
        self.converter.validate(value)
    }
}

#[derive(Debug, Clone)]
pub enum Check {
    Required(RequiredCheck),
    Scalar(ScalarValidator),
    NestedObject(Arc<ValidationPlan>),
    NestedList(Arc<ValidationPlan>),
    ScalarList(ScalarValidator),
    /// Nested object of a type still being compiled, looked up at run time
    NestedObjectRef(String),
    /// List of objects of a type still being compiled, looked up at run time
    NestedListRef(String),
}

/// Plan of a nested type: compiled inline, or referenced by type name
enum Nested {
    Plan(Arc<ValidationPlan>),
    Ref(String),
}

#[derive(Debug, Clone)]
pub struct PlanEntry {
    pub field: String,
    pub check: Check,
}

/// Compiled validation plan for one input object type
#[derive(Debug, Clone)]
pub struct ValidationPlan {
    type_name: String,
    entries: Vec<PlanEntry>,
}

impl ValidationPlan {
    pub fn new(type_name: impl Into<String>, entries: Vec<PlanEntry>) -> Self {
        Self {
            type_name: type_name.into(),
            entries,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Compiles plans through a shared cache
pub struct PlanCompiler<'a> {
    schema: &'a Schema,
    registry: &'a ScalarRegistry,
    cache: &'a PlanCache,
    in_progress: Vec<String>,
}

impl<'a> PlanCompiler<'a> {
    pub fn new(schema: &'a Schema, registry: &'a ScalarRegistry, cache: &'a PlanCache) -> Self {
        Self {
            schema,
            registry,
            cache,
            in_progress: Vec::new(),
        }
    }

    /// Get the plan for an input object type, compiling it on first use
    pub fn compile(&mut self, type_name: &str) -> FormResult<Arc<ValidationPlan>> {
        if let Some(plan) = self.cache.get(type_name) {
            return Ok(plan);
        }

        let schema = self.schema;
        let definition = schema
            .get_type(type_name)
            .filter(|def| def.is_input_object())
            .ok_or_else(|| FormError::UnknownInputType(type_name.to_string()))?;

        self.in_progress.push(type_name.to_string());
        let mut entries = Vec::new();

        for field in definition.input_fields.iter().flatten() {
            let type_ref = &field.type_ref;
            let unwrapped = type_ref.unwrap_non_null();

            if type_ref.is_non_null() {
                let required = if is_scalar_named(unwrapped, "Boolean") {
                    RequiredCheck::Boolean
                } else {
                    RequiredCheck::Truthy
                };
                entries.push(PlanEntry {
                    field: field.name.clone(),
                    check: Check::Required(required),
                });
            }

            match unwrapped.kind {
                TypeKind::Scalar => {
                    if let Some(validator) = self.validator_for(unwrapped) {
                        entries.push(PlanEntry {
                            field: field.name.clone(),
                            check: Check::Scalar(validator),
                        });
                    }
                }
                TypeKind::InputObject => {
                    if let Some(nested) = self.compile_nested(unwrapped)? {
                        let check = match nested {
                            Nested::Plan(plan) => Check::NestedObject(plan),
                            Nested::Ref(name) => Check::NestedObjectRef(name),
                        };
                        entries.push(PlanEntry {
                            field: field.name.clone(),
                            check,
                        });
                    }
                }
                TypeKind::List => {
                    let element = match unwrapped.element_type() {
                        Some(element) => element.unwrap_non_null(),
                        None => continue,
                    };
                    match element.kind {
                        TypeKind::Scalar => {
                            if let Some(validator) = self.validator_for(element) {
                                entries.push(PlanEntry {
                                    field: field.name.clone(),
                                    check: Check::ScalarList(validator),
                                });
                            }
                        }
                        TypeKind::InputObject => {
                            if let Some(nested) = self.compile_nested(element)? {
                                let check = match nested {
                                    Nested::Plan(plan) => Check::NestedList(plan),
                                    Nested::Ref(name) => Check::NestedListRef(name),
                                };
                                entries.push(PlanEntry {
                                    field: field.name.clone(),
                                    check,
                                });
                            }
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        self.in_progress.pop();
        log::debug!(
            "Compiled validation plan for '{}' with {} checks",
            type_name,
            entries.len()
        );
        Ok(self.cache.insert(ValidationPlan::new(type_name, entries)))
    }

    /// Nested plan for a field type; `None` when it would be empty. A type
    /// already being compiled further up becomes a by-name reference.
    fn compile_nested(&mut self, type_ref: &TypeRef) -> FormResult<Option<Nested>> {
        let name = match type_ref.name.as_deref() {
            Some(name) => name,
            None => return Ok(None),
        };

        if self.in_progress.iter().any(|t| t == name) {
            log::debug!(
                "Recursive input type '{}' reached from '{}'; referenced by name",
                name,
                self.in_progress.join(" -> ")
            );
            return Ok(Some(Nested::Ref(name.to_string())));
        }

        let plan = self.compile(name)?;
        Ok(if plan.is_empty() {
            None
        } else {
            Some(Nested::Plan(plan))
        })
    }

    fn validator_for(&self, type_ref: &TypeRef) -> Option<ScalarValidator> {
        let name = type_ref.name.as_deref()?;
        let converter = self.registry.get(name)?;
        if converter.validates() {
            Some(ScalarValidator::new(name, Arc::clone(converter)))
        } else {
            None
        }
    }
}

fn is_scalar_named(type_ref: &TypeRef, name: &str) -> bool {
    type_ref.kind == TypeKind::Scalar && type_ref.name.as_deref() == Some(name)
}
