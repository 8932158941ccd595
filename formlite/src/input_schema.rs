// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Schema wrapper used by forms
//!
//! `InputSchema` pairs a schema with the scalar registry it was created with
//! and owns the validation plan cache for that pairing. It is the entry point
//! field components use to resolve field types, convert values and validate.

use serde_json::Value;
use std::sync::Arc;

use crate::convert::{self, Direction};
use crate::error::FormResult;
use crate::scalar::ScalarRegistry;
use crate::schema::{resolve_type, FieldPath, Schema, TypeKind, TypeRef};
use crate::validation::executor::check_required;
use crate::validation::{
    execute_validation_plan_with, ErrorMap, PlanCache, PlanCacheStats, PlanCompiler, RequiredCheck,
    ValidationPlan,
};

/// Resolved type information of a form field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTypeInfo {
    /// Declared type, wrappers included
    pub type_ref: TypeRef,
    /// Kind after stripping NON_NULL
    pub kind: TypeKind,
    /// Innermost named type
    pub type_name: Option<String>,
}

impl FieldTypeInfo {
    fn from_type_ref(type_ref: TypeRef) -> Self {
        let kind = type_ref.unwrap_non_null().kind;
        let type_name = type_ref.type_name().map(str::to_string);
        Self {
            type_ref,
            kind,
            type_name,
        }
    }

    pub fn is_required(&self) -> bool {
        self.type_ref.is_non_null()
    }
}

#[derive(Debug)]
pub struct InputSchema {
    schema: Arc<Schema>,
    scalars: Arc<ScalarRegistry>,
    plans: PlanCache,
}

impl InputSchema {
    pub fn new(schema: Arc<Schema>, scalars: Arc<ScalarRegistry>) -> Self {
        Self {
            schema,
            scalars,
            plans: PlanCache::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn scalars(&self) -> &ScalarRegistry {
        &self.scalars
    }

    /// Declared type of the field at `path` below `root_type`
    pub fn resolve_type(&self, root_type: &str, path: &FieldPath) -> FormResult<TypeRef> {
        resolve_type(&self.schema, root_type, path)
    }

    pub fn field_type(&self, root_type: &str, path: &FieldPath) -> FormResult<FieldTypeInfo> {
        self.resolve_type(root_type, path)
            .map(FieldTypeInfo::from_type_ref)
    }

    /// Compiled validation plan for an input type, cached per type name
    pub fn validation_plan(&self, type_name: &str) -> FormResult<Arc<ValidationPlan>> {
        PlanCompiler::new(&self.schema, &self.scalars, &self.plans).compile(type_name)
    }

    /// Validate a value tree of the given input type. References to
    /// recursive input types resolve through this schema's plan cache.
    pub fn validate(&self, type_name: &str, values: &Value) -> FormResult<Option<ErrorMap>> {
        let plan = self.validation_plan(type_name)?;
        let lookup = |name: &str| self.validation_plan(name).ok();
        Ok(execute_validation_plan_with(values, &plan, &lookup))
    }

    /// Validate a single display value as entered into the field at `path`:
    /// presence for NON_NULL fields, then the scalar's own validation
    pub fn validate_field(
        &self,
        root_type: &str,
        path: &FieldPath,
        value: &Value,
    ) -> FormResult<Option<String>> {
        let info = self.field_type(root_type, path)?;

        if info.is_required() {
            let required = if info.kind == TypeKind::Scalar && info.type_name.as_deref() == Some("Boolean") {
                RequiredCheck::Boolean
            } else {
                RequiredCheck::Truthy
            };
            if let Some(message) = check_required(required, value) {
                return Ok(Some(message));
            }
        }

        if info.kind != TypeKind::Scalar {
            return Ok(None);
        }
        Ok(info
            .type_name
            .as_deref()
            .and_then(|name| self.scalars.get(name))
            .and_then(|converter| converter.validate(value)))
    }

    /// Convert the value of a single field
    pub fn convert_field(
        &self,
        root_type: &str,
        path: &FieldPath,
        value: &Value,
        direction: Direction,
    ) -> FormResult<Value> {
        let type_ref = self.resolve_type(root_type, path)?;
        convert::convert_value(&self.schema, &self.scalars, &type_ref, value, direction)
    }

    pub fn to_display_values(&self, type_name: &str, wire: &Value) -> FormResult<Value> {
        convert::to_display_values(&self.schema, &self.scalars, type_name, wire)
    }

    pub fn to_wire_values(&self, type_name: &str, display: &Value) -> FormResult<Value> {
        convert::to_wire_values(&self.schema, &self.scalars, type_name, display)
    }

    pub fn plan_cache_stats(&self) -> PlanCacheStats {
        self.plans.stats()
    }

    /// Drop all compiled plans; the next request recompiles
    pub fn clear_plan_cache(&self) {
        log::debug!("Clearing {} cached validation plans", self.plans.len());
        self.plans.clear();
    }
}
