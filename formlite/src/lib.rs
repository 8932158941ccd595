// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! FormLite - schema driven form core
//!
//! FormLite binds a GraphQL-introspection shaped schema to form fields.
//!
//! # Features
//!
//! - **Type Resolution**: resolve dotted or bracketed field paths to their declared types
//! - **Scalar Converters**: locale aware validation and wire/display conversion per scalar type
//! - **Validation Plans**: compiled once per input type and cached
//! - **Value Conversion**: whole value trees between wire and display form
//! - **Renderer Rules**: prioritized rule list selecting a renderer per field
//! - **Wire Format**: typed object graphs to and from tagged JSON
//!
//! # Usage
//!
//! ```ignore
//! use formlite::{FieldPath, FormConfig, FormEnvironment, Schema};
//! use std::sync::Arc;
//!
//! let env = FormEnvironment::default();
//! let schema = Arc::new(Schema::from_json_str(introspection_json)?);
//! let form = FormConfig::new(Arc::new(env.input_schema(schema)), "PersonInput")?;
//!
//! let mut state = serde_json::json!({"name": "Ann"});
//! let form = form.handle_change(&FieldPath::parse("age")?, "41".into(), &mut state)?;
//! assert!(form.get_errors(&FieldPath::parse("age")?).is_empty());
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod form;
pub mod input_schema;
pub mod render;
pub mod scalar;
pub mod schema;
pub mod validation;
pub mod wire;

pub use config::{EnumOption, FormEnvironment, LocaleConfig};
pub use convert::{convert_value, to_display_values, to_wire_values, Direction};
pub use error::{FormError, FormResult};
pub use form::{
    disabled_if, plain_text_if, read_only_if, FieldContext, FieldMode, FormConfig, FormState,
};
pub use input_schema::{FieldTypeInfo, InputSchema};
pub use render::{MatchRule, Renderer, RendererRegistry, RendererRule, SharedRenderers};
pub use scalar::{CustomConverter, DisabledConverter, ScalarConverter, ScalarRegistry};
pub use schema::{
    resolve_type, EnumValue, FieldDefinition, FieldPath, PathSegment, Schema, TypeDefinition,
    TypeKind, TypeRef,
};
pub use validation::{
    execute_validation_plan, execute_validation_plan_with, flatten_errors, ErrorEntry, ErrorMap,
    ErrorNode, ValidationPlan,
};
pub use wire::{GraphValue, TypedObject, WireConverter, WireFormat};

/// FormLite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// FormLite crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
