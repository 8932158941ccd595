// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Error taxonomy for schema, conversion and registration failures
//!
//! Every variant here is a programmer or configuration error (malformed schema,
//! misregistered converter, misused API). Field validation failures are not
//! errors: they are returned as data (`Option<String>`, [`crate::ErrorMap`]).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Unknown field '{field}' in type '{type_name}'")]
    UnknownField { type_name: String, field: String },

    #[error("Invalid schema type at '{path}': {type_name} is not an input object or list")]
    InvalidSchemaType { path: String, type_name: String },

    #[error("Not an input object type: {0}")]
    UnknownInputType(String),

    #[error("No converter registered for scalar: {0}")]
    UnknownScalar(String),

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Cannot determine type of object: no type name given and no '{tag}' property")]
    MissingTypeTag { tag: String },

    #[error("Type '{type_name}' has no {expected} definitions")]
    MissingFields {
        type_name: String,
        expected: &'static str,
    },

    #[error("Root value for type '{0}' must be a non-empty object")]
    EmptyRoot(String),

    #[error("Invalid renderer rule set: {0}")]
    InvalidRuleSet(String),

    #[error("Invalid field path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    #[error("Invalid wire value for scalar '{scalar}': {message}")]
    InvalidWireValue { scalar: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for form core operations
pub type FormResult<T> = Result<T, FormError>;
