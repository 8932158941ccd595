// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
// Schema loading from GraphQL introspection JSON

use serde_json::Value;
use std::path::Path;

use crate::error::{FormError, FormResult};
use crate::schema::types::{Schema, TypeDefinition};

impl Schema {
    /// Load a schema from an introspection document.
    ///
    /// Accepts the bare `{"types": [...]}` shape as well as the usual
    /// envelopes: `{"schema": ...}`, `{"__schema": ...}` and
    /// `{"data": {"__schema": ...}}`.
    pub fn from_value(document: Value) -> FormResult<Self> {
        let mut current = document;
        loop {
            // A bare list of type definitions
            if current.is_array() {
                let types: Vec<TypeDefinition> = serde_json::from_value(current)?;
                return Ok(Schema::new(types));
            }

            let next = match &mut current {
                Value::Object(map) if map.contains_key("types") => {
                    let types = map.get_mut("types").map(Value::take).unwrap_or_default();
                    let types: Vec<TypeDefinition> = serde_json::from_value(types)?;
                    log::debug!("Loaded schema with {} type definitions", types.len());
                    return Ok(Schema::new(types));
                }
                Value::Object(map) => ["data", "__schema", "schema"]
                    .iter()
                    .find_map(|key| map.get_mut(*key).map(Value::take)),
                _ => None,
            };

            match next {
                Some(inner) => current = inner,
                None => {
                    return Err(FormError::Json(serde::de::Error::custom(
                        "introspection document has no 'types' list",
                    )))
                }
            }
        }
    }

    pub fn from_json_str(json: &str) -> FormResult<Self> {
        let document: Value = serde_json::from_str(json)?;
        Self::from_value(document)
    }

    pub fn from_path(path: impl AsRef<Path>) -> FormResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }
}
