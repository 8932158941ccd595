// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Form environment: the explicitly constructed configuration shared by all
//! forms of an application (locale, scalar converters, label lookup)

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::LocaleConfig;
use crate::error::{FormError, FormResult};
use crate::input_schema::InputSchema;
use crate::scalar::{ScalarConverter, ScalarRegistry};
use crate::schema::{FieldPath, Schema, TypeKind, TypeRef};

/// Maps `(form type, field path)` to a human readable label
pub type LabelLookup = dyn Fn(&str, &FieldPath) -> Option<String> + Send + Sync;

/// One selectable choice of an enum field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    /// Enum value name; `None` for the empty choice of a nullable field
    pub value: Option<String>,
    pub label: String,
}

/// Composition root for form configuration.
///
/// Registering a converter never disturbs an [`InputSchema`] that was already
/// created: each input schema keeps the registry snapshot it was built with.
pub struct FormEnvironment {
    locale: LocaleConfig,
    scalars: RwLock<Arc<ScalarRegistry>>,
    label_lookup: RwLock<Option<Arc<LabelLookup>>>,
}

impl FormEnvironment {
    pub fn new(locale: LocaleConfig) -> Self {
        let scalars = ScalarRegistry::with_defaults(&locale);
        Self {
            locale,
            scalars: RwLock::new(Arc::new(scalars)),
            label_lookup: RwLock::new(None),
        }
    }

    /// Environment with a caller supplied scalar registry
    pub fn with_scalars(locale: LocaleConfig, scalars: ScalarRegistry) -> Self {
        Self {
            locale,
            scalars: RwLock::new(Arc::new(scalars)),
            label_lookup: RwLock::new(None),
        }
    }

    pub fn locale(&self) -> &LocaleConfig {
        &self.locale
    }

    pub fn none_text(&self) -> &str {
        &self.locale.none_text
    }

    /// Current scalar registry snapshot
    pub fn scalars(&self) -> Arc<ScalarRegistry> {
        Arc::clone(&self.scalars.read())
    }

    /// Register (or replace) the converter of a scalar type
    pub fn register_custom_converter(
        &self,
        name: impl Into<String>,
        converter: Arc<dyn ScalarConverter>,
    ) {
        let mut guard = self.scalars.write();
        let mut registry = ScalarRegistry::clone(&guard);
        registry.register(name, converter);
        *guard = Arc::new(registry);
    }

    /// Register a no-op converter for a scalar type
    pub fn disable_scalar(&self, name: impl Into<String>) {
        let mut guard = self.scalars.write();
        let mut registry = ScalarRegistry::clone(&guard);
        registry.disable(name);
        *guard = Arc::new(registry);
    }

    /// Wrap a schema with the current scalar registry
    pub fn input_schema(&self, schema: Arc<Schema>) -> InputSchema {
        InputSchema::new(schema, self.scalars())
    }

    pub fn set_label_lookup<F>(&self, lookup: F)
    where
        F: Fn(&str, &FieldPath) -> Option<String> + Send + Sync + 'static,
    {
        *self.label_lookup.write() = Some(Arc::new(lookup));
    }

    /// Label of a field. Falls back to the field name when no lookup is set
    /// or the lookup has no entry.
    pub fn lookup_label(&self, form_type: &str, path: &FieldPath) -> String {
        let lookup = self.label_lookup.read().clone();
        lookup
            .and_then(|lookup| lookup(form_type, path))
            .or_else(|| path.field_name().map(str::to_string))
            .unwrap_or_else(|| path.to_string())
    }

    /// Choices for an enum field in declaration order. Nullable fields get a
    /// leading empty choice labelled with the locale's none text.
    pub fn enum_options(&self, schema: &Schema, type_ref: &TypeRef) -> FormResult<Vec<EnumOption>> {
        let name = type_ref
            .type_name()
            .ok_or_else(|| FormError::UnknownType(type_ref.to_string()))?;
        let definition = schema
            .get_type(name)
            .ok_or_else(|| FormError::UnknownType(name.to_string()))?;
        if definition.kind != TypeKind::Enum {
            return Err(FormError::MissingFields {
                type_name: name.to_string(),
                expected: "enum value",
            });
        }

        let mut options = Vec::new();
        if !type_ref.is_non_null() {
            options.push(EnumOption {
                value: None,
                label: self.locale.none_text.clone(),
            });
        }
        options.extend(definition.enum_value_names().into_iter().map(|value| EnumOption {
            value: Some(value.to_string()),
            label: value.to_string(),
        }));
        Ok(options)
    }
}

impl Default for FormEnvironment {
    fn default() -> Self {
        Self::new(LocaleConfig::default())
    }
}

impl fmt::Debug for FormEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormEnvironment")
            .field("locale", &self.locale)
            .field("scalars", &self.scalars.read().names())
            .field("label_lookup", &self.label_lookup.read().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::CustomConverter;
    use crate::schema::{FieldDefinition, TypeDefinition};
    use serde_json::json;

    fn schema() -> Arc<Schema> {
        Arc::new(Schema::new(vec![
            TypeDefinition::scalar("Postcode"),
            TypeDefinition::enumeration("Color", ["RED", "GREEN"]),
            TypeDefinition::input_object(
                "PaintInput",
                vec![
                    FieldDefinition::new("color", TypeRef::enumeration("Color")),
                    FieldDefinition::new("zip", TypeRef::scalar("Postcode")),
                ],
            ),
        ]))
    }

    #[test]
    fn test_register_custom_converter_snapshot() {
        let env = FormEnvironment::default();
        let before = env.input_schema(schema());
        assert!(before.scalars().get("Postcode").is_none());

        env.register_custom_converter(
            "Postcode",
            Arc::new(CustomConverter::new().with_validate(|v| {
                (v.as_str().map(str::len) != Some(5)).then(|| "Five digits".to_string())
            })),
        );
        let after = env.input_schema(schema());

        assert!(before.scalars().get("Postcode").is_none());
        let errors = after
            .validate("PaintInput", &json!({"zip": "123"}))
            .unwrap()
            .unwrap();
        assert_eq!(errors["zip"].message(), Some("Five digits"));
    }

    #[test]
    fn test_enum_options() {
        let env = FormEnvironment::new(LocaleConfig {
            none_text: "(none)".to_string(),
            ..LocaleConfig::default()
        });
        let schema = schema();

        let nullable = env.enum_options(&schema, &TypeRef::enumeration("Color")).unwrap();
        assert_eq!(nullable.len(), 3);
        assert_eq!(nullable[0].value, None);
        assert_eq!(nullable[0].label, "(none)");

        let required = env
            .enum_options(&schema, &TypeRef::non_null(TypeRef::enumeration("Color")))
            .unwrap();
        assert_eq!(
            required.iter().map(|o| o.value.as_deref()).collect::<Vec<_>>(),
            vec![Some("RED"), Some("GREEN")]
        );

        assert!(matches!(
            env.enum_options(&schema, &TypeRef::scalar("Postcode")),
            Err(FormError::MissingFields { .. })
        ));
    }

    #[test]
    fn test_lookup_label() {
        let env = FormEnvironment::default();
        let path = FieldPath::parse("addresses.0.city").unwrap();
        assert_eq!(env.lookup_label("PersonInput", &path), "city");

        env.set_label_lookup(|form_type, path| {
            (form_type == "PersonInput" && path.field_name() == Some("city"))
                .then(|| "City".to_string())
        });
        assert_eq!(env.lookup_label("PersonInput", &path), "City");
        assert_eq!(env.lookup_label("OtherInput", &path), "city");
    }
}
