// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Scalar converter registry
//!
//! Each scalar type name maps to a [`ScalarConverter`] that validates display
//! values and converts between the wire representation and the editable
//! display representation. Add new scalars by implementing the trait (or using
//! [`CustomConverter`]) and registering them.

mod boolean;
mod currency;
mod numeric;
mod temporal;

pub use boolean::BooleanConverter;
pub use currency::CurrencyConverter;
pub use numeric::{FloatConverter, IntegerConverter};
pub use temporal::{TemporalConverter, TemporalKind};

use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::LocaleConfig;
use crate::error::{FormError, FormResult};

/// Validation and conversion hooks for one scalar type.
///
/// Every method has a no-op default: no validation error and identity
/// conversion.
pub trait ScalarConverter: Send + Sync + fmt::Debug {
    /// Check a display value, returning a message when it is invalid
    fn validate(&self, _value: &Value) -> Option<String> {
        None
    }

    /// Whether `validate` can ever report an error. Converters without a
    /// validation hook are left out of compiled validation plans.
    fn validates(&self) -> bool {
        true
    }

    /// Wire value -> display value
    fn scalar_to_value(&self, scalar: &Value) -> Value {
        scalar.clone()
    }

    /// Display value -> wire value
    fn value_to_scalar(&self, value: &Value) -> Value {
        value.clone()
    }
}

/// Registered no-op converter. Behaves exactly like the trait defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledConverter;

impl ScalarConverter for DisabledConverter {
    fn validates(&self) -> bool {
        false
    }
}

type ValidateFn = dyn Fn(&Value) -> Option<String> + Send + Sync;
type ConvertFn = dyn Fn(&Value) -> Value + Send + Sync;

/// Closure based converter for application specific scalars
#[derive(Clone, Default)]
pub struct CustomConverter {
    validate: Option<Arc<ValidateFn>>,
    scalar_to_value: Option<Arc<ConvertFn>>,
    value_to_scalar: Option<Arc<ConvertFn>>,
}

impl CustomConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validate<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(f));
        self
    }

    pub fn with_scalar_to_value<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.scalar_to_value = Some(Arc::new(f));
        self
    }

    pub fn with_value_to_scalar<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.value_to_scalar = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for CustomConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomConverter")
            .field("validate", &self.validate.is_some())
            .field("scalar_to_value", &self.scalar_to_value.is_some())
            .field("value_to_scalar", &self.value_to_scalar.is_some())
            .finish()
    }
}

impl ScalarConverter for CustomConverter {
    fn validate(&self, value: &Value) -> Option<String> {
        self.validate.as_ref().and_then(|f| f(value))
    }

    fn validates(&self) -> bool {
        self.validate.is_some()
    }

    fn scalar_to_value(&self, scalar: &Value) -> Value {
        match &self.scalar_to_value {
            Some(f) => f(scalar),
            None => scalar.clone(),
        }
    }

    fn value_to_scalar(&self, value: &Value) -> Value {
        match &self.value_to_scalar {
            Some(f) => f(value),
            None => value.clone(),
        }
    }
}

/// Registry of scalar converters keyed by scalar type name
#[derive(Debug, Clone, Default)]
pub struct ScalarRegistry {
    converters: HashMap<String, Arc<dyn ScalarConverter>>,
}

impl ScalarRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the default scalar converters
    pub fn with_defaults(locale: &LocaleConfig) -> Self {
        let mut registry = Self::new();

        registry.register("Boolean", Arc::new(BooleanConverter));
        registry.register("Currency", Arc::new(CurrencyConverter::new(locale)));

        // Integer widths
        registry.register("Byte", Arc::new(IntegerConverter::byte(locale)));
        registry.register("Short", Arc::new(IntegerConverter::short(locale)));
        registry.register("Int", Arc::new(IntegerConverter::int(locale)));
        registry.register("Long", Arc::new(IntegerConverter::long(locale)));

        registry.register("Float", Arc::new(FloatConverter::new(locale)));

        registry.register("Date", Arc::new(TemporalConverter::new(TemporalKind::Date)));
        registry.register(
            "Timestamp",
            Arc::new(TemporalConverter::new(TemporalKind::Timestamp)),
        );

        // Plain text scalars need no conversion
        registry.disable("String");
        registry.disable("ID");

        registry
    }

    /// Register (or replace) the converter for a scalar type
    pub fn register(&mut self, name: impl Into<String>, converter: Arc<dyn ScalarConverter>) {
        let name = name.into();
        log::debug!("Registering scalar converter for '{}'", name);
        self.converters.insert(name, converter);
    }

    /// Register an explicit no-op converter for a scalar type
    pub fn disable(&mut self, name: impl Into<String>) {
        self.register(name, Arc::new(DisabledConverter));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ScalarConverter>> {
        self.converters.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.converters.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.converters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn lookup(&self, name: &str) -> FormResult<&Arc<dyn ScalarConverter>> {
        self.get(name)
            .ok_or_else(|| FormError::UnknownScalar(name.to_string()))
    }

    pub fn validate(&self, name: &str, value: &Value) -> FormResult<Option<String>> {
        Ok(self.lookup(name)?.validate(value))
    }

    pub fn scalar_to_value(&self, name: &str, scalar: &Value) -> FormResult<Value> {
        Ok(self.lookup(name)?.scalar_to_value(scalar))
    }

    pub fn value_to_scalar(&self, name: &str, value: &Value) -> FormResult<Value> {
        Ok(self.lookup(name)?.value_to_scalar(value))
    }
}

/// Text of a display value. `None` for null, arrays and objects.
pub(crate) fn display_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

/// Null and blank values are never a scalar validation error; missing values
/// are the required check's concern.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
