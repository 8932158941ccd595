//! Form fixture for FormLite integration tests
//!
//! Builds a fresh environment per test so registrations never leak between
//! tests running in parallel.

use formlite::{FormConfig, FormEnvironment, FormResult, InputSchema, LocaleConfig, Schema};
use std::sync::Arc;

use super::{init_logging, SAMPLE_SCHEMA_JSON};

pub struct FormFixture {
    pub env: FormEnvironment,
    pub schema: Arc<Schema>,
    pub input_schema: Arc<InputSchema>,
}

impl FormFixture {
    /// Fixture with the default (English) locale
    pub fn new() -> Self {
        Self::with_locale(LocaleConfig::default())
    }

    pub fn with_locale(locale: LocaleConfig) -> Self {
        Self::with_env(FormEnvironment::new(locale))
    }

    /// Fixture around a caller prepared environment, e.g. one with custom
    /// converters already registered
    pub fn with_env(env: FormEnvironment) -> Self {
        init_logging();
        let schema =
            Arc::new(Schema::from_json_str(SAMPLE_SCHEMA_JSON).expect("sample schema parses"));
        let input_schema = Arc::new(env.input_schema(Arc::clone(&schema)));
        Self {
            env,
            schema,
            input_schema,
        }
    }

    pub fn form(&self, type_name: &str) -> FormResult<FormConfig> {
        FormConfig::new(Arc::clone(&self.input_schema), type_name)
    }

    pub fn person_form(&self) -> FormConfig {
        self.form("PersonInput").expect("PersonInput is an input type")
    }
}
