//! Test utilities for FormLite integration tests
//!
//! - `init_logging`: route `log` output through env_logger's test writer
//! - `FormFixture`: environment, sample schema and input schema wired together

#![allow(dead_code)]

pub mod form_fixture;

use std::sync::Once;

/// Introspection document shared by the integration tests
pub const SAMPLE_SCHEMA_JSON: &str = include_str!("sample_schema.json");

static LOGGER: Once = Once::new();

pub fn init_logging() {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
