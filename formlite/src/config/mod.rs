// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Configuration
//!
//! - `LocaleConfig`: number separators, currency scale, placeholder text
//! - `FormEnvironment`: composition root holding the scalar registry and
//!   label lookup shared by all forms

pub mod environment;
pub mod locale;

pub use environment::{EnumOption, FormEnvironment, LabelLookup};
pub use locale::LocaleConfig;
