// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Form layer
//!
//! Ties an [`InputSchema`](crate::InputSchema) to a concrete form: field
//! modes, the immutable per-form configuration with its error entries, the
//! form state seam and the field context renderers are selected with.

pub mod config;
pub mod context;
pub mod mode;
pub mod state;

pub use config::FormConfig;
pub use context::FieldContext;
pub use mode::{disabled_if, plain_text_if, read_only_if, FieldMode};
pub use state::FormState;
