// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Renderer selection
//!
//! Field renderers are picked from a prioritized rule list: the first rule
//! with a matching predicate wins, otherwise the mandatory fallback is used.
//! The registry is generic over the renderer type so applications can store
//! closures, component identifiers or anything else.

pub mod registry;
pub mod rules;

pub use registry::{RendererRegistry, SharedRenderers};
pub use rules::{MatchRule, Predicate, RendererRule, RuleTarget};

use std::sync::Arc;

use crate::form::FieldContext;

/// Renderer as a function of the field context
pub type Renderer<O> = Arc<dyn Fn(&FieldContext) -> O + Send + Sync>;
