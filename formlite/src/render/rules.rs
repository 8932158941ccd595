// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Renderer match rules

use serde::{Deserialize, Serialize};

use crate::schema::TypeKind;

/// The field properties a rule is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTarget<'a> {
    pub form_type: &'a str,
    pub kind: TypeKind,
    pub field_type: Option<&'a str>,
    pub name: &'a str,
}

/// A single defined predicate of a [`MatchRule`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    FormType(String),
    Kind(TypeKind),
    FieldType(String),
    Name(String),
}

impl Predicate {
    pub fn matches(&self, target: &RuleTarget<'_>) -> bool {
        match self {
            Predicate::FormType(t) => t == target.form_type,
            Predicate::Kind(k) => *k == target.kind,
            Predicate::FieldType(t) => Some(t.as_str()) == target.field_type,
            Predicate::Name(n) => n == target.name,
        }
    }
}

/// Match rule with up to four optional predicates. A rule matches when ANY
/// of its defined predicates matches. A rule without predicates is the
/// fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRule {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub form_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TypeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl MatchRule {
    pub fn fallback() -> Self {
        Self::default()
    }

    pub fn form_type(mut self, form_type: impl Into<String>) -> Self {
        self.form_type = Some(form_type.into());
        self
    }

    pub fn kind(mut self, kind: TypeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn field_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Defined predicates, in a fixed order
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::with_capacity(4);
        if let Some(t) = &self.form_type {
            predicates.push(Predicate::FormType(t.clone()));
        }
        if let Some(k) = self.kind {
            predicates.push(Predicate::Kind(k));
        }
        if let Some(t) = &self.field_type {
            predicates.push(Predicate::FieldType(t.clone()));
        }
        if let Some(n) = &self.name {
            predicates.push(Predicate::Name(n.clone()));
        }
        predicates
    }

    pub fn is_fallback(&self) -> bool {
        self.form_type.is_none()
            && self.kind.is_none()
            && self.field_type.is_none()
            && self.name.is_none()
    }

    /// OR over the defined predicates; a fallback rule never matches here
    pub fn matches(&self, target: &RuleTarget<'_>) -> bool {
        self.predicates().iter().any(|p| p.matches(target))
    }
}

/// A match rule paired with its renderer
#[derive(Debug, Clone)]
pub struct RendererRule<R> {
    pub rule: MatchRule,
    pub renderer: R,
}

impl<R> RendererRule<R> {
    pub fn new(rule: MatchRule, renderer: R) -> Self {
        Self { rule, renderer }
    }

    pub fn fallback(renderer: R) -> Self {
        Self::new(MatchRule::fallback(), renderer)
    }
}
