// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Prioritized renderer rule list

use parking_lot::RwLock;
use std::sync::Arc;

use super::rules::{MatchRule, RendererRule, RuleTarget};
use crate::error::{FormError, FormResult};
use crate::form::FieldContext;
use crate::schema::TypeKind;

/// Ordered renderer rules. The last entry is always the fallback and is the
/// only entry without predicates.
#[derive(Debug, Clone)]
pub struct RendererRegistry<R> {
    rules: Vec<RendererRule<R>>,
}

impl<R> RendererRegistry<R> {
    /// Registry holding only the fallback renderer
    pub fn new(fallback: R) -> Self {
        Self {
            rules: vec![RendererRule::fallback(fallback)],
        }
    }

    /// Registry from a full rule list, validated like [`Self::replace_renderers`]
    pub fn from_rules(rules: Vec<RendererRule<R>>) -> FormResult<Self> {
        validate_rules(&rules)?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[RendererRule<R>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn fallback(&self) -> &R {
        // never empty: construction and replacement both require the fallback
        &self.rules[self.rules.len() - 1].renderer
    }

    /// First matching non-fallback rule wins; otherwise the fallback
    pub fn resolve(
        &self,
        form_type: &str,
        kind: TypeKind,
        field_type: Option<&str>,
        name: &str,
    ) -> &R {
        let target = RuleTarget {
            form_type,
            kind,
            field_type,
            name,
        };
        self.resolve_target(&target)
    }

    pub fn resolve_target(&self, target: &RuleTarget<'_>) -> &R {
        let last = self.rules.len() - 1;
        self.rules[..last]
            .iter()
            .find(|entry| entry.rule.matches(target))
            .map(|entry| &entry.renderer)
            .unwrap_or(&self.rules[last].renderer)
    }

    pub fn resolve_context(&self, context: &FieldContext) -> &R {
        self.resolve(
            &context.form_type,
            context.kind,
            context.field_type.as_deref(),
            &context.name,
        )
    }

    /// Add a rule.
    ///
    /// - no predicates: replaces the fallback
    /// - same predicates as an existing rule: replaces it in place
    /// - otherwise: inserted first (highest priority)
    pub fn register(&mut self, entry: RendererRule<R>) {
        if entry.rule.is_fallback() {
            log::debug!("Replacing fallback renderer");
            let last = self.rules.len() - 1;
            self.rules[last] = entry;
            return;
        }

        match self.position_of(&entry.rule) {
            Some(index) => {
                log::debug!("Replacing renderer rule {:?} at position {}", entry.rule, index);
                self.rules[index] = entry;
            }
            None => {
                log::debug!("Registering renderer rule {:?}", entry.rule);
                self.rules.insert(0, entry);
            }
        }
    }

    /// Swap in a complete rule list. On error the active list is unchanged.
    pub fn replace_renderers(&mut self, rules: Vec<RendererRule<R>>) -> FormResult<()> {
        if let Err(err) = validate_rules(&rules) {
            log::warn!("Rejected renderer rule set: {}", err);
            return Err(err);
        }
        log::debug!("Replacing renderer rules ({} entries)", rules.len());
        self.rules = rules;
        Ok(())
    }

    fn position_of(&self, rule: &MatchRule) -> Option<usize> {
        let len = self.rules.len();
        self.rules[..len - 1]
            .iter()
            .position(|entry| entry.rule == *rule)
    }
}

fn validate_rules<R>(rules: &[RendererRule<R>]) -> FormResult<()> {
    let (last, rest) = rules
        .split_last()
        .ok_or_else(|| FormError::InvalidRuleSet("rule list is empty".to_string()))?;

    if let Some(index) = rest.iter().position(|entry| entry.rule.is_fallback()) {
        return Err(FormError::InvalidRuleSet(format!(
            "entry {} has no predicates but is not the last entry",
            index
        )));
    }
    if !last.rule.is_fallback() {
        return Err(FormError::InvalidRuleSet(
            "last entry must be a fallback without predicates".to_string(),
        ));
    }
    Ok(())
}

/// Renderer registry shared between threads
#[derive(Debug)]
pub struct SharedRenderers<R> {
    inner: Arc<RwLock<RendererRegistry<R>>>,
}

impl<R> Clone for SharedRenderers<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Clone> SharedRenderers<R> {
    pub fn new(registry: RendererRegistry<R>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn resolve(
        &self,
        form_type: &str,
        kind: TypeKind,
        field_type: Option<&str>,
        name: &str,
    ) -> R {
        self.inner
            .read()
            .resolve(form_type, kind, field_type, name)
            .clone()
    }

    pub fn resolve_context(&self, context: &FieldContext) -> R {
        self.inner.read().resolve_context(context).clone()
    }

    pub fn register(&self, entry: RendererRule<R>) {
        self.inner.write().register(entry);
    }

    pub fn replace_renderers(&self, rules: Vec<RendererRule<R>>) -> FormResult<()> {
        self.inner.write().replace_renderers(rules)
    }

    /// Copy of the current registry
    pub fn snapshot(&self) -> RendererRegistry<R> {
        self.inner.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> RendererRegistry<&'static str> {
        let mut registry = RendererRegistry::new("text");
        registry.register(RendererRule::new(MatchRule::default().kind(TypeKind::Enum), "select"));
        registry.register(RendererRule::new(
            MatchRule::default().field_type("Boolean"),
            "checkbox",
        ));
        registry
    }

    fn order(registry: &RendererRegistry<&'static str>) -> Vec<&'static str> {
        registry.rules().iter().map(|entry| entry.renderer).collect()
    }

    #[test]
    fn test_first_match_and_fallback() {
        let registry = registry();
        assert_eq!(order(&registry), vec!["checkbox", "select", "text"]);

        assert_eq!(
            *registry.resolve("PersonInput", TypeKind::Scalar, Some("Boolean"), "active"),
            "checkbox"
        );
        assert_eq!(
            *registry.resolve("PersonInput", TypeKind::Enum, Some("Color"), "color"),
            "select"
        );
        assert_eq!(
            *registry.resolve("PersonInput", TypeKind::Scalar, Some("String"), "name"),
            "text"
        );
    }

    #[test]
    fn test_identical_predicates_replace_in_place() {
        let mut registry = registry();
        registry.register(RendererRule::new(MatchRule::default().kind(TypeKind::Enum), "radio"));
        assert_eq!(order(&registry), vec!["checkbox", "radio", "text"]);
    }

    #[test]
    fn test_fallback_registration_replaces_fallback() {
        let mut registry = registry();
        registry.register(RendererRule::fallback("textarea"));
        assert_eq!(order(&registry), vec!["checkbox", "select", "textarea"]);
        assert_eq!(*registry.fallback(), "textarea");
    }

    #[test]
    fn test_new_rule_goes_first() {
        let mut registry = registry();
        registry.register(RendererRule::new(MatchRule::default().name("active"), "toggle"));
        assert_eq!(
            *registry.resolve("PersonInput", TypeKind::Scalar, Some("Boolean"), "active"),
            "toggle"
        );
    }

    #[test]
    fn test_replace_renderers_validation() {
        let mut registry = registry();

        let missing_fallback = vec![RendererRule::new(MatchRule::default().name("a"), "a")];
        assert!(matches!(
            registry.replace_renderers(missing_fallback),
            Err(FormError::InvalidRuleSet(_))
        ));

        let early_fallback = vec![RendererRule::fallback("a"), RendererRule::fallback("b")];
        assert!(registry.replace_renderers(early_fallback).is_err());
        assert!(registry.replace_renderers(Vec::new()).is_err());
        assert_eq!(order(&registry), vec!["checkbox", "select", "text"]);

        registry
            .replace_renderers(vec![
                RendererRule::new(MatchRule::default().form_type("PersonInput"), "person"),
                RendererRule::fallback("plain"),
            ])
            .unwrap();
        assert_eq!(order(&registry), vec!["person", "plain"]);
    }

    #[test]
    fn test_shared_renderers() {
        let shared = SharedRenderers::new(registry());
        let other = shared.clone();
        other.register(RendererRule::new(MatchRule::default().name("notes"), "textarea"));

        assert_eq!(
            shared.resolve("PersonInput", TypeKind::Scalar, Some("String"), "notes"),
            "textarea"
        );
        assert_eq!(shared.snapshot().len(), 4);
    }
}
