// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Validation plan caching to avoid recompilation

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::plan::ValidationPlan;

/// Plan cache statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlanCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub compilations: u64,
    pub current_entries: usize,
}

impl PlanCacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Compiled validation plans keyed by input type name.
///
/// Entries live until [`PlanCache::clear`] is called; the schema a cache
/// belongs to never changes, so there is nothing to expire.
#[derive(Debug, Default)]
pub struct PlanCache {
    entries: RwLock<HashMap<String, Arc<ValidationPlan>>>,
    stats: RwLock<PlanCacheStats>,
}

impl PlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get cached plan if available
    pub fn get(&self, type_name: &str) -> Option<Arc<ValidationPlan>> {
        let found = self.entries.read().get(type_name).cloned();

        let mut stats = self.stats.write();
        if found.is_some() {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }
        found
    }

    /// Insert a freshly compiled plan. If another caller compiled the same
    /// type in the meantime, the plan already cached wins and is returned.
    pub fn insert(&self, plan: ValidationPlan) -> Arc<ValidationPlan> {
        let mut entries = self.entries.write();
        let plan = entries
            .entry(plan.type_name().to_string())
            .or_insert_with(|| Arc::new(plan))
            .clone();

        let mut stats = self.stats.write();
        stats.compilations += 1;
        stats.current_entries = entries.len();
        plan
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.read().contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> PlanCacheStats {
        let mut stats = self.stats.read().clone();
        stats.current_entries = self.entries.read().len();
        stats
    }

    /// Clear all cached plans
    pub fn clear(&self) {
        self.entries.write().clear();
        self.stats.write().current_entries = 0;
    }
}
