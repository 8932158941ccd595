// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Schema driven validation
//!
//! - `plan`: compiles a flat, tagged check list per input object type
//! - `cache`: memoizes compiled plans per type name
//! - `executor`: runs a plan against a value tree
//! - `errors`: the resulting error tree and per-path error entries

pub mod cache;
pub mod errors;
pub mod executor;
pub mod plan;

pub use cache::{PlanCache, PlanCacheStats};
pub use errors::{flatten_errors, ErrorEntry, ErrorMap, ErrorNode};
pub use executor::{
    execute_validation_plan, execute_validation_plan_with, is_truthy, PlanLookup, REQUIRED_MESSAGE,
};
pub use plan::{Check, PlanCompiler, PlanEntry, RequiredCheck, ScalarValidator, ValidationPlan};
