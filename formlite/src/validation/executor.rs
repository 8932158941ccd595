// Copyright (c) 2024-2025 FormLite Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Validation plan execution
//!
//! Runs a compiled plan against a value tree and returns an error tree whose
//! shape mirrors the values, with errors attached only where they occur.

use serde_json::Value;
use std::sync::Arc;

use super::errors::{ErrorMap, ErrorNode};
use super::plan::{Check, RequiredCheck, ValidationPlan};

pub const REQUIRED_MESSAGE: &str = "Required";

/// Resolves by-name plan references of recursive input types
pub type PlanLookup<'a> = dyn Fn(&str) -> Option<Arc<ValidationPlan>> + 'a;

/// Validate `values` against `plan`. `None` when nothing failed.
///
/// Checks run in plan order; once a field has an error, later checks for the
/// same field are skipped so the first failure is the one reported.
/// By-name references are not followed; use [`execute_validation_plan_with`]
/// for plans of recursive input types.
pub fn execute_validation_plan(values: &Value, plan: &ValidationPlan) -> Option<ErrorMap> {
    execute_validation_plan_with(values, plan, &|_| None)
}

/// Validate `values` against `plan`, resolving by-name references through
/// `lookup`. Recursion depth is bounded by the nesting of `values`.
pub fn execute_validation_plan_with(
    values: &Value,
    plan: &ValidationPlan,
    lookup: &PlanLookup<'_>,
) -> Option<ErrorMap> {
    let mut errors = ErrorMap::new();

    for entry in plan.entries() {
        if errors.contains_key(&entry.field) {
            continue;
        }
        let value = values.get(&entry.field).unwrap_or(&Value::Null);

        let error = match &entry.check {
            Check::Required(kind) => check_required(*kind, value).map(ErrorNode::Message),
            Check::Scalar(validator) => validator.validate(value).map(ErrorNode::Message),
            Check::NestedObject(nested) => nested_object(value, nested, lookup),
            Check::NestedList(nested) => {
                sparse_list(value, |element| nested_object(element, nested, lookup))
            }
            Check::ScalarList(validator) => {
                sparse_list(value, |element| validator.validate(element).map(ErrorNode::Message))
            }
            Check::NestedObjectRef(type_name) => {
                if value.is_object() {
                    lookup(type_name).and_then(|nested| nested_object(value, &nested, lookup))
                } else {
                    None
                }
            }
            Check::NestedListRef(type_name) => {
                if value.is_array() {
                    lookup(type_name).and_then(|nested| {
                        sparse_list(value, |element| nested_object(element, &nested, lookup))
                    })
                } else {
                    None
                }
            }
        };

        if let Some(error) = error {
            errors.insert(entry.field.clone(), error);
        }
    }

    if errors.is_empty() {
        None
    } else {
        Some(errors)
    }
}

fn nested_object(
    value: &Value,
    nested: &ValidationPlan,
    lookup: &PlanLookup<'_>,
) -> Option<ErrorNode> {
    if value.is_object() {
        execute_validation_plan_with(value, nested, lookup).map(ErrorNode::Object)
    } else {
        None
    }
}

fn sparse_list<F>(value: &Value, mut check: F) -> Option<ErrorNode>
where
    F: FnMut(&Value) -> Option<ErrorNode>,
{
    let items = value.as_array()?;
    let results: Vec<Option<ErrorNode>> = items.iter().map(&mut check).collect();
    if results.iter().any(Option::is_some) {
        Some(ErrorNode::List(results))
    } else {
        None
    }
}

pub(crate) fn check_required(kind: RequiredCheck, value: &Value) -> Option<String> {
    let present = match kind {
        RequiredCheck::Truthy => is_truthy(value),
        RequiredCheck::Boolean => match value {
            Value::Bool(_) => true,
            Value::String(s) => s == "true" || s == "false",
            _ => false,
        },
    };
    if present {
        None
    } else {
        Some(REQUIRED_MESSAGE.to_string())
    }
}

/// JS truthiness. `0` is falsy, which makes a required numeric field holding
/// zero fail its required check.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::plan::PlanEntry;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!([])));
    }

    #[test]
    fn test_boolean_required_accepts_false() {
        assert_eq!(check_required(RequiredCheck::Boolean, &json!(false)), None);
        assert_eq!(check_required(RequiredCheck::Boolean, &json!("false")), None);
        assert!(check_required(RequiredCheck::Boolean, &json!(null)).is_some());
        assert!(check_required(RequiredCheck::Boolean, &json!("")).is_some());
        assert!(check_required(RequiredCheck::Truthy, &json!(false)).is_some());
    }

    #[test]
    fn test_reference_resolved_through_lookup() {
        let node = Arc::new(ValidationPlan::new(
            "NodeInput",
            vec![
                PlanEntry {
                    field: "label".into(),
                    check: Check::Required(RequiredCheck::Truthy),
                },
                PlanEntry {
                    field: "next".into(),
                    check: Check::NestedObjectRef("NodeInput".into()),
                },
                PlanEntry {
                    field: "children".into(),
                    check: Check::NestedListRef("NodeInput".into()),
                },
            ],
        ));
        let values = json!({
            "label": "root",
            "next": {"label": "", "next": {"label": ""}},
            "children": [{"label": "ok"}, {"label": ""}]
        });

        let lookup = |name: &str| (name == "NodeInput").then(|| node.clone());
        let errors = execute_validation_plan_with(&values, &node, &lookup).unwrap();
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({
                "next": {"label": "Required", "next": {"label": "Required"}},
                "children": [null, {"label": "Required"}]
            })
        );

        // unresolvable references contribute nothing
        assert_eq!(execute_validation_plan(&values, &node), None);
    }
}
