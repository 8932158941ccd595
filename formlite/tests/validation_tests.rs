//! Tests for validation plan compilation, caching and execution

#[path = "testutils/mod.rs"]
mod testutils;

use formlite::validation::Check;
use formlite::{
    flatten_errors, ErrorNode, FieldDefinition, FieldPath, FormEnvironment, FormError, Schema,
    TypeDefinition, TypeRef,
};
use serde_json::json;
use std::sync::Arc;
use testutils::form_fixture::FormFixture;

#[test]
fn test_plan_compiled_once_per_type() {
    let fixture = FormFixture::new();
    let schema = &fixture.input_schema;

    let first = schema.validation_plan("PersonInput").unwrap();
    let second = schema.validation_plan("PersonInput").unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // PersonInput and AddressInput; AddressInput is reached twice but
    // compiled once
    let stats = schema.plan_cache_stats();
    assert_eq!(stats.compilations, 2);
    assert_eq!(stats.current_entries, 2);

    let nested = schema.validation_plan("AddressInput").unwrap();
    let embedded = first
        .entries()
        .iter()
        .find_map(|entry| match &entry.check {
            Check::NestedObject(plan) if entry.field == "home" => Some(Arc::clone(plan)),
            _ => None,
        })
        .expect("home has a nested plan");
    assert!(Arc::ptr_eq(&nested, &embedded));
}

#[test]
fn test_single_nested_list_check() {
    let fixture = FormFixture::new();
    let plan = fixture.input_schema.validation_plan("PersonInput").unwrap();

    let address_checks: Vec<_> = plan
        .entries()
        .iter()
        .filter(|entry| entry.field == "addresses")
        .collect();
    assert_eq!(address_checks.len(), 1);
    assert!(matches!(address_checks[0].check, Check::NestedList(_)));
}

#[test]
fn test_string_only_type_has_empty_plan() {
    let fixture = FormFixture::new();
    let plan = fixture.input_schema.validation_plan("NoteInput").unwrap();
    assert!(plan.is_empty());
    assert_eq!(
        fixture
            .input_schema
            .validate("NoteInput", &json!({"title": 5}))
            .unwrap(),
        None
    );
}

#[test]
fn test_clear_plan_cache_recompiles() {
    let fixture = FormFixture::new();
    let schema = &fixture.input_schema;

    let before = schema.validation_plan("AddressInput").unwrap();
    schema.clear_plan_cache();
    assert_eq!(schema.plan_cache_stats().current_entries, 0);

    let after = schema.validation_plan("AddressInput").unwrap();
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(before.len(), after.len());
}

#[test]
fn test_required_zero_is_missing() {
    let fixture = FormFixture::new();
    let errors = fixture
        .input_schema
        .validate(
            "PersonInput",
            &json!({"name": "Ann", "age": 0, "active": false}),
        )
        .unwrap()
        .expect("age fails");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors["age"], ErrorNode::Message("Required".to_string()));
}

#[test]
fn test_error_tree_mirrors_values() {
    let fixture = FormFixture::new();
    let errors = fixture
        .input_schema
        .validate(
            "PersonInput",
            &json!({
                "name": "Ann",
                "age": "x",
                "active": "maybe",
                "salary": "12.345678",
                "birthday": "05.03.2024",
                "home": {"city": "Bonn"},
                "addresses": [{"city": "Bonn"}, {"zip": "12"}, {"city": "Köln", "zip": "a"}],
                "scores": ["1", "2", "three"]
            }),
        )
        .unwrap()
        .expect("several fields fail");

    let tree = serde_json::to_value(&errors).unwrap();
    assert_eq!(tree["age"], json!("Invalid integer"));
    // the boolean required check only accepts true and false
    assert_eq!(tree["active"], json!("Required"));
    assert_eq!(tree["salary"], json!("At most 4 decimal places allowed"));
    assert!(tree["birthday"].is_string());
    assert!(tree.get("home").is_none());
    assert_eq!(
        tree["addresses"],
        json!([null, {"city": "Required"}, {"zip": "Invalid integer"}])
    );
    assert_eq!(tree["scores"], json!([null, null, "Invalid integer"]));

    let flat: Vec<String> = flatten_errors(&errors)
        .into_iter()
        .map(|(path, _)| path.to_string())
        .collect();
    assert!(flat.contains(&"addresses.1.city".to_string()));
    assert!(flat.contains(&"scores.2".to_string()));
}

#[test]
fn test_recursive_input_type() {
    let fixture = FormFixture::new();
    let plan = fixture.input_schema.validation_plan("TreeInput").unwrap();

    let children: Vec<_> = plan
        .entries()
        .iter()
        .filter(|entry| entry.field == "children")
        .collect();
    assert_eq!(children.len(), 1);
    assert!(matches!(&children[0].check, Check::NestedListRef(name) if name == "TreeInput"));

    let errors = fixture
        .input_schema
        .validate(
            "TreeInput",
            &json!({
                "label": "",
                "weight": "3",
                "children": [
                    {"label": ""},
                    {"label": "leaf", "children": [{"label": "", "weight": "x"}]}
                ]
            }),
        )
        .unwrap()
        .unwrap();

    let tree = serde_json::to_value(&errors).unwrap();
    assert_eq!(tree["label"], json!("Required"));
    assert_eq!(tree["children"][0]["label"], json!("Required"));
    assert_eq!(
        tree["children"][1],
        json!({"children": [{"label": "Required", "weight": "Invalid integer"}]})
    );
}

fn mutual_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        TypeDefinition::scalar("String"),
        TypeDefinition::input_object(
            "AInput",
            vec![FieldDefinition::new("b", TypeRef::input_object("BInput"))],
        ),
        TypeDefinition::input_object(
            "BInput",
            vec![
                FieldDefinition::new("name", TypeRef::non_null(TypeRef::scalar("String"))),
                FieldDefinition::new("a", TypeRef::input_object("AInput")),
            ],
        ),
    ]))
}

#[test]
fn test_mutually_recursive_plans_independent_of_compile_order() {
    let env = FormEnvironment::default();
    let values = json!({"b": {"name": "", "a": {"b": {"name": ""}}}});

    let a_first = env.input_schema(mutual_schema());
    let from_a = a_first.validate("AInput", &values).unwrap();

    let b_first = env.input_schema(mutual_schema());
    b_first.validation_plan("BInput").unwrap();
    let from_b = b_first.validate("AInput", &values).unwrap();

    assert_eq!(from_a, from_b);
    let tree = serde_json::to_value(from_a.expect("name is required")).unwrap();
    assert_eq!(
        tree,
        json!({"b": {"name": "Required", "a": {"b": {"name": "Required"}}}})
    );

    // the same holds when validating the type compiled second
    let b_values = json!({"a": {"b": {"name": ""}}, "name": "x"});
    assert_eq!(
        a_first.validate("BInput", &b_values).unwrap(),
        b_first.validate("BInput", &b_values).unwrap()
    );
    assert!(b_first.validate("BInput", &b_values).unwrap().is_some());
}

#[test]
fn test_validate_field_by_path() {
    let fixture = FormFixture::new();
    let schema = &fixture.input_schema;
    let zip = FieldPath::parse("addresses[0].zip").unwrap();
    let city = FieldPath::parse("addresses[0].city").unwrap();

    assert!(schema.validate_field("PersonInput", &zip, &json!("1x")).unwrap().is_some());
    assert_eq!(schema.validate_field("PersonInput", &zip, &json!("")).unwrap(), None);
    assert_eq!(
        schema.validate_field("PersonInput", &city, &json!("")).unwrap(),
        Some("Required".to_string())
    );
}

#[test]
fn test_unknown_input_type() {
    let fixture = FormFixture::new();
    for name in ["Person", "Status", "Int", "Nothing"] {
        assert!(matches!(
            fixture.input_schema.validation_plan(name),
            Err(FormError::UnknownInputType(_))
        ));
    }
}
