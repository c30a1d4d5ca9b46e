//! Template expansion cases in the JSON format of the `uritemplate-test` suite.

use std::collections::HashMap;

use generic_uri::template::{Context, UriTemplate, Value};

use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Test cases, loaded at compile time.
const CASES: &str = include_str!("../assets/template-cases.json");

#[derive(Debug, Clone, Deserialize)]
struct TestFile {
    #[serde(flatten)]
    tests: HashMap<String, TestSet>,
}

#[derive(Debug, Clone, Deserialize)]
struct TestSet {
    variables: HashMap<String, JsonValue>,
    testcases: Vec<(String, JsonValue)>,
}

fn string_item(v: &JsonValue) -> String {
    match v {
        JsonValue::String(s) => s.clone(),
        // Note that `arbitrary_precision` flag of `serde_json` crate is expected.
        JsonValue::Number(num) => num.to_string(),
        v => panic!("item of unexpected type: {v:?}"),
    }
}

fn to_value(value: &JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Undefined,
        JsonValue::Array(vec) => Value::List(vec.iter().map(string_item).collect()),
        JsonValue::Object(map) => Value::Assoc(
            map.iter()
                .map(|(k, v)| (k.clone(), string_item(v)))
                .collect(),
        ),
        v => Value::String(string_item(v)),
    }
}

fn load() -> TestFile {
    serde_json::from_str(CASES).expect("failed to load test asset")
}

fn run(test_set_name: &str, test_set: &TestSet) {
    let context: Context = test_set
        .variables
        .iter()
        .map(|(name, value)| (name.as_str(), to_value(value)))
        .collect();

    for (template, expected) in &test_set.testcases {
        let expected = match expected {
            JsonValue::Bool(false) => None,
            JsonValue::String(s) => Some(vec![s.as_str()]),
            JsonValue::Array(arr) => Some(
                arr.iter()
                    .map(|candidate| {
                        candidate
                            .as_str()
                            .expect("expected strings as result candidates")
                    })
                    .collect::<Vec<_>>(),
            ),
            v => panic!("unexpected `expected` value: {v:?}"),
        };
        let result = UriTemplate::new(template).and_then(|template| template.expand(&context));
        match (result, expected) {
            (Ok(expanded), Some(candidates)) => {
                assert!(
                    candidates.contains(&expanded.as_str()),
                    "unexpected expansion result: test={test_set_name:?}, \
                     template={template:?}, expanded={expanded}, candidates={candidates:?}"
                );
            }
            (Ok(expanded), None) => {
                panic!(
                    "expected to fail but successfully expanded: test={test_set_name:?}, \
                     template={template:?}, expanded={expanded}",
                )
            }
            (Err(e), Some(expected)) => {
                panic!(
                    "expected to succeed but failed: {e} \
                     (test={test_set_name:?}, template={template:?}, expected={expected:?})"
                )
            }
            (Err(_), None) => {}
        }
    }
}

fn run_set(name: &str) {
    let file = load();
    let test_set = file
        .tests
        .get(name)
        .unwrap_or_else(|| panic!("test set {name:?} not found"));
    run(name, test_set);
}

#[test]
fn level1() {
    run_set("Level 1 Examples");
}

#[test]
fn level2() {
    run_set("Level 2 Examples");
}

#[test]
fn level3() {
    run_set("Level 3 Examples");
}

#[test]
fn level4() {
    run_set("Level 4 Examples");
}

#[test]
fn undefined_and_empty() {
    run_set("Undefined And Empty Values");
}

#[test]
fn negative_tests() {
    run_set("Failure Tests");
}

#[test]
fn every_set_is_run() {
    let file = load();
    assert_eq!(file.tests.len(), 6, "add a test function for new sets");
}
