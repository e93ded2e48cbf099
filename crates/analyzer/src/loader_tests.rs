// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn loads_a_simple_linear_bytecode() {
    let json = r#"{
        "workflow": "wf",
        "steps": [
            {"op":"RUN","step":"a","cmd":"true","timeout":null,"retries":0,"depends_on":[],"on_error":null},
            {"op":"RUN","step":"b","cmd":"true","timeout":"5s","retries":1,"depends_on":["a"],"on_error":null}
        ],
        "notifies": []
    }"#;
    let wf = load(json).unwrap();
    assert_eq!(wf.name, "wf");
    assert_eq!(wf.steps.len(), 2);
    assert_eq!(wf.step("b").unwrap().timeout_seconds, Some(5));
}

#[test]
fn malformed_timeout_becomes_no_timeout() {
    let json = r#"{"workflow":"wf","steps":[
        {"op":"RUN","step":"a","cmd":"true","timeout":"soon","retries":0,"depends_on":[],"on_error":null}
    ]}"#;
    let wf = load(json).unwrap();
    assert_eq!(wf.step("a").unwrap().timeout_seconds, None);
}

#[test]
fn unresolved_dependency_fails_loud() {
    let json = r#"{"workflow":"wf","steps":[
        {"op":"RUN","step":"a","cmd":"true","timeout":null,"retries":0,"depends_on":["ghost"],"on_error":null}
    ]}"#;
    assert!(matches!(load(json), Err(LoadError::Inconsistent(GraphError::UnknownDependency { .. }))));
}

#[test]
fn cycle_fails_loud() {
    let json = r#"{"workflow":"wf","steps":[
        {"op":"RUN","step":"a","cmd":"true","timeout":null,"retries":0,"depends_on":["b"],"on_error":null},
        {"op":"RUN","step":"b","cmd":"true","timeout":null,"retries":0,"depends_on":["a"],"on_error":null}
    ]}"#;
    assert!(matches!(load(json), Err(LoadError::Inconsistent(GraphError::Cycle))));
}

#[test]
fn malformed_json_is_a_decode_error() {
    assert!(matches!(load("not json"), Err(LoadError::Decode(_))));
}
