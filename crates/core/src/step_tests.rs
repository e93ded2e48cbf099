// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn max_attempts_is_retries_plus_one() {
    let step = Step::builder().retries(2).build();
    assert_eq!(step.max_attempts(), 3);
}

#[test]
fn default_retries_is_zero() {
    let step = Step::builder().build();
    assert_eq!(step.retries, 0);
    assert_eq!(step.max_attempts(), 1);
}

#[test]
fn step_roundtrips_through_json() {
    let step = Step::builder()
        .name("build")
        .command("cargo build")
        .retries(1)
        .depends_on(BTreeSet::from(["fetch".to_string()]))
        .on_error("notify_ops")
        .build();

    let json = serde_json::to_string(&step).unwrap();
    let back: Step = serde_json::from_str(&json).unwrap();
    assert_eq!(step, back);
}

#[test]
fn missing_optional_fields_default_on_deserialize() {
    let json = r#"{"name":"a","command":"true"}"#;
    let step: Step = serde_json::from_str(json).unwrap();
    assert_eq!(step.retries, 0);
    assert!(step.depends_on.is_empty());
    assert!(step.on_error.is_none());
    assert!(step.timeout_seconds.is_none());
}
