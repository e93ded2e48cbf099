// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use wf_core::{FakeClock, Notifier};

fn workflow_with_notifier() -> Workflow {
    Workflow::new(
        "wf",
        vec![],
        vec![Notifier {
            name: "notify_ops".to_string(),
            email: Some("ops@example.com".to_string()),
            subject: Some("step failed".to_string()),
            body: Some("step ${failed_step} failed".to_string()),
        }],
    )
}

#[test]
fn known_notifier_substitutes_failed_step_into_body() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();
    dispatch(&workflow_with_notifier(), "notify_ops", "a", dir.path(), &clock);

    let contents = std::fs::read_to_string(dir.path().join("notifications.log")).unwrap();
    assert!(contents.contains("NOTIFY notify_ops"));
    assert!(contents.contains("step a failed"));
    assert!(contents.contains("ops@example.com"));
}

#[test]
fn unknown_notifier_records_missing_line() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();
    dispatch(&workflow_with_notifier(), "ghost", "a", dir.path(), &clock);

    let contents = std::fs::read_to_string(dir.path().join("notifications.log")).unwrap();
    assert!(contents.contains("NOTIFY-MISSING ghost for failed_step=a"));
}

#[test]
fn appends_multiple_lines() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FakeClock::new();
    dispatch(&workflow_with_notifier(), "notify_ops", "a", dir.path(), &clock);
    dispatch(&workflow_with_notifier(), "notify_ops", "b", dir.path(), &clock);

    let contents = std::fs::read_to_string(dir.path().join("notifications.log")).unwrap();
    assert_eq!(contents.lines().count(), 2);
}
