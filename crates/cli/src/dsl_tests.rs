// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_workflow_name_and_steps() {
    let src = "
workflow: deploy

step: fetch
  run: git pull

step: build
  run: cargo build --release
  depends_on: fetch
  retries: 2
  timeout: 30s
  on_error: notify_ops

notify: notify_ops
  email: ops@example.com
  subject: build failed
  body: step ${failed_step} failed
";
    let wf = parse(src).unwrap();
    assert_eq!(wf.name, "deploy");
    assert_eq!(wf.steps.len(), 2);

    let build = wf.steps.iter().find(|s| s.name == "build").unwrap();
    assert_eq!(build.run.as_deref(), Some("cargo build --release"));
    assert_eq!(build.depends_on, vec!["fetch".to_string()]);
    assert_eq!(build.retries, 2);
    assert_eq!(build.timeout.as_deref(), Some("30s"));
    assert_eq!(build.on_error.as_deref(), Some("notify_ops"));

    let notifier = wf.notifies.iter().find(|n| n.name == "notify_ops").unwrap();
    assert_eq!(notifier.email.as_deref(), Some("ops@example.com"));
}

#[test]
fn defaults_workflow_name_when_omitted() {
    let wf = parse("step: a\n  run: true\n").unwrap();
    assert_eq!(wf.name, "workflow");
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let src = "# a comment\n\nworkflow: wf\n\n# another\nstep: a\n  run: true\n";
    let wf = parse(src).unwrap();
    assert_eq!(wf.steps.len(), 1);
}

#[test]
fn orphan_indented_entry_is_rejected() {
    let err = parse("  run: true\n").unwrap_err();
    assert_eq!(err, ParseError::OrphanEntry { line: 1 });
}

#[test]
fn unknown_block_is_rejected() {
    let err = parse("trigger: cron\n").unwrap_err();
    assert_eq!(err, ParseError::UnknownBlock { line: 1, key: "trigger".to_string() });
}

#[test]
fn invalid_retries_is_rejected() {
    let err = parse("step: a\n  retries: many\n").unwrap_err();
    assert_eq!(err, ParseError::InvalidRetries { line: 2, value: "many".to_string() });
}

#[test]
fn empty_depends_on_is_empty_vec() {
    let wf = parse("step: a\n  depends_on: \n").unwrap();
    assert!(wf.steps[0].depends_on.is_empty());
}
