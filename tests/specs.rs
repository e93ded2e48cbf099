// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end tests driving the `wf` binary against real workflow source
//! files, covering the scheduler's terminal outcomes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn wf() -> Command {
    Command::cargo_bin("wf").expect("wf binary builds")
}

fn workdir() -> TempDir {
    TempDir::new().expect("tempdir")
}

fn write_workflow(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write workflow source");
    path
}

#[test]
fn linear_workflow_succeeds() {
    let dir = workdir();
    let file = write_workflow(
        &dir,
        "linear.wf",
        "
workflow: linear

step: a
  run: true

step: b
  run: true
  depends_on: a

step: c
  run: true
  depends_on: b
",
    );

    wf()
        .current_dir(dir.path())
        .args(["run-parallel", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("a: SUCCEEDED"))
        .stdout(predicate::str::contains("c: SUCCEEDED"));
}

#[test]
fn cyclic_workflow_is_rejected_at_check_time() {
    let dir = workdir();
    let file = write_workflow(
        &dir,
        "cycle.wf",
        "
workflow: cycle

step: a
  run: true
  depends_on: b

step: b
  run: true
  depends_on: a
",
    );

    wf()
        .current_dir(dir.path())
        .args(["check", file.to_str().unwrap()])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn banned_command_pattern_is_rejected() {
    let dir = workdir();
    let file = write_workflow(
        &dir,
        "banned.wf",
        "
workflow: banned

step: wipe
  run: rm -rf /
",
    );

    wf()
        .current_dir(dir.path())
        .args(["check", file.to_str().unwrap()])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn step_retries_until_it_succeeds() {
    let dir = workdir();
    let marker = dir.path().join("marker");
    let file = write_workflow(
        &dir,
        "retry.wf",
        &format!(
            "
workflow: retry

step: flaky
  run: test -f {marker} || {{ touch {marker}; exit 1; }}
  retries: 1
",
            marker = marker.display()
        ),
    );

    wf()
        .current_dir(dir.path())
        .args(["run-parallel", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("flaky: SUCCEEDED"));
}

#[test]
fn handled_failure_dispatches_notifier_and_workflow_still_completes() {
    let dir = workdir();
    let file = write_workflow(
        &dir,
        "handled.wf",
        "
workflow: handled

step: doomed
  run: false
  on_error: ops

notify: ops
  email: ops@example.com
  subject: step failed
  body: ${failed_step} failed
",
    );

    wf()
        .current_dir(dir.path())
        .args(["run-parallel", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("doomed: FAILED"));

    let log = fs::read_to_string(dir.path().join("notifications.log")).expect("notification log written");
    assert!(log.contains("doomed"));
    assert!(log.contains("ops@example.com"));
}

#[test]
fn unhandled_failure_aborts_the_workflow() {
    let dir = workdir();
    let file = write_workflow(
        &dir,
        "unhandled.wf",
        "
workflow: unhandled

step: doomed
  run: false

step: never_runs
  run: true
  depends_on: doomed
",
    );

    wf()
        .current_dir(dir.path())
        .args(["run-parallel", file.to_str().unwrap()])
        .assert()
        .failure()
        .code(4)
        .stdout(predicate::str::contains("doomed: FAILED"))
        .stdout(predicate::str::contains("never_runs").not());
}
