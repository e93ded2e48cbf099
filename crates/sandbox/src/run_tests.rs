// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn true_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    assert!(run("true", dir.path(), None, None).await);
}

#[tokio::test]
async fn false_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!run("false", dir.path(), None, None).await);
}

#[tokio::test]
async fn empty_command_is_a_no_op_that_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    assert!(run("", dir.path(), None, None).await);
}

#[tokio::test]
async fn timeout_kills_a_long_running_command() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!run("sleep 5", dir.path(), Some(1), None).await);
}

#[tokio::test]
async fn creates_missing_cwd() {
    let parent = tempfile::tempdir().unwrap();
    let nested = parent.path().join("nested/workdir");
    assert!(run("true", &nested, None, None).await);
    assert!(nested.is_dir());
}
