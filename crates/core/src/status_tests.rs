// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn terminal_states() {
    assert!(ExecutionState::Succeeded.is_terminal());
    assert!(ExecutionState::Failed.is_terminal());
    assert!(ExecutionState::Skipped.is_terminal());
    assert!(!ExecutionState::Pending.is_terminal());
    assert!(!ExecutionState::Ready.is_terminal());
    assert!(!ExecutionState::Running.is_terminal());
}

#[test]
fn status_kind_display_matches_wire_names() {
    assert_eq!(StatusKind::Queued.to_string(), "QUEUED");
    assert_eq!(StatusKind::Running.to_string(), "RUNNING");
    assert_eq!(StatusKind::Succeeded.to_string(), "SUCCEEDED");
    assert_eq!(StatusKind::Failed.to_string(), "FAILED");
}
