// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run, per-step execution state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle of a single step within one run.
///
/// ```text
/// PENDING -> READY -> RUNNING -> SUCCEEDED
///                             -> FAILED
/// PENDING -> SKIPPED   (predecessor FAILED, handled by on_error)
/// ```
///
/// Owned by the scheduler and mutated only while holding its lock; workers
/// observe it only through return values (see `wf-scheduler`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionState {
    Pending,
    Ready,
    Running,
    Succeeded,
    Failed,
    Skipped,
}

impl ExecutionState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ExecutionState::Succeeded | ExecutionState::Failed | ExecutionState::Skipped
        )
    }
}

crate::simple_display! {
    ExecutionState {
        Pending => "pending",
        Ready => "ready",
        Running => "running",
        Succeeded => "succeeded",
        Failed => "failed",
        Skipped => "skipped",
    }
}

/// The four statuses observable through the embedder status callback
/// (spec §6): `QUEUED` precedes `READY`/`RUNNING` from the embedder's point
/// of view, so it is a distinct wire-level kind rather than an
/// `ExecutionState` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusKind {
    Queued,
    Running,
    Succeeded,
    Failed,
}

crate::simple_display! {
    StatusKind {
        Queued => "QUEUED",
        Running => "RUNNING",
        Succeeded => "SUCCEEDED",
        Failed => "FAILED",
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
