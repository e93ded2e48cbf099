// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A named unit of work and its scheduling metadata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named unit of work.
///
/// Steps are immutable after construction: nothing in this crate or the
/// analyzer/scheduler crates ever takes `&mut Step`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Non-empty identifier, unique within its workflow.
    pub name: String,
    /// Shell string. May be empty, in which case the sandbox treats it as a
    /// no-op that exits zero.
    pub command: String,
    /// Wall-clock bound on a single attempt, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
    /// Attempts *beyond* the first. Total attempts = retries + 1.
    #[serde(default)]
    pub retries: u32,
    /// Unordered set of step names this step waits on.
    #[serde(default)]
    pub depends_on: BTreeSet<String>,
    /// Name of a notifier invoked if every attempt of this step fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<String>,
}

impl Step {
    /// Total attempts the sandbox will make for this step before giving up.
    pub fn max_attempts(&self) -> u32 {
        self.retries + 1
    }
}

crate::builder! {
    pub struct StepBuilder => Step {
        into {
            name: String = "step",
            command: String = "true",
        }
        set {
            retries: u32 = 0,
            depends_on: BTreeSet<String> = BTreeSet::new(),
        }
        option {
            timeout_seconds: u64 = None,
            on_error: String = None,
        }
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
