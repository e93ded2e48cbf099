// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bytecode Loader (spec §4.B): structural decode only. Dependency
//! resolution and cycle detection are re-run through the same graph
//! builder the scheduler uses, so an inconsistent persisted file fails
//! loud instead of silently producing a partial schedule.

use crate::bytecode::Bytecode;
use std::collections::BTreeSet;
use thiserror::Error;
use wf_core::{DependencyGraph, GraphError, Notifier, Step, Workflow};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed bytecode: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("bytecode is dependency-inconsistent: {0}")]
    Inconsistent(#[from] GraphError),
}

/// `"5s"` / `"5"` -> `Some(5)`. A malformed string silently becomes
/// `None`, matching the reference runtime's `except: return None`.
fn parse_timeout(raw: &Option<String>) -> Option<u64> {
    let raw = raw.as_ref()?;
    raw.trim_end_matches('s').parse().ok()
}

/// Decode bytecode JSON and validate it into a runnable [`Workflow`].
pub fn load(text: &str) -> Result<Workflow, LoadError> {
    let bc = Bytecode::from_json(text)?;

    let steps: Vec<Step> = bc
        .steps
        .iter()
        .map(|instr| Step {
            name: instr.step.clone(),
            command: instr.cmd.clone().unwrap_or_default(),
            timeout_seconds: parse_timeout(&instr.timeout),
            retries: instr.retries,
            depends_on: instr.depends_on.iter().cloned().collect::<BTreeSet<_>>(),
            on_error: instr.on_error.clone(),
        })
        .collect();

    // Fails loud if the loader produced an inconsistent graph.
    DependencyGraph::build(&steps)?.canonical_order()?;

    let notifiers: Vec<Notifier> = bc.notifies.into_iter().map(Notifier::from).collect();
    Ok(Workflow::new(bc.workflow, steps, notifiers))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
