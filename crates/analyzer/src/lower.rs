// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lowers a validated AST plus its canonical order into the flat
//! instruction list that the Bytecode emitter persists (spec §4.B/§6).
//!
//! `timeout` is carried through as its raw source string (`"5s"`, `"5"`,
//! or absent) rather than parsed here; parsing happens at load time and
//! silently falls back to "no timeout" on a malformed string, matching
//! the reference runtime.

use crate::ast::WorkflowAst;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Op {
    Run,
}

wf_core::simple_display! {
    Op {
        Run => "RUN",
    }
}

/// One step, lowered to wire shape. Field names match spec §6 exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub op: Op,
    pub step: String,
    #[serde(default)]
    pub cmd: Option<String>,
    #[serde(default)]
    pub timeout: Option<String>,
    #[serde(default)]
    pub retries: u32,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub on_error: Option<String>,
}

/// Lower `workflow`'s steps into instructions ordered by `order` (the
/// canonical order returned by [`crate::semantic::analyze`]).
pub fn lower(workflow: &WorkflowAst, order: &[String]) -> Vec<Instruction> {
    order
        .iter()
        .filter_map(|name| workflow.steps.iter().find(|s| &s.name == name))
        .map(|s| Instruction {
            op: Op::Run,
            step: s.name.clone(),
            cmd: s.run.clone(),
            timeout: s.timeout.clone(),
            retries: s.retries,
            depends_on: s.depends_on.clone(),
            on_error: s.on_error.clone(),
        })
        .collect()
}

#[cfg(test)]
#[path = "lower_tests.rs"]
mod tests;
