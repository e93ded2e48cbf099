// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Semantic Analyzer (spec §4.C): rejects malformed workflows and, for
//! valid ones, produces the canonical topological order the scheduler
//! relies on for deterministic status-event ordering.

use crate::ast::{StepAst, WorkflowAst};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;
use wf_core::{DependencyGraph, GraphError};

/// Matched case-sensitively, anywhere in the command string. An advisory
/// filter only — not a sandbox boundary (see `wf-sandbox`).
///
/// Deliberately narrow: rejects `>>` but not a single `>`, and does not
/// reject command substitution `$(...)`. Widening this list is a product
/// decision, not a bug fix.
const BANNED_PATTERNS: &[&str] =
    &[r"rm\s+-rf", r"(^|;|\s)\|(\s|$)", r">>", r"(^|;|\s)&(\s|$)", "`"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("duplicate step name: {0}")]
    DuplicateStepName(String),
    #[error("step '{step}' depends on missing step '{dependency}'")]
    UnresolvedDependency { step: String, dependency: String },
    #[error("cycle detected in step dependencies")]
    Cycle,
    #[error("banned pattern in step '{step}': pattern '{pattern}' matched")]
    BannedPattern { step: String, pattern: String },
}

impl From<GraphError> for SemanticError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::UnknownDependency { step, dependency } => {
                SemanticError::UnresolvedDependency { step, dependency }
            }
            GraphError::Cycle => SemanticError::Cycle,
        }
    }
}

fn check_duplicates(steps: &[StepAst]) -> Result<(), SemanticError> {
    let mut seen = HashSet::new();
    for step in steps {
        if !seen.insert(step.name.as_str()) {
            return Err(SemanticError::DuplicateStepName(step.name.clone()));
        }
    }
    Ok(())
}

fn check_banned_patterns(steps: &[StepAst]) -> Result<(), SemanticError> {
    let compiled: Vec<regex::Regex> =
        BANNED_PATTERNS.iter().map(|p| regex::Regex::new(p).expect("pattern is valid")).collect();
    for step in steps {
        let Some(command) = &step.run else { continue };
        for (pattern, re) in BANNED_PATTERNS.iter().zip(&compiled) {
            if re.is_match(command) {
                return Err(SemanticError::BannedPattern {
                    step: step.name.clone(),
                    pattern: (*pattern).to_string(),
                });
            }
        }
    }
    Ok(())
}

/// A stand-in `wf_core::Step` used only to drive graph construction; the
/// `command`/`timeout_seconds` fields are irrelevant to dependency
/// resolution and cycle detection, so they take placeholder values.
fn graph_steps(steps: &[StepAst]) -> Vec<wf_core::Step> {
    steps
        .iter()
        .map(|s| wf_core::Step {
            name: s.name.clone(),
            command: String::new(),
            timeout_seconds: None,
            retries: s.retries,
            depends_on: s.depends_on.iter().cloned().collect::<BTreeSet<_>>(),
            on_error: s.on_error.clone(),
        })
        .collect()
}

/// Runs all four validations in spec order and returns the canonical
/// topological order of step names on success.
pub fn analyze(workflow: &WorkflowAst) -> Result<Vec<String>, SemanticError> {
    check_duplicates(&workflow.steps)?;
    let graph = DependencyGraph::build(&graph_steps(&workflow.steps))?;
    let order = graph.canonical_order()?;
    check_banned_patterns(&workflow.steps)?;
    Ok(order)
}

#[cfg(test)]
#[path = "semantic_tests.rs"]
mod tests;
