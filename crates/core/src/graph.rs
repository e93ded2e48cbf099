// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency graph derived from a step list.
//!
//! Shared by the Semantic Analyzer (to reject unresolved dependencies and
//! cycles, and to compute the canonical topological order) and the
//! Dependency Scheduler / Bytecode Loader (to rebuild runtime state). The
//! Bytecode Loader never builds its own graph — it calls [`DependencyGraph::build`],
//! the same builder the scheduler uses, so a structurally-inconsistent
//! persisted file fails the same way a bad AST would.

use crate::step::Step;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("step '{step}' depends on unknown step '{dependency}'")]
    UnknownDependency { step: String, dependency: String },
    #[error("dependency cycle detected")]
    Cycle,
}

/// Nodes are step names. An edge `u -> v` exists if `u` appears in
/// `v.depends_on` — i.e. `forward[u]` holds the steps that become ready
/// sooner once `u` terminates.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    nodes: BTreeSet<String>,
    forward: BTreeMap<String, BTreeSet<String>>,
    unresolved: HashMap<String, u32>,
}

impl DependencyGraph {
    /// Build from a step list. Fails if any `depends_on` name is not a
    /// declared step. Does not itself detect cycles — call
    /// [`DependencyGraph::canonical_order`] for that.
    pub fn build(steps: &[Step]) -> Result<Self, GraphError> {
        let nodes: BTreeSet<String> = steps.iter().map(|s| s.name.clone()).collect();
        let mut forward: BTreeMap<String, BTreeSet<String>> =
            nodes.iter().cloned().map(|n| (n, BTreeSet::new())).collect();
        let mut unresolved = HashMap::new();

        for step in steps {
            unresolved.insert(step.name.clone(), step.depends_on.len() as u32);
            for dep in &step.depends_on {
                if !nodes.contains(dep) {
                    return Err(GraphError::UnknownDependency {
                        step: step.name.clone(),
                        dependency: dep.clone(),
                    });
                }
                forward.entry(dep.clone()).or_default().insert(step.name.clone());
            }
        }

        Ok(Self { nodes, forward, unresolved })
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains(name)
    }

    /// Steps whose unresolved-dependency count is already zero.
    pub fn ready_set(&self) -> BTreeSet<String> {
        self.unresolved
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Per-step unresolved-dependency counters, owned by the caller
    /// (the scheduler mutates its own copy as steps complete).
    pub fn unresolved_counts(&self) -> HashMap<String, u32> {
        self.unresolved.clone()
    }

    /// Steps that become one dependency closer to ready once `name` terminates.
    pub fn dependents(&self, name: &str) -> impl Iterator<Item = &str> {
        self.forward.get(name).into_iter().flat_map(|set| set.iter().map(String::as_str))
    }

    /// Deterministic topological order via Kahn's algorithm: at each step,
    /// among zero-indegree nodes, emit the lexicographically smallest name.
    /// Returns [`GraphError::Cycle`] if fewer nodes are emitted than exist.
    pub fn canonical_order(&self) -> Result<Vec<String>, GraphError> {
        let mut indeg = self.unresolved.clone();
        let mut ready: BTreeSet<String> =
            indeg.iter().filter(|(_, c)| **c == 0).map(|(n, _)| n.clone()).collect();
        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(name) = ready.iter().next().cloned() {
            ready.remove(&name);
            order.push(name.clone());
            for succ in self.dependents(&name) {
                let count = indeg.get_mut(succ).expect("successor must be a known node");
                *count -= 1;
                if *count == 0 {
                    ready.insert(succ.to_string());
                }
            }
        }

        if order.len() != self.nodes.len() {
            return Err(GraphError::Cycle);
        }
        Ok(order)
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
