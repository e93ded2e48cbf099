// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level workflow definition: steps, notifiers, and run metadata.

use crate::notifier::Notifier;
use crate::step::Step;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named collection of steps and notifiers.
///
/// Only `name`, `steps`, and `notifiers` are consumed by the core; `triggers`
/// and `env` are metadata the external DSL frontend may attach but the
/// Semantic Analyzer, Scheduler, and Sandbox never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    pub name: String,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub env: HashMap<String, String>,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub notifiers: Vec<Notifier>,
}

impl Workflow {
    pub fn new(name: impl Into<String>, steps: Vec<Step>, notifiers: Vec<Notifier>) -> Self {
        Self {
            name: name.into(),
            triggers: Vec::new(),
            env: HashMap::new(),
            steps,
            notifiers,
        }
    }

    pub fn notifier(&self, name: &str) -> Option<&Notifier> {
        self.notifiers.iter().find(|n| n.name == name)
    }

    pub fn step(&self, name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.name == name)
    }
}
