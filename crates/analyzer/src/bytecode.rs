// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON wire format for persisted, post-analysis workflows (spec §6).

use crate::ast::NotifierAst;
use crate::lower::Instruction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bytecode {
    pub workflow: String,
    pub steps: Vec<Instruction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notifies: Vec<NotifierAst>,
}

impl Bytecode {
    pub fn new(workflow_name: impl Into<String>, steps: Vec<Instruction>, notifies: Vec<NotifierAst>) -> Self {
        Self { workflow: workflow_name.into(), steps, notifies }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
#[path = "bytecode_tests.rs"]
mod tests;
