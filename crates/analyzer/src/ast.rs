// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The shape produced by an external DSL frontend, before semantic
//! analysis. Parsing text into this shape is out of scope for this crate
//! (see `wf-cli`'s line-oriented reader); everything downstream of parsing
//! lives here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A step as written by the author, before dependency/cycle checks and
/// before `timeout` is parsed into seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepAst {
    pub name: String,
    #[serde(default)]
    pub run: Option<String>,
    /// Raw form, e.g. `"5s"` or `"5"`; trailing `s` is optional.
    #[serde(default)]
    pub timeout: Option<String>,
    #[serde(default)]
    pub retries: u32,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub on_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifierAst {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowAst {
    pub name: String,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub env: HashMap<String, String>,
    pub steps: Vec<StepAst>,
    #[serde(default)]
    pub notifies: Vec<NotifierAst>,
}

impl From<NotifierAst> for wf_core::Notifier {
    fn from(n: NotifierAst) -> Self {
        wf_core::Notifier { name: n.name, email: n.email, subject: n.subject, body: n.body }
    }
}
