// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal line-oriented reader for workflow source files.
//!
//! This is deliberately not a grammar: a real frontend (tokenizer,
//! parser, full expression language) is out of scope for this tool. The
//! format is a flat, indentation-based key/value syntax good enough to
//! drive the CLI end to end:
//!
//! ```text
//! workflow: deploy
//!
//! step: fetch
//!   run: git pull
//!
//! step: build
//!   run: cargo build --release
//!   depends_on: fetch
//!   retries: 2
//!   timeout: 30s
//!   on_error: notify_ops
//!
//! notify: notify_ops
//!   email: ops@example.com
//!   subject: build failed
//!   body: step ${failed_step} failed
//! ```
//!
//! A top-level line (`workflow:`, `step:`, `notify:`) opens a block;
//! indented `key: value` lines populate it. Blank lines and `#` comments
//! are ignored.

use thiserror::Error;
use wf_analyzer::{NotifierAst, StepAst, WorkflowAst};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected 'key: value', found {text:?}")]
    MalformedLine { line: usize, text: String },
    #[error("line {line}: indented entry before any 'step:' or 'notify:' block")]
    OrphanEntry { line: usize },
    #[error("line {line}: unknown block key '{key}' (expected 'workflow', 'step', or 'notify')")]
    UnknownBlock { line: usize, key: String },
    #[error("line {line}: invalid integer for 'retries': {value:?}")]
    InvalidRetries { line: usize, value: String },
    #[error("a 'step:' or 'notify:' block is missing its name")]
    MissingBlockName { line: usize },
}

enum Block {
    Step(StepAst),
    Notify(NotifierAst),
}

/// Parse workflow source text into a [`WorkflowAst`].
pub fn parse(text: &str) -> Result<WorkflowAst, ParseError> {
    let mut workflow_name = "workflow".to_string();
    let mut steps = Vec::new();
    let mut notifies = Vec::new();
    let mut current: Option<Block> = None;

    let flush = |current: Option<Block>, steps: &mut Vec<StepAst>, notifies: &mut Vec<NotifierAst>| {
        match current {
            Some(Block::Step(s)) => steps.push(s),
            Some(Block::Notify(n)) => notifies.push(n),
            None => {}
        }
    };

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let indented = raw_line.starts_with(char::is_whitespace);
        let (key, value) = split_pair(trimmed).ok_or(ParseError::MalformedLine { line: line_no, text: trimmed.to_string() })?;

        if !indented {
            match key {
                "workflow" => {
                    flush(current.take(), &mut steps, &mut notifies);
                    workflow_name = value.to_string();
                }
                "step" => {
                    flush(current.take(), &mut steps, &mut notifies);
                    if value.is_empty() {
                        return Err(ParseError::MissingBlockName { line: line_no });
                    }
                    current = Some(Block::Step(StepAst {
                        name: value.to_string(),
                        run: None,
                        timeout: None,
                        retries: 0,
                        depends_on: Vec::new(),
                        on_error: None,
                    }));
                }
                "notify" => {
                    flush(current.take(), &mut steps, &mut notifies);
                    if value.is_empty() {
                        return Err(ParseError::MissingBlockName { line: line_no });
                    }
                    current = Some(Block::Notify(NotifierAst {
                        name: value.to_string(),
                        email: None,
                        subject: None,
                        body: None,
                    }));
                }
                other => return Err(ParseError::UnknownBlock { line: line_no, key: other.to_string() }),
            }
            continue;
        }

        match &mut current {
            Some(Block::Step(step)) => apply_step_field(step, key, value, line_no)?,
            Some(Block::Notify(notifier)) => apply_notify_field(notifier, key, value),
            None => return Err(ParseError::OrphanEntry { line: line_no }),
        }
    }

    flush(current.take(), &mut steps, &mut notifies);

    Ok(WorkflowAst { name: workflow_name, triggers: Vec::new(), env: Default::default(), steps, notifies })
}

fn split_pair(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}

fn apply_step_field(step: &mut StepAst, key: &str, value: &str, line_no: usize) -> Result<(), ParseError> {
    match key {
        "run" => step.run = Some(value.to_string()),
        "timeout" => step.timeout = Some(value.to_string()),
        "retries" => {
            step.retries = value
                .parse()
                .map_err(|_| ParseError::InvalidRetries { line: line_no, value: value.to_string() })?
        }
        "depends_on" => {
            step.depends_on = value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
        }
        "on_error" => step.on_error = Some(value.to_string()),
        _ => {}
    }
    Ok(())
}

fn apply_notify_field(notifier: &mut NotifierAst, key: &str, value: &str) {
    match key {
        "email" => notifier.email = Some(value.to_string()),
        "subject" => notifier.subject = Some(value.to_string()),
        "body" => notifier.body = Some(value.to_string()),
        _ => {}
    }
}

#[cfg(test)]
#[path = "dsl_tests.rs"]
mod tests;
