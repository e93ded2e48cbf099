// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::ast::StepAst;

fn workflow() -> WorkflowAst {
    WorkflowAst {
        name: "wf".to_string(),
        triggers: Vec::new(),
        env: Default::default(),
        steps: vec![
            StepAst {
                name: "b".to_string(),
                run: Some("true".to_string()),
                timeout: Some("5s".to_string()),
                retries: 1,
                depends_on: vec!["a".to_string()],
                on_error: None,
            },
            StepAst {
                name: "a".to_string(),
                run: Some("true".to_string()),
                timeout: None,
                retries: 0,
                depends_on: vec![],
                on_error: Some("notify_ops".to_string()),
            },
        ],
        notifies: Vec::new(),
    }
}

#[test]
fn lowers_in_the_given_order_not_declaration_order() {
    let wf = workflow();
    let order = vec!["a".to_string(), "b".to_string()];
    let instructions = lower(&wf, &order);
    assert_eq!(instructions.len(), 2);
    assert_eq!(instructions[0].step, "a");
    assert_eq!(instructions[1].step, "b");
}

#[test]
fn carries_timeout_as_raw_string() {
    let wf = workflow();
    let order = vec!["a".to_string(), "b".to_string()];
    let instructions = lower(&wf, &order);
    assert_eq!(instructions[1].timeout, Some("5s".to_string()));
    assert_eq!(instructions[0].timeout, None);
}

#[test]
fn op_serializes_as_run() {
    let instr = Instruction {
        op: Op::Run,
        step: "a".to_string(),
        cmd: Some("true".to_string()),
        timeout: None,
        retries: 0,
        depends_on: vec![],
        on_error: None,
    };
    let json = serde_json::to_string(&instr).unwrap();
    assert!(json.contains("\"op\":\"RUN\""));
}
