// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notifier Dispatch (spec §4.E): append one line to
//! `<workdir>/notifications.log` per handled failure. Synchronous,
//! fire-and-forget — a write failure is logged and swallowed, never
//! propagated to the scheduler.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use wf_core::{Clock, Workflow};

fn fmt_opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("none")
}

/// Invoke `handler_name` for `failed_step`. If the name resolves to a
/// known notifier on `workflow`, the line carries its contact fields
/// with `${failed_step}` substituted into the body; otherwise a
/// `NOTIFY-MISSING` line is recorded.
pub fn dispatch(workflow: &Workflow, handler_name: &str, failed_step: &str, workdir: &Path, clock: &dyn Clock) {
    let timestamp = clock.epoch_ms();
    let line = match workflow.notifier(handler_name) {
        Some(notifier) => {
            let body = notifier.body.as_ref().map(|b| b.replace("${failed_step}", failed_step));
            format!(
                "[{timestamp}] NOTIFY {handler_name} -> email: {} subject: {} body: {}\n",
                fmt_opt(&notifier.email),
                fmt_opt(&notifier.subject),
                fmt_opt(&body),
            )
        }
        None => format!("[{timestamp}] NOTIFY-MISSING {handler_name} for failed_step={failed_step}\n"),
    };

    if let Err(err) = append_line(workdir, &line) {
        tracing::debug!(%err, workdir = %workdir.display(), "failed to write notifications log");
    }
}

fn append_line(workdir: &Path, line: &str) -> std::io::Result<()> {
    std::fs::create_dir_all(workdir)?;
    let mut file = OpenOptions::new().create(true).append(true).open(workdir.join("notifications.log"))?;
    file.write_all(line.as_bytes())
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
