// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command Sandbox (spec §4.A): run one shell command in its own
//! process group, enforcing an optional wall-clock timeout and an
//! optional memory ceiling, neither of which is a security boundary —
//! see the crate-level docs.

use crate::guard::ProcessGroupGuard;
use crate::rss::tree_rss_bytes;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};
use sysinfo::{Pid, System};
use tokio::process::{Child, Command};
use tokio::time::interval;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Run `command` via the platform shell in `cwd` (created if missing).
/// Returns `true` only if the process exited with code zero within both
/// the timeout and the memory ceiling.
pub async fn run(
    command: &str,
    cwd: &Path,
    timeout_seconds: Option<u64>,
    memory_limit_mb: Option<u64>,
) -> bool {
    if let Err(err) = tokio::fs::create_dir_all(cwd).await {
        tracing::warn!(cwd = %cwd.display(), %err, "failed to create sandbox working directory");
        return false;
    }

    let mut cmd = build_command(command, cwd, memory_limit_mb);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            tracing::warn!(%command, %err, "failed to spawn sandboxed command");
            return false;
        }
    };

    let Some(pid) = child.id() else {
        tracing::warn!(%command, "spawned child has no pid");
        return false;
    };

    let guard = Arc::new(ProcessGroupGuard::new(pid));
    drain_stdio(&mut child);

    supervise(child, pid, guard, timeout_seconds, memory_limit_mb).await
}

#[cfg(unix)]
fn build_command(command: &str, cwd: &Path, memory_limit_mb: Option<u64>) -> Command {
    // `ulimit -v` sets the shell's own RLIMIT_AS before it execs `command`,
    // which inherits the limit. This keeps the ceiling best-effort (a shell
    // that rejects the limit still runs the command, just uncapped) without
    // a pre-exec hook into the forked child.
    let shell_command = match memory_limit_mb {
        Some(limit_mb) => format!("ulimit -v {}; {command}", limit_mb.saturating_mul(1024)),
        None => command.to_string(),
    };

    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(shell_command)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .process_group(0);
    cmd
}

#[cfg(not(unix))]
fn build_command(command: &str, cwd: &Path, _memory_limit_mb: Option<u64>) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C")
        .arg(command)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

/// Consume stdout/stderr in the background so the child never blocks on a
/// full pipe buffer. The sandbox never surfaces this output to the
/// scheduler (spec §4.A).
fn drain_stdio(child: &mut Child) {
    use tokio::io::AsyncReadExt;

    if let Some(mut stdout) = child.stdout.take() {
        tokio::spawn(async move {
            let mut sink = Vec::new();
            let _ = stdout.read_to_end(&mut sink).await;
        });
    }
    if let Some(mut stderr) = child.stderr.take() {
        tokio::spawn(async move {
            let mut sink = Vec::new();
            let _ = stderr.read_to_end(&mut sink).await;
        });
    }
}

async fn supervise(
    mut child: Child,
    pid: u32,
    guard: Arc<ProcessGroupGuard>,
    timeout_seconds: Option<u64>,
    memory_limit_mb: Option<u64>,
) -> bool {
    let start = Instant::now();
    let mut ticks = interval(POLL_INTERVAL);
    let mut system = System::new();
    let sysinfo_pid = Pid::from(pid as usize);

    loop {
        ticks.tick().await;

        if let Some(timeout) = timeout_seconds {
            if start.elapsed() > Duration::from_secs(timeout) {
                tracing::warn!(%pid, timeout, "sandboxed command exceeded timeout, killing");
                guard.kill();
                let _ = child.wait().await;
                return false;
            }
        }

        if let Some(limit_mb) = memory_limit_mb {
            system.refresh_all();
            let rss = tree_rss_bytes(&system, sysinfo_pid);
            let limit_bytes = limit_mb.saturating_mul(1024 * 1024);
            if rss > limit_bytes {
                tracing::warn!(%pid, rss, limit_bytes, "sandboxed command exceeded memory ceiling, killing");
                guard.kill();
                let _ = child.wait().await;
                return false;
            }
        }

        match child.try_wait() {
            Ok(Some(status)) => return status.success(),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(%pid, %err, "failed to poll sandboxed command status");
                return false;
            }
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
