// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency Scheduler (spec §4.D): the core of the core. Drives a
//! bounded worker pool over the step DAG, emitting status events and
//! invoking Notifier Dispatch on handled failures.

use crate::notify;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use wf_core::{Clock, DependencyGraph, StatusKind, Step, SystemClock, Workflow};

/// `on_status(step_name, status)`, invoked concurrently from the
/// scheduler and its workers (spec §6). Implementers must synchronize
/// internally if they need to.
pub type StatusSink = Arc<dyn Fn(&str, StatusKind) + Send + Sync>;

/// Result of a full `execute` call. Distinct terminal states per spec §4.D.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    AllSucceeded,
    Aborted,
    Cancelled,
}

/// `min(32, 2 × hardware_parallelism)` (spec §5).
pub fn default_pool_size() -> usize {
    let parallelism = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(2);
    (2 * parallelism).min(32)
}

struct WorkerResult {
    name: String,
    succeeded: bool,
}

async fn run_step(step: Step, workdir: std::path::PathBuf, memory_limit_mb: Option<u64>, cancel: Option<CancellationToken>) -> WorkerResult {
    let name = step.name.clone();
    for _attempt in 0..step.max_attempts() {
        if cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return WorkerResult { name, succeeded: false };
        }
        if wf_sandbox::run(&step.command, &workdir, step.timeout_seconds, memory_limit_mb).await {
            return WorkerResult { name, succeeded: true };
        }
    }
    WorkerResult { name, succeeded: false }
}

fn emit(sink: &Option<StatusSink>, step: &str, status: StatusKind) {
    if let Some(sink) = sink {
        (sink)(step, status);
    }
}

/// Run `workflow` to completion. `pool_size` bounds concurrent workers;
/// `memory_limit_mb` and each step's own `timeout_seconds` bound the
/// Command Sandbox; `cancel` is a one-shot external stop signal;
/// `status_sink` receives QUEUED/RUNNING/SUCCEEDED/FAILED events.
#[allow(clippy::too_many_arguments)]
pub async fn execute(
    workflow: &Workflow,
    workdir: &Path,
    pool_size: usize,
    memory_limit_mb: Option<u64>,
    cancel: Option<CancellationToken>,
    status_sink: Option<StatusSink>,
) -> Outcome {
    execute_with_clock(workflow, workdir, pool_size, memory_limit_mb, cancel, status_sink, &SystemClock).await
}

/// Same as [`execute`] but with an injectable clock, for deterministic
/// notification-log timestamps in tests.
pub async fn execute_with_clock(
    workflow: &Workflow,
    workdir: &Path,
    pool_size: usize,
    memory_limit_mb: Option<u64>,
    cancel: Option<CancellationToken>,
    status_sink: Option<StatusSink>,
    clock: &dyn Clock,
) -> Outcome {
    let graph = match DependencyGraph::build(&workflow.steps) {
        Ok(graph) => graph,
        Err(err) => {
            tracing::error!(%err, "scheduler received a dependency-inconsistent step list");
            return Outcome::Aborted;
        }
    };

    if graph.is_empty() {
        return Outcome::AllSucceeded;
    }

    let mut ready: BTreeSet<String> = graph.ready_set();
    if ready.is_empty() {
        tracing::error!("no ready steps at startup; the graph was not acyclic");
        return Outcome::Aborted;
    }

    let mut unresolved: HashMap<String, u32> = graph.unresolved_counts();
    let mut completed: HashSet<String> = HashSet::new();
    let mut failed: HashSet<String> = HashSet::new();
    let semaphore = Arc::new(Semaphore::new(pool_size.max(1)));
    let mut join_set: JoinSet<WorkerResult> = JoinSet::new();

    loop {
        // 1. submit every ready step, in sorted order, emitting QUEUED then RUNNING.
        for name in std::mem::take(&mut ready) {
            emit(&status_sink, &name, StatusKind::Queued);
            emit(&status_sink, &name, StatusKind::Running);

            let step = workflow.step(&name).expect("ready step must exist in the workflow").clone();
            let permit = Arc::clone(&semaphore);
            let cancel = cancel.clone();
            let workdir = workdir.to_path_buf();
            join_set.spawn(async move {
                let _permit = permit.acquire_owned().await.expect("semaphore is never closed");
                run_step(step, workdir, memory_limit_mb, cancel).await
            });
        }

        if join_set.is_empty() {
            break;
        }

        // 2. wait for any worker to complete.
        let Some(joined) = join_set.join_next().await else { break };
        let WorkerResult { name, succeeded } = match joined {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(%err, "scheduler worker task panicked");
                continue;
            }
        };

        // 3. update state based on the completion.
        if succeeded {
            emit(&status_sink, &name, StatusKind::Succeeded);
            completed.insert(name.clone());
            for succ in graph.dependents(&name) {
                let count = unresolved.get_mut(succ).expect("successor is a known node");
                *count -= 1;
                if *count == 0 {
                    ready.insert(succ.to_string());
                }
            }
        } else {
            emit(&status_sink, &name, StatusKind::Failed);
            failed.insert(name.clone());
            let step = workflow.step(&name).expect("failed step must exist in the workflow");

            match &step.on_error {
                Some(handler) => {
                    notify::dispatch(workflow, handler, &name, workdir, clock);
                    for succ in graph.dependents(&name) {
                        let count = unresolved.get_mut(succ).expect("successor is a known node");
                        *count -= 1;
                        if *count == 0 {
                            ready.insert(succ.to_string());
                        }
                    }
                }
                None => {
                    tracing::warn!(step = %name, "unhandled step failure, aborting workflow");
                    join_set.abort_all();
                    return Outcome::Aborted;
                }
            }
        }

        // 4. check the external cancel signal between iterations.
        if cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            join_set.abort_all();
            return Outcome::Cancelled;
        }
    }

    // Reaching here means the loop drained with no unhandled failure —
    // an unhandled one always returns `Aborted` immediately above.
    tracing::info!(workflow = %workflow.name, succeeded = completed.len(), handled_failures = failed.len(), "workflow finished");
    Outcome::AllSucceeded
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
