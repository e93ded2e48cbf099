// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wf` - command-line frontend over the analyzer and scheduler crates.
//!
//! Six subcommands cover the pipeline end to end: validate a workflow
//! source file, compile it to bytecode, and run bytecode (optionally
//! alongside a metrics endpoint).

mod dsl;
mod exit_error;
mod metrics;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use exit_error::ExitError;
use metrics::Metrics;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use wf_core::StatusKind;
use wf_scheduler::Outcome;

#[derive(Parser)]
#[command(name = "wf", version, about = "Dependency-aware workflow orchestrator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse and validate a workflow source file; prints the canonical step order.
    Check { file: PathBuf },
    /// Compile a workflow source file to bytecode JSON.
    EmitBytecode { file: PathBuf, out: PathBuf },
    /// Run a previously compiled bytecode file.
    RunBytecode {
        bytecode: PathBuf,
        #[arg(default_value_t = default_memory_limit_mb())]
        memory_limit_mb: u64,
        #[arg(default_value_t = wf_scheduler::default_pool_size())]
        max_workers: usize,
    },
    /// Compile and run a workflow source file in one step.
    RunParallel {
        file: PathBuf,
        #[arg(default_value_t = wf_scheduler::default_pool_size())]
        max_workers: usize,
        #[arg(default_value_t = default_memory_limit_mb())]
        memory_limit_mb: u64,
    },
    /// Serve `/metrics` with no workflow attached; blocks until killed.
    StartMonitor {
        #[arg(default_value_t = 8000)]
        port: u16,
    },
    /// Run bytecode with a `/metrics` endpoint attached alongside it.
    RunWithMonitor {
        bytecode: PathBuf,
        #[arg(default_value_t = 8000)]
        port: u16,
        #[arg(default_value_t = default_memory_limit_mb())]
        memory_limit_mb: u64,
        #[arg(default_value_t = wf_scheduler::default_pool_size())]
        max_workers: usize,
    },
}

fn default_memory_limit_mb() -> u64 {
    512
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = run().await {
        match err.downcast::<ExitError>() {
            Ok(exit_err) => {
                eprintln!("error: {}", exit_err.message);
                std::process::exit(exit_err.code);
            }
            Err(err) => {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Check { file } => check(&file),
        Command::EmitBytecode { file, out } => emit_bytecode(&file, &out),
        Command::RunBytecode { bytecode, memory_limit_mb, max_workers } => {
            run_bytecode(&bytecode, max_workers, Some(memory_limit_mb), None).await
        }
        Command::RunParallel { file, max_workers, memory_limit_mb } => {
            run_parallel(&file, max_workers, Some(memory_limit_mb)).await
        }
        Command::StartMonitor { port } => start_monitor(port).await,
        Command::RunWithMonitor { bytecode, port, memory_limit_mb, max_workers } => {
            run_with_monitor(&bytecode, port, max_workers, Some(memory_limit_mb)).await
        }
    }
}

fn read_source(file: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))
}

/// Parse, then run the Semantic Analyzer; returns the canonical step order.
fn analyze_file(file: &std::path::Path) -> Result<(wf_analyzer::WorkflowAst, Vec<String>)> {
    let text = read_source(file)?;
    let workflow =
        dsl::parse(&text).map_err(|e| ExitError::new(1, format!("parse error: {e}")))?;
    let order = wf_analyzer::analyze(&workflow)
        .map_err(|e| ExitError::new(2, format!("validation failed: {e}")))?;
    Ok((workflow, order))
}

fn check(file: &std::path::Path) -> Result<()> {
    let (workflow, order) = analyze_file(file)?;
    println!("{} OK", workflow.name);
    println!("canonical order: {}", order.join(" -> "));
    Ok(())
}

fn compile_to_bytecode(file: &std::path::Path) -> Result<String> {
    let (workflow, order) = analyze_file(file)?;
    let instructions = wf_analyzer::lower(&workflow, &order);
    let bytecode = wf_analyzer::Bytecode::new(workflow.name.clone(), instructions, workflow.notifies.clone());
    bytecode.to_json().map_err(|e| ExitError::new(3, format!("bytecode encode failed: {e}")).into())
}

fn emit_bytecode(file: &std::path::Path, out: &std::path::Path) -> Result<()> {
    let json = compile_to_bytecode(file)?;
    std::fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
    println!("wrote {}", out.display());
    Ok(())
}

fn load_bytecode_file(path: &std::path::Path) -> Result<wf_core::Workflow> {
    let text = read_source(path)?;
    wf_analyzer::load(&text).map_err(|e| ExitError::new(3, format!("bytecode load failed: {e}")).into())
}

/// Shared tail between `run-bytecode` and `run-with-monitor`: run `workflow`
/// in the current directory, wiring `metrics` (if any) into the status sink
/// alongside the usual stdout progress line, and map the outcome to a
/// process exit code.
async fn run_workflow(
    workflow: wf_core::Workflow,
    max_workers: usize,
    memory_limit_mb: Option<u64>,
    metrics: Option<Arc<Metrics>>,
) -> Result<()> {
    let workdir = std::env::current_dir().context("resolving working directory")?;
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    let sink_workflow = workflow.clone();
    let sink: wf_scheduler::StatusSink = Arc::new(move |step: &str, status: StatusKind| {
        println!("{step}: {status}");
        if let Some(metrics) = &metrics {
            metrics.record(status);
            if status == StatusKind::Failed && sink_workflow.step(step).is_some_and(|s| s.on_error.is_some()) {
                metrics.record_notification();
            }
        }
    });

    let outcome = wf_scheduler::execute(&workflow, &workdir, max_workers, memory_limit_mb, Some(cancel), Some(sink)).await;

    match outcome {
        Outcome::AllSucceeded => Ok(()),
        Outcome::Aborted => Err(ExitError::new(4, format!("workflow {} aborted", workflow.name)).into()),
        Outcome::Cancelled => Err(ExitError::new(5, format!("workflow {} cancelled", workflow.name)).into()),
    }
}

async fn run_bytecode(bytecode: &std::path::Path, max_workers: usize, memory_limit_mb: Option<u64>, metrics: Option<Arc<Metrics>>) -> Result<()> {
    let workflow = load_bytecode_file(bytecode)?;
    run_workflow(workflow, max_workers, memory_limit_mb, metrics).await
}

async fn run_parallel(file: &std::path::Path, max_workers: usize, memory_limit_mb: Option<u64>) -> Result<()> {
    let json = compile_to_bytecode(file)?;
    let workflow =
        wf_analyzer::load(&json).map_err(|e| ExitError::new(3, format!("internal bytecode round-trip failed: {e}")))?;
    run_workflow(workflow, max_workers, memory_limit_mb, None).await
}

async fn start_monitor(port: u16) -> Result<()> {
    let metrics = Metrics::new();
    metrics::start_metrics_server(metrics, port).with_context(|| format!("binding metrics server on port {port}"))?;
    println!("metrics listening on 127.0.0.1:{port}/metrics");
    std::future::pending::<()>().await;
    Ok(())
}

async fn run_with_monitor(bytecode: &std::path::Path, port: u16, max_workers: usize, memory_limit_mb: Option<u64>) -> Result<()> {
    let metrics = Metrics::new();
    metrics::start_metrics_server(Arc::clone(&metrics), port)
        .with_context(|| format!("binding metrics server on port {port}"))?;
    println!("metrics listening on 127.0.0.1:{port}/metrics");
    run_bytecode(bytecode, max_workers, memory_limit_mb, Some(metrics)).await
}
