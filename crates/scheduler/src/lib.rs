// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency Scheduler and Notifier Dispatch: the runtime half of the
//! orchestrator. Takes a validated [`wf_core::Workflow`] and a working
//! directory and runs it to completion, or to abort, or to cancellation.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod notify;
mod scheduler;

pub use notify::dispatch;
pub use scheduler::{default_pool_size, execute, execute_with_clock, Outcome, StatusSink};
