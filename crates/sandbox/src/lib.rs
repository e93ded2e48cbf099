// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command Sandbox: runs one shell command per call, isolated in its own
//! process group, with a best-effort memory ceiling and a wall-clock
//! timeout.
//!
//! This is **not** a security boundary. It does not prevent a malicious
//! command from reading arbitrary files, opening sockets, or exhausting
//! other resources; it only bounds wall time and address space for a
//! cooperating command, and kills the tree if either bound is crossed.
//! The Semantic Analyzer's banned-pattern filter is the only other line
//! of defense, and it too is advisory.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod guard;
mod rss;
mod run;

pub use run::run;
