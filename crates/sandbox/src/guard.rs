// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-group kill guard: SIGTERM the whole tree, escalate to SIGKILL
//! after a grace period if it hasn't gone away.

use std::sync::atomic::{AtomicBool, Ordering};

/// Kills a process group on request. Safe to call `kill()` more than
/// once — only the first call sends signals.
pub(crate) struct ProcessGroupGuard {
    pgid: u32,
    killed: AtomicBool,
}

impl ProcessGroupGuard {
    pub(crate) fn new(pgid: u32) -> Self {
        Self { pgid, killed: AtomicBool::new(false) }
    }

    #[cfg(unix)]
    pub(crate) fn kill(&self) {
        if self.killed.swap(true, Ordering::SeqCst) {
            return;
        }

        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        let pid = Pid::from_raw(self.pgid as i32);
        if let Err(err) = killpg(pid, Signal::SIGTERM) {
            tracing::debug!(pgid = self.pgid, %err, "SIGTERM to process group failed");
            return;
        }

        let pgid = self.pgid;
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_secs(2));
            let pid = Pid::from_raw(pgid as i32);
            if let Err(err) = killpg(pid, Signal::SIGKILL) {
                tracing::debug!(pgid, %err, "SIGKILL to process group failed");
            }
        });
    }

    #[cfg(not(unix))]
    pub(crate) fn kill(&self) {
        if self.killed.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::warn!(pgid = self.pgid, "process-tree kill not supported on this platform");
    }
}
