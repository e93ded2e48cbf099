// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resident-set-size accounting across a process and its descendants.

use std::collections::HashSet;
use sysinfo::{Pid, System};

/// Sum of RSS, in bytes, across `root` and every process whose parent
/// chain leads back to it. Processes that have already exited (or that
/// we fail to query) are silently skipped — this is a best-effort
/// enforcement mechanism, not an accounting system.
pub(crate) fn tree_rss_bytes(system: &System, root: Pid) -> u64 {
    let mut tree = HashSet::new();
    tree.insert(root);

    // sysinfo exposes only a parent pointer, so descendants are found by
    // a fixed-point pass over all processes rather than a top-down walk.
    loop {
        let mut grew = false;
        for (pid, process) in system.processes() {
            if tree.contains(pid) {
                continue;
            }
            if let Some(parent) = process.parent() {
                if tree.contains(&parent) {
                    tree.insert(*pid);
                    grew = true;
                }
            }
        }
        if !grew {
            break;
        }
    }

    tree.iter().filter_map(|pid| system.process(*pid)).map(|p| p.memory()).sum()
}
