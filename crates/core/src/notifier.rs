// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named contact record consumed by Notifier Dispatch.

use serde::{Deserialize, Serialize};

/// A notifier is metadata, not an executable step. It is referenced by a
/// step's `on_error` field and consumed only by Notifier Dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notifier {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// May contain the literal token `${failed_step}`, substituted at dispatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

crate::builder! {
    pub struct NotifierBuilder => Notifier {
        into {
            name: String = "notify_ops",
        }
        option {
            email: String = None,
            subject: String = None,
            body: String = None,
        }
    }
}
