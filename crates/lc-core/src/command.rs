// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Command Record: lifecycle context restored when a dispatched remote
//! command's result arrives (§3).

use crate::event::{LifecycleContext, Transition};
use serde::{Deserialize, Serialize};

/// Persisted alongside a dispatched remote command so that, when its
/// result notification arrives, the orchestrator can restore the
/// lifecycle context that was in play when the command was sent.
///
/// Created once, by `Model::send_command`, and consumed exactly once
/// (read-and-deleted) when the paired `RemoteCommandResult` event loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub hook_name: String,
    pub action_token: String,
    pub group_name: String,
    pub transition: Transition,
    /// Name of the event that triggered this command (for diagnostics).
    pub originating_event_name: String,
    pub comment: String,
    pub commands: Vec<String>,
    pub target_node_ids: Vec<String>,
}

impl CommandRecord {
    /// Restore the [`LifecycleContext`] this record was captured with.
    ///
    /// The orchestrator couples one event to one node (§4.3), so the first
    /// target id is taken as the correlated node; a command fanned out to
    /// several nodes still resolves back to a single lifecycle context
    /// since `hook_name`/`action_token`/`group_name`/`transition` are
    /// shared across all of its targets.
    pub fn lifecycle_context(&self) -> Option<LifecycleContext> {
        let instance_id = self.target_node_ids.first()?.clone();
        Some(LifecycleContext {
            hook_name: self.hook_name.clone(),
            action_token: self.action_token.clone(),
            group_name: self.group_name.clone(),
            instance_id,
            transition: self.transition,
        })
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
