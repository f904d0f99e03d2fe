// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The [`Event`] a raw cloud notification is parsed into, and the derived
//! properties the orchestrator consumes from it (§3).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which half of the autoscaling lifecycle a node is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Launching,
    Terminating,
}

crate::simple_display! {
    Transition {
        Launching => "launching",
        Terminating => "terminating",
    }
}

/// Outcome of a dispatched remote command, as reported by the remote-command
/// collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandStatus {
    Success,
    Failed,
    Cancelled,
    TimedOut,
}

crate::simple_display! {
    CommandStatus {
        Success => "success",
        Failed => "failed",
        Cancelled => "cancelled",
        TimedOut => "timed_out",
    }
}

/// Verdict returned to the autoscaling collaborator to complete a lifecycle
/// hook (§4.3 `complete_lifecycle_action`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleResult {
    Continue,
    Abandon,
}

crate::simple_display! {
    LifecycleResult {
        Continue => "CONTINUE",
        Abandon => "ABANDON",
    }
}

/// The lifecycle bookkeeping every lifecycle-carrying event needs: which
/// hook to acknowledge, with which token, for which autoscaling group and
/// instance, and in which direction.
///
/// For an [`Event::AutoscalingLifecycle`] this comes straight off the
/// notification. For an [`Event::RemoteCommandResult`] it is restored from
/// the [`crate::CommandRecord`] the orchestrator persisted when it
/// dispatched the command (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleContext {
    pub hook_name: String,
    pub action_token: String,
    pub group_name: String,
    pub instance_id: String,
    pub transition: Transition,
}

/// A parsed, correlated notification.
///
/// `RemoteCommandResult` is only ever constructed already paired with its
/// [`LifecycleContext`] — pairing requires a repository lookup, so it
/// happens during `Model::initialize`, not during wire parsing. See
/// `lc-wire` for the unpaired ingress representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    AutoscalingLifecycle {
        context: LifecycleContext,
        /// `NotificationMetadata`, normalized to an object on load (§6.1).
        metadata: Value,
        has_failure: bool,
    },
    RemoteCommandResult {
        command_id: String,
        status: CommandStatus,
        resources: Vec<String>,
        context: LifecycleContext,
        has_failure: bool,
    },
    Scheduled {
        resource_path: String,
    },
}

impl Event {
    /// True iff a [`LifecycleContext`] is present (§3 `is_lifecycle`).
    pub fn is_lifecycle(&self) -> bool {
        self.lifecycle_context().is_some()
    }

    pub fn lifecycle_context(&self) -> Option<&LifecycleContext> {
        match self {
            Event::AutoscalingLifecycle { context, .. } => Some(context),
            Event::RemoteCommandResult { context, .. } => Some(context),
            Event::Scheduled { .. } => None,
        }
    }

    pub fn transition(&self) -> Option<Transition> {
        self.lifecycle_context().map(|c| c.transition)
    }

    pub fn is_launching(&self) -> bool {
        self.transition() == Some(Transition::Launching)
    }

    pub fn is_terminating(&self) -> bool {
        self.transition() == Some(Transition::Terminating)
    }

    pub fn has_failure(&self) -> bool {
        match self {
            Event::AutoscalingLifecycle { has_failure, .. } => *has_failure,
            Event::RemoteCommandResult { has_failure, .. } => *has_failure,
            Event::Scheduled { .. } => false,
        }
    }

    /// Record a failure encountered while processing this event. Once set,
    /// `is_successful` and `lifecycle_result` reflect it for the remainder
    /// of this event's lifetime (§4.4: "the event is marked as failed").
    pub fn set_has_failure(&mut self) {
        match self {
            Event::AutoscalingLifecycle { has_failure, .. } => *has_failure = true,
            Event::RemoteCommandResult { has_failure, .. } => *has_failure = true,
            Event::Scheduled { .. } => {}
        }
    }

    /// True unless a failure has been recorded on this event, or (for a
    /// command-result event) the command status is not `Success` (§3).
    pub fn is_successful(&self) -> bool {
        if self.has_failure() {
            return false;
        }
        match self {
            Event::RemoteCommandResult { status, .. } => *status == CommandStatus::Success,
            Event::AutoscalingLifecycle { .. } | Event::Scheduled { .. } => true,
        }
    }

    /// `CONTINUE` iff no recorded failure AND (transition is Terminating OR
    /// the event is successful); else `ABANDON`. Undefined (`None`) for
    /// non-lifecycle events (§3).
    pub fn lifecycle_result(&self) -> Option<LifecycleResult> {
        let transition = self.transition()?;
        let ok = !self.has_failure() && (transition == Transition::Terminating || self.is_successful());
        Some(if ok { LifecycleResult::Continue } else { LifecycleResult::Abandon })
    }

    /// The node id this event correlates to, if any. `Scheduled` events
    /// carry no node correlation key (§3).
    pub fn instance_id(&self) -> Option<&str> {
        self.lifecycle_context().map(|c| c.instance_id.as_str())
    }

    /// A short tag for tracing fields; never itself logged as structured
    /// JSON (use `serde_json::to_value` for that, per §4.5 "detail").
    pub fn kind(&self) -> &'static str {
        match self {
            Event::AutoscalingLifecycle { .. } => "autoscaling_lifecycle",
            Event::RemoteCommandResult { .. } => "remote_command_result",
            Event::Scheduled { .. } => "scheduled",
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
