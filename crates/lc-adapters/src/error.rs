// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-collaborator error types (§4.3, §7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoscalingError {
    #[error("complete_lifecycle_action failed for token '{0}': {1}")]
    CompleteLifecycleAction(String, String),

    #[error("could not read activity progress for activity '{0}': {1}")]
    ActivityLookup(String, String),

    #[error("activity '{0}' did not reach 100% progress before the waiter gave up")]
    ActivityTimedOut(String),
}

#[derive(Debug, Error)]
pub enum RemoteCommandError {
    #[error("send_command to {0:?} failed: {1}")]
    SendFailed(Vec<String>, String),

    #[error("instance '{0}' was not reported online before the waiter gave up")]
    AgentNotOnline(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("publish failed: {0}")]
    PublishFailed(String),
}
