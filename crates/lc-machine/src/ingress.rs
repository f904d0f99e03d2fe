// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The orchestrator's input contract: a notification after envelope
//! unwrapping and source dispatch, but before it is resolved into a full
//! [`lc_core::Event`] (§3, §6.1).
//!
//! A `RemoteCommandResult` notification carries only the bits the remote-
//! command collaborator reports — its [`lc_core::LifecycleContext`] is
//! restored from the stored [`lc_core::CommandRecord`] inside
//! `Model::initialize`, which is why it isn't part of this type.

use lc_core::{CommandStatus, LifecycleContext};
use serde_json::Value;

/// A parsed notification, not yet correlated to a node or paired with its
/// originating lifecycle context.
#[derive(Debug, Clone, PartialEq)]
pub enum Ingress {
    AutoscalingLifecycle {
        context: LifecycleContext,
        /// `NotificationMetadata`, normalized to an object (§6.1).
        metadata: Value,
    },
    RemoteCommandResult {
        command_id: String,
        status: CommandStatus,
        resources: Vec<String>,
    },
    Scheduled {
        resource_path: String,
    },
}
