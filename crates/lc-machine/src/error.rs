// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrator-level errors (§7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("illegal transition: {0}")]
    IllegalTransition(String),

    #[error("state '{0}' has no outgoing trigger")]
    NoTriggers(String),

    #[error("remote command result was not successful")]
    CommandUnsuccessful,

    #[error("command record '{0}' has no target node to restore a lifecycle context from")]
    MissingLifecycleContext(String),

    #[error("node '{0}' never reached finished_cloud_init")]
    CloudInitTimedOut(String),

    #[error("trigger '{trigger}' hook failed: {source}")]
    Operation {
        trigger: String,
        #[source]
        source: lc_catalog::HookError,
    },

    #[error(transparent)]
    Catalog(#[from] lc_catalog::CatalogError),

    #[error(transparent)]
    Storage(#[from] lc_storage::StorageError),

    #[error(transparent)]
    Autoscaling(#[from] lc_adapters::AutoscalingError),

    #[error(transparent)]
    RemoteCommand(#[from] lc_adapters::RemoteCommandError),

    #[error(transparent)]
    Notify(#[from] lc_adapters::NotifyError),

    /// A second failure while already processing the `failure` state.
    /// Fatal: terminates the Orchestrator (§4.4, §7).
    #[error("failure while already handling a failure: {0}")]
    FailureDuringFailureHandling(#[source] Box<OrchestratorError>),
}
