// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level errors for the runtime binary: configuration plus whatever
//! bubbles up from parsing an ingress or running the orchestrator.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("missing required environment variable '{0}'")]
    MissingEnvVar(String),

    #[error(transparent)]
    Wire(#[from] lc_wire::WireError),

    #[error(transparent)]
    Orchestrator(#[from] lc_machine::OrchestratorError),

    #[error(transparent)]
    Storage(#[from] lc_storage::StorageError),
}
