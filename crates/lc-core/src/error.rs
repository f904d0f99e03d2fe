// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors shared by the data model types.

use thiserror::Error;

/// Errors raised while constructing or mutating core data model types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("node id must not be empty")]
    EmptyNodeId,

    #[error("unknown event source: {0}")]
    UnknownSource(String),

    #[error("malformed notification metadata: {0}")]
    MalformedMetadata(#[source] serde_json::Error),
}
