// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Envelope-parsing and source-dispatch errors (§6.1, §7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("could not parse SNS envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("SNS envelope carried no records")]
    EmptyEnvelope,

    #[error("could not parse notification body: {0}")]
    Body(#[source] serde_json::Error),

    #[error("unknown event source: {0}")]
    UnknownSource(String),

    #[error("notification detail missing required field '{0}'")]
    MissingField(&'static str),

    #[error("unrecognized lifecycle transition: {0}")]
    UnknownTransition(String),

    #[error("unrecognized command status: {0}")]
    UnknownCommandStatus(String),

    #[error("malformed NotificationMetadata: {0}")]
    MalformedMetadata(#[source] serde_json::Error),
}
