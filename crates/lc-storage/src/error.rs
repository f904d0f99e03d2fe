// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository-layer errors (§4.1, §7).

use lc_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("scan filter and its parameters must be supplied together")]
    BadQuery,

    #[error("no command record found for command id '{0}'")]
    CommandNotFound(String),

    #[error("store row for '{0}' is malformed: {1}")]
    MalformedRow(String, CoreError),

    #[error("could not encode '{0}' as a store row: {1}")]
    Encode(String, #[source] serde_json::Error),

    #[error("store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}
