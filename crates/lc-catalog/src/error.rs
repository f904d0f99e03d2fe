// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static catalog invariants (§3, §7 `ConfigurationError`).

use thiserror::Error;

/// A catalog that violates one of the Transition Catalog invariants (§3).
/// Fatal at construction — never raised mid-dispatch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate destination state '{0}': multiple transitions with the same destination are not allowed")]
    DuplicateDestination(String),

    #[error("trigger name '{0}' is reserved and cannot be used in a catalog")]
    ReservedTriggerName(String),

    #[error("transition has no source states")]
    EmptySourceSet,
}
