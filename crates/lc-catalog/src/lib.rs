// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lc-catalog: the static, declarative Transition Catalog (§3).
//!
//! A catalog is pure data: an ordered list of [`TransitionDescriptor`]s,
//! each naming its source states, destination state, and the
//! [`TriggerDescriptor`]s that may fire along it. An embedding application
//! builds one of these to describe a concrete workflow (register a node,
//! tear one down, ...); this crate only defines the shape and its static
//! invariants. Turning a catalog into a runnable machine is `lc-machine`'s
//! job.

pub mod catalog;
pub mod error;
pub mod hook;
pub mod transition;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use hook::{guard, hook, GuardFn, HookArgs, HookError, HookFn, HookFuture, HookOutcome, HookResult};
pub use transition::{TransitionDescriptor, TransitionInfo, TriggerDescriptor};

/// The one trigger name a catalog may never use: it collides with the
/// underlying machine's own `dispatch` verb (§3).
pub const RESERVED_TRIGGER_NAME: &str = "trigger";
