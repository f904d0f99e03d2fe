// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger hook and guard function types (§3, §9).
//!
//! Per the redesign notes (§9), a hook is a function over
//! `(event, node, transition_info)` that may fail; a guard is the same
//! shape but returns a boolean instead of raising. Hooks take ownership of
//! the event and node they're given and hand back the (possibly mutated)
//! pair — this keeps the hook future free of borrowed state, so it can be
//! boxed as `Future + Send + 'static` without the lifetime gymnastics a
//! borrow-based signature would need.

use lc_core::{Event, Node};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::transition::TransitionInfo;

/// Error type a hook may fail with. Application hooks return whatever
/// implements `std::error::Error`; the orchestrator only needs `Display`
/// and `Send + Sync` to report it (§4.5 "Errors" stream).
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// The event and node a hook is given, along with the transition it is
/// running as part of.
pub struct HookArgs {
    pub event: Event,
    pub node: Node,
    pub transition: TransitionInfo,
}

/// What a hook hands back after running: the event and node, possibly
/// mutated (e.g. a hook may call `Event::set_has_failure`, or change a
/// `Node` property).
pub struct HookOutcome {
    pub event: Event,
    pub node: Node,
}

pub type HookResult = Result<HookOutcome, HookError>;
pub type HookFuture = Pin<Box<dyn Future<Output = HookResult> + Send>>;

/// A `prepare`/`before`/`after` hook (§3).
pub type HookFn = Arc<dyn Fn(HookArgs) -> HookFuture + Send + Sync>;

/// A `conditions`/`unless` guard (§3). Guards are synchronous: they only
/// ever inspect the event/node/transition that's already in hand.
pub type GuardFn = Arc<dyn Fn(&Event, &Node, &TransitionInfo) -> bool + Send + Sync>;

/// Wrap an `async fn(HookArgs) -> HookResult` closure as a [`HookFn`].
///
/// ```ignore
/// let h = hook(|args| async move {
///     Ok(HookOutcome { event: args.event, node: args.node })
/// });
/// ```
pub fn hook<F, Fut>(f: F) -> HookFn
where
    F: Fn(HookArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HookResult> + Send + 'static,
{
    Arc::new(move |args| Box::pin(f(args)) as HookFuture)
}

/// Wrap a `fn(&Event, &Node, &TransitionInfo) -> bool` closure as a
/// [`GuardFn`].
pub fn guard<F>(f: F) -> GuardFn
where
    F: Fn(&Event, &Node, &TransitionInfo) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

#[cfg(test)]
#[path = "hook_tests.rs"]
mod tests;
