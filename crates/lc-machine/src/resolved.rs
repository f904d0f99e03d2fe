// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A trigger descriptor resolved against the source state it is about to
//! fire from (§4.2).

use lc_catalog::{GuardFn, HookFn, TransitionInfo};

/// The unique transition `T` such that `T.source ∋ state` and a trigger
/// named `trigger` belongs to it (§4.4.1).
#[derive(Clone)]
pub struct ResolvedTransition {
    pub info: TransitionInfo,
    pub prepare: Vec<HookFn>,
    pub conditions: Vec<GuardFn>,
    pub unless: Vec<GuardFn>,
    pub before: Vec<HookFn>,
    pub after: Vec<HookFn>,
    pub ignore_errors: bool,
    pub stop_after_trigger: bool,
    /// Whether entering `self.info.dest` suspends processing (§4.2
    /// construction rule 5). Always `false` when `dest` is `None`.
    pub stop_after_state_change: bool,
}

impl ResolvedTransition {
    pub fn trigger(&self) -> &str {
        &self.info.trigger
    }

    pub fn dest(&self) -> Option<&str> {
        self.info.dest.as_deref()
    }
}

impl std::fmt::Debug for ResolvedTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedTransition")
            .field("info", &self.info)
            .field("ignore_errors", &self.ignore_errors)
            .field("stop_after_trigger", &self.stop_after_trigger)
            .field("stop_after_state_change", &self.stop_after_state_change)
            .finish()
    }
}
