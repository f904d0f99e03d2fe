// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transition and trigger descriptors (§3).

use crate::hook::{GuardFn, HookFn};

/// The trigger/source/dest a running dispatch is acting on. Handed to
/// hooks and guards so they can see what fired without re-deriving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionInfo {
    pub trigger: String,
    pub source: String,
    pub dest: Option<String>,
}

/// One named trigger within a [`TransitionDescriptor`] (§3).
///
/// `conditions` must all pass and `unless` must all fail for the trigger
/// to run; `prepare` runs first (and may itself fail the event before
/// conditions are checked — §9 construction rule 2), then `before`, then
/// the state change, then `after`.
#[derive(Clone)]
pub struct TriggerDescriptor {
    pub name: String,
    pub prepare: Vec<HookFn>,
    pub conditions: Vec<GuardFn>,
    pub unless: Vec<GuardFn>,
    pub before: Vec<HookFn>,
    pub after: Vec<HookFn>,
    /// Stop dispatching further triggers for this event once this one has
    /// run (§3 `StopIterationAfterTrigger` / `SuspendAfterTrigger`).
    pub stop_after_trigger: bool,
    /// A failing hook in this trigger is logged but does not abort the
    /// transition (§3 `ignore_errors`).
    pub ignore_errors: bool,
}

impl std::fmt::Debug for TriggerDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerDescriptor")
            .field("name", &self.name)
            .field("prepare", &self.prepare.len())
            .field("conditions", &self.conditions.len())
            .field("unless", &self.unless.len())
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .field("stop_after_trigger", &self.stop_after_trigger)
            .field("ignore_errors", &self.ignore_errors)
            .finish()
    }
}

impl TriggerDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prepare: Vec::new(),
            conditions: Vec::new(),
            unless: Vec::new(),
            before: Vec::new(),
            after: Vec::new(),
            stop_after_trigger: false,
            ignore_errors: false,
        }
    }
}

/// One row of the Transition Catalog (§3): the states a trigger may fire
/// from, the state it lands in, and the triggers that can run it.
#[derive(Clone)]
pub struct TransitionDescriptor {
    pub source: Vec<String>,
    pub dest: Option<String>,
    /// Suspend further dispatch once the destination state is reached
    /// (§3 `StopProcessingAfterStateChange` / `SuspendAfterStateChange`).
    pub stop_after_state_change: bool,
    pub triggers: Vec<TriggerDescriptor>,
}

impl std::fmt::Debug for TransitionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionDescriptor")
            .field("source", &self.source)
            .field("dest", &self.dest)
            .field("stop_after_state_change", &self.stop_after_state_change)
            .field("triggers", &self.triggers)
            .finish()
    }
}

impl TransitionDescriptor {
    pub fn new(source: Vec<String>, dest: Option<String>) -> Self {
        Self {
            source,
            dest,
            stop_after_state_change: false,
            triggers: Vec::new(),
        }
    }

    pub fn with_trigger(mut self, trigger: TriggerDescriptor) -> Self {
        self.triggers.push(trigger);
        self
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
