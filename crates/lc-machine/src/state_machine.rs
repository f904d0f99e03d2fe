// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compiled form of a [`lc_catalog::Catalog`] (§4.2).
//!
//! Construction applies the catalog's augmentation rules once, up front:
//! rather than splicing synthetic hooks into the trigger's hook lists
//! (rules 1-4), the static parts of a trigger (`ignore_errors`,
//! `stop_after_trigger`) are carried on [`ResolvedTransition`] and the
//! dispatch step in `Orchestrator` interprets them directly. Rule 5
//! (destination on-enter suspension) is carried as a per-state lookup,
//! since the catalog's "no duplicate dest" invariant guarantees at most
//! one transition ever arrives at a given state.

use std::collections::{HashMap, HashSet};

use lc_catalog::{Catalog, TransitionInfo};

use crate::resolved::ResolvedTransition;

pub struct StateMachine {
    states: HashSet<String>,
    transitions: Vec<lc_catalog::TransitionDescriptor>,
    suspend_on_enter: HashMap<String, bool>,
}

impl StateMachine {
    /// Validates `catalog` (§3 invariants) and compiles it.
    pub fn build(catalog: &Catalog) -> Result<Self, lc_catalog::CatalogError> {
        catalog.validate()?;
        let mut states = HashSet::new();
        let mut suspend_on_enter = HashMap::new();
        for transition in catalog.transitions() {
            for source in &transition.source {
                states.insert(source.clone());
            }
            if let Some(dest) = &transition.dest {
                states.insert(dest.clone());
                suspend_on_enter.insert(dest.clone(), transition.stop_after_state_change);
            }
        }
        Ok(Self { states, transitions: catalog.transitions().to_vec(), suspend_on_enter })
    }

    pub fn known_states(&self) -> &HashSet<String> {
        &self.states
    }

    /// Trigger names whose transition has `state` in its source set, in
    /// catalog declaration order (§4.2, §5 "Ordering").
    pub fn triggers_for(&self, state: &str) -> Vec<String> {
        self.transitions
            .iter()
            .filter(|t| t.source.iter().any(|s| s == state))
            .flat_map(|t| t.triggers.iter().map(|trigger| trigger.name.clone()))
            .collect()
    }

    /// The unique transition named `trigger` whose source set contains
    /// `source_state`, resolved into a [`ResolvedTransition`] (§4.2).
    pub fn transition_for(&self, trigger: &str, source_state: &str) -> Option<ResolvedTransition> {
        let descriptor = self
            .transitions
            .iter()
            .find(|t| t.source.iter().any(|s| s == source_state) && t.triggers.iter().any(|tr| tr.name == trigger))?;
        let trigger_descriptor = descriptor.triggers.iter().find(|tr| tr.name == trigger)?;
        let stop_after_state_change = descriptor
            .dest
            .as_ref()
            .and_then(|dest| self.suspend_on_enter.get(dest))
            .copied()
            .unwrap_or(false);
        Some(ResolvedTransition {
            info: TransitionInfo {
                trigger: trigger.to_string(),
                source: source_state.to_string(),
                dest: descriptor.dest.clone(),
            },
            prepare: trigger_descriptor.prepare.clone(),
            conditions: trigger_descriptor.conditions.clone(),
            unless: trigger_descriptor.unless.clone(),
            before: trigger_descriptor.before.clone(),
            after: trigger_descriptor.after.clone(),
            ignore_errors: trigger_descriptor.ignore_errors,
            stop_after_trigger: trigger_descriptor.stop_after_trigger,
            stop_after_state_change,
        })
    }
}

#[cfg(test)]
#[path = "state_machine_tests.rs"]
mod tests;
