// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Transition Catalog itself (§3): an ordered, validated list of
//! [`TransitionDescriptor`]s.

use std::collections::HashSet;

use crate::error::CatalogError;
use crate::transition::TransitionDescriptor;
use crate::RESERVED_TRIGGER_NAME;

/// A validated set of transition descriptors describing one workflow
/// (e.g. "launch a node", "tear a node down").
///
/// Construction never fails; [`Catalog::validate`] checks the catalog
/// invariants (§3, §7 `ConfigurationError`) and is meant to run once at
/// startup, before any event is dispatched against the catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    transitions: Vec<TransitionDescriptor>,
}

impl Catalog {
    pub fn new(transitions: Vec<TransitionDescriptor>) -> Self {
        Self { transitions }
    }

    pub fn transitions(&self) -> &[TransitionDescriptor] {
        &self.transitions
    }

    /// Check the static catalog invariants (§3):
    ///
    /// - no two transitions share a destination state
    /// - no trigger is named [`RESERVED_TRIGGER_NAME`]
    /// - every transition names at least one source state
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen_dests: HashSet<&str> = HashSet::new();
        for transition in &self.transitions {
            if transition.source.is_empty() {
                return Err(CatalogError::EmptySourceSet);
            }
            if let Some(dest) = &transition.dest {
                if !seen_dests.insert(dest.as_str()) {
                    return Err(CatalogError::DuplicateDestination(dest.clone()));
                }
            }
            for trigger in &transition.triggers {
                if trigger.name == RESERVED_TRIGGER_NAME {
                    return Err(CatalogError::ReservedTriggerName(trigger.name.clone()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
