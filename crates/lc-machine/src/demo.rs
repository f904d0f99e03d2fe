// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A small, non-normative catalog used by this crate's own tests: a
//! Docker-style node workflow with a guarded branch on the launch side and
//! a short chain on the terminate side. Not part of the public contract —
//! applications bring their own catalog.

use lc_catalog::{guard, hook, Catalog, HookOutcome, TransitionDescriptor, TriggerDescriptor};

use crate::model::{self, ModelCollaborators};

pub const STATE_INITIALIZING: &str = "initializing";
pub const STATE_LABELED: &str = "labeled";
pub const STATE_ONLINE: &str = "online";
pub const STATE_RUNNING: &str = "running";
pub const STATE_DRAINING: &str = "draining";
pub const STATE_REMOVED: &str = "removed";

/// Builds the demo catalog, wiring its built-in triggers to `collaborators`
/// via [`lc_catalog::hook`] closures (§4.3's `complete_lifecycle_action`
/// and `remove_from_db` are free functions for exactly this purpose).
pub fn docker_node_catalog(collaborators: ModelCollaborators) -> Catalog {
    let register = TransitionDescriptor::new(
        vec![lc_core::STATE_FINISHED_CLOUD_INIT.to_string(), lc_core::STATE_NEW.to_string()],
        Some(STATE_INITIALIZING.to_string()),
    )
    .with_trigger(TriggerDescriptor::new("register"));

    let add_labels = {
        let mut trigger = TriggerDescriptor::new("add_labels");
        trigger.conditions.push(guard(|_event, node, _info| node.node_type() == "worker"));
        TransitionDescriptor::new(vec![STATE_INITIALIZING.to_string()], Some(STATE_LABELED.to_string())).with_trigger(trigger)
    };

    // A manager goes straight from `initializing` to `online`; a worker
    // must pass through `labeled` first (§8 scenario 2).
    let put_online = {
        let mut trigger = TriggerDescriptor::new("put_online");
        trigger.unless.push(guard(|_event, node, info| info.source == STATE_INITIALIZING && node.node_type() == "worker"));
        TransitionDescriptor::new(vec![STATE_INITIALIZING.to_string(), STATE_LABELED.to_string()], Some(STATE_ONLINE.to_string()))
            .with_trigger(trigger)
    };

    // `running` is a rest state: it suspends the invocation (§4.2
    // construction rule 5) so a later TERMINATING event is what resumes
    // the walk at `drain`, rather than this same call cascading straight
    // through the terminate chain.
    let complete_launch = {
        let collaborators = collaborators.clone();
        let mut trigger = TriggerDescriptor::new("complete_lifecycle");
        trigger.after.push(complete_lifecycle_hook(collaborators));
        let mut descriptor =
            TransitionDescriptor::new(vec![STATE_ONLINE.to_string()], Some(STATE_RUNNING.to_string())).with_trigger(trigger);
        descriptor.stop_after_state_change = true;
        descriptor
    };

    let start_drain = TransitionDescriptor::new(vec![STATE_RUNNING.to_string()], Some(STATE_DRAINING.to_string()))
        .with_trigger(TriggerDescriptor::new("drain"));

    // `remove_from_db` is an internal transition (no `dest`) so it runs
    // and leaves the state unchanged; the outer loop then tries
    // `complete_lifecycle`, whose `dest` actually lands in `removed`.
    // Declared in this order so `triggers_for(draining)` offers
    // `remove_from_db` first (§4.2 "Ordering").
    let drop_from_db = {
        let mut trigger = TriggerDescriptor::new("remove_from_db");
        trigger.after.push(remove_from_db_hook(collaborators.clone()));
        TransitionDescriptor::new(vec![STATE_DRAINING.to_string()], None).with_trigger(trigger)
    };

    let complete_terminate = {
        let mut trigger = TriggerDescriptor::new("complete_lifecycle");
        trigger.after.push(complete_lifecycle_hook(collaborators));
        TransitionDescriptor::new(vec![STATE_DRAINING.to_string()], Some(STATE_REMOVED.to_string())).with_trigger(trigger)
    };

    Catalog::new(vec![register, add_labels, put_online, complete_launch, start_drain, drop_from_db, complete_terminate])
}

fn complete_lifecycle_hook(collaborators: ModelCollaborators) -> lc_catalog::HookFn {
    hook(move |args| {
        let collaborators = collaborators.clone();
        async move {
            model::complete_lifecycle_action(&collaborators, &args.event)
                .await
                .map_err(|e| Box::new(e) as lc_catalog::HookError)?;
            Ok(HookOutcome { event: args.event, node: args.node })
        }
    })
}

fn remove_from_db_hook(collaborators: ModelCollaborators) -> lc_catalog::HookFn {
    hook(move |args| {
        let collaborators = collaborators.clone();
        async move {
            model::remove_from_db(&collaborators, &args.node).await.map_err(|e| Box::new(e) as lc_catalog::HookError)?;
            Ok(HookOutcome { event: args.event, node: args.node })
        }
    })
}
