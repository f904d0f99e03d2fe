// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A minimal pass-through catalog wiring only the Model's two built-in
//! triggers (§4.3 `complete_lifecycle_action`, `remove_from_db`) with no
//! business logic of its own.
//!
//! Concrete workflow definitions are the embedding application's job, not
//! this crate's (§2 Non-goals) — replace [`default_catalog`] with your
//! own before deploying. This one exists so the binary has something to
//! run out of the box.

use lc_catalog::{hook, Catalog, HookOutcome, TransitionDescriptor, TriggerDescriptor};

use lc_machine::{model, ModelCollaborators};

pub const STATE_RUNNING: &str = "running";
pub const STATE_REMOVED: &str = "removed";

pub fn default_catalog(collaborators: ModelCollaborators) -> Catalog {
    let launch = {
        let mut trigger = TriggerDescriptor::new("complete_lifecycle");
        trigger.after.push(complete_lifecycle_hook(collaborators.clone()));
        TransitionDescriptor::new(vec![lc_core::STATE_NEW.to_string(), lc_core::STATE_FINISHED_CLOUD_INIT.to_string()], Some(STATE_RUNNING.to_string()))
            .with_trigger(trigger)
    };

    let terminate = {
        let mut remove = TriggerDescriptor::new("remove_from_db");
        remove.after.push(remove_from_db_hook(collaborators.clone()));
        let remove_transition = TransitionDescriptor::new(vec![STATE_RUNNING.to_string()], None).with_trigger(remove);

        let mut complete = TriggerDescriptor::new("complete_lifecycle");
        complete.after.push(complete_lifecycle_hook(collaborators));
        let complete_transition =
            TransitionDescriptor::new(vec![STATE_RUNNING.to_string()], Some(STATE_REMOVED.to_string())).with_trigger(complete);

        vec![remove_transition, complete_transition]
    };

    Catalog::new(vec![launch].into_iter().chain(terminate).collect())
}

fn complete_lifecycle_hook(collaborators: ModelCollaborators) -> lc_catalog::HookFn {
    hook(move |args| {
        let collaborators = collaborators.clone();
        async move {
            model::complete_lifecycle_action(&collaborators, &args.event).await.map_err(|e| Box::new(e) as lc_catalog::HookError)?;
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
