// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;
use std::time::Duration;

use lc_adapters::{FakeAutoscalingClient, FakeNotificationPublisher, FakeRemoteCommandClient};
use lc_catalog::{hook, Catalog, TransitionDescriptor, TriggerDescriptor};
use lc_core::{LifecycleContext, Transition};
use lc_storage::{CommandRepository, FakeStore, KeyValueStore, NodeRepository};

use super::*;
use crate::demo;

fn test_collaborators() -> (ModelCollaborators, Arc<FakeStore>, FakeAutoscalingClient, FakeNotificationPublisher) {
    let store: Arc<FakeStore> = Arc::new(FakeStore::default());
    let dyn_store: Arc<dyn KeyValueStore> = store.clone();
    let autoscaling = FakeAutoscalingClient::new();
    autoscaling.set_activity_progress("token-1", 100);
    let remote_command = FakeRemoteCommandClient::new();
    let notifier = FakeNotificationPublisher::new();
    let waiters = ModelWaiters {
        cloud_init: lc_core::waiter::WaiterConfig::new(Duration::from_millis(1), 3),
        agent_online: lc_core::waiter::WaiterConfig::new(Duration::from_millis(1), 3),
        activity_complete: lc_core::waiter::WaiterConfig::new(Duration::from_millis(1), 3),
    };
    let collaborators = ModelCollaborators {
        nodes: Arc::new(NodeRepository::new(dyn_store.clone())),
        commands: Arc::new(CommandRepository::new(dyn_store)),
        autoscaling: Arc::new(autoscaling.clone()),
        remote_command: Arc::new(remote_command),
        notifier: Arc::new(notifier.clone()),
        waiters,
    };
    (collaborators, store, autoscaling, notifier)
}

fn lifecycle_context(instance_id: &str, transition: Transition) -> LifecycleContext {
    LifecycleContext {
        hook_name: "hook".to_string(),
        action_token: "token-1".to_string(),
        group_name: "asg-1".to_string(),
        instance_id: instance_id.to_string(),
        transition,
    }
}

async fn launching_orchestrator(
    collaborators: ModelCollaborators,
    instance_id: &str,
) -> Orchestrator {
    let model = Model::initialize(
        collaborators.clone(),
        Ingress::AutoscalingLifecycle { context: lifecycle_context(instance_id, Transition::Launching), metadata: serde_json::json!({}) },
    )
    .await
    .unwrap();
    let catalog = demo::docker_node_catalog(collaborators.clone());
    let reporter = ActivityReporter::new(collaborators.notifier.clone());
    Orchestrator::new(&catalog, model, reporter).unwrap()
}

#[tokio::test]
async fn launch_happy_path_reaches_running_and_suspends() {
    let (collaborators, _store, autoscaling, _notifier) = test_collaborators();
    let mut orchestrator = launching_orchestrator(collaborators, "i-1").await;

    orchestrator.run().await.unwrap();

    assert_eq!(orchestrator.model().state(), demo::STATE_RUNNING);
    assert_eq!(orchestrator.model().seen_states(), &[
        demo::STATE_INITIALIZING.to_string(),
        demo::STATE_ONLINE.to_string(),
        demo::STATE_RUNNING.to_string(),
    ]);
    assert_eq!(autoscaling.calls().len(), 1);
}

#[tokio::test]
async fn launch_worker_passes_through_labeled() {
    let (collaborators, store, _autoscaling, _notifier) = test_collaborators();
    let mut row = serde_json::Map::new();
    row.insert(lc_core::PROPERTY_TYPE.to_string(), serde_json::Value::String("worker".to_string()));
    row.insert(lc_core::PROPERTY_STATUS.to_string(), serde_json::Value::String(lc_core::STATE_FINISHED_CLOUD_INIT.to_string()));
    store.seed("i-1", row);

    let mut orchestrator = launching_orchestrator(collaborators, "i-1").await;
    orchestrator.run().await.unwrap();

    assert_eq!(orchestrator.model().state(), demo::STATE_RUNNING);
    assert!(orchestrator.model().seen_states().contains(&demo::STATE_LABELED.to_string()));
}

#[tokio::test]
async fn terminate_happy_path_reaches_removed_and_acks_continue() {
    let (collaborators, store, autoscaling, _notifier) = test_collaborators();
    let mut row = serde_json::Map::new();
    row.insert(lc_core::PROPERTY_STATUS.to_string(), serde_json::Value::String(demo::STATE_RUNNING.to_string()));
    store.seed("i-1", row);

    let model = Model::initialize(
        collaborators.clone(),
        Ingress::AutoscalingLifecycle {
            context: lifecycle_context("i-1", Transition::Terminating),
            metadata: serde_json::json!({}),
        },
    )
    .await
    .unwrap();
    let catalog = demo::docker_node_catalog(collaborators.clone());
    let reporter = ActivityReporter::new(collaborators.notifier.clone());
    let mut orchestrator = Orchestrator::new(&catalog, model, reporter).unwrap();

    orchestrator.run().await.unwrap();

    assert_eq!(orchestrator.model().state(), demo::STATE_REMOVED);
    assert_eq!(autoscaling.calls()[0].result, lc_core::LifecycleResult::Continue);
    assert!(!store.contains("i-1"));
}

#[tokio::test]
async fn illegal_launching_transition_is_rejected_before_any_trigger_fires() {
    let (collaborators, store, _autoscaling, _notifier) = test_collaborators();
    let mut row = serde_json::Map::new();
    row.insert(lc_core::PROPERTY_STATUS.to_string(), serde_json::Value::String(demo::STATE_RUNNING.to_string()));
    store.seed("i-1", row);

    let mut orchestrator = launching_orchestrator(collaborators, "i-1").await;
    let result = orchestrator.run().await;

    assert!(matches!(result, Err(OrchestratorError::IllegalTransition(_))));
    assert_eq!(orchestrator.model().state(), demo::STATE_RUNNING);
}

#[tokio::test]
async fn illegal_terminating_transition_is_rejected_for_a_new_node() {
    let (collaborators, _store, _autoscaling, _notifier) = test_collaborators();
    let model = Model::initialize(
        collaborators.clone(),
        Ingress::AutoscalingLifecycle {
            context: lifecycle_context("i-1", Transition::Terminating),
            metadata: serde_json::json!({}),
        },
    )
    .await
    .unwrap();
    let catalog = demo::docker_node_catalog(collaborators.clone());
    let reporter = ActivityReporter::new(collaborators.notifier.clone());
    let mut orchestrator = Orchestrator::new(&catalog, model, reporter).unwrap();

    let result = orchestrator.run().await;
    assert!(matches!(result, Err(OrchestratorError::IllegalTransition(_))));
}

fn failing_trigger(name: &str) -> TriggerDescriptor {
    let mut trigger = TriggerDescriptor::new(name);
    trigger.after.push(hook(|_args| async move {
        Err(Box::<dyn std::error::Error + Send + Sync>::from("boom"))
    }));
    trigger
}

fn minimal_model(collaborators: ModelCollaborators) -> impl std::future::Future<Output = Model> {
    async move {
        Model::initialize(
            collaborators,
            Ingress::AutoscalingLifecycle { context: lifecycle_context("i-2", Transition::Launching), metadata: serde_json::json!({}) },
        )
        .await
        .unwrap()
    }
}

#[tokio::test]
async fn a_failing_trigger_routes_into_the_failure_chain() {
    let (collaborators, _store, _autoscaling, notifier) = test_collaborators();
    let catalog = Catalog::new(vec![
        TransitionDescriptor::new(vec![lc_core::STATE_NEW.to_string()], Some("broken".to_string()))
            .with_trigger(failing_trigger("go")),
    ]);
    let model = minimal_model(collaborators.clone()).await;
    let reporter = ActivityReporter::new(collaborators.notifier.clone());
    let mut orchestrator = Orchestrator::new(&catalog, model, reporter).unwrap();

    orchestrator.run().await.unwrap();

    assert_eq!(orchestrator.model().state(), lc_core::STATE_FAILURE);
    assert_eq!(notifier.error_reports().len(), 1);
}

#[tokio::test]
async fn ignore_errors_keeps_a_failing_trigger_out_of_the_failure_chain() {
    let (collaborators, _store, _autoscaling, notifier) = test_collaborators();
    let mut trigger = failing_trigger("go");
    trigger.ignore_errors = true;
    let catalog = Catalog::new(vec![
        TransitionDescriptor::new(vec![lc_core::STATE_NEW.to_string()], Some("recovered".to_string())).with_trigger(trigger),
    ]);
    let model = minimal_model(collaborators.clone()).await;
    let reporter = ActivityReporter::new(collaborators.notifier.clone());
    let mut orchestrator = Orchestrator::new(&catalog, model, reporter).unwrap();

    orchestrator.run().await.unwrap();

    assert_eq!(orchestrator.model().state(), "recovered");
    assert_eq!(notifier.error_reports().len(), 1);
}

#[tokio::test]
async fn stop_after_trigger_continues_into_the_next_states_triggers() {
    // `stop_after_trigger` only breaks the inner per-state trigger loop;
    // the outer loop still reloads triggers for the now-current state and
    // keeps going within the same `run()` call, unlike `stop_after_state_change`.
    let (collaborators, _store, _autoscaling, _notifier) = test_collaborators();
    let catalog = Catalog::new(vec![
        {
            let mut advance = TransitionDescriptor::new(vec![lc_core::STATE_NEW.to_string()], Some("mid".to_string()))
                .with_trigger(TriggerDescriptor::new("advance"));
            advance.triggers[0].stop_after_trigger = true;
            advance
        },
        TransitionDescriptor::new(vec!["mid".to_string()], Some("done".to_string())).with_trigger(TriggerDescriptor::new("finish")),
    ]);
    let model = minimal_model(collaborators.clone()).await;
    let reporter = ActivityReporter::new(collaborators.notifier.clone());
    let mut orchestrator = Orchestrator::new(&catalog, model, reporter).unwrap();

    orchestrator.run().await.unwrap();

    assert_eq!(orchestrator.model().state(), "done");
    assert_eq!(orchestrator.model().seen_states(), &["mid".to_string(), "done".to_string()]);
}

#[tokio::test]
async fn a_second_failure_while_handling_the_first_is_fatal() {
    // A failed command result raises `CommandUnsuccessful` out of the
    // implicit `__is_event_successful` guard (§4.4.2) on every trigger
    // tried against it — including whatever `failure`'s own triggers are,
    // since the event stays a failed command result for its whole life.
    // No custom failing hook is needed to exercise P6 this way.
    let (collaborators, _store, _autoscaling, notifier) = test_collaborators();
    let record = lc_core::CommandRecord {
        hook_name: "hook".to_string(),
        action_token: "token-1".to_string(),
        group_name: "asg-1".to_string(),
        transition: Transition::Launching,
        originating_event_name: "remote_command_result".to_string(),
        comment: "".to_string(),
        commands: vec![],
        target_node_ids: vec!["i-2".to_string()],
    };
    collaborators.commands.register("cmd-1", &record).await.unwrap();

    let catalog = Catalog::new(vec![
        TransitionDescriptor::new(vec![lc_core::STATE_NEW.to_string()], None).with_trigger(TriggerDescriptor::new("go")),
        TransitionDescriptor::new(vec![lc_core::STATE_FAILURE.to_string()], Some("handled".to_string()))
            .with_trigger(TriggerDescriptor::new("handle_failure")),
    ]);
    let model = Model::initialize(
        collaborators.clone(),
        Ingress::RemoteCommandResult { command_id: "cmd-1".to_string(), status: lc_core::CommandStatus::Failed, resources: vec![] },
    )
    .await
    .unwrap();
    let reporter = ActivityReporter::new(collaborators.notifier.clone());
    let mut orchestrator = Orchestrator::new(&catalog, model, reporter).unwrap();

    let result = orchestrator.run().await;

    assert!(matches!(result, Err(OrchestratorError::FailureDuringFailureHandling(_))));
    assert_eq!(notifier.error_reports().len(), 2);
}
