// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Model (§4.3): the event/node/state triple an Orchestrator drives,
//! plus the two collaborator-backed built-in operations every catalog may
//! call on it.

use std::sync::Arc;
use std::time::Duration;

use lc_adapters::{AutoscalingClient, NotificationPublisher, RemoteCommandClient};
use lc_core::waiter::WaiterConfig;
use lc_core::{CommandRecord, CommandStatus, Event, LifecycleResult, Node, PROPERTY_STATUS, STATE_NEW};
use lc_storage::{CommandRepository, NodeRepository};
use serde_json::{Map, Value};

use crate::error::OrchestratorError;
use crate::ingress::Ingress;

/// Fixed delay × max-attempts policy for the three waiters the Model
/// drives (§5 "Blocking"): cloud-init, agent-online, activity-complete.
#[derive(Debug, Clone, Copy)]
pub struct ModelWaiters {
    pub cloud_init: WaiterConfig,
    pub agent_online: WaiterConfig,
    pub activity_complete: WaiterConfig,
}

impl Default for ModelWaiters {
    fn default() -> Self {
        let default = WaiterConfig::new(Duration::from_secs(5), 60);
        Self { cloud_init: default, agent_online: default, activity_complete: default }
    }
}

/// Collaborators the Model needs to resolve an event and run its two
/// built-in triggers. Bundled so `Orchestrator` can construct a `Model`
/// with a single argument.
#[derive(Clone)]
pub struct ModelCollaborators {
    pub nodes: Arc<NodeRepository>,
    pub commands: Arc<CommandRepository>,
    pub autoscaling: Arc<dyn AutoscalingClient>,
    pub remote_command: Arc<dyn RemoteCommandClient>,
    pub notifier: Arc<dyn NotificationPublisher>,
    pub waiters: ModelWaiters,
}

pub struct Model {
    collaborators: ModelCollaborators,
    event: Event,
    node: Node,
    state: String,
    allow_state_updates: bool,
    seen_states: Vec<String>,
}

impl Model {
    /// Resolve `ingress` into a full [`Event`] (pairing a remote-command
    /// result with its stored [`CommandRecord`] if needed), correlate it
    /// to a [`Node`], and run the cloud-init wait if the node is new
    /// (§4.3).
    pub async fn initialize(collaborators: ModelCollaborators, ingress: Ingress) -> Result<Self, OrchestratorError> {
        let event = Self::resolve_event(&collaborators, ingress).await?;

        let node = match event.instance_id() {
            Some(id) => {
                let node = collaborators.nodes.get(id).await?;
                if node.state() == STATE_NEW {
                    // Covers both a never-stored id (synthesized by `get`)
                    // and a stored-but-still-new row — either way the
                    // instance hasn't finished cloud-init yet (§4.3).
                    Self::wait_for_cloud_init(&collaborators, id).await?;
                    collaborators.nodes.get(id).await?
                } else {
                    node
                }
            }
            None => Node::synthetic("unscoped"),
        };

        let state = node.state().to_string();
        Ok(Self {
            collaborators,
            event,
            node,
            state,
            allow_state_updates: false,
            seen_states: Vec::new(),
        })
    }

    async fn resolve_event(collaborators: &ModelCollaborators, ingress: Ingress) -> Result<Event, OrchestratorError> {
        match ingress {
            Ingress::AutoscalingLifecycle { context, metadata } => {
                Ok(Event::AutoscalingLifecycle { context, metadata, has_failure: false })
            }
            Ingress::RemoteCommandResult { command_id, status, resources } => {
                let record: CommandRecord = collaborators.commands.pop(&command_id).await?;
                let context = record
                    .lifecycle_context()
                    .ok_or_else(|| OrchestratorError::MissingLifecycleContext(command_id.clone()))?;
                Ok(Event::RemoteCommandResult { command_id, status, resources, context, has_failure: false })
            }
            Ingress::Scheduled { resource_path } => Ok(Event::Scheduled { resource_path }),
        }
    }

    async fn wait_for_cloud_init(collaborators: &ModelCollaborators, id: &str) -> Result<(), OrchestratorError> {
        let delay = collaborators.waiters.cloud_init.delay;
        let max_attempts = collaborators.waiters.cloud_init.max_attempts;
        lc_core::waiter::poll_until(delay, max_attempts, || async {
            match collaborators.nodes.get(id).await {
                Ok(node) if node.state() == lc_core::STATE_FINISHED_CLOUD_INIT => Ok(Some(())),
                Ok(_) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(|e| match e {
            lc_core::waiter::WaiterError::Exhausted(_) => OrchestratorError::CloudInitTimedOut(id.to_string()),
            lc_core::waiter::WaiterError::Probe(inner) => OrchestratorError::Storage(inner),
        })
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn event_mut(&mut self) -> &mut Event {
        &mut self.event
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Replace the in-memory node with one a hook handed back (§4.4.1):
    /// does not itself write through to the store, since a hook mutating
    /// node properties is a local bookkeeping change, not a state
    /// transition (use [`Model::set_state`] for that).
    pub fn set_node(&mut self, node: Node) {
        self.node = node;
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn seen_states(&self) -> &[String] {
        &self.seen_states
    }

    pub fn allow_state_updates(&mut self, allow: bool) {
        self.allow_state_updates = allow;
    }

    /// Writes are ignored until `allow_state_updates` is enabled, so the
    /// Orchestrator can set the machine's initial state from the Model
    /// without that counting as a real transition (§4.3, §4.4).
    pub async fn set_state(&mut self, new_state: impl Into<String>) -> Result<(), OrchestratorError> {
        if !self.allow_state_updates {
            return Ok(());
        }
        let new_state = new_state.into();
        self.state = new_state.clone();
        self.node.set_state(new_state.clone());
        self.seen_states.push(new_state.clone());
        let mut changes = Map::new();
        changes.insert(PROPERTY_STATUS.to_string(), Value::String(new_state));
        self.collaborators.nodes.update(&self.node, changes).await?;
        Ok(())
    }

    /// Acknowledge the current event's lifecycle hook with CONTINUE or
    /// ABANDON; for LAUNCHING events, additionally wait for the
    /// autoscaling activity to reach 100% (§4.3).
    pub async fn complete_lifecycle_action(&self) -> Result<(), OrchestratorError> {
        complete_lifecycle_action(&self.collaborators, &self.event).await
    }

    /// Delete the correlated node from the Node Repository (§4.3).
    pub async fn remove_from_db(&self) -> Result<(), OrchestratorError> {
        remove_from_db(&self.collaborators, &self.node).await
    }

    /// Dispatch `commands` to `targets`, persist a [`CommandRecord`]
    /// keyed by the collaborator-assigned command id so the paired
    /// `RemoteCommandResult` can restore this lifecycle context later,
    /// then wait for the first target's agent to come online.
    pub async fn send_command(
        &self,
        comment: impl Into<String>,
        commands: Vec<String>,
        targets: Vec<String>,
    ) -> Result<String, OrchestratorError> {
        send_command(&self.collaborators, &self.event, comment, commands, targets).await
    }
}

/// Whether a stored [`CommandStatus`] counts as a remote-command success.
pub fn command_succeeded(status: CommandStatus) -> bool {
    status == CommandStatus::Success
}

/// Acknowledge `event`'s lifecycle hook with CONTINUE or ABANDON; for
/// LAUNCHING events, additionally wait for the autoscaling activity to
/// reach 100% (§4.3 `complete_lifecycle_action`).
///
/// A free function rather than a `Model` method so catalog-authoring
/// code can wrap it in a [`lc_catalog::HookFn`] closure that only
/// captures a cloned [`ModelCollaborators`], without needing a live
/// `&Model` (the Orchestrator already holds `&mut Model` while running
/// hooks).
pub async fn complete_lifecycle_action(
    collaborators: &ModelCollaborators,
    event: &Event,
) -> Result<(), OrchestratorError> {
    let context = event
        .lifecycle_context()
        .ok_or_else(|| OrchestratorError::MissingLifecycleContext(event.kind().to_string()))?;
    let result = event.lifecycle_result().unwrap_or(LifecycleResult::Abandon);
    collaborators
        .autoscaling
        .complete_lifecycle_action(&context.group_name, &context.hook_name, &context.action_token, &context.instance_id, result)
        .await?;

    if event.is_launching() {
        lc_adapters::wait_for_activity_complete(
            collaborators.autoscaling.as_ref(),
            &context.action_token,
            collaborators.waiters.activity_complete,
        )
        .await?;
    }

    let detail = serde_json::to_value(event).unwrap_or(Value::Null);
    collaborators
        .notifier
        .publish_progress(lc_adapters::ProgressReport {
            severity: lc_adapters::Severity::Success,
            subject: format!("{} lifecycle action completed with {}", context.transition, result),
            detail,
        })
        .await?;
    Ok(())
}

/// Delete `node` from the Node Repository (§4.3 `remove_from_db`). See
/// [`complete_lifecycle_action`] for why this is a free function.
pub async fn remove_from_db(collaborators: &ModelCollaborators, node: &Node) -> Result<(), OrchestratorError> {
    collaborators.nodes.delete(node).await?;
    Ok(())
}

/// Dispatch `commands` to `targets`, persist a [`CommandRecord`] so the
/// paired `RemoteCommandResult` can restore `event`'s lifecycle context,
/// then wait for the first target's agent to come online. See
/// [`complete_lifecycle_action`] for why this is a free function.
pub async fn send_command(
    collaborators: &ModelCollaborators,
    event: &Event,
    comment: impl Into<String>,
    commands: Vec<String>,
    targets: Vec<String>,
) -> Result<String, OrchestratorError> {
    let context = event.lifecycle_context();
    let command_id = collaborators.remote_command.send_command(&targets, &commands).await?;

    let record = CommandRecord {
        hook_name: context.map(|c| c.hook_name.clone()).unwrap_or_default(),
        action_token: context.map(|c| c.action_token.clone()).unwrap_or_default(),
        group_name: context.map(|c| c.group_name.clone()).unwrap_or_default(),
        transition: context.map(|c| c.transition).unwrap_or(lc_core::Transition::Launching),
        originating_event_name: event.kind().to_string(),
        comment: comment.into(),
        commands,
        target_node_ids: targets.clone(),
    };
    collaborators.commands.register(&command_id, &record).await?;

    if let Some(first_target) = targets.first() {
        lc_adapters::wait_for_agent_online(collaborators.remote_command.as_ref(), first_target, collaborators.waiters.agent_online)
            .await?;
    }

    Ok(command_id)
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
