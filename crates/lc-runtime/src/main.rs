// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entry point gluing the real AWS-backed collaborators, the Node/Command
//! Repositories, and a catalog into a running orchestrator.
//!
//! Reads one SNS-wrapped EventBridge notification per line from stdin —
//! concrete event ingress/egress plumbing (Lambda, SQS, ...) is a
//! Non-goal of the core; this loop is the thinnest driver that still
//! exercises the real collaborators end to end. Events for distinct node
//! ids are processed concurrently; the same node id is never dispatched
//! twice at once (§5).
//!
//! [`catalog::default_catalog`] wires only the Model's two built-in
//! triggers — concrete workflows are an embedding application's concern,
//! not this binary's; replace it with your own before deploying.

mod catalog;
mod config;
mod error;

use std::collections::HashMap;
use std::io::BufRead;
use std::sync::Arc;

use aws_config::BehaviorVersion;
use tokio::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::Config;
use error::RuntimeError;
use lc_adapters::{SdkAutoscalingClient, SdkRemoteCommandClient, SnsNotificationPublisher};
use lc_machine::{ActivityReporter, Model, ModelCollaborators, Orchestrator};
use lc_storage::{CommandRepository, DynamoDbStore, KeyValueStore, NodeRepository};

#[tokio::main]
async fn main() -> Result<(), RuntimeError> {
    init_tracing();
    let config = Config::from_env()?;
    let collaborators = build_collaborators(&config).await;

    tracing::info!(table = %config.table_name, region = %config.region, "lifecycle orchestrator starting");

    // Serializes dispatch per node id (§5); distinct ids still run concurrently.
    let locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>> = Arc::new(Mutex::new(HashMap::new()));
    let stdin = std::io::stdin();
    let mut tasks = Vec::new();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) if !line.trim().is_empty() => line,
            Ok(_) => continue,
            Err(err) => {
                tracing::error!(error = %err, "failed to read stdin");
                continue;
            }
        };
        let collaborators = collaborators.clone();
        let locks = locks.clone();
        tasks.push(tokio::spawn(async move {
            if let Err(err) = handle_notification(&line, collaborators, locks).await {
                tracing::error!(error = %err, "failed to process notification");
            }
        }));
    }
    for task in tasks {
        let _ = task.await;
    }
    Ok(())
}

async fn build_collaborators(config: &Config) -> ModelCollaborators {
    let aws_config = aws_config::defaults(BehaviorVersion::latest()).region(aws_config::Region::new(config.region.clone())).load().await;

    let store: Arc<dyn KeyValueStore> =
        Arc::new(DynamoDbStore::new(aws_sdk_dynamodb::Client::new(&aws_config), config.table_name.clone()));
    let autoscaling = Arc::new(SdkAutoscalingClient::new(aws_sdk_autoscaling::Client::new(&aws_config)));
    let remote_command = Arc::new(SdkRemoteCommandClient::new(aws_sdk_ssm::Client::new(&aws_config)));
    let notifier = Arc::new(SnsNotificationPublisher::new(aws_sdk_sns::Client::new(&aws_config), config.progress_topic_arn.clone()));

    ModelCollaborators {
        nodes: Arc::new(NodeRepository::new(store.clone())),
        commands: Arc::new(CommandRepository::new(store)),
        autoscaling,
        remote_command,
        notifier,
        waiters: config.waiters,
    }
}

async fn handle_notification(
    line: &str,
    collaborators: ModelCollaborators,
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
) -> Result<(), RuntimeError> {
    let notification = lc_wire::RawNotification::from_sns(line)?;
    let ingress = lc_wire::to_ingress(&notification)?;

    let node_id = match &ingress {
        lc_machine::Ingress::AutoscalingLifecycle { context, .. } => context.instance_id.clone(),
        lc_machine::Ingress::RemoteCommandResult { command_id, .. } => {
            // Peek (not pop) the stored record so the lock keys on the node
            // the command actually targets, not the command id itself
            // (§5); `Model::initialize` still consumes it via `pop` below.
            let record = collaborators.commands.get(command_id).await?;
            record.lifecycle_context().map(|c| c.instance_id).unwrap_or_else(|| command_id.clone())
        }
        lc_machine::Ingress::Scheduled { resource_path } => resource_path.clone(),
    };
    let lock = {
        let mut locks = locks.lock().await;
        locks.entry(node_id).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
    };
    let _guard = lock.lock().await;

    let model = Model::initialize(collaborators.clone(), ingress).await?;
    let catalog = catalog::default_catalog(collaborators.clone());
    let reporter = ActivityReporter::new(collaborators.notifier.clone());
    let mut orchestrator = Orchestrator::new(&catalog, model, reporter)?;
    orchestrator.run().await?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
