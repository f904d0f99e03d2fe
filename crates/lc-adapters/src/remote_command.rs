// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote-command collaborator (§4.3 `Model::send_command`, §6.1 `aws.ssm`).

use async_trait::async_trait;
use lc_core::waiter::WaiterConfig;

use crate::error::RemoteCommandError;

/// Dispatches shell commands to managed instances and reports whether an
/// instance's agent is reachable.
#[async_trait]
pub trait RemoteCommandClient: Send + Sync + 'static {
    /// Send `commands` to `targets`; returns the collaborator-assigned
    /// command id the orchestrator persists in a Command Record (§3).
    async fn send_command(&self, targets: &[String], commands: &[String]) -> Result<String, RemoteCommandError>;

    /// Whether the remote agent on `instance_id` is currently reachable.
    async fn is_agent_online(&self, instance_id: &str) -> Result<bool, RemoteCommandError>;
}

/// Poll [`RemoteCommandClient::is_agent_online`] until it reports `true`
/// (§5 "Blocking"): a command dispatched to an instance whose agent isn't
/// registered yet is silently dropped by the real collaborator.
pub async fn wait_for_agent_online(
    client: &dyn RemoteCommandClient,
    instance_id: &str,
    waiter: WaiterConfig,
) -> Result<(), RemoteCommandError> {
    lc_core::waiter::poll_until(waiter.delay, waiter.max_attempts, || async {
        match client.is_agent_online(instance_id).await {
            Ok(true) => Ok(Some(())),
            Ok(false) => Ok(None),
            Err(e) => Err(e),
        }
    })
    .await
    .map_err(|e| match e {
        lc_core::waiter::WaiterError::Exhausted(_) => RemoteCommandError::AgentNotOnline(instance_id.to_string()),
        lc_core::waiter::WaiterError::Probe(inner) => inner,
    })
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    pub struct SendCommandCall {
        pub targets: Vec<String>,
        pub commands: Vec<String>,
    }

    #[derive(Default)]
    struct FakeState {
        calls: Vec<SendCommandCall>,
        next_command_id: u32,
        online: HashSet<String>,
        queued_failure: Option<String>,
    }

    /// Fake remote-command collaborator: assigns sequential command ids
    /// and tracks which instances have been marked online.
    #[derive(Clone, Default)]
    pub struct FakeRemoteCommandClient {
        inner: Arc<Mutex<FakeState>>,
    }

    impl FakeRemoteCommandClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<SendCommandCall> {
            self.inner.lock().calls.clone()
        }

        pub fn mark_online(&self, instance_id: impl Into<String>) {
            self.inner.lock().online.insert(instance_id.into());
        }

        pub fn fail_next_send(&self, message: impl Into<String>) {
            self.inner.lock().queued_failure = Some(message.into());
        }
    }

    #[async_trait]
    impl RemoteCommandClient for FakeRemoteCommandClient {
        async fn send_command(&self, targets: &[String], commands: &[String]) -> Result<String, RemoteCommandError> {
            let mut state = self.inner.lock();
            if let Some(message) = state.queued_failure.take() {
                return Err(RemoteCommandError::SendFailed(targets.to_vec(), message));
            }
            state.calls.push(SendCommandCall { targets: targets.to_vec(), commands: commands.to_vec() });
            state.next_command_id += 1;
            Ok(format!("cmd-{}", state.next_command_id))
        }

        async fn is_agent_online(&self, instance_id: &str) -> Result<bool, RemoteCommandError> {
            Ok(self.inner.lock().online.contains(instance_id))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRemoteCommandClient, SendCommandCall};

#[cfg(feature = "real-aws")]
mod sdk {
    use super::*;

    /// AWS-SDK-backed [`RemoteCommandClient`].
    pub struct SdkRemoteCommandClient {
        client: aws_sdk_ssm::Client,
    }

    impl SdkRemoteCommandClient {
        pub fn new(client: aws_sdk_ssm::Client) -> Self {
            Self { client }
        }
    }

    #[async_trait]
    impl RemoteCommandClient for SdkRemoteCommandClient {
        async fn send_command(&self, targets: &[String], commands: &[String]) -> Result<String, RemoteCommandError> {
            let mut parameters = std::collections::HashMap::new();
            parameters.insert("commands".to_string(), commands.to_vec());
            self.client
                .send_command()
                .set_instance_ids(Some(targets.to_vec()))
                .document_name("AWS-RunShellScript")
                .set_parameters(Some(parameters))
                .send()
                .await
                .map_err(|e| RemoteCommandError::SendFailed(targets.to_vec(), e.to_string()))?
                .command()
                .and_then(|c| c.command_id().map(str::to_string))
                .ok_or_else(|| RemoteCommandError::SendFailed(targets.to_vec(), "no command id returned".to_string()))
        }

        async fn is_agent_online(&self, instance_id: &str) -> Result<bool, RemoteCommandError> {
            let output = self
                .client
                .describe_instance_information()
                .filters(
                    aws_sdk_ssm::types::InstanceInformationStringFilter::builder()
                        .key("InstanceIds")
                        .values(instance_id)
                        .build()
                        .map_err(|e| RemoteCommandError::SendFailed(vec![instance_id.to_string()], e.to_string()))?,
                )
                .send()
                .await
                .map_err(|e| RemoteCommandError::SendFailed(vec![instance_id.to_string()], e.to_string()))?;
            Ok(!output.instance_information_list().is_empty())
        }
    }
}

#[cfg(feature = "real-aws")]
pub use sdk::SdkRemoteCommandClient;

#[cfg(test)]
#[path = "remote_command_tests.rs"]
mod tests;
