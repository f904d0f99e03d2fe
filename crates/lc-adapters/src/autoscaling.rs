// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Autoscaling collaborator (§4.3 `complete_lifecycle_action`, §6.1).

use std::time::Duration;

use async_trait::async_trait;
use lc_core::LifecycleResult;

use lc_core::waiter::WaiterConfig;

use crate::error::AutoscalingError;

/// Progress of a logged autoscaling activity, as a percentage (0-100).
pub type ActivityProgress = u8;

/// The autoscaling side of the lifecycle hook protocol.
///
/// `complete_lifecycle_action` acknowledges a LAUNCHING/TERMINATING hook
/// with CONTINUE or ABANDON; `activity_progress` backs the "activity
/// complete" waiter the Model runs for LAUNCHING events (§4.3).
#[async_trait]
pub trait AutoscalingClient: Send + Sync + 'static {
    async fn complete_lifecycle_action(
        &self,
        group_name: &str,
        hook_name: &str,
        action_token: &str,
        instance_id: &str,
        result: LifecycleResult,
    ) -> Result<(), AutoscalingError>;

    /// Current progress of the named activity, or `None` if the
    /// collaborator has no record of it yet.
    async fn activity_progress(&self, activity_id: &str) -> Result<Option<ActivityProgress>, AutoscalingError>;
}

/// Poll [`AutoscalingClient::activity_progress`] until it reports 100%,
/// per the fixed delay × max-attempts policy (§5 "Blocking").
pub async fn wait_for_activity_complete(
    client: &dyn AutoscalingClient,
    activity_id: &str,
    waiter: WaiterConfig,
) -> Result<(), AutoscalingError> {
    lc_core::waiter::poll_until(waiter.delay, waiter.max_attempts, || async {
        match client.activity_progress(activity_id).await {
            Ok(Some(progress)) if progress >= 100 => Ok(Some(())),
            Ok(_) => Ok(None),
            Err(e) => Err(e),
        }
    })
    .await
    .map_err(|e| match e {
        lc_core::waiter::WaiterError::Exhausted(_) => AutoscalingError::ActivityTimedOut(activity_id.to_string()),
        lc_core::waiter::WaiterError::Probe(inner) => inner,
    })
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    pub struct CompleteLifecycleActionCall {
        pub group_name: String,
        pub hook_name: String,
        pub action_token: String,
        pub instance_id: String,
        pub result: LifecycleResult,
    }

    #[derive(Default)]
    struct FakeState {
        calls: Vec<CompleteLifecycleActionCall>,
        activity_progress: HashMap<String, ActivityProgress>,
    }

    /// Fake autoscaling collaborator: records `complete_lifecycle_action`
    /// calls and hands back whatever activity progress was seeded.
    #[derive(Clone, Default)]
    pub struct FakeAutoscalingClient {
        inner: Arc<Mutex<FakeState>>,
    }

    impl FakeAutoscalingClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<CompleteLifecycleActionCall> {
            self.inner.lock().calls.clone()
        }

        pub fn set_activity_progress(&self, activity_id: impl Into<String>, progress: ActivityProgress) {
            self.inner.lock().activity_progress.insert(activity_id.into(), progress);
        }
    }

    #[async_trait]
    impl AutoscalingClient for FakeAutoscalingClient {
        async fn complete_lifecycle_action(
            &self,
            group_name: &str,
            hook_name: &str,
            action_token: &str,
            instance_id: &str,
            result: LifecycleResult,
        ) -> Result<(), AutoscalingError> {
            self.inner.lock().calls.push(CompleteLifecycleActionCall {
                group_name: group_name.to_string(),
                hook_name: hook_name.to_string(),
                action_token: action_token.to_string(),
                instance_id: instance_id.to_string(),
                result,
            });
            Ok(())
        }

        async fn activity_progress(&self, activity_id: &str) -> Result<Option<ActivityProgress>, AutoscalingError> {
            Ok(self.inner.lock().activity_progress.get(activity_id).copied())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{CompleteLifecycleActionCall, FakeAutoscalingClient};

#[cfg(feature = "real-aws")]
mod sdk {
    use super::*;

    /// AWS-SDK-backed [`AutoscalingClient`].
    pub struct SdkAutoscalingClient {
        client: aws_sdk_autoscaling::Client,
    }

    impl SdkAutoscalingClient {
        pub fn new(client: aws_sdk_autoscaling::Client) -> Self {
            Self { client }
        }
    }

    #[async_trait]
    impl AutoscalingClient for SdkAutoscalingClient {
        async fn complete_lifecycle_action(
            &self,
            group_name: &str,
            hook_name: &str,
            action_token: &str,
            instance_id: &str,
            result: LifecycleResult,
        ) -> Result<(), AutoscalingError> {
            self.client
                .complete_lifecycle_action()
                .auto_scaling_group_name(group_name)
                .lifecycle_hook_name(hook_name)
                .lifecycle_action_token(action_token)
                .instance_id(instance_id)
                .lifecycle_action_result(result.to_string())
                .send()
                .await
                .map(|_| ())
                .map_err(|e| AutoscalingError::CompleteLifecycleAction(action_token.to_string(), e.to_string()))
        }

        async fn activity_progress(&self, activity_id: &str) -> Result<Option<ActivityProgress>, AutoscalingError> {
            let output = self
                .client
                .describe_scaling_activities()
                .activity_ids(activity_id)
                .send()
                .await
                .map_err(|e| AutoscalingError::ActivityLookup(activity_id.to_string(), e.to_string()))?;
            Ok(output
                .activities()
                .first()
                .map(|activity| activity.progress().unwrap_or_default().clamp(0, 100) as u8))
        }
    }
}

#[cfg(feature = "real-aws")]
pub use sdk::SdkAutoscalingClient;

#[cfg(test)]
#[path = "autoscaling_tests.rs"]
mod tests;
