// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lc-adapters: the collaborator traits the Model and Activity Reporter
//! are built against — autoscaling, remote-command dispatch, and
//! notification publishing (§4.3, §4.5, §6.1).
//!
//! Each collaborator ships a real `aws-sdk-*`-backed implementation behind
//! the `real-aws` feature, and a recording fake behind `test-support`.

pub mod autoscaling;
pub mod error;
pub mod notify;
pub mod remote_command;

pub use autoscaling::{wait_for_activity_complete, ActivityProgress, AutoscalingClient};
pub use error::{AutoscalingError, NotifyError, RemoteCommandError};
pub use notify::{ErrorReport, NotificationPublisher, ProgressReport, Severity};
pub use remote_command::{wait_for_agent_online, RemoteCommandClient};

#[cfg(any(test, feature = "test-support"))]
pub use autoscaling::{CompleteLifecycleActionCall, FakeAutoscalingClient};
#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotificationPublisher;
#[cfg(any(test, feature = "test-support"))]
pub use remote_command::{FakeRemoteCommandClient, SendCommandCall};

#[cfg(feature = "real-aws")]
pub use autoscaling::SdkAutoscalingClient;
#[cfg(feature = "real-aws")]
pub use notify::SnsNotificationPublisher;
#[cfg(feature = "real-aws")]
pub use remote_command::SdkRemoteCommandClient;
