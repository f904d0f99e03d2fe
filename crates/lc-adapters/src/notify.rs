// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification collaborator (§4.5 Activity Reporter): the two streams an
//! orchestrator publishes to — progress and errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Success,
    Error,
}

lc_core::simple_display! {
    Severity {
        Info => "INFO",
        Success => "SUCCESS",
        Error => "ERROR",
    }
}

/// A progress report: `{severity, subject, detail}` (§4.5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub severity: Severity,
    pub subject: String,
    pub detail: serde_json::Value,
}

/// An error report: `{subject, exception repr, structured traceback}`
/// (§4.5). `traceback` is a list of frame descriptions, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub subject: String,
    pub exception: String,
    pub traceback: Vec<String>,
}

/// Publishes activity reports to whatever external notification channel
/// the deployment uses.
#[async_trait]
pub trait NotificationPublisher: Send + Sync + 'static {
    async fn publish_progress(&self, report: ProgressReport) -> Result<(), NotifyError>;
    async fn publish_error(&self, report: ErrorReport) -> Result<(), NotifyError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeState {
        progress: Vec<ProgressReport>,
        errors: Vec<ErrorReport>,
    }

    /// Fake notification publisher: records every report it receives.
    #[derive(Clone, Default)]
    pub struct FakeNotificationPublisher {
        inner: Arc<Mutex<FakeState>>,
    }

    impl FakeNotificationPublisher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn progress_reports(&self) -> Vec<ProgressReport> {
            self.inner.lock().progress.clone()
        }

        pub fn error_reports(&self) -> Vec<ErrorReport> {
            self.inner.lock().errors.clone()
        }
    }

    #[async_trait]
    impl NotificationPublisher for FakeNotificationPublisher {
        async fn publish_progress(&self, report: ProgressReport) -> Result<(), NotifyError> {
            self.inner.lock().progress.push(report);
            Ok(())
        }

        async fn publish_error(&self, report: ErrorReport) -> Result<(), NotifyError> {
            self.inner.lock().errors.push(report);
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeNotificationPublisher;

#[cfg(feature = "real-aws")]
mod sdk {
    use super::*;

    /// SNS-backed [`NotificationPublisher`]: both streams publish to the
    /// same topic, distinguished by `subject`.
    pub struct SnsNotificationPublisher {
        client: aws_sdk_sns::Client,
        topic_arn: String,
    }

    impl SnsNotificationPublisher {
        pub fn new(client: aws_sdk_sns::Client, topic_arn: impl Into<String>) -> Self {
            Self { client, topic_arn: topic_arn.into() }
        }

        async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
            self.client
                .publish()
                .topic_arn(&self.topic_arn)
                .subject(subject)
                .message(message)
                .send()
                .await
                .map(|_| ())
                .map_err(|e| NotifyError::PublishFailed(e.to_string()))
        }
    }

    #[async_trait]
    impl NotificationPublisher for SnsNotificationPublisher {
        async fn publish_progress(&self, report: ProgressReport) -> Result<(), NotifyError> {
            let message = serde_json::to_string(&report.detail).unwrap_or_default();
            self.publish(&report.subject, &message).await
        }

        async fn publish_error(&self, report: ErrorReport) -> Result<(), NotifyError> {
            let message = serde_json::to_string(&report.traceback).unwrap_or_default();
            self.publish(&report.subject, &message).await
        }
    }
}

#[cfg(feature = "real-aws")]
pub use sdk::SnsNotificationPublisher;

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
