// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Activity Reporter (§4.5): turns a transition (or a failure) into a
//! progress or error report and publishes it.

use std::sync::Arc;

use lc_adapters::{ErrorReport, NotificationPublisher, ProgressReport, Severity};
use lc_core::Event;

use crate::error::OrchestratorError;

pub struct ActivityReporter {
    notifier: Arc<dyn NotificationPublisher>,
}

impl ActivityReporter {
    pub fn new(notifier: Arc<dyn NotificationPublisher>) -> Self {
        Self { notifier }
    }

    /// Report a transition: `subject` is `"{direction} from {src} to {dst}
    /// via {trigger}"`, `detail` is the event rendered as JSON (§4.5).
    /// `direction` distinguishes the before-hooks report ("Transitioning")
    /// from the after-hooks one ("Transitioned").
    pub async fn report_transition(
        &self,
        event: &Event,
        direction: &str,
        trigger: &str,
        source: &str,
        dest: Option<&str>,
    ) -> Result<(), OrchestratorError> {
        let subject = match dest {
            Some(dest) => format!("{direction} from {source} to {dest} via {trigger}"),
            None => format!("{direction} from {source} via {trigger}"),
        };
        let detail = serde_json::to_value(event).unwrap_or(serde_json::Value::Null);
        self.notifier.publish_progress(ProgressReport { severity: Severity::Info, subject, detail }).await?;
        Ok(())
    }

    /// Report a trigger whose `conditions`/`unless` guards suspended it
    /// rather than failing it (§4.4.1 "silently skip").
    pub async fn report_suspended(&self, trigger: &str, source: &str) -> Result<(), OrchestratorError> {
        let subject = format!("{trigger} from {source} suspended by guard");
        self.notifier
            .publish_progress(ProgressReport { severity: Severity::Info, subject, detail: serde_json::Value::Null })
            .await?;
        Ok(())
    }

    /// Report a failure encountered while processing `trigger` (§4.4,
    /// §4.5): one frame per error in the `source` chain, newest first.
    pub async fn report_failure(&self, trigger: &str, error: &OrchestratorError) -> Result<(), OrchestratorError> {
        let mut traceback = Vec::new();
        let mut cause: Option<&(dyn std::error::Error + 'static)> = Some(error);
        while let Some(err) = cause {
            traceback.push(err.to_string());
            cause = err.source();
        }
        self.notifier
            .publish_error(ErrorReport {
                subject: format!("{trigger} failed"),
                exception: error.to_string(),
                traceback,
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "activity_reporter_tests.rs"]
mod tests;
