// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment-sourced configuration for the runtime binary (§2 ambient
//! stack): table name, topic ARN, and region, 12-factor style.

use std::time::Duration;

use lc_core::waiter::WaiterConfig;

use crate::error::RuntimeError;

/// `LC_*` environment variables the runtime reads at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub table_name: String,
    pub progress_topic_arn: String,
    pub error_topic_arn: String,
    pub region: String,
    pub waiters: lc_machine::ModelWaiters,
}

impl Config {
    /// Read configuration from the environment. `LC_TABLE_NAME`,
    /// `LC_PROGRESS_TOPIC_ARN`, `LC_ERROR_TOPIC_ARN`, and `LC_REGION` are
    /// required; the three waiter policies default to 5s x 60 attempts
    /// and can each be overridden with `LC_<NAME>_WAIT_MS` /
    /// `LC_<NAME>_WAIT_ATTEMPTS`.
    pub fn from_env() -> Result<Self, RuntimeError> {
        Ok(Self {
            table_name: required_var("LC_TABLE_NAME")?,
            progress_topic_arn: required_var("LC_PROGRESS_TOPIC_ARN")?,
            error_topic_arn: required_var("LC_ERROR_TOPIC_ARN")?,
            region: required_var("LC_REGION")?,
            waiters: lc_machine::ModelWaiters {
                cloud_init: waiter_from_env("CLOUD_INIT"),
                agent_online: waiter_from_env("AGENT_ONLINE"),
                activity_complete: waiter_from_env("ACTIVITY_COMPLETE"),
            },
        })
    }
}

fn required_var(name: &str) -> Result<String, RuntimeError> {
    std::env::var(name).map_err(|_| RuntimeError::MissingEnvVar(name.to_string()))
}

fn waiter_from_env(prefix: &str) -> WaiterConfig {
    let delay = std::env::var(format!("LC_{prefix}_WAIT_MS"))
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5));
    let max_attempts =
        std::env::var(format!("LC_{prefix}_WAIT_ATTEMPTS")).ok().and_then(|s| s.parse::<u32>().ok()).unwrap_or(60);
    WaiterConfig::new(delay, max_attempts)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
