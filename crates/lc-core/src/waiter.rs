// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-delay × max-attempts polling (§5 "Blocking"), shared by every
//! collaborator that needs one: the cloud-init store-scan wait, the SSM
//! agent-online wait, and the autoscaling activity-complete wait.
//!
//! One shared poll loop rather than a copy per collaborator.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Fixed delay and attempt budget for one waiter call site.
#[derive(Debug, Clone, Copy)]
pub struct WaiterConfig {
    pub delay: Duration,
    pub max_attempts: u32,
}

impl WaiterConfig {
    pub fn new(delay: Duration, max_attempts: u32) -> Self {
        Self { delay, max_attempts }
    }
}

#[derive(Debug, Error)]
pub enum WaiterError<E> {
    #[error("waiter gave up after {0} attempts")]
    Exhausted(u32),
    #[error(transparent)]
    Probe(#[from] E),
}

/// Poll `probe` every `delay`, up to `max_attempts` times, until it
/// returns `Ok(Some(value))`. Returns [`WaiterError::Exhausted`] if
/// `max_attempts` is reached without a match, or propagates a probe
/// failure immediately.
pub async fn poll_until<F, Fut, T, E>(
    delay: Duration,
    max_attempts: u32,
    mut probe: F,
) -> Result<T, WaiterError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    for attempt in 0..max_attempts {
        if let Some(value) = probe().await? {
            return Ok(value);
        }
        if attempt + 1 < max_attempts {
            tokio::time::sleep(delay).await;
        }
    }
    Err(WaiterError::Exhausted(max_attempts))
}

#[cfg(test)]
#[path = "waiter_tests.rs"]
mod tests;
