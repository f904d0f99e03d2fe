// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SNS envelope unwrapping and the parsed notification shape (§6.1).
//!
//! A real deployment delivers these as SNS-wrapped EventBridge events:
//! the SNS payload is `{"Records": [{"Sns": {"Message": "<json>"}}]}`,
//! and `Message` is itself the JSON text of the EventBridge event this
//! module parses into a [`RawNotification`].

use serde::Deserialize;
use serde_json::Value;

use crate::error::WireError;

#[derive(Debug, Deserialize)]
struct SnsBody {
    #[serde(rename = "Records")]
    records: Vec<SnsRecord>,
}

#[derive(Debug, Deserialize)]
struct SnsRecord {
    #[serde(rename = "Sns")]
    sns: SnsMessage,
}

#[derive(Debug, Deserialize)]
struct SnsMessage {
    #[serde(rename = "Message")]
    message: String,
}

/// Unwrap an SNS-delivered payload down to the JSON text of the
/// EventBridge event it carries (`Records[0].Sns.Message`, §6.1).
pub fn unwrap_sns(body: &str) -> Result<String, WireError> {
    let parsed: SnsBody = serde_json::from_str(body).map_err(WireError::Envelope)?;
    parsed.records.into_iter().next().map(|r| r.sns.message).ok_or(WireError::EmptyEnvelope)
}

/// A parsed EventBridge notification, not yet dispatched on `source`
/// (§3, §6.1). Mirrors the AWS EventBridge envelope shape: the bits
/// every source shares (`source`, `resources`, ...) plus an opaque
/// `detail` object whose fields are source-specific.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNotification {
    pub source: String,
    #[serde(default)]
    pub resources: Vec<String>,
    pub detail: Value,
}

impl RawNotification {
    /// Parse the unwrapped JSON text of an EventBridge event.
    pub fn parse(body: &str) -> Result<Self, WireError> {
        serde_json::from_str(body).map_err(WireError::Body)
    }

    /// Parse an SNS-wrapped payload in one step.
    pub fn from_sns(body: &str) -> Result<Self, WireError> {
        Self::parse(&unwrap_sns(body)?)
    }

    pub(crate) fn detail_str(&self, field: &'static str) -> Result<&str, WireError> {
        self.detail
            .as_object()
            .and_then(|detail| detail.get(field))
            .and_then(Value::as_str)
            .ok_or(WireError::MissingField(field))
    }
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
