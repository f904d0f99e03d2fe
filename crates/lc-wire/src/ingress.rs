// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Source dispatch: turn a parsed [`RawNotification`] into an
//! [`lc_machine::Ingress`] (§3, §6.1).

use lc_core::{CommandStatus, LifecycleContext, Transition};
use lc_machine::Ingress;
use serde_json::Value;

use crate::envelope::RawNotification;
use crate::error::WireError;

const SOURCE_AUTOSCALING: &str = "aws.autoscaling";
const SOURCE_SSM: &str = "aws.ssm";
const SOURCE_SCHEDULED: &str = "aws.events";

/// Dispatch `notification` on its `source` field into the matching
/// [`Ingress`] variant (§6.1).
pub fn to_ingress(notification: &RawNotification) -> Result<Ingress, WireError> {
    match notification.source.as_str() {
        SOURCE_AUTOSCALING => autoscaling_lifecycle(notification),
        SOURCE_SSM => remote_command_result(notification),
        SOURCE_SCHEDULED => scheduled(notification),
        other => Err(WireError::UnknownSource(other.to_string())),
    }
}

fn autoscaling_lifecycle(notification: &RawNotification) -> Result<Ingress, WireError> {
    let transition = parse_transition(notification.detail_str("LifecycleTransition")?)?;
    let context = LifecycleContext {
        hook_name: notification.detail_str("LifecycleHookName")?.to_string(),
        action_token: notification.detail_str("LifecycleActionToken")?.to_string(),
        group_name: notification.detail_str("AutoScalingGroupName")?.to_string(),
        instance_id: notification.detail_str("EC2InstanceId")?.to_string(),
        transition,
    };
    let metadata = normalize_metadata(&notification.detail)?;
    Ok(Ingress::AutoscalingLifecycle { context, metadata })
}

fn remote_command_result(notification: &RawNotification) -> Result<Ingress, WireError> {
    let command_id = notification.detail_str("command-id")?.to_string();
    let status = parse_command_status(notification.detail_str("status")?)?;
    Ok(Ingress::RemoteCommandResult { command_id, status, resources: notification.resources.clone() })
}

fn scheduled(notification: &RawNotification) -> Result<Ingress, WireError> {
    let resource_path = notification
        .resources
        .first()
        .cloned()
        .ok_or(WireError::MissingField("resources"))?;
    Ok(Ingress::Scheduled { resource_path })
}

fn parse_transition(raw: &str) -> Result<Transition, WireError> {
    match raw {
        "autoscaling:EC2_INSTANCE_LAUNCHING" => Ok(Transition::Launching),
        "autoscaling:EC2_INSTANCE_TERMINATING" => Ok(Transition::Terminating),
        other => Err(WireError::UnknownTransition(other.to_string())),
    }
}

fn parse_command_status(raw: &str) -> Result<CommandStatus, WireError> {
    match raw {
        "Success" => Ok(CommandStatus::Success),
        "Failed" => Ok(CommandStatus::Failed),
        "Cancelled" => Ok(CommandStatus::Cancelled),
        "TimedOut" => Ok(CommandStatus::TimedOut),
        other => Err(WireError::UnknownCommandStatus(other.to_string())),
    }
}

/// `NotificationMetadata` arrives either as a JSON object already, or (in
/// practice, since EventBridge carries it through SNS as a string) as a
/// JSON-encoded string that must be decoded once more (§6.1, mirrors
/// `AutoscalingEvent.__init__`'s normalize-on-load step).
fn normalize_metadata(detail: &Value) -> Result<Value, WireError> {
    match detail.get("NotificationMetadata") {
        None | Some(Value::Null) => Ok(Value::Object(serde_json::Map::new())),
        Some(Value::String(raw)) => serde_json::from_str(raw).map_err(WireError::MalformedMetadata),
        Some(object @ Value::Object(_)) => Ok(object.clone()),
        Some(other) => Ok(other.clone()),
    }
}

#[cfg(test)]
#[path = "ingress_tests.rs"]
mod tests;
