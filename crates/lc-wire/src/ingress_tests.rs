// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use lc_core::{CommandStatus, LifecycleContext, Transition};
use lc_machine::Ingress;

use super::*;
use crate::envelope::RawNotification;

fn autoscaling_notification(metadata: &str) -> RawNotification {
    let body = format!(
        r#"{{"source":"aws.autoscaling","detail":{{
            "LifecycleHookName":"launch-hook",
            "LifecycleActionToken":"token-1",
            "AutoScalingGroupName":"asg-1",
            "EC2InstanceId":"i-1",
            "LifecycleTransition":"autoscaling:EC2_INSTANCE_LAUNCHING",
            "NotificationMetadata":{metadata}
        }}}}"#
    );
    RawNotification::parse(&body).unwrap()
}

#[test]
fn autoscaling_launching_builds_a_lifecycle_ingress() {
    let notification = autoscaling_notification(r#""{\"role\":\"worker\"}""#);
    let ingress = to_ingress(&notification).unwrap();
    assert_eq!(
        ingress,
        Ingress::AutoscalingLifecycle {
            context: LifecycleContext {
                hook_name: "launch-hook".to_string(),
                action_token: "token-1".to_string(),
                group_name: "asg-1".to_string(),
                instance_id: "i-1".to_string(),
                transition: Transition::Launching,
            },
            metadata: serde_json::json!({"role": "worker"}),
        }
    );
}

#[test]
fn autoscaling_metadata_already_an_object_is_passed_through() {
    let notification = autoscaling_notification(r#"{"role":"worker"}"#);
    let ingress = to_ingress(&notification).unwrap();
    let Ingress::AutoscalingLifecycle { metadata, .. } = ingress else { panic!("wrong variant") };
    assert_eq!(metadata, serde_json::json!({"role": "worker"}));
}

#[test]
fn autoscaling_malformed_metadata_string_is_an_error() {
    let notification = autoscaling_notification(r#""not json""#);
    assert!(matches!(to_ingress(&notification), Err(WireError::MalformedMetadata(_))));
}

#[test]
fn autoscaling_missing_field_is_reported() {
    let body = r#"{"source":"aws.autoscaling","detail":{"LifecycleTransition":"autoscaling:EC2_INSTANCE_LAUNCHING"}}"#;
    let notification = RawNotification::parse(body).unwrap();
    assert!(matches!(to_ingress(&notification), Err(WireError::MissingField("LifecycleHookName"))));
}

#[test]
fn autoscaling_unknown_transition_is_an_error() {
    let body = r#"{"source":"aws.autoscaling","detail":{
        "LifecycleHookName":"h","LifecycleActionToken":"t","AutoScalingGroupName":"g",
        "EC2InstanceId":"i-1","LifecycleTransition":"autoscaling:EC2_INSTANCE_NOPE"}}"#;
    let notification = RawNotification::parse(body).unwrap();
    assert!(matches!(to_ingress(&notification), Err(WireError::UnknownTransition(_))));
}

#[test]
fn ssm_builds_a_remote_command_result_ingress() {
    let body = r#"{"source":"aws.ssm","resources":["i-1"],"detail":{"command-id":"cmd-1","status":"Success"}}"#;
    let notification = RawNotification::parse(body).unwrap();
    let ingress = to_ingress(&notification).unwrap();
    assert_eq!(
        ingress,
        Ingress::RemoteCommandResult {
            command_id: "cmd-1".to_string(),
            status: CommandStatus::Success,
            resources: vec!["i-1".to_string()],
        }
    );
}

#[test]
fn ssm_unknown_status_is_an_error() {
    let body = r#"{"source":"aws.ssm","detail":{"command-id":"cmd-1","status":"Weird"}}"#;
    let notification = RawNotification::parse(body).unwrap();
    assert!(matches!(to_ingress(&notification), Err(WireError::UnknownCommandStatus(_))));
}

#[test]
fn scheduled_builds_a_scheduled_ingress_from_the_first_resource() {
    let body = r#"{"source":"aws.events","resources":["arn:aws:events:rule/x"],"detail":{}}"#;
    let notification = RawNotification::parse(body).unwrap();
    assert_eq!(to_ingress(&notification).unwrap(), Ingress::Scheduled { resource_path: "arn:aws:events:rule/x".to_string() });
}

#[test]
fn scheduled_without_a_resource_is_an_error() {
    let body = r#"{"source":"aws.events","detail":{}}"#;
    let notification = RawNotification::parse(body).unwrap();
    assert!(matches!(to_ingress(&notification), Err(WireError::MissingField("resources"))));
}

#[test]
fn unknown_source_is_rejected() {
    let body = r#"{"source":"aws.sqs","detail":{}}"#;
    let notification = RawNotification::parse(body).unwrap();
    assert!(matches!(to_ingress(&notification), Err(WireError::UnknownSource(_))));
}
