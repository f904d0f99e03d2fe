// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn empty_id_is_rejected() {
    assert!(matches!(Node::new("", "worker"), Err(CoreError::EmptyNodeId)));
}

#[test]
fn synthetic_node_is_unknown_and_new() {
    let node = Node::synthetic("i-1");
    assert_eq!(node.node_type(), "unknown");
    assert_eq!(node.state(), STATE_NEW);
    assert!(node.is_new());
}

#[yare::parameterized(
    new = { "new", true },
    pending = { "pending", true },
    finished_cloud_init = { "finished_cloud_init", true },
    running = { "running", false },
    terminating = { "terminating", false },
)]
fn is_new_matches_state(state: &str, expected: bool) {
    let mut node = Node::new("i-1", "worker").unwrap();
    node.set_state(state);
    assert_eq!(node.is_new(), expected);
}

#[test]
fn properties_round_trip_through_row() {
    let mut node = Node::new("i-1", "manager").unwrap();
    node.set_state("running");
    node.set_property("LifecycleActionToken", Value::String("tok".to_string()));

    let row = node.to_row();
    assert_eq!(row.get(PROPERTY_IDENT), Some(&Value::String("i-1".to_string())));
    assert_eq!(row.get(PROPERTY_TYPE), Some(&Value::String("manager".to_string())));
    assert_eq!(row.get(PROPERTY_STATUS), Some(&Value::String("running".to_string())));

    let restored = Node::from_row("i-1", row).unwrap();
    assert_eq!(restored.node_type(), "manager");
    assert_eq!(restored.state(), "running");
    assert_eq!(restored.property("LifecycleActionToken"), Some(&Value::String("tok".to_string())));
}

#[test]
fn from_row_defaults_missing_type_and_status() {
    let node = Node::from_row("i-2", Map::new()).unwrap();
    assert_eq!(node.node_type(), "unknown");
    assert_eq!(node.state(), STATE_NEW);
}

#[test]
fn unset_property_removes_it() {
    let mut node = Node::new("i-1", "worker").unwrap();
    node.set_property("foo", Value::String("bar".to_string()));
    assert!(node.has_property("foo"));
    node.unset_property("foo");
    assert!(!node.has_property("foo"));
}
