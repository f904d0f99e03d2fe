// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn trigger_descriptor_defaults_are_permissive() {
    let t = TriggerDescriptor::new("launch");
    assert!(t.prepare.is_empty());
    assert!(t.conditions.is_empty());
    assert!(!t.stop_after_trigger);
    assert!(!t.ignore_errors);
}

#[test]
fn transition_descriptor_with_trigger_appends() {
    let d = TransitionDescriptor::new(vec!["new".to_string()], Some("running".to_string()))
        .with_trigger(TriggerDescriptor::new("launch"))
        .with_trigger(TriggerDescriptor::new("retry"));
    assert_eq!(d.triggers.len(), 2);
    assert_eq!(d.triggers[0].name, "launch");
    assert_eq!(d.triggers[1].name, "retry");
}

#[test]
fn debug_impl_does_not_panic_on_trigger_with_hooks() {
    let mut t = TriggerDescriptor::new("launch");
    t.conditions.push(crate::hook::guard(|_, _, _| true));
    let rendered = format!("{:?}", t);
    assert!(rendered.contains("launch"));
}
