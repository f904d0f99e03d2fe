// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use lc_catalog::TriggerDescriptor;

fn two_step_catalog() -> Catalog {
    Catalog::new(vec![
        lc_catalog::TransitionDescriptor::new(vec!["new".to_string()], Some("running".to_string()))
            .with_trigger(TriggerDescriptor::new("launch")),
        {
            let mut t = lc_catalog::TransitionDescriptor::new(vec!["running".to_string()], Some("removed".to_string()));
            t.stop_after_state_change = true;
            t.with_trigger(TriggerDescriptor::new("terminate"))
        },
    ])
}

#[test]
fn known_states_is_the_union_of_sources_and_dests() {
    let machine = StateMachine::build(&two_step_catalog()).unwrap();
    for s in ["new", "running", "removed"] {
        assert!(machine.known_states().contains(s));
    }
}

#[test]
fn triggers_for_lists_only_matching_source_states() {
    let machine = StateMachine::build(&two_step_catalog()).unwrap();
    assert_eq!(machine.triggers_for("new"), vec!["launch".to_string()]);
    assert_eq!(machine.triggers_for("removed"), Vec::<String>::new());
}

#[test]
fn transition_for_resolves_dest_and_stop_after_state_change() {
    let machine = StateMachine::build(&two_step_catalog()).unwrap();
    let resolved = machine.transition_for("terminate", "running").unwrap();
    assert_eq!(resolved.dest(), Some("removed"));
    assert!(resolved.stop_after_state_change);
}

#[test]
fn transition_for_returns_none_for_unmatched_trigger() {
    let machine = StateMachine::build(&two_step_catalog()).unwrap();
    assert!(machine.transition_for("launch", "running").is_none());
}

#[test]
fn build_rejects_an_invalid_catalog() {
    let catalog = Catalog::new(vec![
        lc_catalog::TransitionDescriptor::new(vec!["a".to_string()], Some("x".to_string())),
        lc_catalog::TransitionDescriptor::new(vec!["b".to_string()], Some("x".to_string())),
    ]);
    assert!(StateMachine::build(&catalog).is_err());
}
