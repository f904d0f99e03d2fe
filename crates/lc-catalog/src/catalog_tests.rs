// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::transition::TriggerDescriptor;
use yare::parameterized;

fn transition(source: &str, dest: Option<&str>) -> TransitionDescriptor {
    TransitionDescriptor::new(vec![source.to_string()], dest.map(str::to_string))
        .with_trigger(TriggerDescriptor::new("launch"))
}

#[test]
fn empty_catalog_is_valid() {
    assert!(Catalog::default().validate().is_ok());
}

#[test]
fn distinct_destinations_are_valid() {
    let catalog = Catalog::new(vec![
        transition("new", Some("running")),
        transition("running", Some("draining")),
    ]);
    assert!(catalog.validate().is_ok());
}

#[test]
fn duplicate_destination_is_rejected() {
    let catalog = Catalog::new(vec![
        transition("new", Some("running")),
        transition("pending", Some("running")),
    ]);
    assert_eq!(
        catalog.validate(),
        Err(CatalogError::DuplicateDestination("running".to_string()))
    );
}

#[test]
fn reserved_trigger_name_is_rejected() {
    let t = TransitionDescriptor::new(vec!["new".to_string()], Some("running".to_string()))
        .with_trigger(TriggerDescriptor::new(RESERVED_TRIGGER_NAME));
    let catalog = Catalog::new(vec![t]);
    assert_eq!(
        catalog.validate(),
        Err(CatalogError::ReservedTriggerName(RESERVED_TRIGGER_NAME.to_string()))
    );
}

#[parameterized(
    no_sources = {vec![], Some(CatalogError::EmptySourceSet)},
    one_source = {vec!["new".to_string()], None},
)]
fn source_set_must_be_non_empty(sources: Vec<String>, expected_err: Option<CatalogError>) {
    let t = TransitionDescriptor::new(sources, Some("running".to_string()))
        .with_trigger(TriggerDescriptor::new("launch"));
    let catalog = Catalog::new(vec![t]);
    assert_eq!(catalog.validate().err(), expected_err);
}

#[test]
fn transition_with_no_destination_is_allowed() {
    let t = TransitionDescriptor::new(vec!["draining".to_string()], None)
        .with_trigger(TriggerDescriptor::new("finalize"));
    assert!(Catalog::new(vec![t]).validate().is_ok());
}
