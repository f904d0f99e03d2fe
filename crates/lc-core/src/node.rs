// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory representation of a managed compute node.

use crate::error::CoreError;
use crate::{PROPERTY_IDENT, PROPERTY_STATUS, PROPERTY_TYPE, STATE_NEW};
use serde_json::{Map, Value};

/// States in which a node is still considered to be coming up: not yet
/// registered, or registered but not yet past cloud-init.
const NEW_STATES: [&str; 3] = ["new", "pending", "finished_cloud_init"];

/// A managed compute node.
///
/// `id` is immutable once set; `node_type` may only be revised through
/// [`Node::set_type`]; `state` is driven exclusively by the orchestrator's
/// state setter (§4.3) once a node has been loaded into a [`crate::Event`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    node_type: String,
    state: String,
    properties: Map<String, Value>,
}

impl Node {
    /// Construct a new node. `id` must be non-empty.
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::EmptyNodeId);
        }
        Ok(Self { id, node_type: node_type.into(), state: STATE_NEW.to_string(), properties: Map::new() })
    }

    /// Construct the synthetic node the Node Repository hands back for an
    /// id it has never seen (§4.1: type `"unknown"`, state `"new"`).
    pub fn synthetic(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: "unknown".to_string(),
            state: STATE_NEW.to_string(),
            properties: Map::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn set_type(&mut self, node_type: impl Into<String>) {
        self.node_type = node_type.into();
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    /// Overwrite the persisted state directly. Only the Model's state
    /// setter (§4.3) should call this outside of repository hydration —
    /// it does not itself write through to the store.
    pub fn set_state(&mut self, state: impl Into<String>) {
        self.state = state.into();
    }

    /// True while the node is still coming up: new, pending, or waiting on
    /// cloud-init.
    pub fn is_new(&self) -> bool {
        NEW_STATES.contains(&self.state.as_str())
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.properties.get(key).is_some()
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: Value) {
        self.properties.insert(key.into(), value);
    }

    pub fn unset_property(&mut self, key: &str) {
        self.properties.remove(key);
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Render this node as a store row: the three mandatory columns
    /// (`Ident`, `ItemType`, `ItemStatus`) plus the free-form property bag,
    /// per §6.2.
    pub fn to_row(&self) -> Map<String, Value> {
        let mut row = self.properties.clone();
        row.insert(PROPERTY_IDENT.to_string(), Value::String(self.id.clone()));
        row.insert(PROPERTY_TYPE.to_string(), Value::String(self.node_type.clone()));
        row.insert(PROPERTY_STATUS.to_string(), Value::String(self.state.clone()));
        row
    }

    /// Reconstruct a node from a store row. Missing `ItemType`/`ItemStatus`
    /// fall back to `"unknown"`/`"new"`, tolerating a row written before
    /// either column existed.
    pub fn from_row(id: impl Into<String>, mut row: Map<String, Value>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::EmptyNodeId);
        }
        row.remove(PROPERTY_IDENT);
        let node_type = row
            .remove(PROPERTY_TYPE)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string());
        let state = row
            .remove(PROPERTY_STATUS)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| STATE_NEW.to_string());
        Ok(Self { id, node_type, state, properties: row })
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
