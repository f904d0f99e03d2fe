// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node Repository (§4.1): the node half of the store.

use std::sync::Arc;

use lc_core::Node;
use serde_json::{Map, Value};

use crate::error::StorageError;
use crate::kv_store::{KeyValueStore, ScanQuery};

const TERMINATING_STATES: [&str; 2] = ["terminating", "removing"];

pub struct NodeRepository {
    store: Arc<dyn KeyValueStore>,
}

impl NodeRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// A synthetic node (type `"unknown"`, state `"new"`) if `id` has
    /// never been stored (§4.1).
    pub async fn get(&self, id: &str) -> Result<Node, StorageError> {
        match self.get_existing(id).await? {
            Some(node) => Ok(node),
            None => Ok(Node::synthetic(id)),
        }
    }

    /// Like [`NodeRepository::get`], but `None` rather than a synthetic
    /// node if `id` has never been stored — lets a caller tell "this id is
    /// brand new" apart from "this id is stored and still mid-registration"
    /// (§4.3: only the latter should block on cloud-init).
    pub async fn get_existing(&self, id: &str) -> Result<Option<Node>, StorageError> {
        match self.store.get_item(id).await? {
            Some(row) => Node::from_row(id, row).map(Some).map_err(|e| StorageError::MalformedRow(id.to_string(), e)),
            None => Ok(None),
        }
    }

    pub async fn put(&self, node: &Node) -> Result<(), StorageError> {
        self.store.put_item(node.id(), node.to_row()).await
    }

    /// Partial update: writes only `changes` to the store; the caller's
    /// in-memory `node` is expected to already reflect the same change,
    /// so the two never drift (§4.1).
    pub async fn update(&self, node: &Node, changes: Map<String, Value>) -> Result<(), StorageError> {
        self.store.update_item(node.id(), changes).await
    }

    pub async fn delete(&self, node: &Node) -> Result<(), StorageError> {
        self.store.delete_item(node.id()).await
    }

    /// Nodes whose type is in `query.item_types`, excluding
    /// terminating/removing states unless `include_terminating` (§4.1).
    pub async fn get_by_type(&self, query: ScanQuery, include_terminating: bool) -> Result<Vec<Node>, StorageError> {
        query.validate()?;
        let rows = self.store.scan(&query).await?;
        rows.into_iter()
            .map(|(id, row)| Node::from_row(id.clone(), row).map_err(|e| StorageError::MalformedRow(id, e)))
            .filter(|result| match result {
                Ok(node) => {
                    include_terminating || !TERMINATING_STATES.contains(&node.state())
                }
                Err(_) => true,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "node_repository_tests.rs"]
mod tests;
