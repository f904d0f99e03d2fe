// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The key-value store abstraction both repositories are built on (§4.1,
//! §6.2): a single table keyed by `Ident`, with free-form columns and a
//! scan operation for type/state queries.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StorageError;

/// A scan over the store, as used by `Node Repository.get_by_type` (§4.1).
///
/// `filter_expression` and `filter_params` must be supplied together or
/// not at all — see [`ScanQuery::validate`].
#[derive(Debug, Clone, Default)]
pub struct ScanQuery {
    pub item_types: Vec<String>,
    pub filter_expression: Option<String>,
    pub filter_params: Map<String, Value>,
}

impl ScanQuery {
    pub fn new(item_types: Vec<String>) -> Self {
        Self { item_types, filter_expression: None, filter_params: Map::new() }
    }

    pub fn with_filter(mut self, expression: impl Into<String>, params: Map<String, Value>) -> Self {
        self.filter_expression = Some(expression.into());
        self.filter_params = params;
        self
    }

    /// `BadQuery` if exactly one of `filter_expression`/`filter_params` is
    /// present (§4.1).
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.filter_expression.is_some() != !self.filter_params.is_empty() {
            return Err(StorageError::BadQuery);
        }
        Ok(())
    }
}

/// A single table keyed by `Ident` (§6.2). Implementations may back this
/// with an actual DynamoDB table or with an in-memory fake
/// ([`crate::fake`], behind `test-support`).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, id: &str) -> Result<Option<Map<String, Value>>, StorageError>;

    async fn put_item(&self, id: &str, row: Map<String, Value>) -> Result<(), StorageError>;

    /// Partial update: only the named columns in `changes` are written;
    /// other columns are left untouched. Errors observably if the
    /// underlying write fails (§4.1: "failure of either must be
    /// observable to the caller").
    async fn update_item(&self, id: &str, changes: Map<String, Value>) -> Result<(), StorageError>;

    async fn delete_item(&self, id: &str) -> Result<(), StorageError>;

    /// Rows whose `ItemType` is in `query.item_types`, excluding
    /// `terminating`/`removing` states unless `include_terminating`.
    async fn scan(&self, query: &ScanQuery) -> Result<Vec<(String, Map<String, Value>)>, StorageError>;
}

#[cfg(test)]
#[path = "kv_store_tests.rs"]
mod tests;
