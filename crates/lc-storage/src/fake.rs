// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An in-memory [`KeyValueStore`] for tests (§4.1).

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StorageError;
use crate::kv_store::{KeyValueStore, ScanQuery};

#[derive(Default)]
pub struct FakeStore {
    rows: Mutex<BTreeMap<String, Map<String, Value>>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row directly, bypassing `put_item`. Useful for setting up a
    /// scenario's starting state.
    pub fn seed(&self, id: impl Into<String>, row: Map<String, Value>) {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).insert(id.into(), row);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).contains_key(id)
    }
}

#[async_trait]
impl KeyValueStore for FakeStore {
    async fn get_item(&self, id: &str) -> Result<Option<Map<String, Value>>, StorageError> {
        Ok(self.rows.lock().unwrap_or_else(|e| e.into_inner()).get(id).cloned())
    }

    async fn put_item(&self, id: &str, row: Map<String, Value>) -> Result<(), StorageError> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).insert(id.to_string(), row);
        Ok(())
    }

    async fn update_item(&self, id: &str, changes: Map<String, Value>) -> Result<(), StorageError> {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        let row = rows.entry(id.to_string()).or_default();
        for (k, v) in changes {
            row.insert(k, v);
        }
        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<(), StorageError> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).remove(id);
        Ok(())
    }

    async fn scan(&self, query: &ScanQuery) -> Result<Vec<(String, Map<String, Value>)>, StorageError> {
        query.validate()?;
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rows
            .iter()
            .filter(|(_, row)| {
                row.get("ItemType")
                    .and_then(Value::as_str)
                    .map(|t| query.item_types.iter().any(|wanted| wanted == t))
                    .unwrap_or(false)
            })
            .map(|(id, row)| (id.clone(), row.clone()))
            .collect())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
