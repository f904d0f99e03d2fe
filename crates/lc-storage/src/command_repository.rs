// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command Repository (§4.1, §3 "Command Record"): bridges a dispatched
//! remote command back to the lifecycle context that triggered it.

use std::sync::Arc;

use lc_core::CommandRecord;

use crate::error::StorageError;
use crate::kv_store::KeyValueStore;

pub struct CommandRepository {
    store: Arc<dyn KeyValueStore>,
}

impl CommandRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn register(&self, id: &str, record: &CommandRecord) -> Result<(), StorageError> {
        let value = serde_json::to_value(record).map_err(|e| StorageError::Encode(id.to_string(), e))?;
        let row = match value {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        self.store.put_item(id, row).await
    }

    pub async fn get(&self, id: &str) -> Result<CommandRecord, StorageError> {
        let row = self.store.get_item(id).await?.ok_or_else(|| StorageError::CommandNotFound(id.to_string()))?;
        serde_json::from_value(serde_json::Value::Object(row))
            .map_err(|e| StorageError::MalformedRow(id.to_string(), lc_core::CoreError::MalformedMetadata(e)))
    }

    /// Read-and-delete, atomically from the caller's perspective: consumed
    /// exactly once when the paired `RemoteCommandResult` arrives (§3).
    /// Fails with `CommandNotFound` if no record is present.
    pub async fn pop(&self, id: &str) -> Result<CommandRecord, StorageError> {
        let record = self.get(id).await?;
        self.store.delete_item(id).await?;
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.store.delete_item(id).await
    }
}

#[cfg(test)]
#[path = "command_repository_tests.rs"]
mod tests;
