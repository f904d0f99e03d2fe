// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn row(item_type: &str) -> Map<String, Value> {
    let mut m = Map::new();
    m.insert("ItemType".to_string(), Value::String(item_type.to_string()));
    m
}

#[tokio::test]
async fn put_then_get_round_trips() {
    let store = FakeStore::new();
    store.put_item("i-1", row("worker")).await.unwrap();
    let fetched = store.get_item("i-1").await.unwrap().unwrap();
    assert_eq!(fetched.get("ItemType").unwrap(), "worker");
}

#[tokio::test]
async fn get_missing_returns_none() {
    let store = FakeStore::new();
    assert!(store.get_item("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn update_merges_into_existing_row() {
    let store = FakeStore::new();
    store.put_item("i-1", row("worker")).await.unwrap();
    let mut changes = Map::new();
    changes.insert("ItemStatus".to_string(), Value::String("running".to_string()));
    store.update_item("i-1", changes).await.unwrap();
    let fetched = store.get_item("i-1").await.unwrap().unwrap();
    assert_eq!(fetched.get("ItemType").unwrap(), "worker");
    assert_eq!(fetched.get("ItemStatus").unwrap(), "running");
}

#[tokio::test]
async fn delete_removes_the_row() {
    let store = FakeStore::new();
    store.put_item("i-1", row("worker")).await.unwrap();
    store.delete_item("i-1").await.unwrap();
    assert!(!store.contains("i-1"));
}

#[tokio::test]
async fn scan_filters_by_item_type() {
    let store = FakeStore::new();
    store.put_item("i-1", row("worker")).await.unwrap();
    store.put_item("i-2", row("manager")).await.unwrap();
    let results = store.scan(&ScanQuery::new(vec!["worker".to_string()])).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, "i-1");
}
