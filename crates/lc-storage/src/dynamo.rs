// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! DynamoDB-backed [`KeyValueStore`] (§4.1, §6.2): the real collaborator
//! behind the table shape the Repository Layer already assumes (single
//! table keyed by `Ident`).

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_json::{Map, Number, Value};

use crate::error::StorageError;
use crate::kv_store::{KeyValueStore, ScanQuery};

use lc_core::PROPERTY_IDENT;

pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self { client, table_name: table_name.into() }
    }

    fn backend_error(err: impl std::error::Error + Send + Sync + 'static) -> StorageError {
        StorageError::Backend(Box::new(err))
    }
}

#[async_trait]
impl KeyValueStore for DynamoDbStore {
    async fn get_item(&self, id: &str) -> Result<Option<Map<String, Value>>, StorageError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PROPERTY_IDENT, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(Self::backend_error)?;
        Ok(output.item.map(row_from_attributes))
    }

    async fn put_item(&self, id: &str, row: Map<String, Value>) -> Result<(), StorageError> {
        let mut item = attributes_from_row(row);
        item.insert(PROPERTY_IDENT.to_string(), AttributeValue::S(id.to_string()));
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(Self::backend_error)?;
        Ok(())
    }

    async fn update_item(&self, id: &str, changes: Map<String, Value>) -> Result<(), StorageError> {
        if changes.is_empty() {
            return Ok(());
        }
        let mut update_expression = String::from("SET ");
        let mut names = HashMap::new();
        let mut values = HashMap::new();
        for (index, (key, value)) in changes.into_iter().enumerate() {
            let name_placeholder = format!("#f{index}");
            let value_placeholder = format!(":v{index}");
            if index > 0 {
                update_expression.push_str(", ");
            }
            update_expression.push_str(&format!("{name_placeholder} = {value_placeholder}"));
            names.insert(name_placeholder, key);
            values.insert(value_placeholder, attribute_from_value(value));
        }
        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(PROPERTY_IDENT, AttributeValue::S(id.to_string()))
            .update_expression(update_expression)
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .send()
            .await
            .map_err(Self::backend_error)?;
        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<(), StorageError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(PROPERTY_IDENT, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(Self::backend_error)?;
        Ok(())
    }

    async fn scan(&self, query: &ScanQuery) -> Result<Vec<(String, Map<String, Value>)>, StorageError> {
        query.validate()?;

        let mut filter_expression = String::new();
        let mut names = HashMap::new();
        let mut values = HashMap::new();

        if !query.item_types.is_empty() {
            let placeholders: Vec<String> = query
                .item_types
                .iter()
                .enumerate()
                .map(|(index, item_type)| {
                    let placeholder = format!(":type{index}");
                    values.insert(placeholder.clone(), AttributeValue::S(item_type.clone()));
                    placeholder
                })
                .collect();
            names.insert("#item_type".to_string(), lc_core::PROPERTY_TYPE.to_string());
            filter_expression = format!("#item_type IN ({})", placeholders.join(", "));
        }

        if let Some(extra) = &query.filter_expression {
            if !filter_expression.is_empty() {
                filter_expression.push_str(" AND ");
            }
            filter_expression.push('(');
            filter_expression.push_str(extra);
            filter_expression.push(')');
            for (key, value) in &query.filter_params {
                values.insert(key.clone(), attribute_from_value(value.clone()));
            }
        }

        let mut request = self.client.scan().table_name(&self.table_name);
        if !filter_expression.is_empty() {
            request = request
                .filter_expression(filter_expression)
                .set_expression_attribute_names(Some(names))
                .set_expression_attribute_values(Some(values));
        }

        let output = request.send().await.map_err(Self::backend_error)?;
        let rows = output
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|mut item| {
                let id = item.remove(PROPERTY_IDENT)?.as_s().ok()?.clone();
                Some((id, row_from_attributes(item)))
            })
            .collect();
        Ok(rows)
    }
}

fn row_from_attributes(mut item: HashMap<String, AttributeValue>) -> Map<String, Value> {
    item.remove(PROPERTY_IDENT);
    item.into_iter().map(|(key, value)| (key, value_from_attribute(value))).collect()
}

fn attributes_from_row(row: Map<String, Value>) -> HashMap<String, AttributeValue> {
    row.into_iter().map(|(key, value)| (key, attribute_from_value(value))).collect()
}

fn value_from_attribute(attribute: AttributeValue) -> Value {
    match attribute {
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::N(n) => n.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number).unwrap_or(Value::Null),
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(items) => Value::Array(items.into_iter().map(value_from_attribute).collect()),
        AttributeValue::M(map) => Value::Object(map.into_iter().map(|(k, v)| (k, value_from_attribute(v))).collect()),
        _ => Value::Null,
    }
}

fn attribute_from_value(value: Value) -> AttributeValue {
    match value {
        Value::String(s) => AttributeValue::S(s),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Null => AttributeValue::Null(true),
        Value::Array(items) => AttributeValue::L(items.into_iter().map(attribute_from_value).collect()),
        Value::Object(map) => {
            AttributeValue::M(map.into_iter().map(|(k, v)| (k, attribute_from_value(v))).collect())
        }
    }
}

#[cfg(test)]
#[path = "dynamo_tests.rs"]
mod tests;
