use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_dynamo::aws_sdk_dynamodb_1::{from_items, to_item};
use tracing::debug;

use crate::error::CoreError;
use crate::model::{AlertTarget, Student};

/// A raw DynamoDB item as returned by a scan.
pub type Item = HashMap<String, AttributeValue>;

/// Access to the student registry table.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Full scan of the table, in storage order.
    async fn scan_students(&self) -> Result<Vec<Item>, CoreError>;

    /// Upsert a single student row.
    async fn put_student(&self, student: &Student) -> Result<(), CoreError>;
}

/// Access to the alert target table.
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// Full scan of the table, in storage order.
    async fn scan_targets(&self) -> Result<Vec<AlertTarget>, CoreError>;

    /// Update the last-check fields of one target row, leaving every other
    /// attribute untouched.
    async fn record_check(
        &self,
        product_name: &str,
        price: f64,
        checked_at: &str,
    ) -> Result<(), CoreError>;
}

/// DynamoDB client wrapper for one table.
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Create a new `DynamoStore` by loading AWS configuration from the
    /// environment and constructing a DynamoDB client.
    pub async fn new(table_name: impl Into<String>) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::with_client(Client::new(&config), table_name)
    }

    /// Create a `DynamoStore` around an existing client.
    pub fn with_client(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// The DynamoDB table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn scan_items(&self) -> Result<Vec<Item>, CoreError> {
        // Single unbounded scan, no pagination.
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;

        Ok(output.items.unwrap_or_default())
    }
}

#[async_trait]
impl StudentStore for DynamoStore {
    async fn scan_students(&self) -> Result<Vec<Item>, CoreError> {
        self.scan_items().await
    }

    async fn put_student(&self, student: &Student) -> Result<(), CoreError> {
        let item: Item = to_item(student)?;

        debug!(table = %self.table_name, student_id = %student.student_id, "writing student row");

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;

        Ok(())
    }
}

#[async_trait]
impl TargetStore for DynamoStore {
    async fn scan_targets(&self) -> Result<Vec<AlertTarget>, CoreError> {
        let items = self.scan_items().await?;
        Ok(from_items(items)?)
    }

    async fn record_check(
        &self,
        product_name: &str,
        price: f64,
        checked_at: &str,
    ) -> Result<(), CoreError> {
        debug!(table = %self.table_name, product = product_name, price, "recording check result");

        self.client
            .update_item()
            .table_name(&self.table_name)
            .key("productName", AttributeValue::S(product_name.to_string()))
            .update_expression("SET lastCheckPrice = :price, lastCheckTime = :time")
            .expression_attribute_values(":price", AttributeValue::N(price.to_string()))
            .expression_attribute_values(":time", AttributeValue::S(checked_at.to_string()))
            .send()
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;

        Ok(())
    }
}
