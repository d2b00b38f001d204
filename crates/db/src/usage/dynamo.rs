use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::SecondsFormat;
use laundry_core::types::Timestamp;
use laundry_core::usage::UsageRecord;

use super::UsageStore;
use crate::error::{StoreError, StoreResult};

/// [`UsageStore`] writing one item per record into a DynamoDB table.
///
/// Item layout: partition key `loc`, sort key `started_at`, plus `type` and
/// `stopped_at`. Timestamps are RFC 3339 strings in UTC. Writes are
/// conditional on the item not existing yet; a recorded interval is final.
pub struct DynamoUsageStore {
    client: Client,
    table: String,
}

impl DynamoUsageStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Build a client from the standard AWS environment (region, credentials).
    pub async fn from_env(table: impl Into<String>) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        let table = table.into();
        tracing::info!(table = %table, "DynamoDB usage store configured");
        Self::new(Client::new(&sdk_config), table)
    }
}

fn timestamp_attr(ts: Timestamp) -> AttributeValue {
    AttributeValue::S(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

#[async_trait]
impl UsageStore for DynamoUsageStore {
    async fn put(&self, record: &UsageRecord) -> StoreResult<()> {
        self.client
            .put_item()
            .table_name(&self.table)
            .item("loc", AttributeValue::S(record.loc.to_string()))
            .item("type", AttributeValue::S(record.machine_type.to_string()))
            .item("started_at", timestamp_attr(record.started_at))
            .item("stopped_at", timestamp_attr(record.stopped_at))
            .condition_expression("attribute_not_exists(loc)")
            .send()
            .await
            .map_err(|e| {
                let duplicate = e
                    .as_service_error()
                    .is_some_and(|se| se.is_conditional_check_failed_exception());
                if duplicate {
                    StoreError::Duplicate(format!(
                        "Usage at {} started {}",
                        record.loc, record.started_at
                    ))
                } else {
                    StoreError::Usage(DisplayErrorContext(&e).to_string())
                }
            })?;
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.client
            .describe_table()
            .table_name(&self.table)
            .send()
            .await
            .map_err(|e| StoreError::Usage(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
