use async_trait::async_trait;
use aws_sdk_dynamodb::config::http::HttpResponse;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::put_item::{PutItemError, PutItemOutput};
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use lambda_runtime::tracing;
use model::NotificationRecord;
use model::env::TABLE_NAME;
use std::collections::HashMap;
use store::StoreErrorReason::{BackendFailure, BadRecord, MissingTable};
use store::StoreOperation::PutRecord;
use store::{RecordStore, StoreError};

/// Writes records to the DynamoDB table named by an environment variable.
///
/// The variable is read on every write, so a reconfigured table takes
/// effect without rebuilding the store.
pub struct DynamoDbRecordStore {
    dynamodb_client: aws_sdk_dynamodb::Client,
    table_name_var: String,
}

impl DynamoDbRecordStore {
    /// Use the table named by `TABLE_NAME`.
    pub fn new(dynamodb_client: aws_sdk_dynamodb::Client) -> Self {
        Self::with_table_name_var(dynamodb_client, TABLE_NAME)
    }

    pub fn with_table_name_var(
        dynamodb_client: aws_sdk_dynamodb::Client,
        table_name_var: impl Into<String>,
    ) -> Self {
        DynamoDbRecordStore {
            dynamodb_client,
            table_name_var: table_name_var.into(),
        }
    }

    fn table_name(&self) -> Option<String> {
        std::env::var(&self.table_name_var)
            .ok()
            .filter(|name| !name.is_empty())
    }

    async fn put_item(
        &self,
        table_name: String,
        item: HashMap<String, AttributeValue>,
    ) -> Result<PutItemOutput, SdkError<PutItemError, HttpResponse>> {
        self.dynamodb_client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .return_values(ReturnValue::None)
            .send()
            .await
    }
}

#[async_trait]
impl RecordStore for DynamoDbRecordStore {
    async fn put_record(&self, record: &NotificationRecord) -> Result<(), StoreError> {
        let notification_id: &str = record.notification_id.as_str();

        let table_name: String = self.table_name().ok_or_else(|| {
            StoreError::new(
                notification_id.to_string(),
                PutRecord,
                MissingTable(self.table_name_var.clone()),
            )
        })?;

        let item: HashMap<String, AttributeValue> =
            serde_dynamo::to_item(record).map_err(|err| {
                StoreError::new(
                    notification_id.to_string(),
                    PutRecord,
                    BadRecord(err.to_string()),
                )
            })?;

        tracing::debug!(
            table_name = table_name.as_str(),
            attributes = item.len(),
            "Putting item"
        );

        self.put_item(table_name, item).await.map_err(|err| {
            StoreError::new(
                notification_id.to_string(),
                PutRecord,
                BackendFailure(err.into()),
            )
        })?;

        Ok(())
    }
}
