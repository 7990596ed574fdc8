use crate::validation::RequestValidation;
use chrono::Utc;
use lambda_runtime::tracing;
use model::{NotificationRecord, NotificationResponse};
use serde_json::Value;
use std::sync::Arc;
use store::{RecordStore, StoreError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum IngestError {
    // Nothing has been written when the body couldn't be read
    #[error("malformed input: {0}")]
    MalformedInput(#[source] model::Error),
    #[error("invalid notification request: {0}")]
    InvalidRequest(#[source] serde_json::Error),
    #[error("failed to store notification: {0}")]
    StoreWriteFailure(#[from] StoreError),
}

/// Turns request bodies into stored notification records.
///
/// Built once per process and shared between invocations; the store is the
/// only state it holds and is never changed after construction.
#[derive(Clone)]
pub struct IngestHandler {
    store: Arc<dyn RecordStore>,
    validation: RequestValidation,
}

impl IngestHandler {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        IngestHandler {
            store,
            validation: RequestValidation::default(),
        }
    }

    pub fn with_validation(mut self, validation: RequestValidation) -> Self {
        self.validation = validation;
        self
    }

    pub fn validation(&self) -> RequestValidation {
        self.validation
    }

    /// Parse, enrich and store a single request body, returning the id it was stored under.
    ///
    /// Exactly one write is made once the body parses. Store failures are
    /// returned as they are, with no retry.
    pub async fn handle(&self, raw_body: &str) -> Result<NotificationResponse, IngestError> {
        let body: Value = serde_json::from_str(raw_body)
            .map_err(|err| IngestError::MalformedInput(err.into()))?;

        self.validation.check(&body)?;

        let record: NotificationRecord =
            NotificationRecord::new(body, Uuid::new_v4(), Utc::now());

        tracing::info!(
            notification_id = record.notification_id.as_str(),
            "Storing notification"
        );

        self.store.put_record(&record).await?;

        Ok(NotificationResponse::from(&record))
    }
}
