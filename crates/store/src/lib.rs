use async_trait::async_trait;
use aws_smithy_types::error::display::DisplayErrorContext;
use model::NotificationRecord;
use std::fmt::{Display, Formatter};
use thiserror::Error;

mod traced;

pub use traced::TracedStore;

/// Durable storage for notification records.
///
/// Records are only ever created here. Reading, updating and deleting them
/// belongs to downstream consumers of the table.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Unconditionally write the record under its `notification_id`,
    /// overwriting any existing entry and asking for nothing back.
    async fn put_record(&self, record: &NotificationRecord) -> Result<(), StoreError>;
}

/// Errors arising from writing records.
#[derive(Debug, Error)]
#[error("{operation} failed for record {state_key}: {reason}")]
pub struct StoreError {
    pub state_key: String,

    pub operation: StoreOperation,
    #[source]
    pub reason: StoreErrorReason,
}

#[derive(Debug, Error)]
pub enum StoreErrorReason {
    // No table was configured at the time of the write
    #[error("no table name configured in {0}")]
    MissingTable(String),
    // The record couldn't be converted into the backend's format
    #[error("record could not be converted: {0}")]
    BadRecord(String),
    // An error from the underlying store, passed on untouched
    #[error("store backend failure: {}", DisplayErrorContext(.0.as_ref()))]
    BackendFailure(#[source] model::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    PutRecord,
}

impl Display for StoreOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreOperation::PutRecord => f.write_str("PutRecord"),
        }
    }
}

impl StoreError {
    pub fn new(state_key: String, operation: StoreOperation, reason: StoreErrorReason) -> Self {
        StoreError {
            state_key,
            operation,
            reason,
        }
    }

    /// The error raised by the store backend, if that is what failed.
    pub fn backend_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match &self.reason {
            StoreErrorReason::BackendFailure(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
