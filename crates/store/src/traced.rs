use crate::{RecordStore, StoreError, StoreOperation};
use async_trait::async_trait;
use lambda_runtime::tracing;
use lambda_runtime::tracing::{Instrument, Span};
use model::NotificationRecord;

/// Wraps a store so every call runs in its own span.
/// Results are passed back unchanged.
pub struct TracedStore<S> {
    inner: S,
}

impl<S: RecordStore> TracedStore<S> {
    pub fn new(inner: S) -> Self {
        TracedStore { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: RecordStore> RecordStore for TracedStore<S> {
    async fn put_record(&self, record: &NotificationRecord) -> Result<(), StoreError> {
        let notification_id: &str = record.notification_id.as_str();
        let store_type: &str = std::any::type_name::<S>();
        let store_span: Span = tracing::span!(
            tracing::Level::INFO,
            "RecordStore",
            operation = %StoreOperation::PutRecord,
            store = store_type,
            notification_id
        );

        async {
            let result: Result<(), StoreError> = self.inner.put_record(record).await;

            match &result {
                Ok(()) => tracing::debug!("Stored record"),
                Err(err) => tracing::error!(error = %err, "Failed to store record"),
            }

            result
        }
        .instrument(store_span)
        .await
    }
}
