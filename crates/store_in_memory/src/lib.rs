use async_trait::async_trait;
use model::NotificationRecord;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use store::StoreErrorReason::BackendFailure;
use store::StoreOperation::PutRecord;
use store::{RecordStore, StoreError};

/// Keeps records in process memory. Also counts writes so tests can
/// assert on how the store was used.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<Mutex<HashMap<String, NotificationRecord>>>,
    writes: Arc<Mutex<usize>>,
}

impl InMemoryRecordStore {
    pub fn get(&self, notification_id: &str) -> Option<NotificationRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(notification_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `put_record` calls made, including overwrites.
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn put_record(&self, record: &NotificationRecord) -> Result<(), StoreError> {
        let mut records: MutexGuard<HashMap<String, NotificationRecord>> =
            self.records.lock().map_err(|err| {
                StoreError::new(
                    record.notification_id.clone(),
                    PutRecord,
                    BackendFailure(err.to_string().into()),
                )
            })?;

        records.insert(record.notification_id.clone(), record.clone());
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner) += 1;

        Ok(())
    }
}
