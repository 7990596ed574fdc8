use serde::{Deserialize, Serialize};

pub mod env;
pub mod record;
pub mod request;

pub use record::{DeliveryStatus, NotificationRecord};
pub use request::{Channel, NotificationRequest};

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Returned to the caller once a record has been stored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NotificationResponse {
    pub id: String,
}

impl From<&NotificationRecord> for NotificationResponse {
    fn from(record: &NotificationRecord) -> Self {
        NotificationResponse {
            id: record.notification_id.clone(),
        }
    }
}
