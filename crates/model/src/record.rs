use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

pub const NOTIFICATION_ID: &str = "notificationId";
pub const DELIVERY_STATUS: &str = "deliveryStatus";
pub const CREATED_DATE: &str = "createdDate";
pub const UPDATED_DATE: &str = "updatedDate";

/// Keys added to every record, overriding anything the caller sent under the same name.
pub const INJECTED_KEYS: [&str; 4] = [NOTIFICATION_ID, DELIVERY_STATUS, CREATED_DATE, UPDATED_DATE];

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Received,
}

/// A notification request as persisted, keyed by `notificationId`.
///
/// Every field of the inbound body is kept as-is in `fields`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub notification_id: String,
    pub delivery_status: DeliveryStatus,
    pub created_date: String,
    pub updated_date: String,
}

impl NotificationRecord {
    /// Enrich a parsed body. Bodies which aren't JSON objects contribute no fields.
    pub fn new(body: Value, notification_id: Uuid, received_at: DateTime<Utc>) -> Self {
        let mut fields: Map<String, Value> = match body {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };

        for key in INJECTED_KEYS {
            fields.remove(key);
        }

        let timestamp: String = received_at.to_rfc3339_opts(SecondsFormat::Millis, true);

        NotificationRecord {
            fields,
            notification_id: notification_id.to_string(),
            delivery_status: DeliveryStatus::Received,
            created_date: timestamp.clone(),
            updated_date: timestamp,
        }
    }
}
