use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Sms,
}

/// The shape callers are expected to send.
///
/// Bodies are stored without being checked against this type unless strict
/// validation is enabled, in which case they must deserialize into it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NotificationRequest {
    pub channel: Channel,
    pub to: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}
