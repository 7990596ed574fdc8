use crate::handler::IngestError;
use model::NotificationRequest;
use model::env::NOTIFICATION_VALIDATION;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

/// How much of a parsed body is checked before it is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestValidation {
    /// Any JSON is stored as received.
    #[default]
    Passthrough,
    /// The body must be a well formed `NotificationRequest`. Extra fields are still kept.
    Strict,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported value {value:?} for {var}, expected \"strict\" or \"passthrough\"")]
    UnsupportedValidation { var: &'static str, value: String },
}

impl RequestValidation {
    /// Read the mode from `NOTIFICATION_VALIDATION`, defaulting to passthrough when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_setting(std::env::var(NOTIFICATION_VALIDATION).ok().as_deref())
    }

    pub fn from_setting(setting: Option<&str>) -> Result<Self, ConfigError> {
        match setting.map(str::trim) {
            None | Some("") => Ok(RequestValidation::default()),
            Some(value) => value.parse(),
        }
    }

    pub(crate) fn check(&self, body: &Value) -> Result<(), IngestError> {
        match self {
            RequestValidation::Passthrough => Ok(()),
            RequestValidation::Strict => NotificationRequest::deserialize(body)
                .map(|_| ())
                .map_err(IngestError::InvalidRequest),
        }
    }
}

impl FromStr for RequestValidation {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "passthrough" => Ok(RequestValidation::Passthrough),
            "strict" => Ok(RequestValidation::Strict),
            _ => Err(ConfigError::UnsupportedValidation {
                var: NOTIFICATION_VALIDATION,
                value: value.to_string(),
            }),
        }
    }
}
