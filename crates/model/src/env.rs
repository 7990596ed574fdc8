/// Environment variable containing the DynamoDB table notification records are written to
pub const TABLE_NAME: &'static str = "TABLE_NAME";
/// Environment variable selecting how strictly request bodies are checked before storage
pub const NOTIFICATION_VALIDATION: &'static str = "NOTIFICATION_VALIDATION";
