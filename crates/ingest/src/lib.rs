use aws_lambda_events::apigw::ApiGatewayV2httpRequest;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lambda_runtime::tracing::{Instrument, Span};
use lambda_runtime::{LambdaEvent, tracing};
use model::{Error, NotificationResponse};

mod handler;
mod validation;

pub use handler::{IngestError, IngestHandler};
pub use validation::{ConfigError, RequestValidation};

/// Handles one API Gateway HTTP API invocation, designed for use with `lambda_runtime::run()`.
///
/// ```no_compile
/// let handler: IngestHandler = IngestHandler::new(Arc::new(store));
///
/// lambda_runtime::run(service_fn(|event: IngestLambdaEvent| ingest_fn(&handler, event))).await?;
/// ```
pub async fn ingest_fn(
    handler: &IngestHandler,
    event: IngestLambdaEvent,
) -> Result<NotificationResponse, Error> {
    let LambdaEvent { payload, context } = event;
    let request_id: &str = context.request_id.as_str();
    let ingest_span: Span =
        tracing::span!(tracing::Level::INFO, "Notification ingest", request_id);

    async move {
        let raw_body: String = request_body(payload)?;
        let response: NotificationResponse = handler.handle(&raw_body).await?;

        tracing::info!(id = response.id.as_str(), "Accepted notification");

        Ok::<NotificationResponse, Error>(response)
    }
    .instrument(ingest_span)
    .await
}

/// The request body as sent by the caller, decoded if the gateway base64 encoded it.
fn request_body(request: ApiGatewayV2httpRequest) -> Result<String, IngestError> {
    let body: String = request
        .body
        .ok_or_else(|| IngestError::MalformedInput("request has no body".into()))?;

    if !request.is_base64_encoded {
        return Ok(body);
    }

    let bytes: Vec<u8> = STANDARD
        .decode(body)
        .map_err(|err| IngestError::MalformedInput(err.into()))?;

    String::from_utf8(bytes).map_err(|err| IngestError::MalformedInput(err.into()))
}

pub type IngestLambdaEvent = LambdaEvent<ApiGatewayV2httpRequest>;

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_runtime::{Context, Diagnostic};
    use std::sync::Arc;
    use store_dynamodb::DynamoDbRecordStore;
    use store_in_memory::InMemoryRecordStore;
    use test_utils::{
        SMS_BODY, TEST_TABLE, base64_http_event, create_failing_dynamodb_client,
        create_mock_dynamodb_client, http_event_with_body, setup_default_env,
    };

    fn lambda_event(request: ApiGatewayV2httpRequest) -> IngestLambdaEvent {
        LambdaEvent::new(request, Context::default())
    }

    #[tokio::test]
    async fn sms_request_is_written_to_configured_table() {
        setup_default_env();

        let (client, rule, requests) = create_mock_dynamodb_client();
        let handler: IngestHandler =
            IngestHandler::new(Arc::new(DynamoDbRecordStore::new(client)));

        let response: NotificationResponse =
            ingest_fn(&handler, lambda_event(http_event_with_body(Some(SMS_BODY))))
                .await
                .expect("Invocation should succeed");

        assert_eq!(1, rule.num_calls());

        let requests = requests.lock().unwrap();
        let item = requests
            .first()
            .and_then(|input| input.item())
            .expect("An item should be written");
        let attribute = |key: &str| -> String {
            item.get(key)
                .and_then(|value| value.as_s().ok())
                .cloned()
                .unwrap_or_else(|| panic!("Missing string attribute {key}"))
        };

        assert_eq!(Some(TEST_TABLE), requests[0].table_name());
        assert_eq!(7, item.len());
        assert_eq!("sms", attribute("channel"));
        assert_eq!("+441234567890", attribute("to"));
        assert_eq!("Hello World", attribute("body"));
        assert_eq!("received", attribute("deliveryStatus"));
        assert_eq!(attribute("createdDate"), attribute("updatedDate"));
        assert_eq!(response.id, attribute("notificationId"));
    }

    #[tokio::test]
    async fn base64_body_is_decoded() {
        let store: InMemoryRecordStore = InMemoryRecordStore::default();
        let handler: IngestHandler = IngestHandler::new(Arc::new(store.clone()));

        let response: NotificationResponse =
            ingest_fn(&handler, lambda_event(base64_http_event(SMS_BODY)))
                .await
                .expect("Invocation should succeed");

        let record = store.get(&response.id).expect("Record should be stored");
        assert_eq!(Some(&serde_json::json!("Hello World")), record.fields.get("body"));
    }

    #[tokio::test]
    async fn missing_or_undecodable_body_fails_without_writing() {
        let store: InMemoryRecordStore = InMemoryRecordStore::default();
        let handler: IngestHandler = IngestHandler::new(Arc::new(store.clone()));

        let mut not_base64: ApiGatewayV2httpRequest = http_event_with_body(Some("%%%"));
        not_base64.is_base64_encoded = true;

        for request in [http_event_with_body(None), not_base64] {
            let err: Error = ingest_fn(&handler, lambda_event(request))
                .await
                .expect_err("Invocation should fail");

            assert!(matches!(
                err.downcast_ref::<IngestError>(),
                Some(IngestError::MalformedInput(_))
            ));
        }

        assert_eq!(0, store.write_count());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn store_failure_reaches_the_runtime_with_its_cause() {
        setup_default_env();

        let (client, rule) = create_failing_dynamodb_client();
        let handler: IngestHandler =
            IngestHandler::new(Arc::new(DynamoDbRecordStore::new(client)));

        let err: Error = ingest_fn(&handler, lambda_event(http_event_with_body(Some(SMS_BODY))))
            .await
            .expect_err("Invocation should fail");
        assert_eq!(1, rule.num_calls());

        // This is what the runtime reports back to the invoker
        let diagnostic: Diagnostic = err.into();
        assert!(
            diagnostic
                .error_message
                .starts_with("failed to store notification: PutRecord failed for record "),
            "{}",
            diagnostic.error_message
        );
        assert!(
            diagnostic.error_message.contains("ResourceNotFoundException"),
            "{}",
            diagnostic.error_message
        );
        assert!(
            diagnostic
                .error_message
                .contains("Requested resource not found"),
            "{}",
            diagnostic.error_message
        );
    }

    #[tokio::test]
    async fn malformed_body_reaches_the_runtime_with_its_cause() {
        let handler: IngestHandler =
            IngestHandler::new(Arc::new(InMemoryRecordStore::default()));

        let err: Error = ingest_fn(&handler, lambda_event(http_event_with_body(Some("{"))))
            .await
            .expect_err("Invocation should fail");

        let diagnostic: Diagnostic = err.into();
        assert!(
            diagnostic.error_message.starts_with("malformed input: EOF while parsing"),
            "{}",
            diagnostic.error_message
        );
    }
}
