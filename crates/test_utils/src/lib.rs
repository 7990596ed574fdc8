use aws_lambda_events::apigw::ApiGatewayV2httpRequest;
use aws_sdk_dynamodb::operation::put_item::{PutItemError, PutItemInput, PutItemOutput};
use aws_sdk_dynamodb::types::ReturnValue;
use aws_sdk_dynamodb::types::error::ResourceNotFoundException;
use aws_smithy_mocks::{Rule, mock, mock_client};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use model::env::TABLE_NAME;
use std::env;
use std::sync::{Arc, Mutex};

/// Test table name
pub const TEST_TABLE: &str = "TestTable";

/// The body used throughout the handler tests
pub const SMS_BODY: &str = r#"{"channel":"sms","to":"+441234567890","body":"Hello World"}"#;

/// Setup default environment variables used in testing
pub fn setup_default_env() {
    unsafe {
        env::set_var(TABLE_NAME, TEST_TABLE);
    }
}

/// Create a dummy HTTP API event, optionally with a body
pub fn http_event_with_body(body: Option<&str>) -> ApiGatewayV2httpRequest {
    ApiGatewayV2httpRequest {
        body: body.map(str::to_string),
        ..Default::default()
    }
}

/// Create a dummy HTTP API event whose body arrives base64 encoded
pub fn base64_http_event(body: &str) -> ApiGatewayV2httpRequest {
    ApiGatewayV2httpRequest {
        body: Some(STANDARD.encode(body)),
        is_base64_encoded: true,
        ..Default::default()
    }
}

/// Put requests seen by a mock client, in order
pub type PutItemRequests = Arc<Mutex<Vec<PutItemInput>>>;

/// A rule accepting unconditional puts into the test table which ask for no return values.
/// Every matching request is recorded.
pub fn recording_put_item_rule() -> (Rule, PutItemRequests) {
    let requests: PutItemRequests = Arc::new(Mutex::new(Vec::new()));
    let recorded: PutItemRequests = requests.clone();

    let rule: Rule = mock!(aws_sdk_dynamodb::Client::put_item)
        .match_requests(move |input: &PutItemInput| {
            let expected: bool = input.table_name() == Some(TEST_TABLE)
                && input.return_values() == Some(&ReturnValue::None)
                && input.condition_expression().is_none();

            if expected {
                recorded.lock().unwrap().push(input.clone());
            }

            expected
        })
        .then_output(|| PutItemOutput::builder().build());

    (rule, requests)
}

/// A rule failing every put as if the table didn't exist
pub fn failing_put_item_rule() -> Rule {
    mock!(aws_sdk_dynamodb::Client::put_item).then_error(|| {
        PutItemError::ResourceNotFoundException(
            ResourceNotFoundException::builder()
                .message("Requested resource not found")
                .build(),
        )
    })
}

/// A mock DynamoDB client which records successful puts
pub fn create_mock_dynamodb_client() -> (aws_sdk_dynamodb::Client, Rule, PutItemRequests) {
    let (put_item_rule, requests) = recording_put_item_rule();
    let client: aws_sdk_dynamodb::Client = mock_client!(aws_sdk_dynamodb, [&put_item_rule]);

    (client, put_item_rule, requests)
}

/// A mock DynamoDB client whose puts always fail
pub fn create_failing_dynamodb_client() -> (aws_sdk_dynamodb::Client, Rule) {
    let put_item_rule: Rule = failing_put_item_rule();
    let client: aws_sdk_dynamodb::Client = mock_client!(aws_sdk_dynamodb, [&put_item_rule]);

    (client, put_item_rule)
}
