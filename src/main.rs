use aws_config::BehaviorVersion;
use ingest::{IngestHandler, IngestLambdaEvent, RequestValidation, ingest_fn};
use lambda_runtime::{Error, service_fn, tracing};
use std::sync::Arc;
use store::TracedStore;
use store_dynamodb::DynamoDbRecordStore;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let validation: RequestValidation = RequestValidation::from_env()?;

    // Clients are built once and shared by every invocation of this instance
    let dynamodb_client: aws_sdk_dynamodb::Client =
        aws_sdk_dynamodb::Client::new(&aws_config::load_defaults(BehaviorVersion::latest()).await);
    let store: TracedStore<DynamoDbRecordStore> =
        TracedStore::new(DynamoDbRecordStore::new(dynamodb_client));

    let handler: IngestHandler = IngestHandler::new(Arc::new(store)).with_validation(validation);

    tracing::info!(validation = ?handler.validation(), "Starting notification ingest");

    lambda_runtime::run(service_fn(|event: IngestLambdaEvent| {
        ingest_fn(&handler, event)
    }))
    .await
}
