use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use tracing::info;
use tracing_subscriber::EnvFilter;

use campus_core::{DynamoStore, encoding};

mod event;
mod routes;

use event::{ApiGatewayRequest, ApiGatewayResponse};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let table_name =
        std::env::var("TABLE_NAME").map_err(|_| Error::from("TABLE_NAME must be set"))?;
    let store = DynamoStore::new(table_name).await;
    info!(table = store.table_name(), "student registry ready");

    run(service_fn(|event: LambdaEvent<ApiGatewayRequest>| {
        handle(&store, event)
    }))
    .await
}

async fn handle(
    store: &DynamoStore,
    event: LambdaEvent<ApiGatewayRequest>,
) -> Result<ApiGatewayResponse, Error> {
    let now = encoding::now_iso8601();
    Ok(routes::handle_request(store, &event.payload, &now).await)
}
