use aws_config::BehaviorVersion;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use campus_core::{DynamoStore, encoding};

mod alerts;
mod checker;
mod errors;
mod feed;
mod notify;

use checker::CheckResponse;
use feed::{FeedOrMock, MOCK_CREDENTIAL, MetalsClient};
use notify::{AlertPublisher, SnsPublisher};

/// Process-wide handles, built once before the first invocation is served.
struct CheckerContext {
    store: DynamoStore,
    prices: FeedOrMock,
    publisher: Option<SnsPublisher>,
}

impl CheckerContext {
    /// Fails when the table is not configured, so a misconfigured checker
    /// never serves an invocation. The other settings degrade gracefully:
    /// no topic disables delivery, no credential (or the mock sentinel)
    /// disables the live feed.
    async fn from_env() -> Result<Self, Error> {
        let table_name =
            std::env::var("TABLE_NAME").map_err(|_| Error::from("TABLE_NAME must be set"))?;

        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        let store = DynamoStore::with_client(aws_sdk_dynamodb::Client::new(&config), table_name);

        let feed = match std::env::var("METALS_API_KEY") {
            Ok(key) if !key.is_empty() && key != MOCK_CREDENTIAL => Some(MetalsClient::new(key)),
            _ => None,
        };
        if feed.is_none() {
            info!("no feed credential configured, using mock prices");
        }

        let publisher = match std::env::var("SNS_TOPIC_ARN") {
            Ok(arn) if !arn.is_empty() => {
                Some(SnsPublisher::new(aws_sdk_sns::Client::new(&config), arn))
            }
            _ => {
                info!("no SNS topic configured, alert delivery disabled");
                None
            }
        };

        Ok(Self {
            store,
            prices: FeedOrMock::new(feed),
            publisher,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let ctx = CheckerContext::from_env().await?;
    info!(table = ctx.store.table_name(), "price alert checker ready");

    run(service_fn(|event: LambdaEvent<Value>| invoke(&ctx, event))).await
}

/// One scheduled invocation. The inbound event carries nothing of interest;
/// faults are folded into the response rather than returned.
async fn invoke(ctx: &CheckerContext, _event: LambdaEvent<Value>) -> Result<CheckResponse, Error> {
    let now = encoding::now_iso8601();
    let outcome = checker::run_price_check(
        &ctx.store,
        &ctx.prices,
        ctx.publisher.as_ref().map(|p| p as &dyn AlertPublisher),
        &now,
    )
    .await;

    Ok(checker::into_response(outcome))
}
