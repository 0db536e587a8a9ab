use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;
use tracing::warn;

use crate::errors::FeedFallback;

/// Credential value that forces synthetic pricing even when set.
pub const MOCK_CREDENTIAL: &str = "USE_MOCK";

const FEED_ENDPOINT: &str = "https://api.metals.dev/v1/latest";

/// Bound on the single outbound attempt per target.
const FEED_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves the current price for a product.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// The current price, or `None` when the product cannot be resolved.
    async fn current_price(&self, product_name: &str) -> Option<f64>;
}

/// Client for the metals.dev spot price feed.
pub struct MetalsClient {
    http: reqwest::Client,
    api_key: String,
}

/// Feed response (partial).
#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    metals: FeedMetals,
}

#[derive(Debug, Default, Deserialize)]
struct FeedMetals {
    gold: Option<f64>,
}

impl MetalsClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// One bounded attempt against the live feed. Every failure mode maps
    /// to a [`FeedFallback`] reason; the caller decides what happens next.
    pub async fn spot_price(&self, product_name: &str) -> Result<f64, FeedFallback> {
        let currency = currency_code(product_name);

        let response = self
            .http
            .get(FEED_ENDPOINT)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("currency", currency.as_str()),
                ("metals", "XAU"),
            ])
            .timeout(FEED_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        let payload: FeedResponse = response.json().await?;
        payload.metals.gold.ok_or(FeedFallback::MissingQuote)
    }
}

/// Production price source: the live feed when configured, synthetic quotes
/// otherwise. A fallback reason other than [`FeedFallback::Disabled`] is
/// logged and absorbed; it never aborts the surrounding cycle.
pub struct FeedOrMock {
    feed: Option<MetalsClient>,
}

impl FeedOrMock {
    pub fn new(feed: Option<MetalsClient>) -> Self {
        Self { feed }
    }
}

#[async_trait]
impl PriceSource for FeedOrMock {
    async fn current_price(&self, product_name: &str) -> Option<f64> {
        let live = match &self.feed {
            Some(client) => client.spot_price(product_name).await,
            None => Err(FeedFallback::Disabled),
        };

        match live {
            Ok(price) => Some(price),
            Err(FeedFallback::Disabled) => mock_price(product_name),
            Err(reason) => {
                warn!(product = product_name, error = %reason, "live feed unavailable, using mock price");
                mock_price(product_name)
            }
        }
    }
}

/// Synthetic price for the known products, rounded to 2 decimals.
/// Unknown products have no mock and stay unresolved.
pub fn mock_price(product_name: &str) -> Option<f64> {
    let mut rng = rand::rng();
    let price: f64 = match product_name.to_ascii_uppercase().as_str() {
        "GOLD_USD" => rng.random_range(2500.0..=2600.0),
        "GOLD_THB" => rng.random_range(60000.0..=61500.0),
        _ => return None,
    };
    Some((price * 100.0).round() / 100.0)
}

/// Currency code for a product name: the trailing `_`-separated segment,
/// uppercased. A name without an underscore is used whole.
pub fn currency_code(product_name: &str) -> String {
    product_name
        .rsplit('_')
        .next()
        .unwrap_or(product_name)
        .to_ascii_uppercase()
}
