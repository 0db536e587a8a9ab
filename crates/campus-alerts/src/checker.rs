use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use campus_core::TargetStore;

use crate::alerts;
use crate::errors::CheckerError;
use crate::feed::PriceSource;
use crate::notify::AlertPublisher;

/// Outcome of one completed check cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    pub targets: usize,
    pub alerts_sent: usize,
}

/// Run one price check cycle.
///
/// 1. Scan every configured target
/// 2. Resolve a current price per target; unresolved targets are skipped
///    with no side effects
/// 3. Publish an alert when `current >= target` and delivery is configured
/// 4. Record the observed price and check time on the row either way
///
/// Targets are evaluated strictly one at a time; a publish or store fault
/// aborts the cycle and surfaces through the caller's single catch.
pub async fn run_price_check(
    store: &dyn TargetStore,
    prices: &dyn PriceSource,
    publisher: Option<&dyn AlertPublisher>,
    now: &str,
) -> Result<CheckSummary, CheckerError> {
    let targets = store.scan_targets().await?;
    info!(targets = targets.len(), "price check start");

    let mut alerts_sent = 0;
    for target in &targets {
        let Some(current) = prices.current_price(&target.product_name).await else {
            info!(product = %target.product_name, "no price available, skipping");
            continue;
        };

        if current >= target.target_price {
            if let Some(publisher) = publisher {
                let message =
                    alerts::format_alert(&target.product_name, current, target.target_price);
                publisher.publish(&message).await?;
                alerts_sent += 1;
                info!(
                    product = %target.product_name,
                    price = current,
                    target = target.target_price,
                    "alert sent"
                );
            }
        }

        store
            .record_check(&target.product_name, current, now)
            .await?;
    }

    info!(alerts_sent, "price check complete");
    Ok(CheckSummary {
        targets: targets.len(),
        alerts_sent,
    })
}

/// Invocation response summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

/// Collapse the cycle outcome into the invocation response. Faults are
/// reported as a 500 envelope, never propagated to the dispatcher.
pub fn into_response(outcome: Result<CheckSummary, CheckerError>) -> CheckResponse {
    match outcome {
        Ok(summary) => CheckResponse {
            status_code: 200,
            body: json!({
                "message": format!("Price check complete: {} alert(s) sent", summary.alerts_sent)
            })
            .to_string(),
        },
        Err(e) => {
            error!(error = %e, "price check failed");
            CheckResponse {
                status_code: 500,
                body: json!({ "error": e.to_string() }).to_string(),
            }
        }
    }
}
