/// Notification text for a crossed threshold, prices in 2-decimal fixed
/// formatting.
///
/// Example: Price alert: GOLD_USD is at 2505.30 (target 2400.00)
pub fn format_alert(product_name: &str, current: f64, target: f64) -> String {
    format!("Price alert: {product_name} is at {current:.2} (target {target:.2})")
}
