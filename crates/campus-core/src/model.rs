use serde::{Deserialize, Serialize};

/// A student record stored in the registry table.
///
/// The field names are the stored attribute names. `student_id` is the
/// partition key; writing an existing id overwrites the row (DynamoDB
/// upsert semantics).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Caller-supplied unique identifier.
    pub student_id: String,

    pub name: String,

    pub major: String,

    /// ISO-8601 creation time, assigned by the handler at write time.
    pub timestamp: String,
}

/// A price alert target row.
///
/// Rows are provisioned out of band; the checker only reads them and
/// updates the two `last_check` fields after each evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertTarget {
    /// Unique product identifier, e.g. "GOLD_USD" (partition key).
    pub product_name: String,

    /// Threshold that triggers a notification. An absent attribute reads
    /// as zero.
    #[serde(default)]
    pub target_price: f64,

    /// Price observed by the most recent completed evaluation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_check_price: Option<f64>,

    /// ISO-8601 time of the most recent completed evaluation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_check_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_serializes_with_stored_attribute_names() {
        let student = Student {
            student_id: "S1".into(),
            name: "Ada".into(),
            major: "CS".into(),
            timestamp: "2026-08-06T10:00:00".into(),
        };

        let value = serde_json::to_value(&student).unwrap();
        assert_eq!(value["student_id"], "S1");
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["major"], "CS");
        assert_eq!(value["timestamp"], "2026-08-06T10:00:00");
    }

    #[test]
    fn alert_target_uses_camel_case_attribute_names() {
        let target = AlertTarget {
            product_name: "GOLD_USD".into(),
            target_price: 2400.0,
            last_check_price: Some(2500.5),
            last_check_time: Some("2026-08-06T10:00:00".into()),
        };

        let value = serde_json::to_value(&target).unwrap();
        assert_eq!(value["productName"], "GOLD_USD");
        assert_eq!(value["targetPrice"], 2400.0);
        assert_eq!(value["lastCheckPrice"], 2500.5);
        assert_eq!(value["lastCheckTime"], "2026-08-06T10:00:00");
    }

    #[test]
    fn absent_target_price_reads_as_zero() {
        let target: AlertTarget =
            serde_json::from_value(serde_json::json!({ "productName": "GOLD_USD" })).unwrap();

        assert_eq!(target.target_price, 0.0);
        assert!(target.last_check_price.is_none());
        assert!(target.last_check_time.is_none());
    }
}
