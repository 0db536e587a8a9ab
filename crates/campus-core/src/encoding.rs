use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{Local, SecondsFormat};
use serde_json::{Map, Value};

use crate::db::Item;

/// Render scanned DynamoDB items as a JSON array, preserving storage order.
pub fn items_to_json(items: &[Item]) -> Value {
    Value::Array(items.iter().map(item_to_json).collect())
}

/// Render one DynamoDB item as a JSON object.
pub fn item_to_json(item: &Item) -> Value {
    let map: Map<String, Value> = item
        .iter()
        .map(|(name, attr)| (name.clone(), attribute_to_json(attr)))
        .collect();
    Value::Object(map)
}

/// Render a single attribute value.
///
/// Number attributes keep their exact string representation: DynamoDB
/// numbers are decimal strings on the wire, and converting them to JSON
/// numbers would round-trip through floating point. Binary attributes have
/// no JSON rendering and come out as null.
fn attribute_to_json(attr: &AttributeValue) -> Value {
    match attr {
        AttributeValue::S(text) => Value::String(text.clone()),
        AttributeValue::N(number) => Value::String(number.clone()),
        AttributeValue::Bool(flag) => Value::Bool(*flag),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(list) => Value::Array(list.iter().map(attribute_to_json).collect()),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(name, attr)| (name.clone(), attribute_to_json(attr)))
                .collect(),
        ),
        AttributeValue::Ss(set) => {
            Value::Array(set.iter().map(|s| Value::String(s.clone())).collect())
        }
        AttributeValue::Ns(set) => {
            Value::Array(set.iter().map(|n| Value::String(n.clone())).collect())
        }
        _ => Value::Null,
    }
}

/// Current local time as ISO-8601 text, microsecond precision.
pub fn now_iso8601() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}
