//! Defensive accessors over `serde_json::Value`.
//!
//! Every accessor treats a missing key, an explicit `null` and a value of the
//! wrong JSON type the same way: the field is absent.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tracing::warn;

use crate::model::{Position2, Position3};

/// Look up `key`, ignoring explicit nulls
fn field<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    match json.get(key) {
        None | Some(Value::Null) => None,
        Some(v) => Some(v),
    }
}

pub fn get_i64(json: &Value, key: &str) -> Option<i64> {
    field(json, key).and_then(Value::as_i64)
}

pub fn get_str(json: &Value, key: &str) -> Option<String> {
    field(json, key).and_then(Value::as_str).map(str::to_string)
}

/// Read a number as an exact decimal from its JSON literal.
///
/// Numbers outside the `Decimal` range are logged and read as absent.
pub fn get_decimal(json: &Value, key: &str) -> Option<Decimal> {
    let Value::Number(n) = field(json, key)? else {
        return None;
    };

    let literal = n.to_string();
    let value = parse_decimal(&literal);
    if value.is_none() {
        warn!(key, literal = %literal, "number out of decimal range, treating as absent");
    }
    value
}

/// English text of a localized object such as `"name": {"en": "Jita", "de": ...}`
pub fn get_localized_en(json: &Value, key: &str) -> Option<String> {
    field(json, key).and_then(|obj| get_str(obj, "en"))
}

pub fn get_position(json: &Value, key: &str) -> Position3 {
    match field(json, key) {
        Some(obj) => Position3 {
            x: get_decimal(obj, "x"),
            y: get_decimal(obj, "y"),
            z: get_decimal(obj, "z"),
        },
        None => Position3::default(),
    }
}

pub fn get_position_2d(json: &Value, key: &str) -> Position2 {
    match field(json, key) {
        Some(obj) => Position2 {
            x: get_decimal(obj, "x"),
            y: get_decimal(obj, "y"),
        },
        None => Position2::default(),
    }
}

fn parse_decimal(literal: &str) -> Option<Decimal> {
    if literal.contains(['e', 'E']) {
        Decimal::from_scientific(&literal.to_ascii_lowercase().replace("e+", "e")).ok()
    } else {
        Decimal::from_str(literal).ok()
    }
}
