use crate::model::{CollegeRecord, FeeValue};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Number, Value};

/// Breakdown keys checked in priority order before any other value.
const FEE_KEYS: [&str; 4] = [
    "fee_per_year_in_inr",
    "total_estimated_fee_in_inr",
    "fee",
    "estimated_fee_in_inr",
];

lazy_static! {
    static ref AMOUNT: Regex = Regex::new(r"\d[\d,]*(?:\.\d+)?").unwrap();
}

/// Coerces any fee shape to a non-negative integer amount. Never fails:
/// anything that cannot be read as a number resolves to 0.
pub fn extract_fee(value: &FeeValue) -> u64 {
    match value {
        FeeValue::Missing | FeeValue::Other(_) => 0,
        FeeValue::Number(n) => number_to_fee(n),
        FeeValue::Text(s) => text_to_fee(s).unwrap_or(0),
        FeeValue::Breakdown(map) => breakdown_fee(map),
    }
}

fn breakdown_fee(map: &Map<String, Value>) -> u64 {
    for key in FEE_KEYS {
        if let Some(fee) = map.get(key).and_then(strict_fee) {
            return fee;
        }
    }
    map.values().find_map(loose_fee).unwrap_or(0)
}

/// Numbers and plain numeric strings only.
fn strict_fee(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => Some(number_to_fee(n)),
        Value::String(s) => text_to_fee(s),
        _ => None,
    }
}

/// Like `strict_fee`, but also digs the first amount out of free text
/// such as "₹1,20,000 per year".
fn loose_fee(value: &Value) -> Option<u64> {
    strict_fee(value).or_else(|| match value {
        Value::String(s) => AMOUNT
            .find(s)
            .and_then(|m| text_to_fee(&m.as_str().replace(',', ""))),
        _ => None,
    })
}

fn number_to_fee(n: &Number) -> u64 {
    if let Some(u) = n.as_u64() {
        return u;
    }
    n.as_f64().map(float_to_fee).unwrap_or(0)
}

fn text_to_fee(s: &str) -> Option<u64> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(i.max(0) as u64);
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite()).map(float_to_fee)
}

fn float_to_fee(f: f64) -> u64 {
    if f.is_finite() && f > 0.0 { f.trunc() as u64 } else { 0 }
}

/// Smallest non-zero fee of a record, or `None` when no fee resolves.
pub fn min_resolvable_fee(record: &CollegeRecord) -> Option<u64> {
    record
        .fees_structure
        .values()
        .map(extract_fee)
        .filter(|&fee| fee > 0)
        .min()
}

/// Comparison key: lower-cased, ASCII letters and digits only.
pub fn normalize_text(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}
