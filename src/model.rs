// Core structs: CollegeRecord, FeeValue, FilterCriteria, FaqEntry
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// One static entry of the college catalog.
///
/// Every field is parsed leniently: a field of the wrong shape falls back to
/// its default instead of rejecting the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollegeRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: String,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_courses")]
    pub courses: Vec<String>,
    #[serde(default, deserialize_with = "lenient_fees")]
    pub fees_structure: BTreeMap<String, FeeValue>,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub google_maps: Value,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl CollegeRecord {
    /// Truthiness of the `google_maps` flag: `true`, non-zero numbers and
    /// non-empty strings, arrays or objects.
    pub fn has_maps(&self) -> bool {
        match &self.google_maps {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
        }
    }
}

/// A fee entry as found in `fees_structure`.
///
/// The data set mixes plain numbers, numeric strings and nested breakdown
/// objects; `normalizer::extract_fee` coerces all of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeeValue {
    Missing,
    Number(Number),
    Text(String),
    Breakdown(Map<String, Value>),
    Other(Value),
}

impl From<Value> for FeeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FeeValue::Missing,
            Value::Number(n) => FeeValue::Number(n),
            Value::String(s) => FeeValue::Text(s),
            Value::Object(map) => FeeValue::Breakdown(map),
            other => FeeValue::Other(other),
        }
    }
}

impl<'de> Deserialize<'de> for FeeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(FeeValue::from)
    }
}

/// Sort order applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Rank,
    Fee,
    Name,
}

impl SortKey {
    /// Unknown or blank keys fall back to `Rank`.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "fee" | "fees" => SortKey::Fee,
            "name" => SortKey::Name,
            _ => SortKey::Rank,
        }
    }
}

/// Per-request filter criteria. Absent fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub location: Option<String>,
    pub course: Option<String>,
    pub budget: Option<u64>,
    pub sort: SortKey,
    /// Case-insensitive substring of the college name.
    pub query: Option<String>,
}

impl FilterCriteria {
    /// Builds criteria from untrusted form-style input.
    /// Blank strings become absent and a non-numeric budget means "no budget".
    pub fn from_raw(location: &str, course: &str, budget: &str, sort: &str, query: &str) -> Self {
        Self {
            location: non_blank(location),
            course: non_blank(course),
            budget: budget.trim().parse::<u64>().ok(),
            sort: SortKey::from_raw(sort),
            query: non_blank(query),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.course.is_none() && self.budget.is_none() && self.query.is_none()
    }
}

/// A normalized FAQ entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqEntry {
    pub q: String,
    pub a: String,
}

pub(crate) fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    })
}

fn lenient_courses<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

fn lenient_fees<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeMap<String, FeeValue>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map.into_iter().map(|(k, v)| (k, FeeValue::from(v))).collect(),
        _ => BTreeMap::new(),
    })
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array at the top level")]
    NotAnArray,
}

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("assistant is not configured")]
    NotConfigured,
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("assistant request timed out")]
    Timeout,
    #[error("assistant responded with status {0}")]
    Status(u16),
    #[error("assistant returned an unreadable body: {0}")]
    InvalidBody(String),
    #[error("assistant returned an empty answer")]
    Empty,
}

#[derive(Debug, Error, PartialEq)]
pub enum AdvisorError {
    #[error("empty query")]
    EmptyQuery,
    #[error("college {0} not found")]
    NotFound(i64),
    #[error("no data sources configured for reload")]
    ReloadUnavailable,
}
