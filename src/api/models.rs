use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// Administratively available for sale.
    #[serde(default)]
    pub available: bool,
    /// Publicly listed in the storefront.
    #[serde(default)]
    pub listed: bool,
}

impl Availability {
    pub fn both() -> Self {
        Self {
            available: true,
            listed: true,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available && self.listed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub description: String,
    #[serde(default)]
    pub teaser: Option<String>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(
        rename = "priceMinorUnits",
        default,
        deserialize_with = "lenient_price"
    )]
    pub price_minor_units: Option<i64>,
}

impl CatalogItem {
    pub fn is_available(&self) -> bool {
        self.availability.is_available()
    }

    pub fn vintage(&self) -> Option<u16> {
        crate::util::extract_vintage(&self.title)
    }

    /// Description for display, falling back to the teaser.
    pub fn display_description(&self) -> Option<&str> {
        let desc = self.description.trim();
        if !desc.is_empty() {
            return Some(desc);
        }
        self.teaser.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Decodes a catalog document: a bare array of items or `{"items": [...]}`.
///
/// Any other shape is an empty catalog. Records that fail to decode are skipped.
pub fn decode_catalog(doc: Value) -> Vec<CatalogItem> {
    let records = match doc {
        Value::Array(records) => records,
        Value::Object(mut obj) => match obj.remove("items") {
            Some(Value::Array(records)) => records,
            _ => {
                warn!("catalog document has no `items` array, treating as empty");
                return Vec::new();
            }
        },
        other => {
            warn!(kind = value_kind(&other), "catalog document is not an array, treating as empty");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match serde_json::from_value::<CatalogItem>(record) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(index = i, error = %e, "skipping malformed catalog record");
                None
            }
        })
        .collect()
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            value_kind(&other)
        ))),
    }
}

fn string_or_null<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// 2^63; integral floats at or beyond it do not fit an `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Integer, integral float or numeric string; anything else, or a negative
/// or out-of-range amount, means the price is unavailable.
fn lenient_price<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let price = match Value::deserialize(d)? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < I64_BOUND)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(price.filter(|p| *p >= 0))
}
