use serde::Serialize;
use tracing::debug;

/// What the customer is asking for, computed once per query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum QueryIntent {
    /// Asking only for a price. Carries the item name recovered from the phrasing.
    PriceOnly(String),
    /// Asking about items regardless of current availability.
    Historical,
    General,
}

impl QueryIntent {
    pub fn is_price_only(&self) -> bool {
        matches!(self, QueryIntent::PriceOnly(_))
    }

    pub fn is_historical(&self) -> bool {
        matches!(self, QueryIntent::Historical)
    }
}

const PRICE_PREFIXES: &[&str] = &["what is the price of", "how much is"];
const HOW_MUCH_DOES: &str = "how much does";
const PRICE_INFIXES: &[&str] = &["price of", "cost of"];
const HISTORICAL_MARKERS: &[&str] = &["do you have", "have you", "ever made", "previous", "past"];

/// Classifies a raw query. PriceOnly beats Historical beats General.
pub fn classify(query: &str) -> QueryIntent {
    let lower = query.trim().to_lowercase();

    let intent = if let Some(name) = price_subject(&lower) {
        QueryIntent::PriceOnly(name)
    } else if HISTORICAL_MARKERS.iter().any(|m| lower.contains(m)) {
        QueryIntent::Historical
    } else {
        QueryIntent::General
    };
    debug!(query = %lower, ?intent, "classified query");
    intent
}

fn price_subject(lower: &str) -> Option<String> {
    for prefix in PRICE_PREFIXES {
        if let Some(rest) = lower.strip_prefix(prefix) {
            return Some(strip_article(rest));
        }
    }
    if let Some(pos) = lower.find(HOW_MUCH_DOES) {
        let rest = &lower[pos + HOW_MUCH_DOES.len()..];
        if let Some(end) = rest.rfind("cost") {
            return Some(strip_article(&rest[..end]));
        }
    }
    for infix in PRICE_INFIXES {
        if let Some(pos) = lower.find(infix) {
            return Some(strip_article(&lower[pos + infix.len()..]));
        }
    }
    None
}

fn strip_article(s: &str) -> String {
    let s = s.trim();
    s.strip_prefix("the ").unwrap_or(s).trim().to_string()
}
