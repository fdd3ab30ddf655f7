//! Query resolution: classify once, rank, and fall back to suggestions when
//! nothing currently available matches.

pub mod fallback;
pub mod format;
pub mod fuzzy;
pub mod intent;
pub mod rank;
pub mod search;
pub mod state;
pub mod typo;
pub mod vocab;
pub mod weights;

use crate::api::models::CatalogItem;
use fallback::{Suggestion, suggest_alternatives};
use intent::{QueryIntent, classify};
use rank::{MatchResult, rank};
use serde::Serialize;
use tracing::info;
use weights::EngineConfig;

/// Everything a caller needs to format a reply for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub intent: QueryIntent,
    /// The text actually scored: the extracted item name for price questions.
    pub query_used: String,
    pub matches: Vec<MatchResult>,
    pub suggestion: Option<Suggestion>,
}

pub fn search(query: &str, catalog: &[CatalogItem], cfg: &EngineConfig) -> SearchOutcome {
    let intent = classify(query);
    let query_used = match &intent {
        QueryIntent::PriceOnly(name) if !name.trim().is_empty() => name.clone(),
        _ => query.trim().to_string(),
    };

    let matches = rank(catalog, &query_used, &intent, cfg);
    let suggestion = (matches.is_empty() && !query_used.is_empty())
        .then(|| suggest_alternatives(&query_used, catalog, cfg));

    info!(
        query = %query_used,
        ?intent,
        matches = matches.len(),
        suggested = suggestion.is_some(),
        "search complete"
    );
    SearchOutcome {
        intent,
        query_used,
        matches,
        suggestion,
    }
}
