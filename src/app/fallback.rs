use crate::api::models::CatalogItem;
use crate::app::intent::QueryIntent;
use crate::app::rank::{MatchResult, in_target_category, rank};
use crate::app::search::{PreparedQuery, Reason, ScoreReason, title_key};
use crate::app::vocab::{VARIETALS, adjacent_to};
use crate::app::weights::EngineConfig;
use crate::util::contains_phrase;
use serde::Serialize;
use tracing::debug;

/// What to offer when a query matched nothing currently available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Suggestion {
    /// The item exists in the catalog's history but cannot be bought now.
    HistoricalUnavailable(MatchResult),
    /// Available items related to the requested varietal.
    Alternatives {
        requested: &'static str,
        items: Vec<MatchResult>,
    },
    NothingFound { term: String },
}

pub fn suggest_alternatives(term: &str, catalog: &[CatalogItem], cfg: &EngineConfig) -> Suggestion {
    let past = rank(catalog, term, &QueryIntent::Historical, cfg);
    if let Some(hit) = past.into_iter().find(|m| !m.item.is_available()) {
        debug!(item = %hit.item.id, "term matched a no-longer-available item");
        return Suggestion::HistoricalUnavailable(hit);
    }

    let not_found = || Suggestion::NothingFound {
        term: term.trim().to_string(),
    };

    let prepared = PreparedQuery::new(term);
    let vq = prepared.vocabulary_form();
    let Some((requested, related)) = VARIETALS
        .iter()
        .find_map(|kw| adjacent_to(kw).filter(|_| contains_phrase(vq, kw)).map(|r| (*kw, r)))
    else {
        return not_found();
    };

    let items: Vec<MatchResult> = catalog
        .iter()
        .filter(|item| in_target_category(item, cfg) && item.is_available())
        .filter_map(|item| {
            let title = title_key(&item.title);
            related
                .iter()
                .find(|adj| contains_phrase(&title, adj))
                .map(|&keyword| MatchResult {
                    item: item.clone(),
                    score: 0.0,
                    reasons: vec![ScoreReason {
                        reason: Reason::AdjacentVarietal { requested, keyword },
                        points: 0.0,
                    }],
                    price_only: false,
                })
        })
        .take(cfg.max_alternatives)
        .collect();

    debug!(requested, found = items.len(), "adjacency fallback");
    if items.is_empty() {
        not_found()
    } else {
        Suggestion::Alternatives { requested, items }
    }
}
