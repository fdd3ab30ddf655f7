use crate::api::models::CatalogItem;
use crate::app::intent::QueryIntent;
use crate::app::search::{PreparedQuery, ScoreReason, score_item};
use crate::app::weights::EngineConfig;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// A scored catalog item, created fresh for each search call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub item: CatalogItem,
    pub score: f64,
    pub reasons: Vec<ScoreReason>,
    pub price_only: bool,
}

impl MatchResult {
    pub fn vintage(&self) -> Option<u16> {
        self.item.vintage()
    }
}

pub fn in_target_category(item: &CatalogItem, cfg: &EngineConfig) -> bool {
    item.category.trim().eq_ignore_ascii_case(cfg.target_category.trim())
}

/// Scores every item of the target category and returns the positive ones,
/// best first. Equal scores are ordered by later vintage first.
///
/// An item whose scoring faults is logged and treated as a non-match; the
/// rest of the catalog is still ranked.
pub fn rank(items: &[CatalogItem], query: &str, intent: &QueryIntent, cfg: &EngineConfig) -> Vec<MatchResult> {
    let prepared = PreparedQuery::new(query);
    if prepared.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<MatchResult> = items
        .iter()
        .filter(|item| in_target_category(item, cfg))
        .filter_map(|item| match score_item(item, &prepared, intent, cfg) {
            Ok(s) if s.score > 0.0 => Some(MatchResult {
                item: item.clone(),
                score: s.score,
                reasons: s.reasons,
                price_only: intent.is_price_only(),
            }),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "scoring fault isolated, item skipped");
                None
            }
        })
        .collect();

    results.sort_by(compare_results);
    debug!(query = %prepared.norm, hits = results.len(), "ranked catalog");
    results
}

fn compare_results(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.vintage().cmp(&a.vintage()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Availability;

    fn item(id: &str, title: &str, category: &str) -> CatalogItem {
        CatalogItem {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            description: String::new(),
            teaser: None,
            availability: Availability::both(),
            price_minor_units: None,
        }
    }

    #[test]
    fn ties_broken_by_later_vintage() {
        let cfg = EngineConfig {
            recent_vintage_after: 2030,
            ..Default::default()
        };
        let items = vec![
            item("a", "Estate Pinot Noir 2019", "wine"),
            item("b", "Estate Pinot Noir 2021", "wine"),
            item("c", "Estate Pinot Noir", "wine"),
        ];
        let ranked = rank(&items, "pinot noir", &QueryIntent::General, &cfg);
        let ids: Vec<_> = ranked.iter().map(|r| r.item.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(ranked[0].score, ranked[1].score);
    }

    #[test]
    fn other_categories_are_ignored() {
        let items = vec![
            item("shirt", "Syrah Club T-Shirt", "merchandise"),
            item("wine", "Syrah 2018", "Wine"),
        ];
        let ranked = rank(&items, "syrah", &QueryIntent::General, &EngineConfig::default());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].item.id, "wine");
    }

    #[test]
    fn zero_scores_are_dropped_and_empty_is_not_an_error() {
        let items = vec![item("a", "Merlot 2019", "wine")];
        assert!(rank(&items, "viognier", &QueryIntent::General, &EngineConfig::default()).is_empty());
        assert!(rank(&[], "merlot", &QueryIntent::General, &EngineConfig::default()).is_empty());
        assert!(rank(&items, "   ", &QueryIntent::General, &EngineConfig::default()).is_empty());
    }

    #[test]
    fn stamps_price_only_from_intent() {
        let items = vec![item("a", "Merlot 2019", "wine")];
        let intent = QueryIntent::PriceOnly("merlot".into());
        let ranked = rank(&items, "merlot", &intent, &EngineConfig::default());
        assert!(ranked.iter().all(|r| r.price_only));
    }

    #[test]
    fn faulted_item_does_not_abort_ranking() {
        let mut cfg = EngineConfig::default();
        cfg.weights.recent_vintage = f64::NAN;
        let items = vec![
            item("new", "Merlot 2023", "wine"),
            item("old", "Merlot 2018", "wine"),
        ];
        let ranked = rank(&items, "merlot", &QueryIntent::General, &cfg);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].item.id, "old");
    }
}
