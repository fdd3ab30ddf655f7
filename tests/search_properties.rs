use cellar_search::api::models::decode_catalog;
use cellar_search::util::normalize_for_comparison;
use cellar_search::{
    Availability, CatalogItem, EngineConfig, QueryIntent, Reason, Suggestion, format_outcome, rank,
    search,
};
use proptest::prelude::*;
use serde_json::json;

fn wine(id: &str, title: &str, price: Option<i64>) -> CatalogItem {
    CatalogItem {
        id: id.into(),
        title: title.into(),
        category: "wine".into(),
        description: format!("Tasting notes for {title}: layered, long and food friendly."),
        teaser: None,
        availability: Availability::both(),
        price_minor_units: price,
    }
}

fn catalog() -> Vec<CatalogItem> {
    let mut syrah = wine("syrah", "Syrah 2016", Some(4500));
    syrah.availability.listed = false;
    let mut corkscrew = wine("merch", "Estate Logo Corkscrew", Some(1500));
    corkscrew.category = "merchandise".into();
    vec![
        wine("c22", "Estate Chardonnay 2022", Some(2800)),
        wine("pn19", "Estate Pinot Noir 2019", Some(3600)),
        wine("pn21", "Estate Pinot Noir 2021", Some(3800)),
        wine("rose", "Rosé of Pinot Noir 2022", Some(2400)),
        wine("sig", "Signature Red 2019", Some(6500)),
        wine("rb", "Red Blend 2020", None),
        wine("zin", "Old Vine Zinfandel 2019", Some(3400)),
        syrah,
        corkscrew,
    ]
}

fn ids(results: &[cellar_search::MatchResult]) -> Vec<&str> {
    results.iter().map(|m| m.item.id.as_str()).collect()
}

#[test]
fn normalized_title_query_ranks_item_first() {
    let cfg = EngineConfig::default();
    let catalog = catalog();
    for id in ["c22", "rose", "sig", "rb", "zin"] {
        let item = catalog.iter().find(|i| i.id == id).unwrap();
        let query = format!("{}!!", normalize_for_comparison(&item.title).to_uppercase());
        let ranked = rank(&catalog, &query, &QueryIntent::General, &cfg);
        assert_eq!(ranked[0].item.id, id, "query {query:?}");
        assert!(ranked[0].reasons.iter().any(|r| r.reason == Reason::ExactTitle));
        assert!(ranked.iter().skip(1).all(|m| m.score < ranked[0].score));
    }
}

#[test]
fn single_substitution_typo_still_surfaces_item() {
    let cfg = EngineConfig::default();
    for query in ["Zinfandal", "Old Vine Zinfandal"] {
        let ranked = rank(&catalog(), query, &QueryIntent::General, &cfg);
        assert_eq!(ids(&ranked), vec!["zin"], "query {query:?}");
    }
}

#[test]
fn typo_beats_items_sharing_only_a_word() {
    let cfg = EngineConfig::default();
    let cellar = vec![
        wine("m", "Estate Merlot 2018", Some(3000)),
        wine("c", "Estate Chardonnay 2022", Some(2800)),
    ];
    let ranked = rank(&cellar, "estate merlox", &QueryIntent::General, &cfg);
    assert_eq!(ids(&ranked), vec!["m", "c"]);
    assert!(ranked[0].reasons.iter().any(|r| matches!(r.reason, Reason::Fuzzy { .. })));
    assert!(ranked[0].score > ranked[1].score);
}

#[test]
fn price_question_formats_price_only() {
    let out = search("How much is the Estate Chardonnay 2022?", &catalog(), &EngineConfig::default());
    assert!(matches!(out.intent, QueryIntent::PriceOnly(_)));
    assert_eq!(out.matches[0].item.id, "c22");
    let reply = format_outcome(&out);
    assert_eq!(reply, "Estate Chardonnay 2022: $28.00");
    assert!(!reply.contains("Tasting notes"));
}

#[test]
fn equal_scores_prefer_later_vintage() {
    let cfg = EngineConfig {
        recent_vintage_after: 2022,
        ..Default::default()
    };
    let ranked = rank(&catalog(), "Estate Pinot Noir", &QueryIntent::General, &cfg);
    assert_eq!(&ids(&ranked)[..2], &["pn21", "pn19"]);
    assert_eq!(ranked[0].score, ranked[1].score);
}

#[test]
fn historical_queries_see_discontinued_items() {
    let cfg = EngineConfig::default();
    let plain = search("Syrah", &catalog(), &cfg);
    assert!(plain.matches.is_empty());
    assert!(matches!(
        &plain.suggestion,
        Some(Suggestion::HistoricalUnavailable(m)) if m.item.id == "syrah"
    ));

    let past = search("have you ever made a Syrah", &catalog(), &cfg);
    assert_eq!(past.intent, QueryIntent::Historical);
    assert_eq!(ids(&past.matches), vec!["syrah"]);
}

#[test]
fn misspelled_varietal_is_corrected() {
    let ranked = rank(&catalog(), "chardonay 2022", &QueryIntent::General, &EngineConfig::default());
    assert_eq!(ranked[0].item.id, "c22");
    assert!(ranked[0].score > 0.0);
    assert!(ranked[0].reasons.iter().any(|r| matches!(
        &r.reason,
        Reason::TypoCorrected { corrected } if corrected == "chardonnay"
    )));
}

#[test]
fn colloquial_rose_finds_rose() {
    let ranked = rank(&catalog(), "rose", &QueryIntent::General, &EngineConfig::default());
    assert_eq!(ranked[0].item.id, "rose");
}

#[test]
fn missing_syrah_suggests_red_blends() {
    let cfg = EngineConfig::default();
    let blends = vec![
        wine("c", "Estate Chardonnay 2022", Some(2800)),
        wine("rb1", "Red Blend 2020", Some(3000)),
        wine("rb2", "Reserve Red Blend 2018", Some(5200)),
        wine("rb3", "Cellar Red Blend 2019", Some(3300)),
        wine("rb4", "Red Blend No 4", Some(2900)),
    ];
    let out = search("do you have syrah", &blends, &cfg);
    assert!(out.matches.is_empty());
    match out.suggestion {
        Some(Suggestion::Alternatives { requested, items }) => {
            assert_eq!(requested, "syrah");
            assert_eq!(ids(&items), vec!["rb1", "rb2", "rb3"]);
        }
        other => panic!("expected alternatives, got {other:?}"),
    }

    let whites = vec![
        wine("c", "Estate Chardonnay 2022", Some(2800)),
        wine("sb", "Sauvignon Blanc 2023", Some(2200)),
    ];
    let out = search("do you have syrah", &whites, &cfg);
    assert!(matches!(out.suggestion, Some(Suggestion::NothingFound { .. })));
    assert!(format_outcome(&out).starts_with("Sorry, nothing in the catalog matches"));
}

#[test]
fn malformed_catalog_input_is_an_empty_ranking() {
    let cfg = EngineConfig::default();
    for doc in [json!(null), json!({ "wines": [] }), json!("chardonnay"), json!(12)] {
        let items = decode_catalog(doc);
        assert!(items.is_empty());
        let out = search("chardonnay", &items, &cfg);
        assert!(out.matches.is_empty());
        assert!(matches!(out.suggestion, Some(Suggestion::NothingFound { .. })));
    }
}

#[test]
fn merchandise_is_never_ranked() {
    let ranked = rank(&catalog(), "estate logo corkscrew", &QueryIntent::General, &EngineConfig::default());
    assert!(ranked.iter().all(|m| m.item.category == "wine"));
}

const WORDS: &[&str] = &[
    "estate", "pinot", "noir", "chardonnay", "rose", "red", "blend", "signature", "old", "vine",
    "zinfandel", "syrah", "how", "much", "is", "the", "2019", "2022", "chardonay", "have", "you",
];

proptest! {
    #[test]
    fn rankings_are_positive_sorted_and_in_category(
        picks in proptest::collection::vec(0..WORDS.len(), 0..6)
    ) {
        let query: Vec<&str> = picks.iter().map(|&i| WORDS[i]).collect();
        let out = search(&query.join(" "), &catalog(), &EngineConfig::default());
        for pair in out.matches.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].vintage() >= pair[1].vintage());
            }
        }
        for m in &out.matches {
            prop_assert!(m.score > 0.0);
            prop_assert_eq!(m.item.category.as_str(), "wine");
            prop_assert_eq!(m.price_only, out.intent.is_price_only());
        }
        if !out.matches.is_empty() {
            prop_assert!(out.suggestion.is_none());
        }
    }
}
