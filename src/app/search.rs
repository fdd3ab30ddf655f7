use crate::api::models::CatalogItem;
use crate::app::fuzzy::best_token_match;
use crate::app::intent::QueryIntent;
use crate::app::typo;
use crate::app::vocab::{DISTINCTIVE_VARIETALS, VARIETALS};
use crate::app::weights::EngineConfig;
use crate::util::{canonicalize_colloquial, contains_phrase, normalize, normalize_for_comparison, tokenize};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Why a signal contributed to an item's score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Reason {
    ExactTitle,
    Flagship { name: String },
    FlagshipVariant { variant: String },
    TitleContainsQuery,
    QueryContainsTitle,
    WordOverlap { matched: usize, total: usize },
    TypoCorrected { corrected: String },
    VarietalInTitle { keyword: &'static str },
    VarietalInDescription { keyword: &'static str },
    DistinctiveVarietal { keyword: &'static str },
    RecentVintage { year: u16 },
    Fuzzy { query_token: String, title_token: String, similarity: f64 },
    AdjacentVarietal { requested: &'static str, keyword: &'static str },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::ExactTitle => write!(f, "exact title match"),
            Reason::Flagship { name } => write!(f, "flagship line `{name}`"),
            Reason::FlagshipVariant { variant } => write!(f, "flagship variant `{variant}`"),
            Reason::TitleContainsQuery => write!(f, "title contains query"),
            Reason::QueryContainsTitle => write!(f, "query contains title"),
            Reason::WordOverlap { matched, total } => write!(f, "word overlap {matched}/{total}"),
            Reason::TypoCorrected { corrected } => write!(f, "typo-corrected match `{corrected}`"),
            Reason::VarietalInTitle { keyword } => write!(f, "varietal `{keyword}` in title"),
            Reason::VarietalInDescription { keyword } => {
                write!(f, "varietal `{keyword}` in description")
            }
            Reason::DistinctiveVarietal { keyword } => write!(f, "distinctive varietal `{keyword}`"),
            Reason::RecentVintage { year } => write!(f, "recent vintage {year}"),
            Reason::Fuzzy { query_token, title_token, similarity } => {
                write!(f, "fuzzy `{query_token}` ~ `{title_token}` ({similarity:.2})")
            }
            Reason::AdjacentVarietal { requested, keyword } => {
                write!(f, "`{keyword}` is close to `{requested}`")
            }
        }
    }
}

/// One scored contribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReason {
    pub reason: Reason,
    pub points: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemScore {
    pub score: f64,
    pub reasons: Vec<ScoreReason>,
}

impl ItemScore {
    fn add(&mut self, reason: Reason, points: f64) {
        self.score += points;
        self.reasons.push(ScoreReason { reason, points });
    }

    #[cfg(test)]
    fn has(&self, pred: impl Fn(&Reason) -> bool) -> bool {
        self.reasons.iter().any(|r| pred(&r.reason))
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("item {item_id} produced a non-finite score ({total})")]
    NonFinite { item_id: String, total: f64 },
}

/// A query normalized once and reused against every item.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    /// Comparison form: normalized, vintage removed, colloquial spellings canonicalized.
    pub norm: String,
    /// Typo-corrected comparison form, present only when correction changed something.
    pub corrected: Option<String>,
}

impl PreparedQuery {
    pub fn new(query: &str) -> Self {
        let norm = canonicalize_colloquial(&normalize_for_comparison(query));
        let fixed = typo::correct(&norm);
        let corrected = (fixed != norm).then_some(fixed);
        Self { norm, corrected }
    }

    pub fn is_empty(&self) -> bool {
        self.norm.is_empty()
    }

    /// Text searched for varietal keywords.
    pub fn vocabulary_form(&self) -> &str {
        self.corrected.as_deref().unwrap_or(&self.norm)
    }
}

/// Comparison form of a title.
pub fn title_key(title: &str) -> String {
    canonicalize_colloquial(&normalize_for_comparison(title))
}

/// Scores one catalog item against a prepared query.
///
/// Unavailable items score zero unless the intent is historical. The fuzzy
/// fallback only runs when nothing stronger than partial word overlap fired,
/// and then only over query words the title lacks. The recency bonus only
/// rewards items that already matched on something.
pub fn score_item(
    item: &CatalogItem,
    query: &PreparedQuery,
    intent: &QueryIntent,
    cfg: &EngineConfig,
) -> Result<ItemScore, ScoreError> {
    let mut out = ItemScore::default();
    if query.is_empty() || (!item.is_available() && !intent.is_historical()) {
        return Ok(out);
    }

    let w = &cfg.weights;
    let q = query.norm.as_str();
    let title = title_key(&item.title);
    let t = title.as_str();

    if q == t {
        out.add(Reason::ExactTitle, w.exact_title);
    }

    // Flagship override
    let flagship = cfg.flagship.name.to_lowercase();
    if contains_phrase(q, &flagship) && contains_phrase(t, &flagship) {
        out.add(Reason::Flagship { name: flagship }, w.flagship);
        let variant = cfg
            .flagship
            .variants
            .iter()
            .map(|v| v.to_lowercase())
            .find(|v| contains_phrase(q, v) && contains_phrase(t, v));
        if let Some(variant) = variant {
            out.add(Reason::FlagshipVariant { variant }, w.flagship_variant);
        }
    }

    // Substring signals
    if !t.is_empty() && t.contains(q) {
        out.add(Reason::TitleContainsQuery, w.title_contains_query);
    }
    if !t.is_empty() && q.contains(t) {
        out.add(Reason::QueryContainsTitle, w.query_contains_title);
    }

    // Word overlap
    let q_tokens = tokenize(q);
    let t_tokens = tokenize(t);
    let considered: Vec<&str> = q_tokens
        .iter()
        .copied()
        .filter(|tok| tok.chars().count() >= cfg.overlap_min_token_len)
        .collect();
    let matched = considered.iter().filter(|tok| t_tokens.contains(tok)).count();
    if matched > 0 {
        let total = considered.len();
        out.add(
            Reason::WordOverlap { matched, total },
            w.word_overlap * matched as f64 / total as f64,
        );
    }

    if let Some(corrected) = &query.corrected
        && !t.is_empty()
        && (t.contains(corrected.as_str()) || corrected.contains(t))
    {
        out.add(
            Reason::TypoCorrected {
                corrected: corrected.clone(),
            },
            w.typo_corrected,
        );
    }

    // Domain vocabulary
    let vq = query.vocabulary_form();
    let description = normalize(&item.description);
    for &keyword in VARIETALS.iter().filter(|kw| contains_phrase(vq, kw)) {
        if contains_phrase(t, keyword) {
            out.add(Reason::VarietalInTitle { keyword }, w.varietal_in_title);
            if DISTINCTIVE_VARIETALS.contains(&keyword) {
                out.add(Reason::DistinctiveVarietal { keyword }, w.distinctive_varietal);
            }
        } else if contains_phrase(&description, keyword) {
            out.add(Reason::VarietalInDescription { keyword }, w.varietal_in_description);
        }
    }

    // Partial overlap leaves room for the fuzzy fallback on the words it missed.
    let only_overlap = out
        .reasons
        .iter()
        .all(|r| matches!(r.reason, Reason::WordOverlap { .. }));
    let unmatched: Vec<&str> = q_tokens
        .iter()
        .copied()
        .filter(|tok| !t_tokens.contains(tok))
        .collect();
    if only_overlap
        && let Some(m) = best_token_match(&unmatched, &t_tokens, cfg.fuzzy_min_token_len, cfg.fuzzy_threshold)
    {
        let points = w.fuzzy * m.similarity;
        out.add(
            Reason::Fuzzy {
                query_token: m.query_token,
                title_token: m.title_token,
                similarity: m.similarity,
            },
            points,
        );
    }

    if out.score > 0.0
        && let Some(year) = item.vintage()
        && year > cfg.recent_vintage_after
    {
        out.add(Reason::RecentVintage { year }, w.recent_vintage);
    }

    if !out.score.is_finite() {
        return Err(ScoreError::NonFinite {
            item_id: item.id.clone(),
            total: out.score,
        });
    }
    debug!(item = %item.id, score = out.score, signals = out.reasons.len(), "scored item");
    Ok(out)
}
