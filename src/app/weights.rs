//! Central weight table for the scorer.
//!
//! Exact values are tunable; their relative ordering is not. `EngineConfig::validate`
//! rejects any table that breaks it:
//!
//! ```text
//! exact_title > every other weight
//! flagship + flagship_variant > sum of all generic signals
//! title_contains_query > query_contains_title > typo_corrected > word_overlap
//! varietal_in_title > varietal_in_description
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum WeightError {
    #[error("weight `{0}` must be finite and non-negative")]
    Invalid(&'static str),

    #[error("weight ordering violated: {0}")]
    Ordering(&'static str),

    #[error("fuzzy threshold {0} must lie strictly between 0 and 1")]
    FuzzyThreshold(f64),

    #[error("target category must not be empty")]
    EmptyCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub exact_title: f64,
    pub flagship: f64,
    pub flagship_variant: f64,
    pub title_contains_query: f64,
    pub query_contains_title: f64,
    /// Upper end of the word-overlap band; scaled by the matched fraction.
    pub word_overlap: f64,
    pub typo_corrected: f64,
    pub varietal_in_title: f64,
    pub varietal_in_description: f64,
    pub distinctive_varietal: f64,
    pub recent_vintage: f64,
    /// Scaled by the best token similarity.
    pub fuzzy: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            exact_title: 200.0,
            flagship: 100.0,
            flagship_variant: 70.0,
            title_contains_query: 50.0,
            query_contains_title: 35.0,
            word_overlap: 20.0,
            typo_corrected: 28.0,
            varietal_in_title: 15.0,
            varietal_in_description: 5.0,
            distinctive_varietal: 10.0,
            recent_vintage: 3.0,
            fuzzy: 12.0,
        }
    }
}

impl ScoreWeights {
    fn named(&self) -> [(&'static str, f64); 12] {
        [
            ("exact_title", self.exact_title),
            ("flagship", self.flagship),
            ("flagship_variant", self.flagship_variant),
            ("title_contains_query", self.title_contains_query),
            ("query_contains_title", self.query_contains_title),
            ("word_overlap", self.word_overlap),
            ("typo_corrected", self.typo_corrected),
            ("varietal_in_title", self.varietal_in_title),
            ("varietal_in_description", self.varietal_in_description),
            ("distinctive_varietal", self.distinctive_varietal),
            ("recent_vintage", self.recent_vintage),
            ("fuzzy", self.fuzzy),
        ]
    }

    /// Every signal except exact-title and the flagship override, at full strength.
    pub fn generic_total(&self) -> f64 {
        self.title_contains_query
            + self.query_contains_title
            + self.word_overlap
            + self.typo_corrected
            + self.varietal_in_title
            + self.distinctive_varietal
            + self.recent_vintage
    }

    pub fn validate(&self) -> Result<(), WeightError> {
        for (name, value) in self.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightError::Invalid(name));
            }
        }
        if self.named()[1..].iter().any(|&(_, w)| w >= self.exact_title) {
            return Err(WeightError::Ordering("exact_title must exceed every other weight"));
        }
        if self.flagship + self.flagship_variant <= self.generic_total() {
            return Err(WeightError::Ordering(
                "flagship + flagship_variant must exceed all generic signals combined",
            ));
        }
        if self.title_contains_query <= self.query_contains_title {
            return Err(WeightError::Ordering(
                "title_contains_query must exceed query_contains_title",
            ));
        }
        if self.query_contains_title <= self.typo_corrected || self.typo_corrected <= self.word_overlap {
            return Err(WeightError::Ordering(
                "typo_corrected must sit between substring and word-overlap weights",
            ));
        }
        if self.varietal_in_title <= self.varietal_in_description {
            return Err(WeightError::Ordering(
                "varietal_in_title must exceed varietal_in_description",
            ));
        }
        Ok(())
    }
}

/// The marquee line and the style qualifiers that disambiguate its variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagshipRule {
    pub name: String,
    pub variants: Vec<String>,
}

impl Default for FlagshipRule {
    fn default() -> Self {
        Self {
            name: "signature".into(),
            variants: vec!["red".into(), "white".into(), "rosé".into(), "sparkling".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Only items of this category are ranked.
    pub target_category: String,
    /// Vintages strictly after this year get the recency bonus.
    pub recent_vintage_after: u16,
    pub fuzzy_threshold: f64,
    pub fuzzy_min_token_len: usize,
    pub overlap_min_token_len: usize,
    pub max_alternatives: usize,
    pub flagship: FlagshipRule,
    pub weights: ScoreWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_category: "wine".into(),
            recent_vintage_after: 2020,
            fuzzy_threshold: 0.7,
            fuzzy_min_token_len: 4,
            overlap_min_token_len: 3,
            max_alternatives: 3,
            flagship: FlagshipRule::default(),
            weights: ScoreWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), WeightError> {
        if self.target_category.trim().is_empty() {
            return Err(WeightError::EmptyCategory);
        }
        if !(self.fuzzy_threshold > 0.0 && self.fuzzy_threshold < 1.0) {
            return Err(WeightError::FuzzyThreshold(self.fuzzy_threshold));
        }
        self.weights.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn flagship_override_outranks_generic_signals() {
        let w = ScoreWeights::default();
        assert!(w.flagship + w.flagship_variant > w.generic_total());
    }

    #[test]
    fn rejects_inverted_substring_weights() {
        let w = ScoreWeights {
            query_contains_title: 60.0,
            ..Default::default()
        };
        assert!(matches!(w.validate(), Err(WeightError::Ordering(_))));
    }

    #[test]
    fn rejects_weak_flagship() {
        let w = ScoreWeights {
            flagship: 40.0,
            flagship_variant: 20.0,
            ..Default::default()
        };
        assert!(matches!(w.validate(), Err(WeightError::Ordering(_))));
    }

    #[test]
    fn exact_title_must_dominate_every_weight() {
        let w = ScoreWeights {
            title_contains_query: 250.0,
            query_contains_title: 240.0,
            typo_corrected: 230.0,
            flagship: 150.0,
            flagship_variant: 700.0,
            ..Default::default()
        };
        assert_eq!(
            w.validate(),
            Err(WeightError::Ordering("exact_title must exceed every other weight"))
        );

        let tied = ScoreWeights {
            flagship_variant: 200.0,
            ..Default::default()
        };
        assert!(matches!(tied.validate(), Err(WeightError::Ordering(_))));
    }

    #[test]
    fn rejects_non_finite_weights() {
        let w = ScoreWeights {
            recent_vintage: f64::NAN,
            ..Default::default()
        };
        assert_eq!(w.validate(), Err(WeightError::Invalid("recent_vintage")));
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let cfg = EngineConfig {
            fuzzy_threshold: 1.0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(WeightError::FuzzyThreshold(1.0)));
    }
}
