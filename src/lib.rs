//! Free-text wine search: resolves a customer's question against a catalog
//! snapshot with weighted lexical scoring, and suggests neighbours when
//! nothing matches.

pub mod api;
pub mod app;
pub mod config;
pub mod events;
pub mod ui;
pub mod util;

pub use api::models::{Availability, CatalogItem};
pub use app::fallback::{Suggestion, suggest_alternatives};
pub use app::format::format_outcome;
pub use app::intent::{QueryIntent, classify};
pub use app::rank::{MatchResult, rank};
pub use app::search::{Reason, ScoreReason};
pub use app::weights::{EngineConfig, ScoreWeights};
pub use app::{SearchOutcome, search};
