use crate::api::client::{CatalogSource, fetch_catalog};
use crate::api::models::CatalogItem;
use crate::app::fallback::Suggestion;
use crate::app::format::format_outcome;
use crate::app::rank::{MatchResult, in_target_category};
use crate::app::weights::EngineConfig;
use crate::app::{SearchOutcome, search};
use indexmap::IndexMap;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::warn;

/// Result of a background catalog reload.
pub type CatalogUpdate = Result<Vec<CatalogItem>, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Insert,
    Navigate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Search,
    Detail,
}

#[derive(Debug)]
pub struct CatalogData {
    pub source: CatalogSource,
    pub items: Vec<CatalogItem>,
    /// Item id to position in `items`; first occurrence wins.
    pub by_id: IndexMap<String, usize>,
    pub loaded_at: Instant,
}

impl CatalogData {
    fn new(source: CatalogSource, items: Vec<CatalogItem>) -> Self {
        let mut by_id = IndexMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if by_id.contains_key(&item.id) {
                warn!(id = %item.id, "duplicate catalog id, keeping first");
                continue;
            }
            by_id.insert(item.id.clone(), i);
        }
        Self {
            source,
            items,
            by_id,
            loaded_at: Instant::now(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.by_id.get(id).and_then(|&i| self.items.get(i))
    }

    /// How long ago the snapshot was loaded, for the status bar.
    pub fn age_label(&self) -> String {
        age_label(self.loaded_at.elapsed())
    }
}

fn age_label(elapsed: Duration) -> String {
    match elapsed.as_secs() {
        s if s < 60 => format!("{s}s ago"),
        s if s < 3600 => format!("{}m ago", s / 60),
        s => format!("{}h ago", s / 3600),
    }
}

#[derive(Debug)]
pub struct SearchState {
    pub input: String,
    pub mode: SearchMode,
    pub outcome: Option<SearchOutcome>,
    /// Rows shown in the results list: matches, or suggested items when nothing matched.
    pub results: Vec<MatchResult>,
    pub reply: String,
    pub selected_index: usize,
    pub needs_filter: bool,
    pub last_input_change: Instant,
    pub sort_by_price: bool,
}

#[derive(Debug, Default)]
pub struct DetailState {
    pub result: Option<MatchResult>,
}

#[derive(Debug)]
pub struct App {
    pub view: View,
    pub status: String,
    pub engine: EngineConfig,
    pub data: CatalogData,
    pub search: SearchState,
    pub detail: DetailState,
    pub update_tx: Option<mpsc::UnboundedSender<CatalogUpdate>>,
}

impl App {
    pub fn new(source: CatalogSource, items: Vec<CatalogItem>, engine: EngineConfig) -> Self {
        let mut app = Self {
            view: View::Search,
            status: format!("Loaded {} items", items.len()),
            engine,
            data: CatalogData::new(source, items),
            search: SearchState {
                input: String::new(),
                mode: SearchMode::Insert,
                outcome: None,
                results: Vec::new(),
                reply: String::new(),
                selected_index: 0,
                needs_filter: true,
                last_input_change: Instant::now(),
                sort_by_price: false,
            },
            detail: DetailState::default(),
            update_tx: None,
        };
        app.apply_filter();
        app
    }

    pub fn set_update_sender(&mut self, tx: mpsc::UnboundedSender<CatalogUpdate>) {
        self.update_tx = Some(tx);
    }

    pub fn selected_result(&self) -> Option<&MatchResult> {
        self.search.results.get(self.search.selected_index)
    }

    // --- Search Logic ---

    pub fn on_input(&mut self, ch: char) {
        self.search.input.push(ch);
        self.mark_input_changed();
    }

    pub fn on_backspace(&mut self) {
        self.search.input.pop();
        self.mark_input_changed();
    }

    pub fn on_delete(&mut self) {
        self.search.input.clear();
        self.mark_input_changed();
    }

    fn mark_input_changed(&mut self) {
        self.search.needs_filter = true;
        self.search.last_input_change = Instant::now();
    }

    pub fn maybe_apply_filter(&mut self, debounce: Duration) {
        if self.search.needs_filter && self.search.last_input_change.elapsed() >= debounce {
            self.apply_filter();
        }
    }

    pub fn recompute_filter(&mut self) {
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        self.search.needs_filter = false;
        if self.search.input.trim().is_empty() {
            self.search.outcome = None;
            self.search.reply.clear();
            self.search.results = self
                .data
                .items
                .iter()
                .filter(|item| in_target_category(item, &self.engine) && item.is_available())
                .map(|item| MatchResult {
                    item: item.clone(),
                    score: 0.0,
                    reasons: Vec::new(),
                    price_only: false,
                })
                .collect();
        } else {
            let outcome = search(&self.search.input, &self.data.items, &self.engine);
            self.search.reply = format_outcome(&outcome);
            self.search.results = if outcome.matches.is_empty() {
                suggested_rows(outcome.suggestion.as_ref())
            } else {
                outcome.matches.clone()
            };
            self.search.outcome = Some(outcome);
        }

        if self.search.sort_by_price {
            self.sort_results_by_price();
        }

        // Clamp selection
        let count = self.search.results.len();
        if count == 0 {
            self.search.selected_index = 0;
        } else {
            self.search.selected_index = self.search.selected_index.min(count - 1);
        }
    }

    /// Cheapest first; items without a price sink to the bottom.
    fn sort_results_by_price(&mut self) {
        self.search
            .results
            .sort_by_key(|m| m.item.price_minor_units.unwrap_or(i64::MAX));
    }

    pub fn toggle_sort(&mut self) {
        self.search.sort_by_price = !self.search.sort_by_price;
        self.recompute_filter();
        self.status = if self.search.sort_by_price {
            "Sorted by price".into()
        } else {
            "Sorted by relevance".into()
        };
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.search.results.is_empty() {
            return;
        }
        let len = self.search.results.len() as isize;
        let mut idx = self.search.selected_index as isize + delta;
        idx = idx.clamp(0, len - 1);
        self.search.selected_index = idx as usize;
    }

    pub fn jump_to_top(&mut self) {
        if !self.search.results.is_empty() {
            self.search.selected_index = 0;
        }
    }

    pub fn jump_to_bottom(&mut self) {
        if !self.search.results.is_empty() {
            self.search.selected_index = self.search.results.len() - 1;
        }
    }

    // --- Detail Logic ---

    pub fn enter_detail(&mut self) {
        if let Some(result) = self.selected_result().cloned() {
            self.status = format!("Detail: {}", result.item.title);
            self.detail.result = Some(result);
            self.view = View::Detail;
        }
    }

    pub fn exit_detail(&mut self) {
        self.view = View::Search;
        self.detail.result = None;
    }

    // --- Catalog Logic ---

    pub fn apply_catalog_update(&mut self, update: CatalogUpdate) {
        match update {
            Ok(items) => {
                self.status = format!("Reloaded {} items", items.len());
                let source = self.data.source.clone();
                self.data = CatalogData::new(source, items);
                if let Some(current) = &self.detail.result
                    && self.data.get(&current.item.id).is_none()
                {
                    self.exit_detail();
                }
                self.recompute_filter();
            }
            Err(e) => {
                warn!(error = %e, "catalog reload failed");
                self.status = format!("Reload failed: {e}");
            }
        }
    }

    pub fn manual_refresh(&mut self) {
        let source = self.data.source.clone();
        let outbound = self.update_tx.clone();
        tokio::spawn(async move {
            let update = fetch_catalog(&source).await.map_err(|e| e.to_string());
            if let Some(out) = &outbound {
                let _ = out.send(update);
            }
        });
        self.status = "Reloading catalog...".into();
    }
}

fn suggested_rows(suggestion: Option<&Suggestion>) -> Vec<MatchResult> {
    match suggestion {
        Some(Suggestion::HistoricalUnavailable(m)) => vec![m.clone()],
        Some(Suggestion::Alternatives { items, .. }) => items.clone(),
        Some(Suggestion::NothingFound { .. }) | None => Vec::new(),
    }
}
