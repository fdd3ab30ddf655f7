use crate::app::SearchOutcome;
use crate::app::fallback::Suggestion;
use crate::app::rank::MatchResult;
use crate::util::format_price;
use std::fmt::Write;

const NO_DESCRIPTION: &str = "No description available.";
const ALSO_MATCHING: usize = 2;

/// Renders a customer-facing reply for a search outcome.
pub fn format_outcome(outcome: &SearchOutcome) -> String {
    if let Some(top) = outcome.matches.first() {
        if top.price_only {
            return format_price_only(top);
        }
        return format_matches(&outcome.matches);
    }
    match &outcome.suggestion {
        Some(s) => format_suggestion(s),
        None => "Ask me about any wine in the catalog.".to_string(),
    }
}

fn format_price_only(m: &MatchResult) -> String {
    format!("{}: {}", m.item.title.trim(), format_price(m.item.price_minor_units))
}

fn format_matches(matches: &[MatchResult]) -> String {
    let top = &matches[0];
    let mut out = String::new();
    let _ = writeln!(out, "{}", top.item.title.trim());
    let _ = writeln!(out, "Price: {}", format_price(top.item.price_minor_units));
    if !top.item.is_available() {
        let _ = writeln!(out, "(no longer available)");
    }
    out.push_str(top.item.display_description().unwrap_or(NO_DESCRIPTION));

    let rest: Vec<&str> = matches
        .iter()
        .skip(1)
        .take(ALSO_MATCHING)
        .map(|m| m.item.title.trim())
        .collect();
    if !rest.is_empty() {
        let _ = write!(out, "\nAlso matching: {}", rest.join(", "));
    }
    out
}

fn format_suggestion(s: &Suggestion) -> String {
    match s {
        Suggestion::HistoricalUnavailable(m) => format!(
            "We have made {}, but it is no longer available.",
            m.item.title.trim()
        ),
        Suggestion::Alternatives { requested, items } => {
            let listed: Vec<String> = items
                .iter()
                .map(|m| format!("{} ({})", m.item.title.trim(), format_price(m.item.price_minor_units)))
                .collect();
            format!(
                "We don't have any {requested} right now. You might enjoy: {}.",
                listed.join(", ")
            )
        }
        Suggestion::NothingFound { term } => {
            format!("Sorry, nothing in the catalog matches \"{term}\".")
        }
    }
}
