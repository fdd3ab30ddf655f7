use crate::app::vocab::{PROTECTED_TOKENS, TYPO_TABLE};

/// Rewrites the first known misspelling found in `query` to its canonical form.
///
/// Only one correction is applied per call. Entries whose misspelling would
/// corrupt a protected brand-like token in the query are skipped, whatever their
/// position in the table.
pub fn correct(query: &str) -> String {
    for (wrong, right) in TYPO_TABLE {
        if !query.contains(wrong) || is_protected(query, wrong) {
            continue;
        }
        return query.replacen(wrong, right, 1);
    }
    query.to_string()
}

fn is_protected(query: &str, misspelling: &str) -> bool {
    PROTECTED_TOKENS
        .iter()
        .any(|(token, guarded)| *guarded == misspelling && query.contains(token))
}
