/// Lowercases, strips everything that is not a word character or whitespace,
/// and collapses whitespace runs. Empty input normalizes to an empty string.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes for comparison: `normalize` plus removal of the embedded vintage year.
pub fn normalize_for_comparison(s: &str) -> String {
    let norm = normalize(s);
    match vintage_token_index(&norm) {
        Some(idx) => norm
            .split(' ')
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, t)| t)
            .collect::<Vec<_>>()
            .join(" "),
        None => norm,
    }
}

/// Maps casual spellings onto canonical item names. Only whole inputs that
/// normalize to exactly "rose" are rewritten.
pub fn canonicalize_colloquial(s: &str) -> String {
    let norm = normalize(s);
    if norm == "rose" {
        "rosé".to_string()
    } else {
        norm
    }
}

/// Returns the vintage year embedded in a title: the first 4-digit token
/// beginning with 19 or 20.
pub fn extract_vintage(s: &str) -> Option<u16> {
    let norm = normalize(s);
    let idx = vintage_token_index(&norm)?;
    norm.split(' ').nth(idx).and_then(|t| t.parse().ok())
}

fn vintage_token_index(norm: &str) -> Option<usize> {
    norm.split(' ').position(is_vintage_token)
}

fn is_vintage_token(token: &str) -> bool {
    token.len() == 4
        && token.bytes().all(|b| b.is_ascii_digit())
        && (token.starts_with("19") || token.starts_with("20"))
}

/// Splits normalized text into tokens.
pub fn tokenize(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}

/// Whole-word phrase containment over already-normalized text.
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    if phrase.is_empty() || haystack.is_empty() {
        return false;
    }
    format!(" {haystack} ").contains(&format!(" {phrase} "))
}

/// Formats a price in minor units (cents) for display.
pub fn format_price(minor_units: Option<i64>) -> String {
    match minor_units {
        Some(v) if v >= 0 => format!("${}.{:02}", v / 100, v % 100),
        _ => "price unavailable".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_punctuation_and_collapses_whitespace() {
        assert_eq!(normalize("  Estate   Chardonnay, 2022! "), "estate chardonnay 2022");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!."), "");
    }

    #[test]
    fn comparison_form_drops_only_first_vintage() {
        assert_eq!(normalize_for_comparison("Estate Chardonnay 2022."), "estate chardonnay");
        assert_eq!(normalize_for_comparison("Cuvée 1999 2005"), "cuvée 2005");
        assert_eq!(normalize_for_comparison("Block 3021 Red"), "block 3021 red");
    }

    #[test]
    fn vintage_extraction() {
        assert_eq!(extract_vintage("Estate Pinot Noir 2019"), Some(2019));
        assert_eq!(extract_vintage("Reserve (1998)"), Some(1998));
        assert_eq!(extract_vintage("Red Blend No. 7"), None);
        assert_eq!(extract_vintage("Lot 20221"), None);
    }

    #[test]
    fn colloquial_rose() {
        assert_eq!(canonicalize_colloquial("Rose"), "rosé");
        assert_eq!(canonicalize_colloquial("rose!"), "rosé");
        assert_eq!(canonicalize_colloquial("rose wine"), "rose wine");
    }

    #[test]
    fn phrase_matching_respects_word_boundaries() {
        assert!(contains_phrase("estate pinot noir", "pinot noir"));
        assert!(!contains_phrase("estate pinot noir", "pinot no"));
        assert!(!contains_phrase("", "syrah"));
    }

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(Some(2800)), "$28.00");
        assert_eq!(format_price(Some(5)), "$0.05");
        assert_eq!(format_price(None), "price unavailable");
        assert_eq!(format_price(Some(-1)), "price unavailable");
    }

    proptest! {
        #[test]
        fn normalize_is_total_and_idempotent(s in "[A-Za-z0-9éÉ .,!?'_\t-]{0,40}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once.clone());
            prop_assert!(!once.contains("  "));
            prop_assert_eq!(once.trim(), once.as_str());
        }
    }
}
