/// Classic Levenshtein distance over chars (insert/delete/substitute cost 1).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (n, m) = (a.len(), b.len());
    if n == 0 {
        return m;
    }
    if m == 0 {
        return n;
    }

    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr = vec![0; m + 1];

    for i in 1..=n {
        curr[0] = i;
        for j in 1..=m {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}

/// Similarity in `[0, 1]`: 1.0 on case-insensitive equality, otherwise
/// `1 - distance / max_len`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    if a == b {
        return 1.0;
    }
    let max_len = a.chars().count().max(b.chars().count());
    1.0 - levenshtein(&a, &b) as f64 / max_len as f64
}

/// Best-scoring token pair between a query and a title.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMatch {
    pub query_token: String,
    pub title_token: String,
    pub similarity: f64,
}

/// Finds the single best token pair whose similarity exceeds `threshold`.
///
/// Query tokens shorter than `min_len` chars are skipped. Scan order is
/// query-outer, title-inner; on equal similarity the first pair found wins.
pub fn best_token_match(
    query_tokens: &[&str],
    title_tokens: &[&str],
    min_len: usize,
    threshold: f64,
) -> Option<TokenMatch> {
    let mut best: Option<TokenMatch> = None;
    for q in query_tokens.iter().filter(|q| q.chars().count() >= min_len) {
        for t in title_tokens {
            let sim = similarity(q, t);
            if sim <= threshold {
                continue;
            }
            if best.as_ref().is_none_or(|b| sim > b.similarity) {
                best = Some(TokenMatch {
                    query_token: q.to_string(),
                    title_token: t.to_string(),
                    similarity: sim,
                });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn distance_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("syrah", "syrha"), 2);
        assert_eq!(levenshtein("rosé", "rose"), 1);
    }

    #[test]
    fn similarity_is_case_insensitive() {
        assert_eq!(similarity("Merlot", "merlot"), 1.0);
        assert!((similarity("zinfandal", "zinfandel") - (1.0 - 1.0 / 9.0)).abs() < 1e-9);
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn short_query_tokens_get_no_fuzzy_credit() {
        assert_eq!(best_token_match(&["rde"], &["red"], 4, 0.7), None);
    }

    #[test]
    fn picks_best_pair_above_threshold() {
        let m = best_token_match(&["estat", "zinfandal"], &["old", "zinfandel"], 4, 0.7).unwrap();
        assert_eq!(m.query_token, "zinfandal");
        assert_eq!(m.title_token, "zinfandel");
    }

    #[test]
    fn first_pair_wins_ties() {
        let m = best_token_match(&["malbek"], &["malbec", "malbel"], 4, 0.7).unwrap();
        assert_eq!(m.title_token, "malbec");
    }

    #[test]
    fn dissimilar_tokens_are_ignored() {
        assert_eq!(best_token_match(&["abcdefghij"], &["abcdxyzwvu"], 4, 0.7), None);
    }

    proptest! {
        #[test]
        fn similarity_bounded_and_symmetric(a in "[a-z]{0,12}", b in "[a-z]{0,12}") {
            let s = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&s));
            prop_assert!((s - similarity(&b, &a)).abs() < 1e-12);
        }
    }
}
