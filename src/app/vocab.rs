//! Static domain vocabulary: varietals, typo table and fallback adjacency.
//!
//! All entries are stored in normalized form (lowercase, no punctuation) so they
//! can be compared directly against `util::normalize_for_comparison` output.

/// Category keywords recognised in queries, titles and descriptions.
/// Multi-word varietals come before their single-word prefixes.
pub const VARIETALS: &[&str] = &[
    "cabernet sauvignon",
    "cabernet franc",
    "sauvignon blanc",
    "pinot noir",
    "pinot gris",
    "petite sirah",
    "red blend",
    "chardonnay",
    "merlot",
    "syrah",
    "zinfandel",
    "riesling",
    "malbec",
    "grenache",
    "mourvèdre",
    "viognier",
    "tempranillo",
    "sangiovese",
    "rosé",
    "sparkling",
];

/// Varietals that are frequently confused with a neighbour and get an extra
/// fixed bonus on a query/title hit.
pub const DISTINCTIVE_VARIETALS: &[&str] = &["syrah", "petite sirah", "pinot gris", "viognier", "rosé"];

/// Ordered (misspelling, canonical) pairs. The first entry found in the
/// query wins.
pub const TYPO_TABLE: &[(&str, &str)] = &[
    ("chardonay", "chardonnay"),
    ("chardonney", "chardonnay"),
    ("cabernay", "cabernet"),
    ("savignon", "sauvignon"),
    ("pinot nior", "pinot noir"),
    ("reisling", "riesling"),
    ("merlow", "merlot"),
    ("zinfandle", "zinfandel"),
    ("shiraz", "syrah"),
    ("rose", "rosé"),
];

/// Brand-like tokens that must survive typo correction untouched, paired with
/// the misspelling entry they would otherwise trip.
pub const PROTECTED_TOKENS: &[(&str, &str)] = &[("rosewood", "rose")];

/// Varietal → related keywords used when nothing in the catalog matches.
pub const ADJACENCY: &[(&str, &[&str])] = &[
    ("syrah", &["red blend", "grenache", "petite sirah"]),
    ("petite sirah", &["syrah", "zinfandel", "red blend"]),
    ("cabernet sauvignon", &["cabernet franc", "merlot", "red blend"]),
    ("cabernet franc", &["cabernet sauvignon", "merlot", "red blend"]),
    ("merlot", &["cabernet sauvignon", "cabernet franc", "red blend"]),
    ("pinot noir", &["grenache", "rosé", "sangiovese"]),
    ("zinfandel", &["petite sirah", "red blend", "syrah"]),
    ("malbec", &["cabernet sauvignon", "red blend", "tempranillo"]),
    ("grenache", &["syrah", "mourvèdre", "red blend"]),
    ("mourvèdre", &["grenache", "syrah", "red blend"]),
    ("tempranillo", &["sangiovese", "malbec", "red blend"]),
    ("sangiovese", &["tempranillo", "pinot noir", "red blend"]),
    ("red blend", &["cabernet sauvignon", "syrah", "zinfandel"]),
    ("chardonnay", &["viognier", "pinot gris", "sauvignon blanc"]),
    ("sauvignon blanc", &["pinot gris", "riesling", "chardonnay"]),
    ("pinot gris", &["sauvignon blanc", "riesling", "viognier"]),
    ("riesling", &["pinot gris", "sauvignon blanc", "viognier"]),
    ("viognier", &["chardonnay", "riesling", "pinot gris"]),
    ("rosé", &["pinot noir", "grenache", "sparkling"]),
    ("sparkling", &["rosé", "chardonnay", "pinot noir"]),
];

/// Looks up the related keywords for a varietal.
pub fn adjacent_to(keyword: &str) -> Option<&'static [&'static str]> {
    ADJACENCY
        .iter()
        .find(|(k, _)| *k == keyword)
        .map(|(_, related)| *related)
}
