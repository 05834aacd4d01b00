use url::form_urlencoded;

use crate::types::FactCheckLinks;

pub const FACT_CHECK_SOURCES: &[(&str, &str)] = &[
    ("Politifact", "https://www.politifact.com/search/?q="),
    ("Snopes", "https://www.snopes.com/?s="),
    ("GoogleFactCheck", "https://toolbox.google.com/factcheck/explorer/search/"),
    ("FactCheck.org", "https://www.factcheck.org/?s="),
    ("Full Fact", "https://fullfact.org/search/?q="),
];

/// Search URLs for `claim` on each fact-checking site. No I/O.
pub fn fact_check_links(claim: &str) -> FactCheckLinks {
    let encoded: String = form_urlencoded::byte_serialize(claim.as_bytes()).collect();
    FACT_CHECK_SOURCES
        .iter()
        .map(|(name, base)| (name.to_string(), format!("{base}{encoded}")))
        .collect()
}
