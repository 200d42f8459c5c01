//! CSS selectors for the web-search suite.

/// Search input on the landing page
pub const INPUT_FIELD: &str = "input[title=\"Search\"]";
/// Result stats line shown above search results
pub const RESULT_STATS: &str = "#result-stats";

/// Pagination link for result page `n` at the end of the results
#[must_use]
pub fn navigation_page(n: u32) -> String {
    format!("#navcnt [aria-label$=\"{n}\"]")
}
