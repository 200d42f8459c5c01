//! Locator abstraction for element selection.
//!
//! A [`Selector`] is the immutable (strategy, pattern) pair every query in
//! the crate starts from. Site suites keep these as `pub const` strings and
//! wrap them at the call site, so construction stays cheap and allocation
//! only happens once per wait.

use std::fmt;

/// Selector strategy for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector (e.g., `button.primary`)
    Css(String),
    /// XPath selector
    XPath(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    /// The raw selector pattern
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) => s,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css `{s}`"),
            Self::XPath(s) => write!(f, "xpath `{s}`"),
        }
    }
}

impl From<&str> for Selector {
    /// Bare strings are CSS selectors, the suite's dominant strategy
    fn from(selector: &str) -> Self {
        Self::Css(selector.to_string())
    }
}

impl From<String> for Selector {
    fn from(selector: String) -> Self {
        Self::Css(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_constructor() {
        let selector = Selector::css("#add-to-cart");
        assert_eq!(selector, Selector::Css("#add-to-cart".to_string()));
        assert_eq!(selector.pattern(), "#add-to-cart");
    }

    #[test]
    fn test_xpath_constructor() {
        let selector = Selector::xpath("//button[@id='register']");
        assert_eq!(selector.pattern(), "//button[@id='register']");
    }

    #[test]
    fn test_display_includes_strategy_and_pattern() {
        assert_eq!(
            format!("{}", Selector::css(".s-search-results")),
            "css `.s-search-results`"
        );
        assert_eq!(
            format!("{}", Selector::xpath("//title")),
            "xpath `//title`"
        );
    }

    #[test]
    fn test_from_str_is_css() {
        let selector: Selector = "input#twotabsearchtextbox".into();
        assert_eq!(selector, Selector::css("input#twotabsearchtextbox"));
    }
}
