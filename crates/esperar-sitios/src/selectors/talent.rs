//! CSS selectors for the talent-directory suite.

/// Directory search field
pub const SEARCH_FIELD: &str = "input[data-role='search-input']";
/// A vendor result card
pub const VENDOR_CARD: &str = ".vendor-card";
/// Profile details section inside a vendor card
pub const PROFILE_DETAILS: &str = ".vendor-card .profile-details";
