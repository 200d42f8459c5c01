//! CSS selectors for the storefront suites.

// home page
/// Main search input
pub const INPUT_FIELD: &str = "input#twotabsearchtextbox";
/// Search submit button next to the input
pub const INPUT_SEARCH_BUTTON: &str = "input.nav-input";
/// Cart icon in the navigation bar
pub const CART_ICON: &str = "#nav-cart";

// results page
/// Result stats shown above the search results
pub const UPPER_RESULT_INFO: &str = "[cel_widget_id=\"UPPER-RESULT_INFO_BAR\"] .sg-col-inner";
/// Disclaimer banner above the results
pub const TOP_BANNER_MESSAGE: &str = "[cel_widget_id=\"MAIN-TOP_BANNER_MESSAGE\"]";
/// Container holding the search result cards
pub const RESULTS_CONTAINER: &str = ".s-search-results";
/// "Amazon's Choice" badge on a result card
pub const AMAZON_CHOICE: &str = "[aria-label=\"Amazon's Choice\"] .a-badge-region";
/// Pagination button for the next results page
pub const NEXT_BUTTON: &str = "li.a-last";

// product page
/// Product title heading
pub const PRODUCT_TITLE: &str = "#productTitle";
/// Add-to-cart button
pub const ADD_TO_CART_BUTTON: &str = "#add-to-cart-button";
/// View-cart button shown after adding an item
pub const VIEW_CART_BUTTON: &str = "[id*=\"view-cart\"]";

// cart page
/// Product title rows inside the cart
pub const CART_PRODUCT_TITLE: &str = ".sc-product-title";
