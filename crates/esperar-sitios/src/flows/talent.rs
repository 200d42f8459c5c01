//! Talent-directory flows.

use esperar::{
    get_elements, scroll_until_visible, set_element_value, until_visible, Axis, ElementCriteria,
    EsperarResult, PageDriver, WaitOptions,
};

use crate::selectors::talent::{PROFILE_DETAILS, SEARCH_FIELD, VENDOR_CARD};

/// Wheel step used when hunting through the results list
const RESULTS_SCROLL_STEP_PX: f64 = 120.0;

/// Search the directory and return the text of every profile card on the
/// first page of results.
pub async fn search_profiles<D: PageDriver>(
    page: &D,
    term: &str,
    options: &WaitOptions,
) -> EsperarResult<Vec<String>> {
    let field = set_element_value(page, ElementCriteria::new(SEARCH_FIELD), term, options).await?;
    page.press_key(&field, "Enter").await?;

    // A card must render before the details are worth collecting.
    until_visible(page, VENDOR_CARD, options).await?;

    let cards = get_elements(page, ElementCriteria::new(PROFILE_DETAILS), options).await?;
    let mut details = Vec::with_capacity(cards.len());
    for card in &cards {
        details.push(page.text(card).await?);
    }
    Ok(details)
}

/// Scroll the results list until the card naming `vendor` is in view, and
/// return it. The list virtualizes long result sets, so the card may need
/// wheeling into the viewport before it can be interacted with.
pub async fn scroll_to_vendor<D: PageDriver>(
    page: &D,
    results_list: &D::Element,
    vendor: &str,
    options: &WaitOptions,
) -> EsperarResult<D::Element> {
    scroll_until_visible(
        page,
        results_list,
        VENDOR_CARD,
        RESULTS_SCROLL_STEP_PX,
        vendor,
        Axis::Vertical,
        options,
    )
    .await
}
