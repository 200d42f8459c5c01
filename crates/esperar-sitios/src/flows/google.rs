//! Web-search flows.

use esperar::{
    get_element, set_element_value, until_visible, ElementCriteria, EsperarResult, PageDriver,
    WaitOptions,
};

use crate::selectors::google::{INPUT_FIELD, RESULT_STATS};

/// Type a search term, press Enter, and wait for the result stats line.
pub async fn do_search<D: PageDriver>(
    page: &D,
    term: &str,
    options: &WaitOptions,
) -> EsperarResult<()> {
    let field = set_element_value(page, ElementCriteria::new(INPUT_FIELD), term, options).await?;
    page.press_key(&field, "Enter").await?;
    until_visible(page, RESULT_STATS, options).await?;
    Ok(())
}

/// Verify the element matching `selector` starts with `expected_prefix`
pub async fn verify_prefix<D: PageDriver>(
    page: &D,
    selector: &str,
    expected_prefix: &str,
    options: &WaitOptions,
) -> EsperarResult<()> {
    let element = get_element(page, ElementCriteria::new(selector), options).await?;
    let text = page.text(&element).await?;
    assert!(
        text.starts_with(expected_prefix),
        "expected `{selector}` text to start with\n{expected_prefix}\nbut got\n{text}"
    );
    Ok(())
}
