//! Storefront flows: search, add to cart, cart verification.

use esperar::{
    click_element, get_element, get_elements, set_element_value, until_visible, ElementCriteria,
    EsperarResult, PageDriver, WaitOptions,
};

use crate::selectors::amazon::{
    ADD_TO_CART_BUTTON, CART_PRODUCT_TITLE, INPUT_FIELD, INPUT_SEARCH_BUTTON, PRODUCT_TITLE,
    UPPER_RESULT_INFO, VIEW_CART_BUTTON,
};

/// Enter a term and search, either by pressing Enter (`enter_to_search`) or
/// by clicking the search button. Returns once the result stats are shown.
pub async fn do_search<D: PageDriver>(
    page: &D,
    term: &str,
    enter_to_search: bool,
    options: &WaitOptions,
) -> EsperarResult<()> {
    tracing::info!(term, enter_to_search, "searching storefront");
    let field = set_element_value(page, ElementCriteria::new(INPUT_FIELD), term, options).await?;

    if enter_to_search {
        page.press_key(&field, "Enter").await?;
    } else {
        click_element(page, ElementCriteria::new(INPUT_SEARCH_BUTTON), options).await?;
    }

    until_visible(page, UPPER_RESULT_INFO, options).await?;
    Ok(())
}

/// The result-summary line shown above the search results
pub async fn search_result_summary<D: PageDriver>(
    page: &D,
    options: &WaitOptions,
) -> EsperarResult<String> {
    let infos = get_elements(page, ElementCriteria::new(UPPER_RESULT_INFO), options).await?;
    match infos.first() {
        Some(info) => Ok(page.text(info).await?),
        None => Ok(String::new()),
    }
}

/// Verify the result summary starts with `expected_prefix` and ends with
/// ` results for "<search_term>"`.
pub async fn verify_search_result_summary<D: PageDriver>(
    page: &D,
    expected_prefix: &str,
    search_term: &str,
    options: &WaitOptions,
) -> EsperarResult<()> {
    let expected_suffix = format!(" results for \"{search_term}\"");
    let summary = search_result_summary(page, options).await?;

    assert!(
        summary.starts_with(expected_prefix),
        "expected summary to start with\n{expected_prefix}\nbut got\n{summary}"
    );
    assert!(
        summary.ends_with(&expected_suffix),
        "expected summary to end with\n{expected_suffix}\nbut got\n{summary}"
    );
    Ok(())
}

/// The displayed title of the product currently on screen
pub async fn product_title<D: PageDriver>(
    page: &D,
    options: &WaitOptions,
) -> EsperarResult<String> {
    let title = get_element(page, ElementCriteria::new(PRODUCT_TITLE), options).await?;
    Ok(page.text(&title).await?)
}

/// Add the product on the current page to the cart
pub async fn add_to_cart<D: PageDriver>(page: &D, options: &WaitOptions) -> EsperarResult<()> {
    click_element(page, ElementCriteria::new(ADD_TO_CART_BUTTON), options).await?;
    Ok(())
}

/// Open the cart from the post-add confirmation
pub async fn go_to_cart<D: PageDriver>(page: &D, options: &WaitOptions) -> EsperarResult<()> {
    click_element(page, ElementCriteria::new(VIEW_CART_BUTTON), options).await?;
    Ok(())
}

/// Verify some cart row names the given product
pub async fn verify_items_in_cart<D: PageDriver>(
    page: &D,
    product_name: &str,
    options: &WaitOptions,
) -> EsperarResult<()> {
    let titles = get_elements(page, ElementCriteria::new(CART_PRODUCT_TITLE), options).await?;
    let mut names = Vec::with_capacity(titles.len());
    for title in &titles {
        names.push(page.text(title).await?);
    }
    assert!(
        names.iter().any(|name| name.contains(product_name)),
        "expected cart to contain `{product_name}`, cart rows were: {names:?}"
    );
    Ok(())
}
