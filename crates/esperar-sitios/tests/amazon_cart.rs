//! Storefront cart suite: adding the "Amazon's Choice" pick to the cart
//! shows it in the cart list.

use std::time::Duration;

use esperar::mock::{MockElementSpec, MockPage};
use esperar::{click_element, tracing_support, ElementCriteria, WaitOptions};
use esperar_sitios::flows::amazon;
use esperar_sitios::selectors::amazon::{
    ADD_TO_CART_BUTTON, AMAZON_CHOICE, CART_PRODUCT_TITLE, INPUT_FIELD, PRODUCT_TITLE,
    UPPER_RESULT_INFO, VIEW_CART_BUTTON,
};
use esperar_sitios::{open_url, PageSpec};

const URL: &str = "https://www.amazon.com/";
const TITLE: &str =
    "Amazon.com: Online Shopping for Electronics, Apparel, Computers, Books, DVDs & more";

fn options() -> WaitOptions {
    WaitOptions::new()
        .with_timeout(Duration::from_millis(2000))
        .with_poll_interval(Duration::from_millis(25))
}

#[tokio::test]
async fn choice_item_lands_in_cart() {
    tracing_support::init();
    let page = MockPage::new();
    page.title_for_url(URL, TITLE);
    page.add_element(MockElementSpec::new(INPUT_FIELD));

    // Search results, then the product page, then the cart, each revealed by
    // the interaction that loads it on the real site.
    let summary = page.add_element(
        MockElementSpec::new(UPPER_RESULT_INFO)
            .text("1-48 of over 3,000 results for \"teacups\"")
            .hidden_until_revealed(),
    );
    let choice_badge = page.add_element(
        MockElementSpec::new(AMAZON_CHOICE)
            .text("Amazon's Choice")
            .hidden_until_revealed(),
    );
    page.reveal_on_key("Enter", &summary);
    page.reveal_on_key("Enter", &choice_badge);

    let product_title = page.add_element(
        MockElementSpec::new(PRODUCT_TITLE)
            .text("Fancy Teacup Set")
            .hidden_until_revealed(),
    );
    let add_button = page.add_element(
        MockElementSpec::new(ADD_TO_CART_BUTTON)
            .text("Add to Cart")
            .hidden_until_revealed(),
    );
    page.reveal_on_click(&choice_badge, &product_title);
    page.reveal_on_click(&choice_badge, &add_button);

    let view_cart = page.add_element(
        MockElementSpec::new(VIEW_CART_BUTTON)
            .text("Cart")
            .hidden_until_revealed(),
    );
    page.reveal_on_click(&add_button, &view_cart);

    let cart_row = page.add_element(
        MockElementSpec::new(CART_PRODUCT_TITLE)
            .text("Fancy Teacup Set, 6 Piece")
            .hidden_until_revealed(),
    );
    page.reveal_on_click(&view_cart, &cart_row);

    open_url(&page, &PageSpec::new(URL, TITLE), &options())
        .await
        .unwrap();
    amazon::do_search(&page, "teacups", true, &options())
        .await
        .unwrap();

    click_element(&page, ElementCriteria::new(AMAZON_CHOICE), &options())
        .await
        .unwrap();
    let product_name = amazon::product_title(&page, &options()).await.unwrap();
    amazon::add_to_cart(&page, &options()).await.unwrap();

    amazon::go_to_cart(&page, &options()).await.unwrap();
    amazon::verify_items_in_cart(&page, &product_name, &options())
        .await
        .unwrap();
}

#[cfg(feature = "browser")]
mod live {
    use super::*;
    use esperar::{Browser, BrowserConfig};

    #[tokio::test(flavor = "multi_thread")]
    #[ignore = "drives the public site; needs chromium and network"]
    async fn choice_item_lands_in_cart() {
        tracing_support::init();
        let browser = Browser::launch(BrowserConfig::from_env()).await.unwrap();
        let page = browser.new_page().await.unwrap();
        let options = WaitOptions::default();

        open_url(&page, &PageSpec::new(URL, TITLE), &options)
            .await
            .unwrap();
        amazon::do_search(&page, "teacups", true, &options)
            .await
            .unwrap();

        click_element(&page, ElementCriteria::new(AMAZON_CHOICE), &options)
            .await
            .unwrap();
        let product_name = amazon::product_title(&page, &options).await.unwrap();
        amazon::add_to_cart(&page, &options).await.unwrap();

        amazon::go_to_cart(&page, &options).await.unwrap();
        amazon::verify_items_in_cart(&page, &product_name, &options)
            .await
            .unwrap();

        browser.close().await.unwrap();
    }
}
