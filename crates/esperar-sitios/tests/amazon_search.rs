//! Storefront search suite: the result summary reflects the search term,
//! whether the search is submitted with the Enter key or the button.

use std::time::Duration;

use esperar::mock::{MockElement, MockElementSpec, MockPage};
use esperar::{tracing_support, WaitOptions};
use esperar_sitios::flows::amazon;
use esperar_sitios::selectors::amazon::{INPUT_FIELD, INPUT_SEARCH_BUTTON, UPPER_RESULT_INFO};
use esperar_sitios::{open_url, PageSpec};

const URL: &str = "https://www.amazon.com/";
const TITLE: &str =
    "Amazon.com: Online Shopping for Electronics, Apparel, Computers, Books, DVDs & more";

const SEARCH_TERM: &str = "gardening tools";

fn options() -> WaitOptions {
    WaitOptions::new()
        .with_timeout(Duration::from_millis(2000))
        .with_poll_interval(Duration::from_millis(25))
}

/// Landing page plus the summary line that appears once a search runs
fn storefront() -> (MockPage, MockElement) {
    let page = MockPage::new();
    page.title_for_url(URL, TITLE);
    page.add_element(MockElementSpec::new(INPUT_FIELD));
    let search_button = page.add_element(MockElementSpec::new(INPUT_SEARCH_BUTTON));
    let summary = page.add_element(
        MockElementSpec::new(UPPER_RESULT_INFO)
            .text(format!("1-48 of over 2,000 results for \"{SEARCH_TERM}\""))
            .hidden_until_revealed(),
    );
    page.reveal_on_key("Enter", &summary);
    page.reveal_on_click(&search_button, &summary);
    (page, summary)
}

#[tokio::test]
async fn enter_key_search_shows_summary() {
    tracing_support::init();
    let (page, _summary) = storefront();

    open_url(&page, &PageSpec::new(URL, TITLE), &options())
        .await
        .unwrap();
    amazon::do_search(&page, SEARCH_TERM, true, &options())
        .await
        .unwrap();

    amazon::verify_search_result_summary(&page, "1-48 of over", SEARCH_TERM, &options())
        .await
        .unwrap();
    assert_eq!(page.value_of(INPUT_FIELD), SEARCH_TERM);
}

#[tokio::test]
async fn button_search_shows_summary() {
    tracing_support::init();
    let (page, _summary) = storefront();

    open_url(&page, &PageSpec::new(URL, TITLE), &options())
        .await
        .unwrap();
    amazon::do_search(&page, SEARCH_TERM, false, &options())
        .await
        .unwrap();

    amazon::verify_search_result_summary(&page, "1-48 of over", SEARCH_TERM, &options())
        .await
        .unwrap();
    // Submitted by clicking, not with the Enter key.
    assert!(page.pressed_keys().is_empty());
    assert_eq!(page.click_count(INPUT_SEARCH_BUTTON), 1);
}

#[cfg(feature = "browser")]
mod live {
    use super::*;
    use esperar::{Browser, BrowserConfig};

    #[tokio::test(flavor = "multi_thread")]
    #[ignore = "drives the public site; needs chromium and network"]
    async fn enter_key_search_shows_summary() {
        tracing_support::init();
        let browser = Browser::launch(BrowserConfig::from_env()).await.unwrap();
        let page = browser.new_page().await.unwrap();
        let options = WaitOptions::default();

        open_url(&page, &PageSpec::new(URL, TITLE), &options)
            .await
            .unwrap();
        amazon::do_search(&page, SEARCH_TERM, true, &options)
            .await
            .unwrap();
        amazon::verify_search_result_summary(&page, "1-48 of over", SEARCH_TERM, &options)
            .await
            .unwrap();

        browser.close().await.unwrap();
    }
}
