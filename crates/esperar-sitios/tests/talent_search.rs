//! Talent-directory suite: every profile card on the first results page
//! contains the search term, and off-screen cards can be wheeled into view.

use std::time::Duration;

use esperar::mock::{MockElementSpec, MockPage};
use esperar::{tracing_support, Axis, WaitOptions};
use esperar_sitios::flows::talent;
use esperar_sitios::selectors::talent::{PROFILE_DETAILS, SEARCH_FIELD, VENDOR_CARD};

const SEARCH_TERM: &str = "test";
const RESULTS_PER_PAGE: usize = 50;

fn options() -> WaitOptions {
    WaitOptions::new()
        .with_timeout(Duration::from_millis(3000))
        .with_poll_interval(Duration::from_millis(10))
}

#[tokio::test]
async fn profile_cards_contain_search_term() {
    tracing_support::init();
    let page = MockPage::new();
    page.add_element(MockElementSpec::new(SEARCH_FIELD));

    let first_card = page.add_element(
        MockElementSpec::new(VENDOR_CARD)
            .text("Vendor 0")
            .hidden_until_revealed(),
    );
    page.reveal_on_key("Enter", &first_card);
    for n in 0..RESULTS_PER_PAGE {
        let details = page.add_element(
            MockElementSpec::new(PROFILE_DETAILS)
                .text(format!("Vendor {n}: automated TEST tooling"))
                .hidden_until_revealed(),
        );
        page.reveal_on_key("Enter", &details);
    }

    let details = talent::search_profiles(&page, SEARCH_TERM, &options())
        .await
        .unwrap();
    assert_eq!(details.len(), RESULTS_PER_PAGE);

    // Record every card that fails to mention the term, then fail once with
    // the full list, the way a reviewer wants to read a red run.
    let misses: Vec<&String> = details
        .iter()
        .filter(|card| !card.to_lowercase().contains(SEARCH_TERM))
        .collect();
    assert!(
        misses.is_empty(),
        "search '{SEARCH_TERM}' returned {} incorrect profile cards:\n{misses:?}",
        misses.len()
    );
}

#[tokio::test]
async fn off_screen_vendor_card_scrolls_into_view() {
    tracing_support::init();
    let page = MockPage::new();
    let results_list = page.add_scrollable(".results-list", Axis::Vertical, 400.0, 4000.0);

    // Cards every 80px; the one we want sits well past the first viewport.
    for n in 0..RESULTS_PER_PAGE {
        page.add_element(
            MockElementSpec::new(VENDOR_CARD)
                .text(format!("Vendor {n}"))
                .inside(&results_list, 80.0 * n as f64, 60.0),
        );
    }

    let card = talent::scroll_to_vendor(&page, &results_list, "Vendor 30", &options())
        .await
        .unwrap();
    assert_eq!(page.text_of(&card), "Vendor 30");
    assert!(!page.wheel_events().is_empty());
    // The list actually moved far enough for the card to sit in the band.
    assert!(page.scroll_position(&results_list) >= 80.0 * 30.0 + 60.0 - 400.0);
}
