//! Convenience operations built atop the poller.
//!
//! Each entry point is sugar over [`wait_until`]: poll until the criteria
//! hold, then hand back the element(s) or run a post-find action. These are
//! the only surfaces site flows call; nothing here adds retry semantics of
//! its own.

use crate::criteria::{Click, ElementCriteria};
use crate::driver::PageDriver;
use crate::locator::Selector;
use crate::result::{EsperarError, EsperarResult};
use crate::wait::{wait_for_first, wait_until, WaitOptions};

/// Wait for a unique visible element matching `criteria` and return it.
///
/// More than one simultaneous satisfying element fails immediately with
/// [`EsperarError::AmbiguousMatch`] unless the criteria relaxed uniqueness.
pub async fn get_element<D: PageDriver>(
    page: &D,
    criteria: ElementCriteria<D>,
    options: &WaitOptions,
) -> EsperarResult<D::Element> {
    wait_for_first(page, &criteria, options).await
}

/// Wait until at least one visible element matches, then return all of them
/// in document order.
pub async fn get_elements<D: PageDriver>(
    page: &D,
    criteria: ElementCriteria<D>,
    options: &WaitOptions,
) -> EsperarResult<Vec<D::Element>> {
    let criteria = criteria.return_all();
    Ok(wait_until(page, &criteria, options).await?.into_elements())
}

/// Wait for a unique visible match, then click it.
///
/// The click runs inside the poll tick as the post-match action, so an
/// element going stale between find and click is retried like any other
/// transient tick.
pub async fn click_element<D: PageDriver>(
    page: &D,
    criteria: ElementCriteria<D>,
    options: &WaitOptions,
) -> EsperarResult<D::Element> {
    let selector = criteria.selector().clone();
    let element = wait_for_first(page, &criteria.with_action(Click), options).await?;
    tracing::info!(selector = %selector, "clicked element");
    Ok(element)
}

/// Wait for a unique visible match, clear it, then type `value` into it.
///
/// The control is clicked first (same retry loop as [`click_element`]), the
/// existing content is cleared by an explicit script-based clear (the native
/// clear primitive is unreliable against controlled inputs), and the new
/// value is typed.
pub async fn set_element_value<D: PageDriver>(
    page: &D,
    criteria: ElementCriteria<D>,
    value: &str,
    options: &WaitOptions,
) -> EsperarResult<D::Element> {
    let selector = criteria.selector().clone();
    let element = click_element(page, criteria, options).await?;
    page.clear_value(&element).await?;
    page.type_text(&element, value).await?;
    tracing::info!(selector = %selector, "set element value");
    Ok(element)
}

/// Navigate the page and surface failures with the URL in the message
pub async fn go_to_url<D: PageDriver>(page: &D, url: &str) -> EsperarResult<()> {
    tracing::info!(url, "navigating");
    page.goto(url).await.map_err(|err| EsperarError::Navigation {
        url: url.to_string(),
        message: err.to_string(),
    })
}

/// Shorthand: criteria for a unique visible element matching `selector`
#[must_use]
pub fn element<D: PageDriver>(selector: impl Into<Selector>) -> ElementCriteria<D> {
    ElementCriteria::new(selector.into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::{MockElementSpec, MockPage};
    use std::time::Duration;

    fn quick() -> WaitOptions {
        WaitOptions::new()
            .with_timeout(Duration::from_millis(500))
            .with_poll_interval(Duration::from_millis(25))
    }

    #[tokio::test]
    async fn test_get_element_returns_unique_match() {
        let page = MockPage::new();
        page.add_element(MockElementSpec::new("#productTitle").text("Teacup, 6oz"));
        let found = get_element(&page, element("#productTitle"), &quick())
            .await
            .unwrap();
        assert_eq!(page.text_of(&found), "Teacup, 6oz");
    }

    #[tokio::test]
    async fn test_get_element_times_out_with_diagnosable_message() {
        let page = MockPage::new();
        let err = get_element(&page, element("#missing").with_text("gone"), &quick())
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("#missing"));
        assert!(message.contains("gone"));
    }

    #[tokio::test]
    async fn test_get_elements_is_idempotent_on_static_page() {
        let page = MockPage::new();
        for n in 0..4 {
            page.add_element(MockElementSpec::new(".sc-product-title").text(format!("item {n}")));
        }
        let first = get_elements(&page, element(".sc-product-title"), &quick())
            .await
            .unwrap();
        let second = get_elements(&page, element(".sc-product-title"), &quick())
            .await
            .unwrap();
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
        let texts: Vec<_> = first.iter().map(|e| page.text_of(e)).collect();
        assert_eq!(texts, vec!["item 0", "item 1", "item 2", "item 3"]);
    }

    #[tokio::test]
    async fn test_click_element_retries_through_staleness() {
        let page = MockPage::new();
        page.add_element(MockElementSpec::new("#nav-cart").failing_clicks(2));
        click_element(&page, element("#nav-cart"), &quick())
            .await
            .unwrap();
        assert_eq!(page.click_count("#nav-cart"), 1);
    }

    #[tokio::test]
    async fn test_set_element_value_clears_before_typing() {
        let page = MockPage::new();
        page.add_element(
            MockElementSpec::new("#email").value("stale@example.com"),
        );
        set_element_value(&page, element("#email"), "fresh@example.com", &quick())
            .await
            .unwrap();
        assert_eq!(page.value_of("#email"), "fresh@example.com");
        // The control was clicked as part of the same wait.
        assert_eq!(page.click_count("#email"), 1);
    }

    #[tokio::test]
    async fn test_go_to_url_maps_navigation_failure() {
        let page = MockPage::new();
        page.fail_navigation("connection refused");
        let err = go_to_url(&page, "https://www.example.com/").await.unwrap_err();
        match err {
            EsperarError::Navigation { url, message } => {
                assert_eq!(url, "https://www.example.com/");
                assert!(message.contains("connection refused"));
            }
            other => panic!("expected Navigation, got {other:?}"),
        }
    }
}
