//! Shared page fixture: navigate, confirm the title, dismiss pop-ups.

use esperar::{
    click_element, go_to_url, until_page_title_is, until_visible, ElementCriteria, EsperarResult,
    PageDriver, WaitOptions,
};

/// A page the suites open repeatedly: its URL, the title that confirms the
/// load finished, and an optional pop-up to dismiss on arrival.
#[derive(Debug, Clone)]
pub struct PageSpec {
    /// Page URL
    pub url: String,
    /// Expected document title once loaded
    pub title: String,
    /// Selector for a pop-up to close after navigating, if any
    pub popup: Option<String>,
}

impl PageSpec {
    /// Describe a page by URL and expected title
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            popup: None,
        }
    }

    /// Dismiss the element matching `selector` after navigating
    #[must_use]
    pub fn with_popup(mut self, selector: impl Into<String>) -> Self {
        self.popup = Some(selector.into());
        self
    }
}

/// Navigate to the page, wait for its title, and close any pop-up it shows.
pub async fn open_url<D: PageDriver>(
    page: &D,
    spec: &PageSpec,
    options: &WaitOptions,
) -> EsperarResult<()> {
    go_to_url(page, &spec.url).await?;
    until_page_title_is(page, spec.title.as_str(), options).await?;

    if let Some(popup) = &spec.popup {
        until_visible(page, popup.as_str(), options).await?;
        click_element(page, ElementCriteria::new(popup.as_str()), options).await?;
    }
    Ok(())
}
