//! Login flows.

use esperar::{
    click_element, go_to_url, set_element_value, until_page_title_is, ElementCriteria,
    EsperarResult, PageDriver, WaitOptions,
};

use crate::selectors::auth::{LOGIN_BUTTON, PASSWORD_INPUT, USERNAME_INPUT};

/// Site host for the authenticated suites
pub const HOST: &str = "http://www.basesite.com/";

/// Title of the login page once it has loaded
pub const LOGIN_PAGE_TITLE: &str = "Login page name";

/// Title of the landing page after a successful login
pub const LOGGED_IN_PAGE_TITLE: &str = "Logged in page name";

/// The login page URL
#[must_use]
pub fn login_url() -> String {
    format!("{HOST}login")
}

/// Log in with the given credentials and wait for the landing page.
pub async fn login<D: PageDriver>(
    page: &D,
    username: &str,
    password: &str,
    options: &WaitOptions,
) -> EsperarResult<()> {
    tracing::info!(username, "logging in");
    go_to_url(page, &login_url()).await?;
    until_page_title_is(page, LOGIN_PAGE_TITLE, options).await?;

    set_element_value(page, ElementCriteria::new(USERNAME_INPUT), username, options).await?;
    set_element_value(page, ElementCriteria::new(PASSWORD_INPUT), password, options).await?;
    click_element(page, ElementCriteria::new(LOGIN_BUTTON), options).await?;

    until_page_title_is(page, LOGGED_IN_PAGE_TITLE, options).await?;
    Ok(())
}
