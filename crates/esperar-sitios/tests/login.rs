//! Login suite: credentials are entered, the form is submitted, and the
//! flow waits for the logged-in landing page.

use std::time::Duration;

use esperar::mock::{MockElementSpec, MockPage};
use esperar::{tracing_support, EsperarError, WaitOptions};
use esperar_sitios::flows::auth;
use esperar_sitios::selectors::auth::{LOGIN_BUTTON, PASSWORD_INPUT, USERNAME_INPUT};

fn options() -> WaitOptions {
    WaitOptions::new()
        .with_timeout(Duration::from_millis(2000))
        .with_poll_interval(Duration::from_millis(25))
}

fn login_page() -> MockPage {
    let page = MockPage::new();
    page.title_for_url(&auth::login_url(), auth::LOGIN_PAGE_TITLE);
    page.add_element(MockElementSpec::new(USERNAME_INPUT));
    page.add_element(MockElementSpec::new(PASSWORD_INPUT));
    page
}

#[tokio::test]
async fn login_submits_credentials_and_reaches_landing_page() {
    tracing_support::init();
    let page = login_page();
    let submit = page.add_element(MockElementSpec::new(LOGIN_BUTTON).text("Log in"));
    page.title_on_click(&submit, auth::LOGGED_IN_PAGE_TITLE);

    auth::login(&page, "test", "test", &options()).await.unwrap();

    assert_eq!(page.value_of(USERNAME_INPUT), "test");
    assert_eq!(page.value_of(PASSWORD_INPUT), "test");
    assert_eq!(page.click_count(LOGIN_BUTTON), 1);
}

#[tokio::test]
async fn login_times_out_when_landing_page_never_loads() {
    tracing_support::init();
    let page = login_page();
    // Submit works, but the title never changes: bad credentials.
    page.add_element(MockElementSpec::new(LOGIN_BUTTON).text("Log in"));

    let err = auth::login(&page, "test", "wrong", &options())
        .await
        .unwrap_err();
    match err {
        EsperarError::Timeout { condition, .. } => {
            assert!(condition.contains("title"));
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
}
