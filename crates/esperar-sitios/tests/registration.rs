//! Individual-registration suite: the form fills cleanly and a weak
//! password surfaces the site's warning banner.

use std::time::Duration;

use esperar::mock::{MockElement, MockElementSpec, MockPage};
use esperar::{
    click_element, get_element, tracing_support, until_visible, ElementCriteria, PageDriver,
    WaitOptions,
};
use esperar_sitios::flows::signup::{fill_individual_form, IndividualForm};
use esperar_sitios::selectors::signup::{
    CHECKBOX, EMAIL, FIRSTNAME, LASTNAME, PASSWORD, PWD_WARNING, REGISTER_BTN,
};

fn options() -> WaitOptions {
    WaitOptions::new()
        .with_timeout(Duration::from_millis(2000))
        .with_poll_interval(Duration::from_millis(25))
}

fn registration_page() -> (MockPage, MockElement) {
    let page = MockPage::new();
    page.add_element(MockElementSpec::new(FIRSTNAME));
    page.add_element(MockElementSpec::new(LASTNAME));
    page.add_element(MockElementSpec::new(EMAIL));
    page.add_element(MockElementSpec::new(PASSWORD));
    // The agreement checkbox is styled off-screen on this form.
    page.add_element(MockElementSpec::new(CHECKBOX).hidden_from_view());
    let register = page.add_element(
        MockElementSpec::new(REGISTER_BTN)
            .text("REGISTER")
            .disabled(),
    );
    (page, register)
}

#[tokio::test]
async fn form_fills_every_field_and_checks_agreement() {
    tracing_support::init();
    let (page, _register) = registration_page();
    let form = IndividualForm::new("marisa", "vega", "marisa.vega3@gmail.com", "wqkcd123");

    fill_individual_form(&page, &form, true, &options())
        .await
        .unwrap();

    assert_eq!(page.value_of(FIRSTNAME), "marisa");
    assert_eq!(page.value_of(LASTNAME), "vega");
    assert_eq!(page.value_of(EMAIL), "marisa.vega3@gmail.com");
    assert_eq!(page.value_of(PASSWORD), "wqkcd123");
    assert_eq!(page.click_count(CHECKBOX), 1);
}

#[tokio::test]
async fn register_button_starts_disabled() {
    tracing_support::init();
    let (page, _register) = registration_page();

    let button = get_element(&page, ElementCriteria::new(REGISTER_BTN), &options())
        .await
        .unwrap();
    assert!(!page.is_enabled(&button).await.unwrap());
}

#[tokio::test]
async fn simple_password_shows_warning() {
    tracing_support::init();
    let expected_warning = "Your password entered is not allowed because it is too simple";

    let (page, register) = registration_page();
    let warning = page.add_element(
        MockElementSpec::new(PWD_WARNING)
            .text(expected_warning)
            .hidden_until_revealed(),
    );
    page.reveal_on_click(&register, &warning);

    let form = IndividualForm::new("marisa", "vega", "marisavega@gmail.com", "Password1");
    fill_individual_form(&page, &form, true, &options())
        .await
        .unwrap();

    click_element(&page, ElementCriteria::new(REGISTER_BTN), &options())
        .await
        .unwrap();

    let banner = until_visible(&page, PWD_WARNING, &options()).await.unwrap();
    assert_eq!(page.text_of(&banner), expected_warning);
}
