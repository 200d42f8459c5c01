//! Individual-registration flows.

use esperar::{
    click_element, set_element_value, ElementCriteria, EsperarResult, PageDriver, WaitOptions,
};

use crate::selectors::signup::{CHECKBOX, EMAIL, FIRSTNAME, LASTNAME, PASSWORD};

/// Values for the individual registration form
#[derive(Debug, Clone, Default)]
pub struct IndividualForm {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

impl IndividualForm {
    /// Build a form value set
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Fill the individual registration form, optionally checking the
/// agreement checkbox.
///
/// The checkbox is styled off-screen on this form, so it is clicked without
/// the visibility requirement.
pub async fn fill_individual_form<D: PageDriver>(
    page: &D,
    form: &IndividualForm,
    check_agreement: bool,
    options: &WaitOptions,
) -> EsperarResult<()> {
    let fields = [
        (FIRSTNAME, form.first_name.as_str()),
        (LASTNAME, form.last_name.as_str()),
        (EMAIL, form.email.as_str()),
        (PASSWORD, form.password.as_str()),
    ];
    for (selector, value) in fields {
        set_element_value(page, ElementCriteria::new(selector), value, options).await?;
    }

    if check_agreement {
        click_element(
            page,
            ElementCriteria::new(CHECKBOX).visible(false),
            options,
        )
        .await?;
    }
    Ok(())
}
