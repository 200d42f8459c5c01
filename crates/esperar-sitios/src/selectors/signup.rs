//! CSS selectors for the individual-registration page.

/// First-name field
pub const FIRSTNAME: &str = "#firstname";
/// Last-name field
pub const LASTNAME: &str = "#lastname";
/// Email field
pub const EMAIL: &str = "#email";
/// Password field
pub const PASSWORD: &str = "#password";
/// Register submit button
pub const REGISTER_BTN: &str = "button[data-component-identifier]";
/// Terms-agreement checkbox
pub const CHECKBOX: &str = "[type='checkbox']";
/// Banner shown when the chosen password is rejected
pub const PWD_WARNING: &str = "[data-component-identifier='wm-message-banner-text']";
