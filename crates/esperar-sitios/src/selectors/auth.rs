//! CSS selectors for the login page.

/// Username field
pub const USERNAME_INPUT: &str = "input[name='username']";
/// Password field
pub const PASSWORD_INPUT: &str = "input[name='password']";
/// Login submit button
pub const LOGIN_BUTTON: &str = "button[type='submit']";
