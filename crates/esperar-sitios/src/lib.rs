//! Site suites for esperar.
//!
//! Everything here is declarative glue over the `esperar` engine: CSS
//! selector constants per site, flow helpers composed from the action
//! dispatcher, and the page fixture the suites share. The flows are generic
//! over [`esperar::PageDriver`], so the same code runs against a scripted
//! [`esperar::MockPage`] in CI and a live chromium behind the `browser`
//! feature.

pub mod fixture;
pub mod flows;
pub mod selectors;

pub use fixture::{open_url, PageSpec};
