//! Esperar: condition polling for browser UI tests.
//!
//! Esperar (Spanish: "to wait") is the synchronization core of a browser
//! test suite: element criteria evaluated against a live page, a
//! fixed-cadence poller with explicit deadlines, a scroll-into-view search
//! with wrap-around, and click/type dispatch that absorbs find-then-act
//! staleness races.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  actions: get_element / get_elements / click / set_value        │
//! │  wait:    until_visible / until_page_title_is                   │
//! │  scroll:  scroll_until_visible                                  │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  wait::wait_until, the single polling loop everything funnels   │
//! │  through (fixed cadence, wall-clock deadline, transient retry)  │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  criteria::ElementCriteria · scroll::ScrolledIntoView           │
//! │  (one tick = query, filter, classify)                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  driver::PageDriver  ──►  browser::CdpPage (chromium, feature   │
//! │                           `browser`) · mock::MockPage (tests)   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure a test sees is typed ([`EsperarError`]) and carries the
//! locator and required text, so a red run is diagnosable without
//! re-running.

#![warn(missing_docs)]
// Lints are configured in the workspace Cargo.toml [workspace.lints] tables.

pub mod actions;
#[cfg(feature = "browser")]
pub mod browser;
pub mod criteria;
pub mod driver;
pub mod locator;
pub mod mock;
pub mod result;
pub mod scroll;
pub mod tracing_support;
pub mod wait;

pub use actions::{click_element, get_element, get_elements, go_to_url, set_element_value};
#[cfg(feature = "browser")]
pub use browser::{Browser, BrowserConfig, CdpPage};
pub use criteria::{Click, ElementAction, ElementCriteria, ElementPredicate, PollResult, TextEquals};
pub use driver::{DriverError, DriverResult, PageDriver, Rect};
pub use locator::Selector;
pub use mock::{MockElement, MockElementSpec, MockPage};
pub use result::{EsperarError, EsperarResult};
pub use scroll::{scroll_until_visible, Axis, ScrolledIntoView};
pub use wait::{
    until_page_title_is, until_visible, wait_until, PollCondition, WaitOptions,
    DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT,
};
