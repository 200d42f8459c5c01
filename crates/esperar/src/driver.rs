//! Abstract page-driver trait.
//!
//! Every wait, scroll, and action in the crate talks to the live page
//! through [`PageDriver`], so the polling engine can run against the real
//! CDP session (`browser::CdpPage`) or the in-memory [`crate::mock::MockPage`]
//! without changing a line of engine code.
//!
//! The trait deliberately exposes low-level primitives (query all, read one
//! property, dispatch one wheel event) rather than composite operations:
//! composites belong to the evaluator and dispatcher, where retry semantics
//! are decided.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::locator::Selector;

/// Result type for driver-level operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors raised by a page driver while touching the live page.
///
/// All variants are treated as transient by the condition evaluator: a stale
/// handle or a momentary transport hiccup means "try again next tick", never
/// a test failure. Only code outside the retry loop (navigation, post-find
/// typing) converts these into terminal [`crate::EsperarError`] values.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The element handle no longer refers to a live DOM node
    #[error("stale element reference")]
    StaleElement,

    /// Communication with the browser session failed
    #[error("driver transport error: {0}")]
    Transport(String),

    /// A page-side script snippet failed to evaluate
    #[error("script evaluation failed: {0}")]
    Script(String),
}

/// Axis-aligned bounding rectangle in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A live page session capable of element queries, reads, and input.
///
/// One driver instance corresponds to one browser page; the engine assumes a
/// single caller drives it at a time (one test thread owns one session), so
/// implementations need no internal locking beyond what their transport
/// requires.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Element handle type; cheap to clone, may go stale between calls
    type Element: Clone + Send + Sync;

    /// Query all elements currently matching the selector, in document order
    async fn find_all(&self, selector: &Selector) -> DriverResult<Vec<Self::Element>>;

    /// Whether the element is rendered and visible to a user
    async fn is_displayed(&self, element: &Self::Element) -> DriverResult<bool>;

    /// The element's visible text
    async fn text(&self, element: &Self::Element) -> DriverResult<String>;

    /// Read a string-valued DOM property (e.g. `textContent`, `value`)
    async fn property_string(&self, element: &Self::Element, name: &str) -> DriverResult<String>;

    /// Read a numeric DOM property (e.g. `scrollTop`, `clientHeight`)
    async fn property_f64(&self, element: &Self::Element, name: &str) -> DriverResult<f64>;

    /// The element's bounding rectangle in viewport coordinates
    async fn rect(&self, element: &Self::Element) -> DriverResult<Rect>;

    /// Whether the element accepts interaction (not `disabled`)
    async fn is_enabled(&self, element: &Self::Element) -> DriverResult<bool>;

    /// Click the element
    async fn click(&self, element: &Self::Element) -> DriverResult<()>;

    /// Clear the element's value by setting the underlying DOM property to
    /// the empty string. Implementations must not rely on a native "clear"
    /// primitive; the script-based clear is the contract.
    async fn clear_value(&self, element: &Self::Element) -> DriverResult<()>;

    /// Type text into the element
    async fn type_text(&self, element: &Self::Element, text: &str) -> DriverResult<()>;

    /// Press a named key (e.g. `Enter`) with the element focused
    async fn press_key(&self, element: &Self::Element, key: &str) -> DriverResult<()>;

    /// Dispatch a synthetic bubbling wheel event against the element, so
    /// listeners bound to real user scrolling fire identically
    async fn wheel(&self, element: &Self::Element, delta_x: f64, delta_y: f64)
        -> DriverResult<()>;

    /// Yield until the page has had a chance to repaint
    async fn await_repaint(&self) -> DriverResult<()>;

    /// Navigate the page to a URL
    async fn goto(&self, url: &str) -> DriverResult<()>;

    /// The current document title
    async fn title(&self) -> DriverResult<String>;

    /// The current URL
    async fn current_url(&self) -> DriverResult<String>;
}
