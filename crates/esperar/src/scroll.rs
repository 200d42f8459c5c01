//! Scroll-into-view polling.
//!
//! [`ScrolledIntoView`] is a [`PollCondition`] for targets that may exist in
//! the DOM but sit outside the visible band of a scrollable container. Each
//! tick it looks for a match inside the container's current viewport; when
//! nothing qualifies it advances the scroll position before the next tick:
//! stepwise in the travel direction, or with a single wrap-around jump to
//! the opposite extreme once the container can scroll no further. The
//! wrap-around is what keeps the search from stalling forever when the
//! target is behind the scroll position rather than ahead of it.
//!
//! All scrolling is dispatched as a synthetic bubbling wheel event, so
//! listeners bound to real user scrolling fire identically, and every scroll
//! is followed by a repaint yield before the next evaluation.

use async_trait::async_trait;

use crate::criteria::PollResult;
use crate::driver::{DriverResult, PageDriver, Rect};
use crate::locator::Selector;
use crate::result::{EsperarError, EsperarResult};
use crate::wait::{wait_for_first, PollCondition, WaitOptions};

/// Scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Scroll up/down (`scrollTop` axis)
    Vertical,
    /// Scroll left/right (`scrollLeft` axis)
    Horizontal,
}

impl Axis {
    /// DOM property holding the current scroll offset
    #[must_use]
    pub const fn scroll_position(self) -> &'static str {
        match self {
            Self::Vertical => "scrollTop",
            Self::Horizontal => "scrollLeft",
        }
    }

    /// DOM property holding the total scrollable extent
    #[must_use]
    pub const fn scroll_extent(self) -> &'static str {
        match self {
            Self::Vertical => "scrollHeight",
            Self::Horizontal => "scrollWidth",
        }
    }

    /// DOM property holding the visible extent
    #[must_use]
    pub const fn viewport_extent(self) -> &'static str {
        match self {
            Self::Vertical => "clientHeight",
            Self::Horizontal => "clientWidth",
        }
    }
}

/// Largest wheel delta a page-side script can express exactly
/// (`Number.MAX_SAFE_INTEGER`); one event of this size lands the container
/// at its extreme.
pub const MAX_SCROLL_DELTA: f64 = 9_007_199_254_740_991.0;

/// Whether `child` lies within `container`'s band along `axis`.
///
/// This replaces the plain visibility test while hunting inside a scroll
/// region: a child can be "displayed" by CSS yet sit outside the band.
pub(crate) fn within_band(axis: Axis, container: &Rect, child: &Rect) -> bool {
    match axis {
        Axis::Vertical => child.y >= container.y && child.bottom() <= container.bottom(),
        Axis::Horizontal => child.x >= container.x && child.right() <= container.right(),
    }
}

/// Condition: a matching element has scrolled into the container's viewport.
pub struct ScrolledIntoView<D: PageDriver> {
    container: D::Element,
    selector: Selector,
    text: String,
    delta_px: f64,
    axis: Axis,
}

impl<D: PageDriver> std::fmt::Debug for ScrolledIntoView<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrolledIntoView")
            .field("selector", &self.selector)
            .field("text", &self.text)
            .field("delta_px", &self.delta_px)
            .field("axis", &self.axis)
            .finish_non_exhaustive()
    }
}

impl<D: PageDriver> ScrolledIntoView<D> {
    /// Build the condition.
    ///
    /// A zero-pixel step cannot make progress, so it is rejected here,
    /// before any polling tick, with [`EsperarError::InvalidScrollStep`].
    pub fn new(
        container: D::Element,
        selector: impl Into<Selector>,
        delta_px: f64,
        axis: Axis,
    ) -> EsperarResult<Self> {
        if delta_px == 0.0 {
            return Err(EsperarError::InvalidScrollStep);
        }
        Ok(Self {
            container,
            selector: selector.into(),
            text: String::new(),
            delta_px,
            axis,
        })
    }

    /// Require the target's visible text to contain `text`
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    async fn find_within_viewport(&self, page: &D) -> DriverResult<Option<D::Element>> {
        let container_rect = page.rect(&self.container).await?;
        let candidates = page.find_all(&self.selector).await?;
        for element in candidates {
            if !page.is_displayed(&element).await? {
                continue;
            }
            let rect = page.rect(&element).await?;
            if !within_band(self.axis, &container_rect, &rect) {
                continue;
            }
            if !self.text.is_empty() && !page.text(&element).await?.contains(&self.text) {
                continue;
            }
            return Ok(Some(element));
        }
        Ok(None)
    }

    /// Is the container scrolled as far as it can go in the travel
    /// direction?
    async fn at_travel_extreme(&self, page: &D) -> DriverResult<bool> {
        let position = page
            .property_f64(&self.container, self.axis.scroll_position())
            .await?;
        if self.delta_px > 0.0 {
            let extent = page
                .property_f64(&self.container, self.axis.scroll_extent())
                .await?;
            let viewport = page
                .property_f64(&self.container, self.axis.viewport_extent())
                .await?;
            Ok((extent - position).round() as i64 == viewport.round() as i64)
        } else {
            Ok(position.round() as i64 == 0)
        }
    }

    async fn wheel_by(&self, page: &D, delta: f64) -> DriverResult<()> {
        let (delta_x, delta_y) = match self.axis {
            Axis::Vertical => (0.0, delta),
            Axis::Horizontal => (delta, 0.0),
        };
        page.wheel(&self.container, delta_x, delta_y).await?;
        page.await_repaint().await
    }

    /// Advance the scroll position for the next tick: one wrap-around jump
    /// to the opposite extreme if the travel direction is exhausted,
    /// otherwise one step of `delta_px`.
    async fn advance(&self, page: &D) -> DriverResult<()> {
        if self.at_travel_extreme(page).await? {
            let jump = if self.delta_px > 0.0 {
                -MAX_SCROLL_DELTA
            } else {
                MAX_SCROLL_DELTA
            };
            tracing::debug!(selector = %self.selector, "scroll exhausted; jumping to opposite extreme");
            self.wheel_by(page, jump).await
        } else {
            self.wheel_by(page, self.delta_px).await
        }
    }
}

#[async_trait]
impl<D: PageDriver> PollCondition<D> for ScrolledIntoView<D> {
    async fn poll(&self, page: &D) -> EsperarResult<PollResult<D::Element>> {
        match self.find_within_viewport(page).await {
            Ok(Some(element)) => return Ok(PollResult::SingleMatch(element)),
            Ok(None) => {}
            Err(err) => {
                tracing::debug!(selector = %self.selector, error = %err, "viewport scan failed; retrying");
                return Ok(PollResult::Transient);
            }
        }
        match self.advance(page).await {
            Ok(()) => Ok(PollResult::NoMatch),
            Err(err) => {
                tracing::debug!(selector = %self.selector, error = %err, "scroll advance failed; retrying");
                Ok(PollResult::Transient)
            }
        }
    }

    fn describe(&self) -> String {
        let mut description = format!("element matching {} within the scrolled viewport", self.selector);
        if !self.text.is_empty() {
            description.push_str(&format!(" containing text `{}`", self.text));
        }
        description
    }
}

/// Scroll `container` until an element matching `selector` (and containing
/// `text`, when non-empty) is inside its viewport, then return that element.
pub async fn scroll_until_visible<D: PageDriver>(
    page: &D,
    container: &D::Element,
    selector: impl Into<Selector>,
    delta_px: f64,
    text: &str,
    axis: Axis,
    options: &WaitOptions,
) -> EsperarResult<D::Element> {
    let condition =
        ScrolledIntoView::new(container.clone(), selector, delta_px, axis)?.with_text(text);
    wait_for_first(page, &condition, options).await
}
