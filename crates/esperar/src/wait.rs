//! The polling engine.
//!
//! Every "wait for X", "click X", and "type into X" in the crate funnels
//! through [`wait_until`]: a fixed-cadence loop that re-evaluates a
//! [`PollCondition`] until it matches or the deadline elapses. Ticks are
//! cooperative and never overlap: one blocking evaluation, then a sleep.
//! Cancellation is deadline-based only: an in-flight tick always completes.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::criteria::{ElementCriteria, PollResult, TextEquals};
use crate::driver::PageDriver;
use crate::locator::Selector;
use crate::result::{EsperarError, EsperarResult};

/// Default timeout for wait operations (60 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default polling interval (250ms)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Timeout and cadence for one wait.
///
/// There is no hidden page-global timeout: options are threaded explicitly
/// through every call, and the defaults apply only where the caller passes
/// [`WaitOptions::default`].
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Maximum wall-clock time to keep polling
    pub timeout: Duration,
    /// Fixed pause between poll ticks
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// A condition the poller can re-evaluate each tick.
///
/// [`ElementCriteria`] is the workhorse implementation;
/// [`crate::scroll::ScrolledIntoView`] adds the scroll-then-look variant.
#[async_trait]
pub trait PollCondition<D: PageDriver>: Send + Sync {
    /// Evaluate the condition once against the current page state
    async fn poll(&self, page: &D) -> EsperarResult<PollResult<D::Element>>;

    /// Description for timeout diagnostics (locator, required text)
    fn describe(&self) -> String;
}

#[async_trait]
impl<D: PageDriver> PollCondition<D> for ElementCriteria<D> {
    async fn poll(&self, page: &D) -> EsperarResult<PollResult<D::Element>> {
        self.evaluate(page).await
    }

    fn describe(&self) -> String {
        Self::describe(self)
    }
}

/// Poll `condition` at a fixed cadence until it matches or `options.timeout`
/// elapses.
///
/// Returns the first matching [`PollResult`] (always `SingleMatch` or
/// `MultipleMatches`). `NoMatch` and `Transient` ticks are retried
/// identically. Terminal failures from the condition (an ambiguous unique
/// match, a configuration error) propagate immediately and are never
/// retried. On deadline the error names the condition so the failure is
/// diagnosable without re-running.
pub async fn wait_until<D, C>(
    page: &D,
    condition: &C,
    options: &WaitOptions,
) -> EsperarResult<PollResult<D::Element>>
where
    D: PageDriver,
    C: PollCondition<D> + ?Sized,
{
    let start = Instant::now();
    let mut tick: u32 = 0;

    loop {
        let result = condition.poll(page).await?;
        if result.is_match() {
            tracing::debug!(
                condition = %condition.describe(),
                tick,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "condition satisfied"
            );
            return Ok(result);
        }

        if start.elapsed() >= options.timeout {
            return Err(EsperarError::Timeout {
                condition: condition.describe(),
                ms: options.timeout.as_millis() as u64,
            });
        }

        tick += 1;
        tokio::time::sleep(options.poll_interval).await;
    }
}

/// Poll `condition` and return the effective match: the first element in
/// document order.
pub(crate) async fn wait_for_first<D, C>(
    page: &D,
    condition: &C,
    options: &WaitOptions,
) -> EsperarResult<D::Element>
where
    D: PageDriver,
    C: PollCondition<D>,
{
    let mut elements = wait_until(page, condition, options).await?.into_elements();
    if elements.is_empty() {
        return Err(EsperarError::Page {
            message: format!("poller yielded no element for {}", condition.describe()),
        });
    }
    Ok(elements.remove(0))
}

/// Wait until any element matching `selector` is visible.
///
/// No uniqueness requirement: the first visible match is returned, which is
/// the right default for "has the results pane shown up yet" checks.
pub async fn until_visible<D: PageDriver>(
    page: &D,
    selector: impl Into<Selector>,
    options: &WaitOptions,
) -> EsperarResult<D::Element> {
    let criteria = ElementCriteria::new(selector.into()).require_single(false);
    wait_for_first(page, &criteria, options).await
}

/// Wait until the document title equals `expected`.
///
/// The `<title>` element is never visible, so the visibility requirement is
/// dropped and the comparison runs on the `textContent` property.
pub async fn until_page_title_is<D: PageDriver>(
    page: &D,
    expected: impl Into<String>,
    options: &WaitOptions,
) -> EsperarResult<()> {
    let expected = expected.into();
    let criteria = ElementCriteria::new("title")
        .visible(false)
        .with_predicate(TextEquals::new("textContent", expected.clone()));
    wait_until(page, &criteria, options).await.map_err(|err| match err {
        EsperarError::Timeout { ms, .. } => EsperarError::Timeout {
            condition: format!("page title to equal `{expected}`"),
            ms,
        },
        other => other,
    })?;
    Ok(())
}
