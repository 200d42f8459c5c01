//! Element-matching criteria and the condition evaluator.
//!
//! An [`ElementCriteria`] describes what counts as "found": a locator, an
//! optional required text substring, a visibility requirement, and optional
//! strategy slots for a custom filter and a post-match action. One call to
//! [`ElementCriteria::evaluate`] is one poll tick; it never sleeps and never
//! retries; cadence belongs to [`crate::wait::wait_until`].

use async_trait::async_trait;

use crate::driver::{DriverResult, PageDriver};
use crate::locator::Selector;
use crate::result::{EsperarError, EsperarResult};

/// Outcome of one evaluation tick. Produced fresh each tick, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResult<E> {
    /// No element currently satisfies the criteria
    NoMatch,
    /// Exactly one element satisfies the criteria
    SingleMatch(E),
    /// Two or more elements satisfy the criteria (uniqueness not required)
    MultipleMatches(Vec<E>),
    /// A stale handle or driver hiccup interrupted the tick; retry
    Transient,
}

impl<E> PollResult<E> {
    /// Whether this tick satisfied the condition
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::SingleMatch(_) | Self::MultipleMatches(_))
    }

    /// The matched elements, in document order; empty for non-matches
    #[must_use]
    pub fn into_elements(self) -> Vec<E> {
        match self {
            Self::SingleMatch(element) => vec![element],
            Self::MultipleMatches(elements) => elements,
            Self::NoMatch | Self::Transient => Vec::new(),
        }
    }
}

/// Custom element filter: the `Filter(Element) -> bool` capability slot.
///
/// Implemented as a strategy trait rather than a closure so filters can
/// carry state and be named in logs. Driver errors raised here are treated
/// as transient for the tick.
#[async_trait]
pub trait ElementPredicate<D: PageDriver>: Send + Sync {
    /// Whether the element satisfies this predicate
    async fn matches(&self, page: &D, element: &D::Element) -> DriverResult<bool>;
}

/// Post-match callback: the `OnMatch(Element) -> Result` capability slot.
///
/// Runs inside the tick on the effective match, so a staleness race between
/// finding and acting is absorbed by the same retry loop.
#[async_trait]
pub trait ElementAction<D: PageDriver>: Send + Sync {
    /// Perform the action against the matched element
    async fn run(&self, page: &D, element: &D::Element) -> DriverResult<()>;
}

/// Predicate: a DOM property equals an expected string exactly.
///
/// Used by the page-title wait, where the element is never "visible" and the
/// comparison must be equality on `textContent`, not containment.
#[derive(Debug, Clone)]
pub struct TextEquals {
    property: String,
    expected: String,
}

impl TextEquals {
    /// Compare `property` against `expected`
    #[must_use]
    pub fn new(property: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            expected: expected.into(),
        }
    }
}

#[async_trait]
impl<D: PageDriver> ElementPredicate<D> for TextEquals {
    async fn matches(&self, page: &D, element: &D::Element) -> DriverResult<bool> {
        let actual = page.property_string(element, &self.property).await?;
        Ok(actual == self.expected)
    }
}

/// Action: click the matched element
#[derive(Debug, Clone, Copy, Default)]
pub struct Click;

#[async_trait]
impl<D: PageDriver> ElementAction<D> for Click {
    async fn run(&self, page: &D, element: &D::Element) -> DriverResult<()> {
        page.click(element).await
    }
}

/// What counts as "found": locator plus text/visibility/predicate
/// constraints, uniqueness policy, and an optional post-match action.
pub struct ElementCriteria<D: PageDriver> {
    selector: Selector,
    text: String,
    must_be_visible: bool,
    require_single: bool,
    return_all: bool,
    predicate: Option<Box<dyn ElementPredicate<D>>>,
    action: Option<Box<dyn ElementAction<D>>>,
}

impl<D: PageDriver> std::fmt::Debug for ElementCriteria<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementCriteria")
            .field("selector", &self.selector)
            .field("text", &self.text)
            .field("must_be_visible", &self.must_be_visible)
            .field("require_single", &self.require_single)
            .field("return_all", &self.return_all)
            .finish_non_exhaustive()
    }
}

impl<D: PageDriver> ElementCriteria<D> {
    /// Criteria for a unique, visible element matching the selector
    #[must_use]
    pub fn new(selector: impl Into<Selector>) -> Self {
        Self {
            selector: selector.into(),
            text: String::new(),
            must_be_visible: true,
            require_single: true,
            return_all: false,
            predicate: None,
            action: None,
        }
    }

    /// Require the element's visible text to contain `text`
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set whether matches must be visible (default: true)
    #[must_use]
    pub fn visible(mut self, must_be_visible: bool) -> Self {
        self.must_be_visible = must_be_visible;
        self
    }

    /// Set whether more than one satisfying element is an error (default: true)
    #[must_use]
    pub fn require_single(mut self, require_single: bool) -> Self {
        self.require_single = require_single;
        self
    }

    /// Return every survivor instead of the first; implies no uniqueness
    /// requirement
    #[must_use]
    pub fn return_all(mut self) -> Self {
        self.return_all = true;
        self.require_single = false;
        self
    }

    /// Attach a custom filter predicate
    #[must_use]
    pub fn with_predicate<P: ElementPredicate<D> + 'static>(mut self, predicate: P) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Attach a post-match action, run inside the tick on the effective match
    #[must_use]
    pub fn with_action<A: ElementAction<D> + 'static>(mut self, action: A) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    /// The criteria's selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Human-readable description used in timeout and ambiguity messages
    #[must_use]
    pub fn describe(&self) -> String {
        let mut description = format!("element matching {}", self.selector);
        if !self.text.is_empty() {
            description.push_str(&format!(" containing text `{}`", self.text));
        }
        description
    }

    /// Evaluate the criteria against the current page state.
    ///
    /// One tick: query, filter, classify. Driver errors anywhere in the tick
    /// (including inside the predicate or the post-match action) yield
    /// [`PollResult::Transient`]. An over-matched unique requirement is the
    /// only terminal failure produced here.
    pub async fn evaluate(&self, page: &D) -> EsperarResult<PollResult<D::Element>> {
        let candidates = match page.find_all(&self.selector).await {
            Ok(elements) => elements,
            Err(err) => {
                tracing::debug!(selector = %self.selector, error = %err, "query failed; retrying");
                return Ok(PollResult::Transient);
            }
        };

        let mut survivors = Vec::new();
        for element in candidates {
            match self.test_element(page, &element).await {
                Ok(true) => survivors.push(element),
                Ok(false) => {}
                Err(err) => {
                    tracing::debug!(selector = %self.selector, error = %err, "filter failed; retrying");
                    return Ok(PollResult::Transient);
                }
            }
        }

        if survivors.is_empty() {
            return Ok(PollResult::NoMatch);
        }

        if self.return_all && survivors.len() > 1 {
            return Ok(PollResult::MultipleMatches(survivors));
        }

        if survivors.len() > 1 && self.require_single {
            return Err(EsperarError::AmbiguousMatch {
                condition: self.describe(),
            });
        }

        // The effective match is the first survivor in document order.
        if let Some(action) = &self.action {
            if let Some(first) = survivors.first() {
                if let Err(err) = action.run(page, first).await {
                    tracing::debug!(selector = %self.selector, error = %err, "post-match action failed; retrying");
                    return Ok(PollResult::Transient);
                }
            }
        }

        if survivors.len() == 1 {
            match survivors.pop() {
                Some(element) => Ok(PollResult::SingleMatch(element)),
                None => Ok(PollResult::NoMatch),
            }
        } else {
            Ok(PollResult::MultipleMatches(survivors))
        }
    }

    async fn test_element(&self, page: &D, element: &D::Element) -> DriverResult<bool> {
        if self.must_be_visible && !page.is_displayed(element).await? {
            return Ok(false);
        }
        if !self.text.is_empty() && !page.text(element).await?.contains(&self.text) {
            return Ok(false);
        }
        if let Some(predicate) = &self.predicate {
            if !predicate.matches(page, element).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
