//! In-memory page driver for testing the engine without a browser.
//!
//! [`MockPage`] models just enough of a live DOM to exercise the real
//! polling, scrolling, and dispatch code paths: per-element visibility and
//! text, timed appearance, staleness and transport-failure injection, scroll
//! containers with wheel-clamped positions, and small reveal/title rules so
//! a scripted page can react to clicks and key presses the way a site under
//! test would.
//!
//! Element matching is by literal selector registration (an element added
//! with `.row` is returned for queries against `.row`), not a CSS engine.
//! That keeps the mock honest: it tests the engine's behavior, not selector
//! parsing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::driver::{DriverError, DriverResult, PageDriver, Rect};
use crate::locator::Selector;
use crate::scroll::Axis;

/// Handle to an element registered on a [`MockPage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockElement {
    id: u64,
}

/// One synthetic wheel event observed by the mock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// The element the event was dispatched against
    pub element: MockElement,
    /// Horizontal delta in pixels
    pub delta_x: f64,
    /// Vertical delta in pixels
    pub delta_y: f64,
}

/// Builder for a mock element
#[derive(Debug, Clone)]
pub struct MockElementSpec {
    selector: String,
    text: String,
    value: String,
    displayed: bool,
    enabled: bool,
    present: bool,
    appears_in: Option<Duration>,
    failing_clicks: u32,
    rect: Rect,
    inside: Option<(u64, f64, f64)>,
}

impl MockElementSpec {
    /// A visible, enabled element matching `selector`
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            text: String::new(),
            value: String::new(),
            displayed: true,
            enabled: true,
            present: true,
            appears_in: None,
            failing_clicks: 0,
            rect: Rect::new(0.0, 0.0, 100.0, 20.0),
            inside: None,
        }
    }

    /// Set the element's visible text
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the element's current value
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Present in the DOM but not visible
    #[must_use]
    pub const fn hidden_from_view(mut self) -> Self {
        self.displayed = false;
        self
    }

    /// Rendered with the `disabled` attribute set
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Absent from the DOM until revealed by a rule
    #[must_use]
    pub const fn hidden_until_revealed(mut self) -> Self {
        self.present = false;
        self
    }

    /// Absent from the DOM until `delay` has elapsed
    #[must_use]
    pub const fn appears_after(mut self, delay: Duration) -> Self {
        self.present = false;
        self.appears_in = Some(delay);
        self
    }

    /// The next `count` clicks fail with a stale-element error
    #[must_use]
    pub const fn failing_clicks(mut self, count: u32) -> Self {
        self.failing_clicks = count;
        self
    }

    /// Fixed bounding rectangle
    #[must_use]
    pub const fn rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Position the element inside a scroll container at `offset` from the
    /// content start, spanning `extent` pixels along the container's axis
    #[must_use]
    pub fn inside(mut self, container: &MockElement, offset: f64, extent: f64) -> Self {
        self.inside = Some((container.id, offset, extent));
        self
    }
}

#[derive(Debug, Clone)]
enum Geometry {
    Fixed(Rect),
    Scrollable {
        axis: Axis,
        viewport: f64,
        content: f64,
        position: f64,
    },
    Inside {
        parent: u64,
        offset: f64,
        extent: f64,
    },
}

#[derive(Debug)]
struct Node {
    selector: String,
    text: String,
    value: String,
    displayed: bool,
    enabled: bool,
    present: bool,
    appears_at: Option<Instant>,
    stale: bool,
    failing_clicks: u32,
    clicks: u32,
    geometry: Geometry,
}

impl Node {
    fn is_present(&self, now: Instant) -> bool {
        self.present || self.appears_at.is_some_and(|at| now >= at)
    }
}

#[derive(Debug, Clone)]
enum ClickEffect {
    Reveal(u64),
    SetTitle(String),
}

#[derive(Debug, Default)]
struct Inner {
    nodes: Vec<Node>,
    wheel_log: Vec<WheelEvent>,
    pressed_keys: Vec<String>,
    click_rules: Vec<(u64, ClickEffect)>,
    key_rules: Vec<(String, u64)>,
    failing_queries: u32,
    navigation_failure: Option<String>,
    url: String,
    titles_by_url: HashMap<String, String>,
}

/// In-memory page: a scripted DOM behind the [`PageDriver`] trait
#[derive(Debug, Clone)]
pub struct MockPage {
    inner: Arc<Mutex<Inner>>,
}

impl Default for MockPage {
    fn default() -> Self {
        Self::new()
    }
}

const TITLE_NODE: u64 = 0;

impl MockPage {
    /// Create an empty page with a blank document title
    #[must_use]
    pub fn new() -> Self {
        let page = Self {
            inner: Arc::new(Mutex::new(Inner::default())),
        };
        // Node 0 is the implicit <title>, present but never displayed.
        page.add_element(MockElementSpec::new("title").hidden_from_view());
        page
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Register an element and return its handle
    pub fn add_element(&self, spec: MockElementSpec) -> MockElement {
        let mut inner = self.lock();
        let id = inner.nodes.len() as u64;
        let geometry = match spec.inside {
            Some((parent, offset, extent)) => Geometry::Inside {
                parent,
                offset,
                extent,
            },
            None => Geometry::Fixed(spec.rect),
        };
        inner.nodes.push(Node {
            selector: spec.selector,
            text: spec.text,
            value: spec.value,
            displayed: spec.displayed,
            enabled: spec.enabled,
            present: spec.present,
            appears_at: spec.appears_in.map(|delay| Instant::now() + delay),
            stale: false,
            failing_clicks: spec.failing_clicks,
            clicks: 0,
            geometry,
        });
        MockElement { id }
    }

    /// Register a scroll container: `viewport` visible pixels over `content`
    /// total pixels along `axis`, initially scrolled to the start
    pub fn add_scrollable(
        &self,
        selector: impl Into<String>,
        axis: Axis,
        viewport: f64,
        content: f64,
    ) -> MockElement {
        let mut inner = self.lock();
        let id = inner.nodes.len() as u64;
        inner.nodes.push(Node {
            selector: selector.into(),
            text: String::new(),
            value: String::new(),
            displayed: true,
            enabled: true,
            present: true,
            appears_at: None,
            stale: false,
            failing_clicks: 0,
            clicks: 0,
            geometry: Geometry::Scrollable {
                axis,
                viewport,
                content,
                position: 0.0,
            },
        });
        MockElement { id }
    }

    /// Force the container's scroll offset
    pub fn set_scroll_position(&self, container: &MockElement, new_position: f64) {
        let mut inner = self.lock();
        if let Some(node) = inner.nodes.get_mut(container.id as usize) {
            if let Geometry::Scrollable { position, .. } = &mut node.geometry {
                *position = new_position;
            }
        }
    }

    /// The container's current scroll offset
    #[must_use]
    pub fn scroll_position(&self, container: &MockElement) -> f64 {
        let inner = self.lock();
        match inner.nodes.get(container.id as usize).map(|n| &n.geometry) {
            Some(Geometry::Scrollable { position, .. }) => *position,
            _ => 0.0,
        }
    }

    /// Every wheel event dispatched so far, in order
    #[must_use]
    pub fn wheel_events(&self) -> Vec<WheelEvent> {
        self.lock().wheel_log.clone()
    }

    /// Every key pressed so far, in order
    #[must_use]
    pub fn pressed_keys(&self) -> Vec<String> {
        self.lock().pressed_keys.clone()
    }

    /// Fail the next `count` element queries with a transport error
    pub fn fail_next_queries(&self, count: u32) {
        self.lock().failing_queries = count;
    }

    /// Fail navigation attempts with `message`
    pub fn fail_navigation(&self, message: impl Into<String>) {
        self.lock().navigation_failure = Some(message.into());
    }

    /// Mark the element stale: reads and clicks will fail until recreated
    pub fn mark_stale(&self, element: &MockElement) {
        let mut inner = self.lock();
        if let Some(node) = inner.nodes.get_mut(element.id as usize) {
            node.stale = true;
        }
    }

    /// Set the document title
    pub fn set_title(&self, title: impl Into<String>) {
        let mut inner = self.lock();
        if let Some(node) = inner.nodes.get_mut(TITLE_NODE as usize) {
            node.text = title.into();
        }
    }

    /// Navigating to `url` will set the document title to `title`
    pub fn title_for_url(&self, url: impl Into<String>, title: impl Into<String>) {
        self.lock().titles_by_url.insert(url.into(), title.into());
    }

    /// Pressing `key` (on any element) reveals `target`
    pub fn reveal_on_key(&self, key: impl Into<String>, target: &MockElement) {
        self.lock().key_rules.push((key.into(), target.id));
    }

    /// Clicking `trigger` reveals `target`
    pub fn reveal_on_click(&self, trigger: &MockElement, target: &MockElement) {
        self.lock()
            .click_rules
            .push((trigger.id, ClickEffect::Reveal(target.id)));
    }

    /// Clicking `trigger` sets the document title
    pub fn title_on_click(&self, trigger: &MockElement, title: impl Into<String>) {
        self.lock()
            .click_rules
            .push((trigger.id, ClickEffect::SetTitle(title.into())));
    }

    /// Test helper: the element's text
    #[must_use]
    pub fn text_of(&self, element: &MockElement) -> String {
        self.lock()
            .nodes
            .get(element.id as usize)
            .map(|n| n.text.clone())
            .unwrap_or_default()
    }

    /// Test helper: the current value of the first element matching
    /// `selector`
    #[must_use]
    pub fn value_of(&self, selector: &str) -> String {
        self.lock()
            .nodes
            .iter()
            .find(|n| n.selector == selector)
            .map(|n| n.value.clone())
            .unwrap_or_default()
    }

    /// Test helper: completed clicks across all elements matching `selector`
    #[must_use]
    pub fn click_count(&self, selector: &str) -> u32 {
        self.lock()
            .nodes
            .iter()
            .filter(|n| n.selector == selector)
            .map(|n| n.clicks)
            .sum()
    }

    fn node_rect(inner: &Inner, id: u64) -> Option<Rect> {
        match inner.nodes.get(id as usize)?.geometry.clone() {
            Geometry::Fixed(rect) => Some(rect),
            Geometry::Scrollable { axis, viewport, .. } => Some(match axis {
                Axis::Vertical => Rect::new(0.0, 0.0, 240.0, viewport),
                Axis::Horizontal => Rect::new(0.0, 0.0, viewport, 60.0),
            }),
            Geometry::Inside {
                parent,
                offset,
                extent,
            } => {
                let parent_rect = Self::node_rect(inner, parent)?;
                match inner.nodes.get(parent as usize)?.geometry.clone() {
                    Geometry::Scrollable { axis, position, .. } => Some(match axis {
                        Axis::Vertical => Rect::new(
                            parent_rect.x,
                            parent_rect.y + offset - position,
                            parent_rect.width,
                            extent,
                        ),
                        Axis::Horizontal => Rect::new(
                            parent_rect.x + offset - position,
                            parent_rect.y,
                            extent,
                            parent_rect.height,
                        ),
                    }),
                    _ => Some(parent_rect),
                }
            }
        }
    }

    fn live_node<'a>(
        inner: &'a mut Inner,
        element: &MockElement,
    ) -> DriverResult<&'a mut Node> {
        let node = inner
            .nodes
            .get_mut(element.id as usize)
            .ok_or(DriverError::StaleElement)?;
        if node.stale || !node.is_present(Instant::now()) {
            return Err(DriverError::StaleElement);
        }
        Ok(node)
    }
}

#[async_trait]
impl PageDriver for MockPage {
    type Element = MockElement;

    async fn find_all(&self, selector: &Selector) -> DriverResult<Vec<MockElement>> {
        let mut inner = self.lock();
        if inner.failing_queries > 0 {
            inner.failing_queries -= 1;
            return Err(DriverError::Transport("injected query failure".into()));
        }
        let now = Instant::now();
        Ok(inner
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| {
                node.selector == selector.pattern() && !node.stale && node.is_present(now)
            })
            .map(|(id, _)| MockElement { id: id as u64 })
            .collect())
    }

    async fn is_displayed(&self, element: &MockElement) -> DriverResult<bool> {
        let mut inner = self.lock();
        let node = Self::live_node(&mut inner, element)?;
        Ok(node.displayed)
    }

    async fn text(&self, element: &MockElement) -> DriverResult<String> {
        let mut inner = self.lock();
        let node = Self::live_node(&mut inner, element)?;
        Ok(node.text.clone())
    }

    async fn property_string(&self, element: &MockElement, name: &str) -> DriverResult<String> {
        let mut inner = self.lock();
        let node = Self::live_node(&mut inner, element)?;
        Ok(match name {
            "textContent" => node.text.clone(),
            "value" => node.value.clone(),
            _ => String::new(),
        })
    }

    async fn property_f64(&self, element: &MockElement, name: &str) -> DriverResult<f64> {
        let mut inner = self.lock();
        let node = Self::live_node(&mut inner, element)?;
        if let Geometry::Scrollable {
            axis,
            viewport,
            content,
            position,
        } = node.geometry
        {
            if name == axis.scroll_position() {
                return Ok(position);
            }
            if name == axis.scroll_extent() {
                return Ok(content);
            }
            if name == axis.viewport_extent() {
                return Ok(viewport);
            }
        }
        Ok(0.0)
    }

    async fn rect(&self, element: &MockElement) -> DriverResult<Rect> {
        let mut inner = self.lock();
        Self::live_node(&mut inner, element)?;
        Self::node_rect(&inner, element.id).ok_or(DriverError::StaleElement)
    }

    async fn is_enabled(&self, element: &MockElement) -> DriverResult<bool> {
        let mut inner = self.lock();
        let node = Self::live_node(&mut inner, element)?;
        Ok(node.enabled)
    }

    async fn click(&self, element: &MockElement) -> DriverResult<()> {
        let mut inner = self.lock();
        {
            let node = Self::live_node(&mut inner, element)?;
            if node.failing_clicks > 0 {
                node.failing_clicks -= 1;
                return Err(DriverError::StaleElement);
            }
            node.clicks += 1;
        }
        let effects: Vec<ClickEffect> = inner
            .click_rules
            .iter()
            .filter(|(trigger, _)| *trigger == element.id)
            .map(|(_, effect)| effect.clone())
            .collect();
        for effect in effects {
            match effect {
                ClickEffect::Reveal(target) => {
                    if let Some(node) = inner.nodes.get_mut(target as usize) {
                        node.present = true;
                    }
                }
                ClickEffect::SetTitle(title) => {
                    if let Some(node) = inner.nodes.get_mut(TITLE_NODE as usize) {
                        node.text = title;
                    }
                }
            }
        }
        Ok(())
    }

    async fn clear_value(&self, element: &MockElement) -> DriverResult<()> {
        let mut inner = self.lock();
        let node = Self::live_node(&mut inner, element)?;
        node.value.clear();
        Ok(())
    }

    async fn type_text(&self, element: &MockElement, text: &str) -> DriverResult<()> {
        let mut inner = self.lock();
        let node = Self::live_node(&mut inner, element)?;
        node.value.push_str(text);
        Ok(())
    }

    async fn press_key(&self, element: &MockElement, key: &str) -> DriverResult<()> {
        let mut inner = self.lock();
        Self::live_node(&mut inner, element)?;
        inner.pressed_keys.push(key.to_string());
        let targets: Vec<u64> = inner
            .key_rules
            .iter()
            .filter(|(rule_key, _)| rule_key == key)
            .map(|(_, target)| *target)
            .collect();
        for target in targets {
            if let Some(node) = inner.nodes.get_mut(target as usize) {
                node.present = true;
            }
        }
        Ok(())
    }

    async fn wheel(
        &self,
        element: &MockElement,
        delta_x: f64,
        delta_y: f64,
    ) -> DriverResult<()> {
        let mut inner = self.lock();
        {
            let node = Self::live_node(&mut inner, element)?;
            if let Geometry::Scrollable {
                axis,
                viewport,
                content,
                position,
            } = &mut node.geometry
            {
                let delta = match axis {
                    Axis::Vertical => delta_y,
                    Axis::Horizontal => delta_x,
                };
                let max = (*content - *viewport).max(0.0);
                *position = (*position + delta).clamp(0.0, max);
            }
        }
        inner.wheel_log.push(WheelEvent {
            element: *element,
            delta_x,
            delta_y,
        });
        Ok(())
    }

    async fn await_repaint(&self) -> DriverResult<()> {
        Ok(())
    }

    async fn goto(&self, url: &str) -> DriverResult<()> {
        let mut inner = self.lock();
        if let Some(message) = inner.navigation_failure.clone() {
            return Err(DriverError::Transport(message));
        }
        inner.url = url.to_string();
        if let Some(title) = inner.titles_by_url.get(url).cloned() {
            if let Some(node) = inner.nodes.get_mut(TITLE_NODE as usize) {
                node.text = title;
            }
        }
        Ok(())
    }

    async fn title(&self) -> DriverResult<String> {
        Ok(self
            .lock()
            .nodes
            .get(TITLE_NODE as usize)
            .map(|n| n.text.clone())
            .unwrap_or_default())
    }

    async fn current_url(&self) -> DriverResult<String> {
        Ok(self.lock().url.clone())
    }
}
