//! Real browser control over the Chrome DevTools Protocol.
//!
//! Compiled behind the `browser` feature. [`Browser`] launches a chromium
//! instance via `chromiumoxide`; [`CdpPage`] implements [`PageDriver`] so
//! the polling engine drives a live page exactly like it drives
//! [`crate::mock::MockPage`] in unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::js_protocol::runtime::CallFunctionOnReturns;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::sync::Mutex;

use crate::driver::{DriverError, DriverResult, PageDriver, Rect};
use crate::locator::Selector;
use crate::result::{EsperarError, EsperarResult};

/// Visibility test run in page context: attached, not display:none or
/// visibility:hidden, and occupying layout space.
const IS_DISPLAYED_FN: &str = "function() {
    if (!this.isConnected) return false;
    const style = window.getComputedStyle(this);
    if (style.display === 'none' || style.visibility === 'hidden') return false;
    const rect = this.getBoundingClientRect();
    return rect.width > 0 && rect.height > 0;
}";

const RECT_FN: &str = "function() {
    const rect = this.getBoundingClientRect();
    return { x: rect.x, y: rect.y, width: rect.width, height: rect.height };
}";

const IS_ENABLED_FN: &str = "function() { return !this.disabled; }";

/// Explicit script-based clear; the native clear primitive is unreliable
/// against controlled inputs.
const CLEAR_VALUE_FN: &str = "function() { this.value = ''; }";

fn property_fn(name: &str) -> DriverResult<String> {
    let name_json =
        serde_json::to_string(name).map_err(|err| DriverError::Script(err.to_string()))?;
    Ok(format!("function() {{ return this[{name_json}]; }}"))
}

/// Synthetic bubbling wheel event, so listeners bound to real user
/// scrolling fire identically to manual interaction.
fn wheel_fn(delta_x: f64, delta_y: f64) -> String {
    format!(
        "function() {{
            this.dispatchEvent(new WheelEvent('wheel', {{
                bubbles: true,
                deltaX: {delta_x},
                deltaY: {delta_y}
            }}));
        }}"
    )
}

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Window width
    pub window_width: u32,
    /// Window height
    pub window_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1024,
            window_height: 768,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, overridden by the environment: `CHROMIUM_PATH` points at
    /// the browser binary, `ESPERAR_HEADFUL=1` shows the window.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var("CHROMIUM_PATH") {
            config.chromium_path = Some(path);
        }
        if std::env::var("ESPERAR_HEADFUL").is_ok_and(|v| v == "1") {
            config.headless = false;
        }
        config
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the window dimensions
    #[must_use]
    pub const fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Set the chromium binary path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable the sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// A launched browser instance
#[derive(Debug)]
pub struct Browser {
    config: BrowserConfig,
    inner: Arc<Mutex<CdpBrowser>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch a browser per `config`.
    ///
    /// # Errors
    ///
    /// Returns [`EsperarError::BrowserLaunch`] if chromium cannot be
    /// found or started.
    pub async fn launch(config: BrowserConfig) -> EsperarResult<Self> {
        let mut builder = CdpConfig::builder()
            .window_size(config.window_width, config.window_height);

        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder.build().map_err(|e| EsperarError::BrowserLaunch {
            message: e.to_string(),
        })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| EsperarError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        tracing::info!(
            headless = config.headless,
            width = config.window_width,
            height = config.window_height,
            "browser launched"
        );

        Ok(Self {
            config,
            inner: Arc::new(Mutex::new(browser)),
            handle,
        })
    }

    /// Open a new blank page
    pub async fn new_page(&self) -> EsperarResult<CdpPage> {
        let browser = self.inner.lock().await;
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| EsperarError::Page {
                message: e.to_string(),
            })?;
        Ok(CdpPage {
            inner: Arc::new(Mutex::new(page)),
        })
    }

    /// The launch configuration
    #[must_use]
    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Close the browser
    pub async fn close(self) -> EsperarResult<()> {
        let mut browser = self.inner.lock().await;
        browser.close().await.map_err(|e| EsperarError::Page {
            message: e.to_string(),
        })?;
        Ok(())
    }
}

/// A live CDP page session implementing [`PageDriver`]
#[derive(Debug, Clone)]
pub struct CdpPage {
    inner: Arc<Mutex<Page>>,
}

fn map_cdp_err(err: impl std::fmt::Display) -> DriverError {
    let message = err.to_string();
    // CDP reports detached handles as unresolvable node ids.
    if message.contains("Node with given id") || message.contains("detached") {
        DriverError::StaleElement
    } else {
        DriverError::Transport(message)
    }
}

fn js_value(returns: CallFunctionOnReturns) -> DriverResult<serde_json::Value> {
    if let Some(exception) = returns.exception_details {
        return Err(DriverError::Script(exception.text));
    }
    Ok(returns.result.value.unwrap_or(serde_json::Value::Null))
}

impl CdpPage {
    async fn call_bool(&self, element: &Element, function: &str) -> DriverResult<bool> {
        let returns = element
            .call_js_fn(function, false)
            .await
            .map_err(map_cdp_err)?;
        Ok(js_value(returns)?.as_bool().unwrap_or(false))
    }
}

#[async_trait]
impl PageDriver for CdpPage {
    type Element = Arc<Element>;

    async fn find_all(&self, selector: &Selector) -> DriverResult<Vec<Arc<Element>>> {
        let page = self.inner.lock().await;
        let elements = match selector {
            Selector::Css(pattern) => page.find_elements(pattern.as_str()).await,
            Selector::XPath(pattern) => page.find_xpaths(pattern.as_str()).await,
        }
        .map_err(map_cdp_err)?;
        Ok(elements.into_iter().map(Arc::new).collect())
    }

    async fn is_displayed(&self, element: &Arc<Element>) -> DriverResult<bool> {
        self.call_bool(element, IS_DISPLAYED_FN).await
    }

    async fn text(&self, element: &Arc<Element>) -> DriverResult<String> {
        let text = element.inner_text().await.map_err(map_cdp_err)?;
        Ok(text.unwrap_or_default())
    }

    async fn property_string(&self, element: &Arc<Element>, name: &str) -> DriverResult<String> {
        let returns = element
            .call_js_fn(property_fn(name)?, false)
            .await
            .map_err(map_cdp_err)?;
        Ok(match js_value(returns)? {
            serde_json::Value::String(value) => value,
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    async fn property_f64(&self, element: &Arc<Element>, name: &str) -> DriverResult<f64> {
        let returns = element
            .call_js_fn(property_fn(name)?, false)
            .await
            .map_err(map_cdp_err)?;
        Ok(js_value(returns)?.as_f64().unwrap_or(0.0))
    }

    async fn rect(&self, element: &Arc<Element>) -> DriverResult<Rect> {
        let returns = element
            .call_js_fn(RECT_FN, false)
            .await
            .map_err(map_cdp_err)?;
        serde_json::from_value(js_value(returns)?)
            .map_err(|err| DriverError::Script(err.to_string()))
    }

    async fn is_enabled(&self, element: &Arc<Element>) -> DriverResult<bool> {
        self.call_bool(element, IS_ENABLED_FN).await
    }

    async fn click(&self, element: &Arc<Element>) -> DriverResult<()> {
        element.click().await.map_err(map_cdp_err)?;
        Ok(())
    }

    async fn clear_value(&self, element: &Arc<Element>) -> DriverResult<()> {
        element
            .call_js_fn(CLEAR_VALUE_FN, false)
            .await
            .map_err(map_cdp_err)?;
        Ok(())
    }

    async fn type_text(&self, element: &Arc<Element>, text: &str) -> DriverResult<()> {
        element.focus().await.map_err(map_cdp_err)?;
        element.type_str(text).await.map_err(map_cdp_err)?;
        Ok(())
    }

    async fn press_key(&self, element: &Arc<Element>, key: &str) -> DriverResult<()> {
        element.press_key(key).await.map_err(map_cdp_err)?;
        Ok(())
    }

    async fn wheel(
        &self,
        element: &Arc<Element>,
        delta_x: f64,
        delta_y: f64,
    ) -> DriverResult<()> {
        element
            .call_js_fn(wheel_fn(delta_x, delta_y), false)
            .await
            .map_err(map_cdp_err)?;
        Ok(())
    }

    async fn await_repaint(&self) -> DriverResult<()> {
        let page = self.inner.lock().await;
        page.evaluate("new Promise(resolve => requestAnimationFrame(() => resolve(true)))")
            .await
            .map_err(map_cdp_err)?;
        Ok(())
    }

    async fn goto(&self, url: &str) -> DriverResult<()> {
        let page = self.inner.lock().await;
        page.goto(url).await.map_err(map_cdp_err)?;
        page.wait_for_navigation().await.map_err(map_cdp_err)?;
        Ok(())
    }

    async fn title(&self) -> DriverResult<String> {
        let page = self.inner.lock().await;
        let title = page.get_title().await.map_err(map_cdp_err)?;
        Ok(title.unwrap_or_default())
    }

    async fn current_url(&self) -> DriverResult<String> {
        let page = self.inner.lock().await;
        let url = page.url().await.map_err(map_cdp_err)?;
        Ok(url.unwrap_or_default())
    }
}
