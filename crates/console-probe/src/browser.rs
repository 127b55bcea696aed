//! Chromium control over the Chrome `DevTools` Protocol.
//!
//! [`BrowserConfig`] is always available so the CLI can build and print it.
//! The launcher and the CDP-backed [`ConsoleDriver`](crate::ConsoleDriver)
//! need the `browser` feature, which pulls in chromiumoxide.

use serde::Serialize;

/// Default window width
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1920;
/// Default window height
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 1080;

/// Browser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Window width
    pub viewport_width: u32,
    /// Window height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// Accept invalid TLS certificates
    pub ignore_https_errors: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            chromium_path: None,
            sandbox: true,
            ignore_https_errors: true,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Set certificate error tolerance
    #[must_use]
    pub const fn with_ignore_https_errors(mut self, ignore: bool) -> Self {
        self.ignore_https_errors = ignore;
        self
    }

    /// Extra command line switches passed to chromium
    #[must_use]
    pub fn extra_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.ignore_https_errors {
            args.push("--ignore-certificate-errors".to_string());
        }
        args
    }
}

#[cfg(feature = "browser")]
#[allow(clippy::missing_errors_doc, clippy::significant_drop_tightening)]
mod cdp {
    use super::BrowserConfig;
    use crate::driver::{ConsoleDriver, DriverLauncher, ElementState, PagePredicate, SharedDriver};
    use crate::locator::{BoundingBox, Selector};
    use crate::result::{ProbeError, ProbeResult};
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::element::Element;
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const PROBE_ATTR: &str = "data-console-probe";

    fn driver_err(e: impl std::fmt::Display) -> ProbeError {
        ProbeError::driver(e.to_string())
    }

    /// Shape returned by `Selector::to_probe_script`
    #[derive(Debug, Deserialize)]
    struct RawProbe {
        found: bool,
        visible: bool,
        enabled: bool,
        x: Option<f64>,
        y: Option<f64>,
        width: Option<f64>,
        height: Option<f64>,
    }

    impl From<RawProbe> for ElementState {
        fn from(raw: RawProbe) -> Self {
            let bounds = match (raw.x, raw.y, raw.width, raw.height) {
                (Some(x), Some(y), Some(w), Some(h)) => Some(BoundingBox::new(x, y, w, h)),
                _ => None,
            };
            Self {
                found: raw.found,
                visible: raw.visible,
                enabled: raw.enabled,
                bounds,
            }
        }
    }

    /// Running chromium instance; opens one page per session
    #[derive(Debug)]
    pub struct ChromeLauncher {
        config: BrowserConfig,
        browser: Mutex<CdpBrowser>,
        handle: tokio::task::JoinHandle<()>,
    }

    impl ChromeLauncher {
        /// Launch chromium
        pub async fn launch(config: BrowserConfig) -> ProbeResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }
            if !config.sandbox {
                builder = builder.no_sandbox();
            }
            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }
            for arg in config.extra_args() {
                builder = builder.arg(arg);
            }

            let cdp_config = builder
                .build()
                .map_err(|message| ProbeError::BrowserLaunch { message })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| ProbeError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            tracing::info!(headless = config.headless, "chromium launched");
            Ok(Self {
                config,
                browser: Mutex::new(browser),
                handle,
            })
        }

        /// Launch configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }
    }

    #[async_trait]
    impl DriverLauncher for ChromeLauncher {
        async fn open(&self) -> ProbeResult<SharedDriver> {
            let page = self
                .browser
                .lock()
                .await
                .new_page("about:blank")
                .await
                .map_err(driver_err)?;
            Ok(Arc::new(ChromiumDriver::new(page)))
        }

        async fn shutdown(&self) -> ProbeResult<()> {
            let mut browser = self.browser.lock().await;
            browser.close().await.map_err(driver_err)?;
            self.handle.abort();
            Ok(())
        }
    }

    /// [`ConsoleDriver`] over one chromium tab
    #[derive(Debug)]
    pub struct ChromiumDriver {
        page: CdpPage,
        next_token: AtomicU64,
    }

    impl ChromiumDriver {
        /// Wrap a CDP page
        #[must_use]
        pub fn new(page: CdpPage) -> Self {
            Self {
                page,
                next_token: AtomicU64::new(0),
            }
        }

        /// Resolve `selector` in the page and return a CDP element handle.
        ///
        /// Selectors CDP cannot query natively (text filters, XPath) are
        /// resolved by script, which tags the match with a unique attribute.
        async fn resolve(&self, selector: &Selector) -> ProbeResult<Element> {
            let token = self.next_token.fetch_add(1, Ordering::Relaxed).to_string();
            let tagged: bool = self
                .page
                .evaluate(selector.to_tag_script(PROBE_ATTR, &token))
                .await
                .map_err(driver_err)?
                .into_value()
                .map_err(driver_err)?;
            if !tagged {
                return Err(ProbeError::driver(format!("no element matches {selector}")));
            }
            self.page
                .find_element(format!("[{PROBE_ATTR}=\"{token}\"]"))
                .await
                .map_err(driver_err)
        }
    }

    #[async_trait]
    impl ConsoleDriver for ChromiumDriver {
        async fn goto(&self, url: &str) -> ProbeResult<()> {
            self.page
                .goto(url)
                .await
                .map_err(|e| ProbeError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn current_url(&self) -> ProbeResult<String> {
            Ok(self.page.url().await.map_err(driver_err)?.unwrap_or_default())
        }

        async fn probe(&self, selector: &Selector) -> ProbeResult<ElementState> {
            let raw: RawProbe = self
                .page
                .evaluate(selector.to_probe_script())
                .await
                .map_err(driver_err)?
                .into_value()
                .map_err(driver_err)?;
            Ok(raw.into())
        }

        async fn click(&self, selector: &Selector) -> ProbeResult<()> {
            self.resolve(selector)
                .await?
                .click()
                .await
                .map_err(driver_err)?;
            Ok(())
        }

        async fn fill(&self, selector: &Selector, value: &str) -> ProbeResult<()> {
            let element = self.resolve(selector).await?;
            element
                .call_js_fn(
                    "function() { this.value = ''; \
                     this.dispatchEvent(new Event('input', { bubbles: true })); }",
                    false,
                )
                .await
                .map_err(driver_err)?;
            element.focus().await.map_err(driver_err)?;
            element.type_str(value).await.map_err(driver_err)?;
            Ok(())
        }

        async fn check(&self, predicate: &PagePredicate) -> ProbeResult<bool> {
            self.page
                .evaluate(predicate.to_script())
                .await
                .map_err(driver_err)?
                .into_value()
                .map_err(driver_err)
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::{ChromeLauncher, ChromiumDriver};
