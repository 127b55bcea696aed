//! Base page: bounded wait-then-act primitives shared by every page object.
//!
//! Pages hold a [`BasePage`] instead of inheriting from one. Every primitive
//! takes an optional timeout and falls back to the session timeout.
//!
//! | Primitive | On timeout |
//! |-----------|------------|
//! | `click_element`, `fill_input` | `ProbeError::Timeout` |
//! | `is_visible` | `Ok(false)` |
//! | `wait_for_url_suffix`, `wait_for_url_contains` | `ProbeError::Timeout` |
//! | `verify_page` | `ProbeError::PageVerificationFailed` |
//! | `verify_data_load` | `ProbeError::DataLoadFailed` |

use crate::config::SessionConfig;
use crate::driver::{ElementState, PagePredicate, SharedDriver};
use crate::locator::Selector;
use crate::result::{ProbeError, ProbeResult};
use crate::wait::{url_ends_with, WaitOptions, Waiter, NO_DATA_TIMEOUT_MS};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Outcome of a data load check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataState {
    /// Data element rendered
    Loaded,
    /// Empty-state message rendered; no data is a valid terminal state
    Empty,
}

impl DataState {
    /// Whether the list is empty
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Driver handle plus session configuration
#[derive(Debug, Clone)]
pub struct BasePage {
    driver: SharedDriver,
    config: Arc<SessionConfig>,
}

impl BasePage {
    /// Create a base page over a driver
    #[must_use]
    pub fn new(driver: SharedDriver, config: Arc<SessionConfig>) -> Self {
        Self { driver, config }
    }

    /// Underlying driver
    #[must_use]
    pub fn driver(&self) -> &SharedDriver {
        &self.driver
    }

    /// Session configuration
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn options(&self, timeout: Option<Duration>) -> WaitOptions {
        WaitOptions::with_timeout(timeout.unwrap_or(self.config.timeout))
    }

    /// Navigate, bounded by the session timeout
    pub async fn goto(&self, url: &str) -> ProbeResult<()> {
        debug!(url, "goto");
        match tokio::time::timeout(self.config.timeout, self.driver.goto(url)).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::timeout(
                format!("navigation to {url}"),
                self.config.timeout_ms(),
            )),
        }
    }

    /// Wait until the element is visible, enabled and holds still
    async fn wait_actionable(&self, selector: &Selector, timeout: Option<Duration>) -> ProbeResult<()> {
        let previous: Mutex<Option<ElementState>> = Mutex::new(None);
        Waiter::poll_until(
            format!("{selector} to be actionable"),
            self.options(timeout),
            || {
                let previous = &previous;
                async move {
                    let state = self.driver.probe(selector).await?;
                    let mut prev = previous.lock();
                    let ready = state.is_actionable_after(prev.as_ref());
                    *prev = Some(state);
                    Ok(ready)
                }
            },
        )
        .await?;
        Ok(())
    }

    /// Click once the element is actionable
    pub async fn click_element(&self, locator: &str, timeout: Option<Duration>) -> ProbeResult<()> {
        let selector = Selector::parse(locator);
        self.wait_actionable(&selector, timeout).await?;
        debug!(%selector, "click");
        self.driver.click(&selector).await
    }

    /// Replace the input's value once it is actionable
    pub async fn fill_input(
        &self,
        locator: &str,
        value: &str,
        timeout: Option<Duration>,
    ) -> ProbeResult<()> {
        let selector = Selector::parse(locator);
        self.wait_actionable(&selector, timeout).await?;
        debug!(%selector, "fill");
        self.driver.fill(&selector, value).await
    }

    /// Whether the element becomes visible within the timeout.
    ///
    /// Running out of time is `Ok(false)`; driver failures are still errors.
    pub async fn is_visible(&self, locator: &str, timeout: Option<Duration>) -> ProbeResult<bool> {
        let selector = Selector::parse(locator);
        let waited = Waiter::poll_until(
            format!("{selector} to be visible"),
            self.options(timeout),
            || async { Ok(self.driver.probe(&selector).await?.visible) },
        )
        .await;

        match waited {
            Ok(_) => Ok(true),
            Err(err) if err.is_timeout() => {
                debug!(%selector, "not visible within timeout");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Wait until the URL path ends with `suffix`
    pub async fn wait_for_url_suffix(&self, suffix: &str, timeout: Option<Duration>) -> ProbeResult<()> {
        Waiter::poll_until(
            format!("URL ending with '{suffix}'"),
            self.options(timeout),
            || async { Ok(url_ends_with(&self.driver.current_url().await?, suffix)) },
        )
        .await?;
        Ok(())
    }

    /// Wait until the URL, as seen by the page itself, contains `substring`
    pub async fn wait_for_url_contains(
        &self,
        substring: &str,
        timeout: Option<Duration>,
    ) -> ProbeResult<()> {
        let predicate = PagePredicate::UrlIncludes(substring.to_string());
        Waiter::poll_until(predicate.to_string(), self.options(timeout), || {
            self.driver.check(&predicate)
        })
        .await?;
        Ok(())
    }

    /// Check URL suffix then header visibility
    pub async fn verify_page(&self, url_suffix: &str, header: &str, page_name: &str) -> ProbeResult<()> {
        if let Err(err) = self.wait_for_url_suffix(url_suffix, None).await {
            if !err.is_timeout() {
                return Err(err);
            }
            let actual = self.driver.current_url().await?;
            return Err(ProbeError::page_verification(
                page_name,
                format!("URL does not end with '{url_suffix}'. Current URL: {actual}"),
            ));
        }

        if !self.is_visible(header, None).await? {
            return Err(ProbeError::page_verification(
                page_name,
                format!("Header element ({header}) is not visible on the page."),
            ));
        }

        info!(page = page_name, "page verified");
        Ok(())
    }

    /// Wait for data, accepting an empty-state message as a valid outcome.
    ///
    /// The empty-state locator is checked first with a fixed 10 second bound;
    /// the data locator then gets the full session timeout.
    pub async fn verify_data_load(
        &self,
        data: &str,
        context: &str,
        no_data: Option<&str>,
    ) -> ProbeResult<DataState> {
        if let Some(no_data) = no_data {
            let bound = Duration::from_millis(NO_DATA_TIMEOUT_MS);
            if self.is_visible(no_data, Some(bound)).await? {
                info!(context, "no data to load");
                return Ok(DataState::Empty);
            }
        }

        if !self.is_visible(data, None).await? {
            return Err(ProbeError::DataLoadFailed {
                context: context.to_string(),
                locator: data.to_string(),
            });
        }
        info!(context, "data loaded");
        Ok(DataState::Loaded)
    }
}
