//! Page object traits.
//!
//! A console page is identified by a URL suffix and a header. List pages
//! additionally render either a data grid or an empty-state message.
//!
//! # Example
//!
//! ```ignore
//! struct BuildsPage {
//!     base: BasePage,
//! }
//!
//! impl ConsolePage for BuildsPage {
//!     const NAME: &'static str = "Builds page";
//!     const URL_SUFFIX: &'static str = "builds/all-namespaces";
//!     const HEADER: &'static str = "h1:has-text(\"Builds\")";
//!
//!     fn base(&self) -> &BasePage {
//!         &self.base
//!     }
//! }
//! ```

use crate::page::{BasePage, DataState};
use crate::result::ProbeResult;
use async_trait::async_trait;

/// A page reachable in the console
#[async_trait]
pub trait ConsolePage: Send + Sync {
    /// Name used in verification errors (e.g. "Tasks page")
    const NAME: &'static str;
    /// Path the URL must end with
    const URL_SUFFIX: &'static str;
    /// Header that must be visible
    const HEADER: &'static str;

    /// Shared primitives
    fn base(&self) -> &BasePage;

    /// Verify URL suffix and header
    async fn verify_on_page(&self) -> ProbeResult<()> {
        self.base()
            .verify_page(Self::URL_SUFFIX, Self::HEADER, Self::NAME)
            .await
    }
}

/// A list page rendering rows or an empty state
#[async_trait]
pub trait DataPage: ConsolePage {
    /// Locator of the rendered rows
    const DATA: &'static str;
    /// Locator of the empty-state message
    const NO_DATA: &'static str;
    /// Context reported when none is given
    const DEFAULT_CONTEXT: &'static str = Self::NAME;

    /// Verify data finished loading.
    ///
    /// `locator` overrides the data locator; `context` names the tab in
    /// errors and defaults to [`DataPage::DEFAULT_CONTEXT`].
    async fn verify_data_load(
        &self,
        locator: Option<&str>,
        context: Option<&str>,
    ) -> ProbeResult<DataState> {
        self.base()
            .verify_data_load(
                locator.unwrap_or(Self::DATA),
                context.unwrap_or(Self::DEFAULT_CONTEXT),
                Some(Self::NO_DATA),
            )
            .await
    }

    /// Click a tab then verify its data
    async fn open_tab(&self, tab: &str, context: &str) -> ProbeResult<DataState> {
        self.base().click_element(tab, None).await?;
        self.verify_data_load(None, Some(context)).await
    }
}
