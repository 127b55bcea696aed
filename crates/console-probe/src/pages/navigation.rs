use crate::locators::{navigation, NavLink};
use crate::page::BasePage;
use crate::result::ProbeResult;

/// Persistent left-hand side menu
#[derive(Debug, Clone)]
pub struct LeftNavigationBar {
    base: BasePage,
}

impl LeftNavigationBar {
    /// Create the page object
    #[must_use]
    pub fn new(base: BasePage) -> Self {
        Self { base }
    }

    /// Whether the Pipelines section toggle is visible
    pub async fn verify_pipelines_button_visible(&self) -> ProbeResult<bool> {
        self.base.is_visible(navigation::PIPELINES_BUTTON, None).await
    }

    /// Whether the named link is visible under the Pipelines section.
    ///
    /// Unknown names are an `InvalidArgument` error, not `false`.
    pub async fn verify_link_available(&self, link_name: &str) -> ProbeResult<bool> {
        let link: NavLink = link_name.parse()?;
        self.base.is_visible(link.locator(), None).await
    }

    /// Expand the Pipelines section
    pub async fn click_pipelines_button(&self) -> ProbeResult<()> {
        self.base
            .click_element(navigation::PIPELINES_BUTTON, None)
            .await
    }

    /// Click a link under the Pipelines section
    pub async fn navigate_to(&self, link: NavLink) -> ProbeResult<()> {
        self.base.click_element(link.locator(), None).await
    }

    /// Open the Pipelines list
    pub async fn navigate_to_pipelines(&self) -> ProbeResult<()> {
        self.navigate_to(NavLink::Pipelines).await
    }

    /// Open the Pipelines overview
    pub async fn navigate_to_overview(&self) -> ProbeResult<()> {
        self.navigate_to(NavLink::Overview).await
    }

    /// Open the Tasks list
    pub async fn navigate_to_tasks(&self) -> ProbeResult<()> {
        self.navigate_to(NavLink::Tasks).await
    }

    /// Open the Triggers list
    pub async fn navigate_to_triggers(&self) -> ProbeResult<()> {
        self.navigate_to(NavLink::Triggers).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::pages::test_support::{base_on, console, BASE};
    use crate::result::ProbeError;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_links_hidden_until_expanded() {
        let (base, _) = base_on(console().build(), Some("dashboards"));
        let nav = LeftNavigationBar::new(base.clone());
        assert!(nav.verify_pipelines_button_visible().await.unwrap());
        assert!(!base
            .is_visible(navigation::NAV_TASKS_LINK, Some(Duration::from_secs(1)))
            .await
            .unwrap());

        nav.click_pipelines_button().await.unwrap();
        for link in NavLink::ALL {
            assert!(nav.verify_link_available(link.as_str()).await.unwrap(), "{link}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_link_is_invalid_argument() {
        let (base, driver) = base_on(console().build(), Some("dashboards"));
        let err = LeftNavigationBar::new(base)
            .verify_link_available("Repositories")
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::InvalidArgument { .. }));
        assert!(driver.history().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigate_to_tasks() {
        let (base, driver) = base_on(console().build(), Some("dashboards"));
        let nav = LeftNavigationBar::new(base);
        nav.click_pipelines_button().await.unwrap();
        nav.navigate_to_tasks().await.unwrap();
        assert_eq!(driver.url(), format!("{BASE}/tasks/all-namespaces"));
    }
}
