//! Suite and per-scenario page handles.
//!
//! A [`Suite`] is built once per run. Each scenario calls
//! [`Suite::open_session`] and gets its own driver wrapped in a
//! [`ConsolePages`]; the configuration and the tour gate are shared.

use crate::config::SessionConfig;
use crate::driver::{DriverLauncher, SharedDriver};
use crate::page::BasePage;
use crate::pages::{
    LeftNavigationBar, LoginPage, OverviewPage, PipelinesOverviewPage, PipelinesPage, TasksPage,
    TriggersPage,
};
use crate::result::{ProbeError, ProbeResult};
use crate::tour::TourGate;
use once_cell::sync::OnceCell;
use std::sync::Arc;

static SUITE: OnceCell<Suite> = OnceCell::new();

/// Everything shared by the sessions of one run
#[derive(Debug, Clone)]
pub struct Suite {
    config: Arc<SessionConfig>,
    tour: Arc<TourGate>,
    launcher: Arc<dyn DriverLauncher>,
}

impl Suite {
    /// Create a suite with an unchecked tour gate
    #[must_use]
    pub fn new(config: SessionConfig, launcher: Arc<dyn DriverLauncher>) -> Self {
        Self {
            config: Arc::new(config),
            tour: Arc::new(TourGate::new()),
            launcher,
        }
    }

    /// Session configuration
    #[must_use]
    pub fn config(&self) -> &Arc<SessionConfig> {
        &self.config
    }

    /// Open a fresh page handle
    pub async fn open_session(&self) -> ProbeResult<ConsolePages> {
        let driver = self.launcher.open().await?;
        tracing::debug!(base_url = %self.config.base_url, "session opened");
        Ok(ConsolePages::new(
            driver,
            Arc::clone(&self.config),
            Arc::clone(&self.tour),
        ))
    }
}

/// Install the suite used by the step layer; fails if one is already installed
pub fn install_suite(suite: Suite) -> ProbeResult<()> {
    SUITE
        .set(suite)
        .map_err(|_| ProbeError::config("a suite is already installed"))
}

/// Suite installed by [`install_suite`]
pub fn installed_suite() -> ProbeResult<&'static Suite> {
    SUITE
        .get()
        .ok_or_else(|| ProbeError::config("no suite installed; call install_suite first"))
}

/// Page objects of one scenario, all over the same driver
#[derive(Debug, Clone)]
pub struct ConsolePages {
    /// Raw driver
    pub driver: SharedDriver,
    /// Login page
    pub login: LoginPage,
    /// Left navigation bar
    pub nav: LeftNavigationBar,
    /// Cluster overview dashboard
    pub overview: OverviewPage,
    /// Pipelines overview page
    pub pipelines_overview: PipelinesOverviewPage,
    /// Pipelines list
    pub pipelines: PipelinesPage,
    /// Tasks list
    pub tasks: TasksPage,
    /// Triggers list
    pub triggers: TriggersPage,
}

impl ConsolePages {
    /// Build every page object over `driver`
    #[must_use]
    pub fn new(driver: SharedDriver, config: Arc<SessionConfig>, tour: Arc<TourGate>) -> Self {
        let base = BasePage::new(Arc::clone(&driver), config);
        Self {
            login: LoginPage::new(base.clone()),
            nav: LeftNavigationBar::new(base.clone()),
            overview: OverviewPage::new(base.clone(), tour),
            pipelines_overview: PipelinesOverviewPage::new(base.clone()),
            pipelines: PipelinesPage::new(base.clone()),
            tasks: TasksPage::new(base.clone()),
            triggers: TriggersPage::new(base),
            driver,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::{MockConsole, MockLauncher};
    use crate::page_object::{ConsolePage, DataPage};

    const BASE: &str = "https://console.apps.example.com";

    fn suite() -> (Suite, Arc<MockLauncher>) {
        let launcher = Arc::new(MockLauncher::new(
            MockConsole::new(BASE, "developer", "s3cret").with_tour(true),
        ));
        let config = SessionConfig::new(BASE, "developer", "s3cret");
        (Suite::new(config, launcher.clone()), launcher)
    }

    #[tokio::test(start_paused = true)]
    async fn test_htpasswd_login_to_tasks() {
        let (suite, launcher) = suite();
        let pages = suite.open_session().await.unwrap();

        pages.login.goto().await.unwrap();
        assert!(pages.login.verify_on_login_page().await.unwrap());
        pages.login.choose_login_auth_type("htpasswd").await.unwrap();
        pages.login.login().await.unwrap();
        pages.overview.verify_on_page().await.unwrap();

        pages.nav.click_pipelines_button().await.unwrap();
        pages.nav.navigate_to_tasks().await.unwrap();
        pages.tasks.verify_on_page().await.unwrap();
        pages
            .tasks
            .verify_data_load(None, Some("Tasks tab"))
            .await
            .unwrap();

        let driver = &launcher.opened()[0];
        assert_eq!(driver.url(), format!("{BASE}/tasks/all-namespaces"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tour_gate_shared_across_sessions() {
        let (suite, launcher) = suite();
        for _ in 0..3 {
            let pages = suite.open_session().await.unwrap();
            pages.driver.goto(&format!("{BASE}/dashboards")).await.unwrap();
            pages.overview.verify_on_page().await.unwrap();
        }

        let probes: Vec<u32> = launcher
            .opened()
            .iter()
            .map(|d| d.probe_count(crate::locators::overview::SKIP_TOUR_BUTTON))
            .collect();
        assert!(probes[0] > 0);
        assert_eq!(&probes[1..], &[0, 0]);
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_drivers() {
        let (suite, _) = suite();
        let first = suite.open_session().await.unwrap();
        let second = suite.open_session().await.unwrap();
        assert!(!Arc::ptr_eq(&first.driver, &second.driver));
        assert!(Arc::ptr_eq(first.overview.base().driver(), &first.driver));
    }
}
