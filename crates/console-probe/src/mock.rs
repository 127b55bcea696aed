//! Scripted in-process driver.
//!
//! [`MockDriver`] models a console as a table of routes (URL → selectors
//! rendered there) plus click rules. It records every primitive in a call
//! history and counts probes per selector so tests can assert how often a
//! page looked for something.
//!
//! [`MockConsole`] builds the Pipelines console model used by the unit tests,
//! the feature harness and `console-probe run --simulate`.

use crate::driver::{ConsoleDriver, DriverLauncher, ElementState, PagePredicate, SharedDriver};
use crate::locator::{BoundingBox, Selector};
use crate::locators::{self, login, navigation, overview, pipelines, pipelines_overview, tasks, triggers};
use crate::result::{ProbeError, ProbeResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

const MOCK_BOUNDS: BoundingBox = BoundingBox::new(16.0, 16.0, 120.0, 32.0);

/// Effect of clicking an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Navigate to a URL
    Navigate(String),
    /// Navigate only when every field holds the expected value
    Submit {
        /// Required field values
        fields: Vec<(Selector, String)>,
        /// Destination on success
        url: String,
    },
    /// Make elements visible on every route
    Reveal(Vec<Selector>),
    /// Remove elements from every route
    Hide(Vec<Selector>),
}

#[derive(Debug, Default)]
struct MockState {
    url: String,
    routes: HashMap<String, HashSet<Selector>>,
    redirects: HashMap<String, String>,
    clicks: HashMap<Selector, Vec<ClickAction>>,
    overrides: HashMap<Selector, bool>,
    disabled: HashSet<Selector>,
    moving: HashSet<Selector>,
    delays: HashMap<Selector, u32>,
    values: HashMap<Selector, String>,
    probe_counts: HashMap<Selector, u32>,
    history: Vec<String>,
}

impl MockState {
    fn is_rendered(&self, selector: &Selector) -> bool {
        if let Some(&forced) = self.overrides.get(selector) {
            return forced;
        }
        self.routes
            .get(&normalize(&self.url))
            .is_some_and(|elements| elements.contains(selector))
    }

    fn navigate(&mut self, url: &str) {
        let mut target = url.to_string();
        // one hop is enough for the login redirect
        if let Some(next) = self.redirects.get(&normalize(&target)) {
            target.clone_from(next);
        }
        self.url = target;
    }
}

/// Route key: URL without query, fragment or trailing slash
fn normalize(url: &str) -> String {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    url[..end].trim_end_matches('/').to_string()
}

/// Mock driver for unit testing
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create an empty mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at `url` without recording a navigation
    #[must_use]
    pub fn at(self, url: impl Into<String>) -> Self {
        self.state.lock().url = url.into();
        self
    }

    /// Render `selectors` whenever the current URL is `url`
    #[must_use]
    pub fn with_route<I, S>(self, url: &str, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Selector>,
    {
        {
            let mut state = self.state.lock();
            state
                .routes
                .entry(normalize(url))
                .or_default()
                .extend(selectors.into_iter().map(Into::into));
        }
        self
    }

    /// Redirect navigation to `from` onto `to`
    #[must_use]
    pub fn with_redirect(self, from: &str, to: impl Into<String>) -> Self {
        self.state.lock().redirects.insert(normalize(from), to.into());
        self
    }

    /// Attach a click effect to a selector
    #[must_use]
    pub fn on_click(self, selector: impl Into<Selector>, action: ClickAction) -> Self {
        self.state
            .lock()
            .clicks
            .entry(selector.into())
            .or_default()
            .push(action);
        self
    }

    /// Render the element but report it as disabled
    #[must_use]
    pub fn with_disabled(self, selector: impl Into<Selector>) -> Self {
        self.state.lock().disabled.insert(selector.into());
        self
    }

    /// Report a different box on every probe
    #[must_use]
    pub fn with_moving(self, selector: impl Into<Selector>) -> Self {
        self.state.lock().moving.insert(selector.into());
        self
    }

    /// Hide the element for its first `probes` probes
    #[must_use]
    pub fn with_delay(self, selector: impl Into<Selector>, probes: u32) -> Self {
        self.state.lock().delays.insert(selector.into(), probes);
        self
    }

    /// Current URL
    #[must_use]
    pub fn url(&self) -> String {
        self.state.lock().url.clone()
    }

    /// Value last filled into `selector`
    #[must_use]
    pub fn value_of(&self, selector: impl Into<Selector>) -> Option<String> {
        self.state.lock().values.get(&selector.into()).cloned()
    }

    /// Number of probes issued for `selector`
    #[must_use]
    pub fn probe_count(&self, selector: impl Into<Selector>) -> u32 {
        self.state
            .lock()
            .probe_counts
            .get(&selector.into())
            .copied()
            .unwrap_or(0)
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state.lock().history.clone()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.state
            .lock()
            .history
            .iter()
            .any(|c| c.starts_with(method))
    }
}

#[async_trait]
impl ConsoleDriver for MockDriver {
    async fn goto(&self, url: &str) -> ProbeResult<()> {
        let mut state = self.state.lock();
        state.history.push(format!("goto:{url}"));
        state.navigate(url);
        Ok(())
    }

    async fn current_url(&self) -> ProbeResult<String> {
        Ok(self.state.lock().url.clone())
    }

    async fn probe(&self, selector: &Selector) -> ProbeResult<ElementState> {
        let mut state = self.state.lock();
        state.history.push(format!("probe:{selector}"));
        let count = {
            let count = state.probe_counts.entry(selector.clone()).or_insert(0);
            *count += 1;
            *count
        };

        let delayed = state.delays.get(selector).is_some_and(|&d| count <= d);
        if delayed || !state.is_rendered(selector) {
            return Ok(ElementState::missing());
        }

        let mut element = ElementState::ready(MOCK_BOUNDS);
        if state.disabled.contains(selector) {
            element.enabled = false;
        }
        if state.moving.contains(selector) {
            element.bounds = Some(BoundingBox::new(f64::from(count), 16.0, 120.0, 32.0));
        }
        Ok(element)
    }

    async fn click(&self, selector: &Selector) -> ProbeResult<()> {
        let mut state = self.state.lock();
        state.history.push(format!("click:{selector}"));
        if !state.is_rendered(selector) {
            return Err(ProbeError::driver(format!(
                "no visible element matches {selector}"
            )));
        }

        let actions = state.clicks.get(selector).cloned().unwrap_or_default();
        for action in actions {
            match action {
                ClickAction::Navigate(url) => state.navigate(&url),
                ClickAction::Submit { fields, url } => {
                    let accepted = fields
                        .iter()
                        .all(|(field, expected)| state.values.get(field) == Some(expected));
                    if accepted {
                        state.navigate(&url);
                    }
                }
                ClickAction::Reveal(selectors) => {
                    for sel in selectors {
                        state.overrides.insert(sel, true);
                    }
                }
                ClickAction::Hide(selectors) => {
                    for sel in selectors {
                        state.overrides.insert(sel, false);
                    }
                }
            }
        }
        Ok(())
    }

    async fn fill(&self, selector: &Selector, value: &str) -> ProbeResult<()> {
        let mut state = self.state.lock();
        state.history.push(format!("fill:{selector}"));
        if !state.is_rendered(selector) {
            return Err(ProbeError::driver(format!(
                "no visible input matches {selector}"
            )));
        }
        state.values.insert(selector.clone(), value.to_string());
        Ok(())
    }

    async fn check(&self, predicate: &PagePredicate) -> ProbeResult<bool> {
        let mut state = self.state.lock();
        state.history.push(format!("check:{predicate}"));
        Ok(predicate.matches_url(&state.url))
    }
}

/// What a list page renders once loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListContent {
    /// Data grid with rows
    #[default]
    Rows,
    /// Empty-state message
    Empty,
    /// Neither (stuck loading)
    Missing,
}

/// Preset model of the Pipelines console
#[derive(Debug, Clone)]
pub struct MockConsole {
    base_url: String,
    username: String,
    password: String,
    tour: bool,
    content: ListContent,
}

impl MockConsole {
    /// Console at `base_url` accepting the given credentials
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
            tour: false,
            content: ListContent::Rows,
        }
    }

    /// Show the guided tour popup on the overview dashboard
    #[must_use]
    pub const fn with_tour(mut self, tour: bool) -> Self {
        self.tour = tour;
        self
    }

    /// What every list page renders
    #[must_use]
    pub const fn with_content(mut self, content: ListContent) -> Self {
        self.content = content;
        self
    }

    /// OAuth provider chooser URL
    #[must_use]
    pub fn login_url(&self) -> String {
        format!("{}/oauth/authorize", self.base_url)
    }

    /// Full URL for a console path
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build a fresh driver positioned on a blank page
    #[must_use]
    pub fn build(&self) -> MockDriver {
        let chooser = self.login_url();
        let credentials = |provider: &str| format!("{chooser}/{provider}");
        let list_content: Vec<&str> = match self.content {
            ListContent::Rows => vec![locators::DATA_GRID],
            ListContent::Empty => vec![locators::NO_RESOURCE_MSG],
            ListContent::Missing => Vec::new(),
        };

        let mut dashboard = vec![
            overview::OVERVIEW_HEADER,
            navigation::PIPELINES_BUTTON,
            navigation::KUBE_ADMIN_MENU,
        ];
        if self.tour {
            dashboard.push(overview::SKIP_TOUR_BUTTON);
        }

        let login_form = [
            login::LOGIN_WITH_AUTH,
            login::USERNAME_INPUT,
            login::PASSWORD_INPUT,
            login::LOGIN_BUTTON,
        ];
        let submit = ClickAction::Submit {
            fields: vec![
                (Selector::parse(login::USERNAME_INPUT), self.username.clone()),
                (Selector::parse(login::PASSWORD_INPUT), self.password.clone()),
            ],
            url: self.url("dashboards"),
        };

        let mut driver = MockDriver::new()
            .at("about:blank")
            .with_redirect(&self.base_url, chooser.clone())
            .with_route(
                &chooser,
                [
                    login::LOGIN_WITH_AUTH,
                    login::KUBE_ADMIN_AUTH_LINK,
                    login::HTPASSWD_AUTH_LINK,
                ],
            )
            .with_route(&credentials("kube-admin"), login_form)
            .with_route(&credentials("htpasswd"), login_form)
            .on_click(
                login::KUBE_ADMIN_AUTH_LINK,
                ClickAction::Navigate(credentials("kube-admin")),
            )
            .on_click(
                login::HTPASSWD_AUTH_LINK,
                ClickAction::Navigate(credentials("htpasswd")),
            )
            .on_click(login::LOGIN_BUTTON, submit)
            .with_route(&self.url("dashboards"), dashboard)
            .on_click(
                overview::SKIP_TOUR_BUTTON,
                ClickAction::Hide(vec![Selector::parse(overview::SKIP_TOUR_BUTTON)]),
            )
            .on_click(
                navigation::PIPELINES_BUTTON,
                ClickAction::Reveal(
                    [
                        navigation::NAV_OVERVIEW_LINK,
                        navigation::NAV_PIPELINES_LINK,
                        navigation::NAV_TASKS_LINK,
                        navigation::NAV_TRIGGERS_LINK,
                    ]
                    .into_iter()
                    .map(Selector::parse)
                    .collect(),
                ),
            )
            .with_route(
                &self.url("pipelines-overview/all-namespaces"),
                [pipelines_overview::OVERVIEW_HEADER, navigation::PIPELINES_BUTTON],
            )
            .on_click(
                navigation::NAV_OVERVIEW_LINK,
                ClickAction::Navigate(self.url("pipelines-overview/all-namespaces")),
            );

        let list_pages: [(&str, &str, &str, &[(&str, &str)]); 3] = [
            (
                "pipelines/all-namespaces",
                pipelines::PIPELINES_HEADER,
                navigation::NAV_PIPELINES_LINK,
                &[
                    (pipelines::PIPELINES_TAB, ""),
                    (pipelines::PIPELINE_RUNS_TAB, "pipeline-runs"),
                    (pipelines::REPOSITORIES_TAB, "repositories"),
                ],
            ),
            (
                "tasks/all-namespaces",
                tasks::TASKS_HEADER,
                navigation::NAV_TASKS_LINK,
                &[(tasks::TASKS_TAB, ""), (tasks::TASK_RUNS_TAB, "task-runs")],
            ),
            (
                "triggers/all-namespaces",
                triggers::TRIGGERS_HEADER,
                navigation::NAV_TRIGGERS_LINK,
                &[
                    (triggers::EVENT_LISTENERS_TAB, ""),
                    (triggers::TRIGGER_TEMPLATES_TAB, "trigger-templates"),
                    (triggers::TRIGGER_BINDINGS_TAB, "trigger-bindings"),
                    (
                        triggers::CLUSTER_TRIGGER_BINDINGS_TAB,
                        "cluster-trigger-bindings",
                    ),
                ],
            ),
        ];

        for (path, header, nav_link, tabs) in list_pages {
            let page_url = self.url(path);
            driver = driver.on_click(nav_link, ClickAction::Navigate(page_url.clone()));

            let mut rendered = vec![header, navigation::PIPELINES_BUTTON];
            rendered.extend(tabs.iter().map(|(tab, _)| *tab));
            rendered.extend(list_content.iter().copied());

            for (tab, sub_path) in tabs {
                let tab_url = if sub_path.is_empty() {
                    page_url.clone()
                } else {
                    format!("{page_url}/{sub_path}")
                };
                driver = driver
                    .with_route(&tab_url, rendered.iter().copied())
                    .on_click(*tab, ClickAction::Navigate(tab_url));
            }
        }

        driver
    }
}

/// Hands out a fresh [`MockConsole`] driver per scenario
#[derive(Debug)]
pub struct MockLauncher {
    console: MockConsole,
    opened: Mutex<Vec<Arc<MockDriver>>>,
}

impl MockLauncher {
    /// Launcher for the given console model
    #[must_use]
    pub fn new(console: MockConsole) -> Self {
        Self {
            console,
            opened: Mutex::new(Vec::new()),
        }
    }

    /// Every driver opened so far
    #[must_use]
    pub fn opened(&self) -> Vec<Arc<MockDriver>> {
        self.opened.lock().clone()
    }
}

#[async_trait]
impl DriverLauncher for MockLauncher {
    async fn open(&self) -> ProbeResult<SharedDriver> {
        let driver = Arc::new(self.console.build());
        self.opened.lock().push(Arc::clone(&driver));
        tracing::debug!(sessions = self.opened.lock().len(), "opened simulated console");
        Ok(driver)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const BASE: &str = "https://console.apps.example.com";

    fn console() -> MockConsole {
        MockConsole::new(BASE, "developer", "s3cret")
    }

    mod mock_driver_tests {
        use super::*;

        #[tokio::test]
        async fn test_route_controls_visibility() {
            let driver = MockDriver::new()
                .at("https://c/a")
                .with_route("https://c/a", ["#here"]);
            assert!(driver.probe(&Selector::css("#here")).await.unwrap().visible);
            assert!(!driver.probe(&Selector::css("#gone")).await.unwrap().found);
        }

        #[tokio::test]
        async fn test_route_ignores_query_and_slash() {
            let driver = MockDriver::new()
                .at("https://c/a/?x=1")
                .with_route("https://c/a", ["#here"]);
            assert!(driver.probe(&Selector::css("#here")).await.unwrap().visible);
        }

        #[tokio::test]
        async fn test_probe_counter_and_history() {
            let driver = MockDriver::new();
            let sel = Selector::css("#x");
            driver.probe(&sel).await.unwrap();
            driver.probe(&sel).await.unwrap();
            assert_eq!(driver.probe_count("#x"), 2);
            assert!(driver.was_called("probe:#x"));
        }

        #[tokio::test]
        async fn test_delay_hides_first_probes() {
            let driver = MockDriver::new()
                .at("https://c")
                .with_route("https://c", ["#late"])
                .with_delay("#late", 2);
            let sel = Selector::css("#late");
            assert!(!driver.probe(&sel).await.unwrap().visible);
            assert!(!driver.probe(&sel).await.unwrap().visible);
            assert!(driver.probe(&sel).await.unwrap().visible);
        }

        #[tokio::test]
        async fn test_click_hidden_element_fails() {
            let driver = MockDriver::new();
            let err = driver.click(&Selector::css("#nope")).await.unwrap_err();
            assert!(matches!(err, ProbeError::Driver { .. }));
        }

        #[tokio::test]
        async fn test_submit_requires_values() {
            let driver = MockDriver::new()
                .at("https://c/login")
                .with_route("https://c/login", ["#user", "#go"])
                .on_click(
                    "#go",
                    ClickAction::Submit {
                        fields: vec![(Selector::css("#user"), "alice".to_string())],
                        url: "https://c/home".to_string(),
                    },
                );

            driver.click(&Selector::css("#go")).await.unwrap();
            assert_eq!(driver.url(), "https://c/login");

            driver.fill(&Selector::css("#user"), "alice").await.unwrap();
            driver.click(&Selector::css("#go")).await.unwrap();
            assert_eq!(driver.url(), "https://c/home");
        }

        #[tokio::test]
        async fn test_check_url_includes() {
            let driver = MockDriver::new().at("https://c/oauth/authorize");
            let pred = PagePredicate::UrlIncludes("oauth".to_string());
            assert!(driver.check(&pred).await.unwrap());
        }
    }

    mod mock_console_tests {
        use super::*;

        #[tokio::test]
        async fn test_base_url_redirects_to_oauth() {
            let driver = console().build();
            driver.goto(BASE).await.unwrap();
            assert!(driver.url().contains("oauth"));
            let chooser = Selector::parse(login::LOGIN_WITH_AUTH);
            assert!(driver.probe(&chooser).await.unwrap().visible);
        }

        #[tokio::test]
        async fn test_login_lands_on_dashboards() {
            let driver = console().build();
            driver.goto(BASE).await.unwrap();
            driver
                .click(&Selector::parse(login::HTPASSWD_AUTH_LINK))
                .await
                .unwrap();
            driver
                .fill(&Selector::parse(login::USERNAME_INPUT), "developer")
                .await
                .unwrap();
            driver
                .fill(&Selector::parse(login::PASSWORD_INPUT), "s3cret")
                .await
                .unwrap();
            driver
                .click(&Selector::parse(login::LOGIN_BUTTON))
                .await
                .unwrap();
            assert_eq!(driver.url(), format!("{BASE}/dashboards"));
        }

        #[tokio::test]
        async fn test_tour_is_dismissable() {
            let driver = console().with_tour(true).build().at(format!("{BASE}/dashboards"));
            let skip = Selector::parse(overview::SKIP_TOUR_BUTTON);
            assert!(driver.probe(&skip).await.unwrap().visible);
            driver.click(&skip).await.unwrap();
            assert!(!driver.probe(&skip).await.unwrap().visible);
        }

        #[tokio::test]
        async fn test_empty_content_renders_message() {
            let driver = console()
                .with_content(ListContent::Empty)
                .build()
                .at(format!("{BASE}/tasks/all-namespaces"));
            let empty = Selector::parse(locators::NO_RESOURCE_MSG);
            let grid = Selector::parse(locators::DATA_GRID);
            assert!(driver.probe(&empty).await.unwrap().visible);
            assert!(!driver.probe(&grid).await.unwrap().visible);
        }

        #[tokio::test]
        async fn test_tab_navigates_to_sub_path() {
            let driver = console()
                .build()
                .at(format!("{BASE}/triggers/all-namespaces"));
            driver
                .click(&Selector::parse(triggers::TRIGGER_BINDINGS_TAB))
                .await
                .unwrap();
            assert_eq!(
                driver.url(),
                format!("{BASE}/triggers/all-namespaces/trigger-bindings")
            );
        }

        #[tokio::test]
        async fn test_launcher_hands_out_fresh_drivers() {
            let launcher = MockLauncher::new(console());
            let first = launcher.open().await.unwrap();
            first.goto(BASE).await.unwrap();
            let second = launcher.open().await.unwrap();
            assert_eq!(second.current_url().await.unwrap(), "about:blank");
            assert_eq!(launcher.opened().len(), 2);
        }
    }
}
