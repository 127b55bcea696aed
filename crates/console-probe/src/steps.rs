//! Gherkin step definitions.
//!
//! Each sentence maps to one page object operation. Steps resolve the
//! [`Suite`](crate::Suite) installed with [`install_suite`](crate::install_suite)
//! and open their scenario's session on first use.

use crate::page_object::{ConsolePage, DataPage};
use crate::result::{ProbeError, ProbeResult};
use crate::session::{installed_suite, ConsolePages};
use cucumber::{given, then, when, World};

/// Gherkin keywords and sentences understood by the step layer
pub const STEP_VOCABULARY: &[(&str, &str)] = &[
    ("Given", "the user is on the OpenShift login page"),
    ("When", "user chooses to login with {auth_type}"),
    ("When", "the user logs in with valid credentials"),
    ("When/Then", "Validate Pipelines button is visible in the left navigation bar"),
    ("When", "the user clicks on Pipelines button"),
    ("Then", "Verify the following {links} are available under Pipelines button"),
    ("When/Then", "the user navigates to the Overview page"),
    ("When/Then", "the user navigates to the Pipelines page"),
    ("When/Then", "the user navigates to Pipelines tab"),
    ("When/Then", "the user navigates to PipelineRuns tab"),
    ("When/Then", "the user navigates to Repositories tab"),
    ("When/Then", "the user navigates to the Tasks page"),
    ("When/Then", "the user navigates to Tasks tab"),
    ("When/Then", "the user navigates to TaskRuns tab"),
    ("When/Then", "the user navigates to the Triggers page"),
    ("When/Then", "the user navigates to EventListeners tab"),
    ("When/Then", "the user navigates to TriggerTemplates tab"),
    ("When/Then", "the user navigates to TriggerBindings tab"),
    ("When/Then", "the user navigates to ClusterTriggerBindings tab"),
];

const NAV_BAR: &str = "Left navigation bar";

/// Per-scenario state: the session opens on the first step that needs it
#[derive(Debug, Default, World)]
pub struct ConsoleWorld {
    pages: Option<ConsolePages>,
}

impl ConsoleWorld {
    /// World over an already opened session
    #[must_use]
    pub fn with_pages(pages: ConsolePages) -> Self {
        Self { pages: Some(pages) }
    }

    /// Page objects of this scenario
    pub async fn pages(&mut self) -> ProbeResult<&ConsolePages> {
        let pages = match self.pages.take() {
            Some(pages) => pages,
            None => installed_suite()?.open_session().await?,
        };
        Ok(&*self.pages.insert(pages))
    }
}

fn ensure(condition: bool, page: &str, reason: impl Into<String>) -> ProbeResult<()> {
    if condition {
        Ok(())
    } else {
        Err(ProbeError::page_verification(page, reason))
    }
}

#[given("the user is on the OpenShift login page")]
async fn user_on_login_page(world: &mut ConsoleWorld) -> ProbeResult<()> {
    let login = &world.pages().await?.login;
    login.goto().await?;
    let shown = login.verify_on_login_page().await?;
    ensure(shown, "Login page", "Login providers are not visible.")
}

#[when(expr = "user chooses to login with {word}")]
async fn user_chooses_auth_type(world: &mut ConsoleWorld, auth_type: String) -> ProbeResult<()> {
    world
        .pages()
        .await?
        .login
        .choose_login_auth_type(&auth_type)
        .await?;
    Ok(())
}

#[when("the user logs in with valid credentials")]
async fn user_logs_in(world: &mut ConsoleWorld) -> ProbeResult<()> {
    let pages = world.pages().await?;
    pages.login.login().await?;
    pages.overview.verify_on_page().await
}

async fn pipelines_button_visible(world: &mut ConsoleWorld) -> ProbeResult<()> {
    let visible = world.pages().await?.nav.verify_pipelines_button_visible().await?;
    ensure(
        visible,
        NAV_BAR,
        "Pipelines button is not visible in left navigation bar.",
    )
}

#[when("Validate Pipelines button is visible in the left navigation bar")]
async fn when_pipelines_button_visible(world: &mut ConsoleWorld) -> ProbeResult<()> {
    pipelines_button_visible(world).await
}

#[then("Validate Pipelines button is visible in the left navigation bar")]
async fn then_pipelines_button_visible(world: &mut ConsoleWorld) -> ProbeResult<()> {
    pipelines_button_visible(world).await
}

#[when("the user clicks on Pipelines button")]
async fn user_clicks_pipelines_button(world: &mut ConsoleWorld) -> ProbeResult<()> {
    world.pages().await?.nav.click_pipelines_button().await
}

#[then(expr = "Verify the following {word} are available under Pipelines button")]
async fn links_available(world: &mut ConsoleWorld, links: String) -> ProbeResult<()> {
    let available = world.pages().await?.nav.verify_link_available(&links).await?;
    ensure(
        available,
        NAV_BAR,
        format!("Link '{links}' is not available under Pipelines button."),
    )
}

async fn to_overview(world: &mut ConsoleWorld) -> ProbeResult<()> {
    let pages = world.pages().await?;
    pages.nav.navigate_to_overview().await?;
    pages.pipelines_overview.verify_on_page().await
}

#[when("the user navigates to the Overview page")]
async fn when_to_overview(world: &mut ConsoleWorld) -> ProbeResult<()> {
    to_overview(world).await
}

#[then("the user navigates to the Overview page")]
async fn then_to_overview(world: &mut ConsoleWorld) -> ProbeResult<()> {
    to_overview(world).await
}

async fn to_pipelines(world: &mut ConsoleWorld) -> ProbeResult<()> {
    let pages = world.pages().await?;
    pages.nav.navigate_to_pipelines().await?;
    pages.pipelines.verify_on_page().await?;
    pages
        .pipelines
        .verify_data_load(None, Some("Pipelines tab"))
        .await?;
    Ok(())
}

#[when("the user navigates to the Pipelines page")]
async fn when_to_pipelines(world: &mut ConsoleWorld) -> ProbeResult<()> {
    to_pipelines(world).await
}

#[then("the user navigates to the Pipelines page")]
async fn then_to_pipelines(world: &mut ConsoleWorld) -> ProbeResult<()> {
    to_pipelines(world).await
}

#[when("the user navigates to Pipelines tab")]
async fn when_to_pipelines_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    world.pages().await?.pipelines.navigate_to_pipelines_tab().await?;
    Ok(())
}

#[then("the user navigates to Pipelines tab")]
async fn then_to_pipelines_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    when_to_pipelines_tab(world).await
}

#[when("the user navigates to PipelineRuns tab")]
async fn when_to_pipeline_runs_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    world
        .pages()
        .await?
        .pipelines
        .navigate_to_pipeline_runs_tab()
        .await?;
    Ok(())
}

#[then("the user navigates to PipelineRuns tab")]
async fn then_to_pipeline_runs_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    when_to_pipeline_runs_tab(world).await
}

#[when("the user navigates to Repositories tab")]
async fn when_to_repositories_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    world
        .pages()
        .await?
        .pipelines
        .navigate_to_repositories_tab()
        .await?;
    Ok(())
}

#[then("the user navigates to Repositories tab")]
async fn then_to_repositories_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    when_to_repositories_tab(world).await
}

async fn to_tasks(world: &mut ConsoleWorld) -> ProbeResult<()> {
    let pages = world.pages().await?;
    pages.nav.navigate_to_tasks().await?;
    pages.tasks.verify_on_page().await?;
    pages.tasks.verify_data_load(None, Some("Tasks tab")).await?;
    Ok(())
}

#[when("the user navigates to the Tasks page")]
async fn when_to_tasks(world: &mut ConsoleWorld) -> ProbeResult<()> {
    to_tasks(world).await
}

#[then("the user navigates to the Tasks page")]
async fn then_to_tasks(world: &mut ConsoleWorld) -> ProbeResult<()> {
    to_tasks(world).await
}

#[when("the user navigates to Tasks tab")]
async fn when_to_tasks_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    world.pages().await?.tasks.navigate_to_tasks_tab().await?;
    Ok(())
}

#[then("the user navigates to Tasks tab")]
async fn then_to_tasks_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    when_to_tasks_tab(world).await
}

#[when("the user navigates to TaskRuns tab")]
async fn when_to_task_runs_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    world.pages().await?.tasks.navigate_to_task_runs_tab().await?;
    Ok(())
}

#[then("the user navigates to TaskRuns tab")]
async fn then_to_task_runs_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    when_to_task_runs_tab(world).await
}

async fn to_triggers(world: &mut ConsoleWorld) -> ProbeResult<()> {
    let pages = world.pages().await?;
    pages.nav.navigate_to_triggers().await?;
    pages.triggers.verify_on_page().await?;
    pages
        .triggers
        .verify_data_load(None, Some("Triggers tab"))
        .await?;
    Ok(())
}

#[when("the user navigates to the Triggers page")]
async fn when_to_triggers(world: &mut ConsoleWorld) -> ProbeResult<()> {
    to_triggers(world).await
}

#[then("the user navigates to the Triggers page")]
async fn then_to_triggers(world: &mut ConsoleWorld) -> ProbeResult<()> {
    to_triggers(world).await
}

#[when("the user navigates to EventListeners tab")]
async fn when_to_event_listeners_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    world
        .pages()
        .await?
        .triggers
        .navigate_to_event_listeners_tab()
        .await?;
    Ok(())
}

#[then("the user navigates to EventListeners tab")]
async fn then_to_event_listeners_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    when_to_event_listeners_tab(world).await
}

#[when("the user navigates to TriggerTemplates tab")]
async fn when_to_trigger_templates_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    world
        .pages()
        .await?
        .triggers
        .navigate_to_trigger_templates_tab()
        .await?;
    Ok(())
}

#[then("the user navigates to TriggerTemplates tab")]
async fn then_to_trigger_templates_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    when_to_trigger_templates_tab(world).await
}

#[when("the user navigates to TriggerBindings tab")]
async fn when_to_trigger_bindings_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    world
        .pages()
        .await?
        .triggers
        .navigate_to_trigger_bindings_tab()
        .await?;
    Ok(())
}

#[then("the user navigates to TriggerBindings tab")]
async fn then_to_trigger_bindings_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    when_to_trigger_bindings_tab(world).await
}

#[when("the user navigates to ClusterTriggerBindings tab")]
async fn when_to_cluster_trigger_bindings_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    world
        .pages()
        .await?
        .triggers
        .navigate_to_cluster_trigger_bindings_tab()
        .await?;
    Ok(())
}

#[then("the user navigates to ClusterTriggerBindings tab")]
async fn then_to_cluster_trigger_bindings_tab(world: &mut ConsoleWorld) -> ProbeResult<()> {
    when_to_cluster_trigger_bindings_tab(world).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::mock::MockConsole;
    use crate::tour::TourGate;
    use std::sync::Arc;

    const BASE: &str = "https://console.apps.example.com";

    fn world() -> ConsoleWorld {
        let driver = Arc::new(MockConsole::new(BASE, "developer", "s3cret").build());
        let config = Arc::new(SessionConfig::new(BASE, "developer", "s3cret"));
        ConsoleWorld::with_pages(ConsolePages::new(driver, config, Arc::new(TourGate::new())))
    }

    #[test]
    fn test_vocabulary_has_every_sentence_once() {
        let mut sentences: Vec<&str> = STEP_VOCABULARY.iter().map(|(_, s)| *s).collect();
        let total = sentences.len();
        sentences.sort_unstable();
        sentences.dedup();
        assert_eq!(sentences.len(), total);
        assert_eq!(total, 19);
    }

    #[tokio::test(start_paused = true)]
    async fn test_step_chain_reaches_tasks() {
        let mut world = world();
        user_on_login_page(&mut world).await.unwrap();
        user_chooses_auth_type(&mut world, "htpasswd".to_string())
            .await
            .unwrap();
        user_logs_in(&mut world).await.unwrap();
        then_pipelines_button_visible(&mut world).await.unwrap();
        user_clicks_pipelines_button(&mut world).await.unwrap();
        links_available(&mut world, "Tasks".to_string()).await.unwrap();
        when_to_tasks(&mut world).await.unwrap();
        then_to_task_runs_tab(&mut world).await.unwrap();

        let url = world.pages().await.unwrap().driver.current_url().await.unwrap();
        assert_eq!(url, format!("{BASE}/tasks/all-namespaces/task-runs"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_link_fails_step() {
        let mut world = world();
        let err = links_available(&mut world, "Builds".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::InvalidArgument { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hidden_link_fails_with_message() {
        let mut world = world();
        world
            .pages()
            .await
            .unwrap()
            .driver
            .goto(&format!("{BASE}/dashboards"))
            .await
            .unwrap();
        let err = links_available(&mut world, "Triggers".to_string())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Left navigation bar verification failed: \
             Link 'Triggers' is not available under Pipelines button."
        );
    }
}
