use crate::locators::pipelines;
use crate::page::{BasePage, DataState};
use crate::page_object::{ConsolePage, DataPage};
use crate::result::ProbeResult;

/// Pipelines list page with its Pipelines, PipelineRuns and Repositories tabs
#[derive(Debug, Clone)]
pub struct PipelinesPage {
    base: BasePage,
}

impl PipelinesPage {
    /// Create the page object
    #[must_use]
    pub fn new(base: BasePage) -> Self {
        Self { base }
    }

    /// Open the Pipelines tab
    pub async fn navigate_to_pipelines_tab(&self) -> ProbeResult<DataState> {
        self.open_tab(pipelines::PIPELINES_TAB, "Pipelines tab").await
    }

    /// Open the PipelineRuns tab
    pub async fn navigate_to_pipeline_runs_tab(&self) -> ProbeResult<DataState> {
        self.open_tab(pipelines::PIPELINE_RUNS_TAB, "PipelineRuns tab")
            .await
    }

    /// Open the Repositories tab
    pub async fn navigate_to_repositories_tab(&self) -> ProbeResult<DataState> {
        self.open_tab(pipelines::REPOSITORIES_TAB, "Repositories tab")
            .await
    }
}

impl ConsolePage for PipelinesPage {
    const NAME: &'static str = "Pipelines page";
    const URL_SUFFIX: &'static str = "pipelines/all-namespaces";
    const HEADER: &'static str = pipelines::PIPELINES_HEADER;

    fn base(&self) -> &BasePage {
        &self.base
    }
}

impl DataPage for PipelinesPage {
    const DATA: &'static str = pipelines::DATA_LOAD_CHECK;
    const NO_DATA: &'static str = pipelines::NO_DATA_LOAD_CHECK;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::ListContent;
    use crate::pages::test_support::{base_on, console, BASE};
    use crate::result::ProbeError;

    const PATH: &str = "pipelines/all-namespaces";

    #[tokio::test(start_paused = true)]
    async fn test_verify_on_page() {
        let (base, _) = base_on(console().build(), Some(PATH));
        PipelinesPage::new(base).verify_on_page().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_tabs_load_rows() {
        let (base, driver) = base_on(console().build(), Some(PATH));
        let page = PipelinesPage::new(base);

        assert_eq!(
            page.navigate_to_pipeline_runs_tab().await.unwrap(),
            DataState::Loaded
        );
        assert_eq!(driver.url(), format!("{BASE}/{PATH}/pipeline-runs"));
        assert_eq!(
            page.navigate_to_repositories_tab().await.unwrap(),
            DataState::Loaded
        );
        assert_eq!(
            page.navigate_to_pipelines_tab().await.unwrap(),
            DataState::Loaded
        );
        page.verify_on_page().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_tab_is_valid() {
        let (base, _) = base_on(
            console().with_content(ListContent::Empty).build(),
            Some(PATH),
        );
        let state = PipelinesPage::new(base)
            .navigate_to_repositories_tab()
            .await
            .unwrap();
        assert!(state.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_context_is_page_name() {
        let (base, _) = base_on(
            console().with_content(ListContent::Missing).build(),
            Some(PATH),
        );
        let err = PipelinesPage::new(base)
            .verify_data_load(None, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProbeError::DataLoadFailed { ref context, .. } if context == "Pipelines page"
        ));
    }
}
