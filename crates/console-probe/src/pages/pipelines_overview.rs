use crate::locators::pipelines_overview;
use crate::page::BasePage;
use crate::page_object::ConsolePage;

/// Pipelines overview (metrics) page
#[derive(Debug, Clone)]
pub struct PipelinesOverviewPage {
    base: BasePage,
}

impl PipelinesOverviewPage {
    /// Create the page object
    #[must_use]
    pub fn new(base: BasePage) -> Self {
        Self { base }
    }
}

impl ConsolePage for PipelinesOverviewPage {
    const NAME: &'static str = "Pipelines Overview page";
    const URL_SUFFIX: &'static str = "pipelines-overview/all-namespaces";
    const HEADER: &'static str = pipelines_overview::OVERVIEW_HEADER;

    fn base(&self) -> &BasePage {
        &self.base
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::pages::test_support::{base_on, console};

    #[tokio::test(start_paused = true)]
    async fn test_verify_on_page() {
        let (base, _) = base_on(console().build(), Some("pipelines-overview/all-namespaces"));
        PipelinesOverviewPage::new(base).verify_on_page().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cluster_overview_is_not_pipelines_overview() {
        let (base, _) = base_on(console().build(), Some("dashboards"));
        let err = PipelinesOverviewPage::new(base)
            .verify_on_page()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("pipelines-overview/all-namespaces"));
    }
}
