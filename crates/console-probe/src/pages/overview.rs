use crate::locators::overview;
use crate::page::BasePage;
use crate::page_object::ConsolePage;
use crate::result::ProbeResult;
use crate::tour::TourGate;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Cluster overview dashboard shown after login
#[derive(Debug, Clone)]
pub struct OverviewPage {
    base: BasePage,
    tour: Arc<TourGate>,
}

impl OverviewPage {
    /// Create the page object sharing the suite's tour gate
    #[must_use]
    pub fn new(base: BasePage, tour: Arc<TourGate>) -> Self {
        Self { base, tour }
    }

    /// Dismiss the guided tour, looking for it only once per suite.
    ///
    /// Returns `Some(true)` if the popup was dismissed, `Some(false)` if it
    /// was not shown and `None` if an earlier session already checked.
    pub async fn skip_tour_once(&self) -> ProbeResult<Option<bool>> {
        let outcome = self
            .tour
            .run_once(|| async {
                if !self.base.is_visible(overview::SKIP_TOUR_BUTTON, None).await? {
                    return Ok(false);
                }
                self.base
                    .click_element(overview::SKIP_TOUR_BUTTON, None)
                    .await?;
                Ok(true)
            })
            .await?;

        if let Some(dismissed) = outcome {
            info!(dismissed, "guided tour checked");
        }
        Ok(outcome)
    }
}

#[async_trait]
impl ConsolePage for OverviewPage {
    const NAME: &'static str = "Overview page";
    const URL_SUFFIX: &'static str = "dashboards";
    const HEADER: &'static str = overview::OVERVIEW_HEADER;

    fn base(&self) -> &BasePage {
        &self.base
    }

    async fn verify_on_page(&self) -> ProbeResult<()> {
        self.skip_tour_once().await?;
        self.base
            .verify_page(Self::URL_SUFFIX, Self::HEADER, Self::NAME)
            .await
    }
}
