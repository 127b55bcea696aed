use crate::locators::triggers;
use crate::page::{BasePage, DataState};
use crate::page_object::{ConsolePage, DataPage};
use crate::result::ProbeResult;

/// Triggers list page
#[derive(Debug, Clone)]
pub struct TriggersPage {
    base: BasePage,
}

impl TriggersPage {
    /// Create the page object
    #[must_use]
    pub fn new(base: BasePage) -> Self {
        Self { base }
    }

    /// Open the EventListeners tab
    pub async fn navigate_to_event_listeners_tab(&self) -> ProbeResult<DataState> {
        self.open_tab(triggers::EVENT_LISTENERS_TAB, "EventListeners tab")
            .await
    }

    /// Open the TriggerTemplates tab
    pub async fn navigate_to_trigger_templates_tab(&self) -> ProbeResult<DataState> {
        self.open_tab(triggers::TRIGGER_TEMPLATES_TAB, "TriggerTemplates tab")
            .await
    }

    /// Open the TriggerBindings tab
    pub async fn navigate_to_trigger_bindings_tab(&self) -> ProbeResult<DataState> {
        self.open_tab(triggers::TRIGGER_BINDINGS_TAB, "TriggerBindings tab")
            .await
    }

    /// Open the ClusterTriggerBindings tab
    pub async fn navigate_to_cluster_trigger_bindings_tab(&self) -> ProbeResult<DataState> {
        self.open_tab(
            triggers::CLUSTER_TRIGGER_BINDINGS_TAB,
            "ClusterTriggerBindings tab",
        )
        .await
    }
}

impl ConsolePage for TriggersPage {
    const NAME: &'static str = "Triggers page";
    const URL_SUFFIX: &'static str = "triggers/all-namespaces";
    const HEADER: &'static str = triggers::TRIGGERS_HEADER;

    fn base(&self) -> &BasePage {
        &self.base
    }
}

impl DataPage for TriggersPage {
    const DATA: &'static str = triggers::DATA_LOAD_CHECK;
    const NO_DATA: &'static str = triggers::NO_DATA_LOAD_CHECK;
}
