use crate::locators::tasks;
use crate::page::{BasePage, DataState};
use crate::page_object::{ConsolePage, DataPage};
use crate::result::ProbeResult;

/// Tasks list page with its Tasks and TaskRuns tabs
#[derive(Debug, Clone)]
pub struct TasksPage {
    base: BasePage,
}

impl TasksPage {
    /// Create the page object
    #[must_use]
    pub fn new(base: BasePage) -> Self {
        Self { base }
    }

    /// Open the Tasks tab
    pub async fn navigate_to_tasks_tab(&self) -> ProbeResult<DataState> {
        self.open_tab(tasks::TASKS_TAB, "Tasks tab").await
    }

    /// Open the TaskRuns tab
    pub async fn navigate_to_task_runs_tab(&self) -> ProbeResult<DataState> {
        self.open_tab(tasks::TASK_RUNS_TAB, "TaskRuns tab").await
    }
}

impl ConsolePage for TasksPage {
    const NAME: &'static str = "Tasks page";
    const URL_SUFFIX: &'static str = "tasks/all-namespaces";
    const HEADER: &'static str = tasks::TASKS_HEADER;

    fn base(&self) -> &BasePage {
        &self.base
    }
}

impl DataPage for TasksPage {
    const DATA: &'static str = tasks::DATA_LOAD_CHECK;
    const NO_DATA: &'static str = tasks::NO_DATA_LOAD_CHECK;
}
