//! Concrete page objects for the Pipelines console.

mod login;
mod navigation;
mod overview;
mod pipelines;
mod pipelines_overview;
mod tasks;
mod triggers;

pub use login::LoginPage;
pub use navigation::LeftNavigationBar;
pub use overview::OverviewPage;
pub use pipelines::PipelinesPage;
pub use pipelines_overview::PipelinesOverviewPage;
pub use tasks::TasksPage;
pub use triggers::TriggersPage;
