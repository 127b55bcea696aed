//! console-probe: page objects and behaviour steps for the OpenShift
//! Pipelines web console.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Gherkin scenario                                                │
//! │      │                                                           │
//! │      ▼                                                           │
//! │  steps (ConsoleWorld) ──► pages (LoginPage, TasksPage, ...)      │
//! │                                 │                                │
//! │                                 ▼                                │
//! │                           BasePage (bounded waits)               │
//! │                                 │                                │
//! │                                 ▼                                │
//! │              ConsoleDriver ── ChromiumDriver (CDP) / MockDriver  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A [`Suite`] owns the session configuration, the tour gate and the driver
//! launcher. Every scenario opens its own [`ConsolePages`].

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

#[allow(clippy::missing_errors_doc)]
mod browser;
mod config;
#[allow(clippy::missing_errors_doc)]
mod driver;
mod locator;
pub mod locators;
#[allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
mod mock;
#[allow(clippy::missing_errors_doc)]
mod page;
#[allow(clippy::missing_errors_doc)]
mod page_object;
#[allow(clippy::missing_errors_doc)]
pub mod pages;
mod result;
#[allow(clippy::missing_errors_doc)]
mod session;
#[allow(clippy::missing_errors_doc)]
pub mod steps;
#[allow(clippy::missing_errors_doc)]
mod tour;
mod wait;

pub use browser::{BrowserConfig, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
#[cfg(feature = "browser")]
pub use browser::{ChromeLauncher, ChromiumDriver};
pub use config::{
    ConfigOverrides, SessionConfig, DEFAULT_CONFIG_FILE, ENV_CONSOLE_URL, ENV_IGNORE_SSL,
    ENV_PASSWORD, ENV_TIMEOUT, ENV_USERNAME,
};
pub use driver::{ConsoleDriver, DriverLauncher, ElementState, PagePredicate, SharedDriver};
pub use locator::{BoundingBox, Selector};
pub use locators::{AuthType, NavLink};
pub use mock::{ClickAction, ListContent, MockConsole, MockDriver, MockLauncher};
pub use page::{BasePage, DataState};
pub use page_object::{ConsolePage, DataPage};
pub use result::{ProbeError, ProbeResult};
pub use session::{install_suite, installed_suite, ConsolePages, Suite};
pub use steps::{ConsoleWorld, STEP_VOCABULARY};
pub use tour::TourGate;
pub use wait::{
    url_ends_with, WaitOptions, WaitResult, Waiter, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_SESSION_TIMEOUT_MS, NO_DATA_TIMEOUT_MS,
};

/// Prelude for writing console scenarios
pub mod prelude {
    pub use super::{
        install_suite, BasePage, ConsolePage, ConsolePages, ConsoleWorld, DataPage, DataState,
        MockConsole, MockLauncher, ProbeError, ProbeResult, SessionConfig, Suite,
    };
}
