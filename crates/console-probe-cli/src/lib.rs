//! console-probe CLI: run OpenShift Pipelines console scenarios
//!
//! ## Usage
//!
//! ```bash
//! console-probe run tests/features             # Run against CONSOLE_URL
//! console-probe run --simulate --tag smoke     # Run against the simulated console
//! console-probe config --format toml           # Print the resolved configuration
//! console-probe steps                          # List the step sentences
//! ```

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Commands, ConfigArgs, ConfigFormat, ConnectionArgs, RunArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{render_config, render_steps, RunSummary};
pub use runner::{resolve_session_config, ScenarioRunner};
