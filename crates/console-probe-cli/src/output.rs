//! Terminal rendering for the CLI commands

use crate::commands::ConfigFormat;
use crate::error::CliResult;
use console::style;
use console_probe::{SessionConfig, STEP_VOCABULARY};
use serde::Serialize;

/// Render the step vocabulary, one sentence per line
#[must_use]
pub fn render_steps(use_color: bool) -> String {
    let width = STEP_VOCABULARY
        .iter()
        .map(|(keyword, _)| keyword.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (keyword, sentence) in STEP_VOCABULARY {
        let padded = format!("{keyword:>width$}");
        out.push_str(&format!(
            "{} {sentence}\n",
            style(padded).cyan().bold().force_styling(use_color)
        ));
    }
    out
}

/// Render the resolved configuration; the password is always redacted
pub fn render_config(config: &SessionConfig, format: ConfigFormat) -> CliResult<String> {
    let text = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
    };
    Ok(text)
}

/// Step counts reported by the scenario writer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Steps that passed
    pub passed_steps: usize,
    /// Steps that failed
    pub failed_steps: usize,
    /// Steps that were skipped
    pub skipped_steps: usize,
    /// Feature files that could not be parsed
    pub parsing_errors: usize,
    /// Failed before/after hooks
    pub hook_errors: usize,
}

impl RunSummary {
    /// Whether the run counts as failed
    #[must_use]
    pub const fn has_failed(&self) -> bool {
        self.failed_steps > 0 || self.parsing_errors > 0 || self.hook_errors > 0
    }

    /// Short description of what failed
    #[must_use]
    pub fn failure_message(&self) -> String {
        let mut parts = Vec::new();
        if self.failed_steps > 0 {
            parts.push(format!("{} failed step(s)", self.failed_steps));
        }
        if self.parsing_errors > 0 {
            parts.push(format!("{} parsing error(s)", self.parsing_errors));
        }
        if self.hook_errors > 0 {
            parts.push(format!("{} hook error(s)", self.hook_errors));
        }
        parts.join(", ")
    }

    /// One-line summary for the terminal
    #[must_use]
    pub fn render(&self, use_color: bool) -> String {
        let status = if self.has_failed() {
            style("FAILED").red().bold().force_styling(use_color)
        } else {
            style("PASSED").green().bold().force_styling(use_color)
        };
        format!(
            "{status}: {} passed, {} failed, {} skipped",
            self.passed_steps, self.failed_steps, self.skipped_steps
        )
    }
}
