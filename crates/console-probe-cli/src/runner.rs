//! Scenario execution.
//!
//! Resolves the session configuration, installs the [`Suite`] the step layer
//! reads, and hands the feature files to cucumber.

use crate::commands::{ConnectionArgs, RunArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::RunSummary;
use console_probe::{
    install_suite, ConfigOverrides, ConsoleWorld, DriverLauncher, MockConsole, MockLauncher,
    SessionConfig, Suite, DEFAULT_CONFIG_FILE,
};
use cucumber::writer::Stats as _;
use cucumber::World as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Console URL used by `--simulate` when none is configured
pub const SIMULATED_CONSOLE_URL: &str = "https://console-openshift-console.apps.simulated.local";
/// Login used by `--simulate` when none is configured
pub const SIMULATED_CREDENTIAL: &str = "kubeadmin";

/// Resolve the session configuration from file, environment and flags.
///
/// With `simulate` the URL and credentials fall back to the simulated
/// console's values instead of being required.
pub fn resolve_session_config(
    connection: &ConnectionArgs,
    simulate: bool,
) -> CliResult<SessionConfig> {
    resolve_with(connection, simulate, |key| std::env::var(key).ok())
}

fn resolve_with<F>(connection: &ConnectionArgs, simulate: bool, lookup: F) -> CliResult<SessionConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut layers = if simulate {
        ConfigOverrides {
            base_url: Some(SIMULATED_CONSOLE_URL.to_string()),
            username: Some(SIMULATED_CREDENTIAL.to_string()),
            password: Some(SIMULATED_CREDENTIAL.to_string()),
            ..ConfigOverrides::default()
        }
    } else {
        ConfigOverrides::default()
    };

    if let Some(path) = config_file(connection.config.as_deref())? {
        info!(path = %path.display(), "loading config file");
        layers = layers.merge(ConfigOverrides::from_toml_file(&path)?);
    }
    layers = layers
        .merge(ConfigOverrides::from_lookup(lookup)?)
        .merge(connection.overrides());

    Ok(layers.resolve()?)
}

fn config_file(explicit: Option<&Path>) -> CliResult<Option<PathBuf>> {
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(CliError::config(format!(
            "config file {} not found",
            path.display()
        ))),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            Ok(default.is_file().then_some(default))
        }
    }
}

/// Runs feature files for the `run` command
#[derive(Debug)]
pub struct ScenarioRunner {
    config: CliConfig,
}

impl ScenarioRunner {
    /// Create a runner
    #[must_use]
    pub const fn new(config: CliConfig) -> Self {
        Self { config }
    }

    /// Run the scenarios selected by `args` on a fresh tokio runtime
    pub fn run(&self, args: &RunArgs) -> CliResult<RunSummary> {
        if !args.features.exists() {
            return Err(CliError::config(format!(
                "feature path {} does not exist",
                args.features.display()
            )));
        }
        let session = resolve_session_config(&args.connection, args.simulate)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.run_async(args, session))
    }

    async fn run_async(&self, args: &RunArgs, session: SessionConfig) -> CliResult<RunSummary> {
        let launcher = Self::launcher(args, &session).await?;
        info!(
            base_url = %session.base_url,
            simulate = args.simulate,
            "suite ready"
        );
        install_suite(Suite::new(session, Arc::clone(&launcher)))?;

        let summary = self.execute(args).await;

        if let Err(e) = launcher.shutdown().await {
            warn!(error = %e, "browser shutdown failed");
        }
        Ok(summary)
    }

    async fn launcher(
        args: &RunArgs,
        session: &SessionConfig,
    ) -> CliResult<Arc<dyn DriverLauncher>> {
        if args.simulate {
            let console = MockConsole::new(
                session.base_url.clone(),
                session.username.clone(),
                session.password(),
            )
            .with_tour(true);
            return Ok(Arc::new(MockLauncher::new(console)));
        }
        Self::browser_launcher(args, session).await
    }

    #[cfg(feature = "browser")]
    async fn browser_launcher(
        args: &RunArgs,
        session: &SessionConfig,
    ) -> CliResult<Arc<dyn DriverLauncher>> {
        use console_probe::{BrowserConfig, ChromeLauncher};

        let mut browser = BrowserConfig::default()
            .with_headless(!args.headed)
            .with_viewport(args.viewport_width, args.viewport_height)
            .with_ignore_https_errors(session.ignore_https_errors);
        if let Some(ref path) = args.chromium_path {
            browser = browser.with_chromium_path(path.clone());
        }
        if args.no_sandbox {
            browser = browser.with_no_sandbox();
        }
        Ok(Arc::new(ChromeLauncher::launch(browser).await?))
    }

    #[cfg(not(feature = "browser"))]
    async fn browser_launcher(
        _args: &RunArgs,
        _session: &SessionConfig,
    ) -> CliResult<Arc<dyn DriverLauncher>> {
        Err(CliError::config(
            "built without the `browser` feature; use --simulate",
        ))
    }

    async fn execute(&self, args: &RunArgs) -> RunSummary {
        let tag = args.tag_name().map(str::to_owned);
        let mut cucumber = ConsoleWorld::cucumber()
            .with_cli(cucumber::cli::Opts::<_, _, _, cucumber::cli::Empty>::default())
            .max_concurrent_scenarios(args.concurrency.max(1));
        if args.fail_fast {
            cucumber = cucumber.fail_fast();
        }
        if self.config.verbosity.is_verbose() {
            info!(features = %args.features.display(), tag = ?tag, "running scenarios");
        }

        let writer = cucumber
            .fail_on_skipped()
            .filter_run(args.features.clone(), move |feature, rule, scenario| {
                tag.as_deref().map_or(true, |tag| {
                    scenario
                        .tags
                        .iter()
                        .chain(&feature.tags)
                        .chain(rule.iter().flat_map(|r| &r.tags))
                        .any(|t| t == tag)
                })
            })
            .await;

        RunSummary {
            passed_steps: writer.passed_steps(),
            failed_steps: writer.failed_steps(),
            skipped_steps: writer.skipped_steps(),
            parsing_errors: writer.parsing_errors(),
            hook_errors: writer.hook_errors(),
        }
    }
}
