//! console-probe CLI: end-to-end scenarios for the OpenShift Pipelines console
//!
//! ## Usage
//!
//! ```bash
//! console-probe run                          # Run tests/features against CONSOLE_URL
//! console-probe run --simulate -t smoke      # Simulated console, tagged scenarios only
//! console-probe config                       # Show the resolved configuration
//! console-probe steps                        # List the step sentences
//! ```

use clap::Parser;
use console_probe_cli::{
    render_config, render_steps, resolve_session_config, Cli, CliConfig, CliError, CliResult,
    Commands, ConfigArgs, RunArgs, ScenarioRunner, Verbosity,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    init_tracing(config.verbosity);

    match cli.command {
        Commands::Run(args) => run_scenarios(config, &args),
        Commands::Config(args) => run_config(&args),
        Commands::Steps => {
            print!("{}", render_steps(config.color.should_color()));
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.verbose, cli.quiet))
        .with_color(cli.color.into())
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_scenarios(config: CliConfig, args: &RunArgs) -> CliResult<()> {
    let use_color = config.color.should_color();
    let quiet = config.verbosity.is_quiet();
    let summary = ScenarioRunner::new(config).run(args)?;

    if !quiet {
        println!("{}", summary.render(use_color));
    }
    if summary.has_failed() {
        return Err(CliError::test_execution(summary.failure_message()));
    }
    Ok(())
}

fn run_config(args: &ConfigArgs) -> CliResult<()> {
    let session = resolve_session_config(&args.connection, false)?;
    println!("{}", render_config(&session, args.format)?);
    Ok(())
}
