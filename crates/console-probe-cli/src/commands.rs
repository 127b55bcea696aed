//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use console_probe::{ConfigOverrides, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use std::path::PathBuf;

/// console-probe: end-to-end scenarios for the OpenShift Pipelines console
#[derive(Parser, Debug)]
#[command(name = "console-probe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Color output options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run feature files against the console
    Run(RunArgs),

    /// Print the resolved session configuration
    Config(ConfigArgs),

    /// List the step sentences feature files can use
    Steps,
}

/// Connection settings shared by `run` and `config`.
///
/// Flags win over environment variables, which win over the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Config file (defaults to ./console-probe.toml when present)
    #[arg(long, env = "CONSOLE_PROBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Console base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Login user
    #[arg(long)]
    pub username: Option<String>,

    /// Login password
    #[arg(long)]
    pub password: Option<String>,

    /// Timeout for every wait in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Accept self-signed certificates
    #[arg(long)]
    pub ignore_ssl_errors: Option<bool>,
}

impl ConnectionArgs {
    /// Flag layer for configuration resolution
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            timeout_ms: self.timeout_ms,
            ignore_https_errors: self.ignore_ssl_errors,
        }
    }
}

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Feature file or directory
    #[arg(default_value = "tests/features")]
    pub features: PathBuf,

    /// Only run scenarios carrying this tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Run against the in-process simulated console
    #[arg(long)]
    pub simulate: bool,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Path to the chromium binary
    #[arg(long)]
    pub chromium_path: Option<String>,

    /// Disable the chromium sandbox (containers, CI)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Window width
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    pub viewport_width: u32,

    /// Window height
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    pub viewport_height: u32,

    /// Scenarios run at the same time
    #[arg(short = 'j', long, default_value = "1")]
    pub concurrency: usize,

    /// Stop at the first failed scenario
    #[arg(long)]
    pub fail_fast: bool,

    /// Connection settings
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl RunArgs {
    /// Tag without a leading `@`
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        self.tag.as_deref().map(|t| t.trim_start_matches('@'))
    }
}

/// Output format for the config command
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// TOML, loadable with --config
    Toml,
}

/// Arguments for the config command
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Output format
    #[arg(long, default_value = "json")]
    pub format: ConfigFormat,

    /// Connection settings
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_run_defaults() {
            let cli = Cli::try_parse_from(["console-probe", "run"]).unwrap();
            let Commands::Run(args) = cli.command else {
                panic!("expected run");
            };
            assert_eq!(args.features, PathBuf::from("tests/features"));
            assert!(!args.simulate);
            assert!(!args.headed);
            assert_eq!(args.concurrency, 1);
            assert_eq!(args.viewport_width, 1920);
            assert!(args.connection.base_url.is_none());
        }

        #[test]
        fn test_parse_run_with_connection_flags() {
            let cli = Cli::try_parse_from([
                "console-probe",
                "run",
                "features/login.feature",
                "--tag",
                "@smoke",
                "--base-url",
                "https://console.example.com",
                "--timeout-ms",
                "5000",
                "--ignore-ssl-errors",
                "false",
            ])
            .unwrap();
            let Commands::Run(args) = cli.command else {
                panic!("expected run");
            };
            assert_eq!(args.tag_name(), Some("smoke"));
            let overrides = args.connection.overrides();
            assert_eq!(
                overrides.base_url.as_deref(),
                Some("https://console.example.com")
            );
            assert_eq!(overrides.timeout_ms, Some(5000));
            assert_eq!(overrides.ignore_https_errors, Some(false));
            assert!(overrides.username.is_none());
        }

        #[test]
        fn test_global_verbosity_after_subcommand() {
            let cli = Cli::try_parse_from(["console-probe", "steps", "-vv"]).unwrap();
            assert_eq!(cli.verbose, 2);
            assert!(matches!(cli.command, Commands::Steps));
        }

        #[test]
        fn test_config_format() {
            let cli = Cli::try_parse_from(["console-probe", "config", "--format", "toml"]).unwrap();
            let Commands::Config(args) = cli.command else {
                panic!("expected config");
            };
            assert_eq!(args.format, ConfigFormat::Toml);
        }

        #[test]
        fn test_unknown_format_rejected() {
            assert!(Cli::try_parse_from(["console-probe", "config", "--format", "yaml"]).is_err());
        }

        #[test]
        fn test_color_arg_conversion() {
            use crate::config::ColorChoice;
            assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
            assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
            assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
        }
    }
}
