//! Session configuration.
//!
//! A [`SessionConfig`] is resolved once per run and shared read-only by every
//! page object. Values are layered, lowest precedence first:
//!
//! 1. built-in defaults (timeout, SSL tolerance)
//! 2. an optional TOML file
//! 3. environment variables (`CONSOLE_URL`, `CONSOLE_USERNAME`,
//!    `CONSOLE_PASSWORD`, `APP_TIMEOUT`, `IGNORE_SSL_ERRORS`)
//! 4. explicit overrides (CLI flags)

use crate::result::{ProbeError, ProbeResult};
use crate::wait::DEFAULT_SESSION_TIMEOUT_MS;
use serde::{Deserialize, Serialize, Serializer};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the console URL
pub const ENV_CONSOLE_URL: &str = "CONSOLE_URL";
/// Environment variable holding the login user
pub const ENV_USERNAME: &str = "CONSOLE_USERNAME";
/// Environment variable holding the login password
pub const ENV_PASSWORD: &str = "CONSOLE_PASSWORD";
/// Environment variable holding the session timeout in milliseconds
pub const ENV_TIMEOUT: &str = "APP_TIMEOUT";
/// Environment variable toggling certificate error tolerance
pub const ENV_IGNORE_SSL: &str = "IGNORE_SSL_ERRORS";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "console-probe.toml";

const REDACTED: &str = "********";

/// Immutable configuration for one test session
#[derive(Clone, Serialize)]
pub struct SessionConfig {
    /// Console base URL (login redirects to the OAuth server from here)
    pub base_url: String,
    /// Login user
    pub username: String,
    /// Login password
    #[serde(serialize_with = "redact")]
    password: String,
    /// Default bound for every wait
    #[serde(rename = "timeout_ms", serialize_with = "as_millis")]
    pub timeout: Duration,
    /// Accept self-signed cluster certificates
    pub ignore_https_errors: bool,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("timeout", &self.timeout)
            .field("ignore_https_errors", &self.ignore_https_errors)
            .finish()
    }
}

#[allow(clippy::ptr_arg)]
fn redact<S: Serializer>(_: &String, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(REDACTED)
}

fn as_millis<S: Serializer>(timeout: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(timeout.as_millis() as u64)
}

impl SessionConfig {
    /// Create a configuration with default timeout and SSL tolerance
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            timeout: Duration::from_millis(DEFAULT_SESSION_TIMEOUT_MS),
            ignore_https_errors: true,
        }
    }

    /// Set the session timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set certificate error tolerance
    #[must_use]
    pub const fn with_ignore_https_errors(mut self, ignore: bool) -> Self {
        self.ignore_https_errors = ignore;
        self
    }

    /// Login password
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Session timeout in milliseconds
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    /// Resolve from the process environment only
    pub fn from_env() -> ProbeResult<Self> {
        ConfigOverrides::from_env()?.resolve()
    }
}

/// A partial configuration layer.
///
/// Layers are merged with [`ConfigOverrides::merge`]; the merged layer is
/// turned into a [`SessionConfig`] by [`ConfigOverrides::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    /// Console base URL
    pub base_url: Option<String>,
    /// Login user
    pub username: Option<String>,
    /// Login password
    pub password: Option<String>,
    /// Session timeout in milliseconds
    pub timeout_ms: Option<u64>,
    /// Accept self-signed certificates
    pub ignore_https_errors: Option<bool>,
}

impl ConfigOverrides {
    /// Read a layer from a TOML file
    pub fn from_toml_file(path: &Path) -> ProbeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text).map_err(|e| match e {
            ProbeError::Config { message } => {
                ProbeError::config(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    /// Parse a layer from TOML text
    pub fn from_toml_str(text: &str) -> ProbeResult<Self> {
        let layer: Self = toml::from_str(text).map_err(|e| ProbeError::config(e.to_string()))?;
        layer.validate()?;
        Ok(layer)
    }

    /// Read a layer from the process environment
    pub fn from_env() -> ProbeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read a layer through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ProbeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_ms = non_empty(ENV_TIMEOUT)
            .map(|raw| parse_timeout(&raw))
            .transpose()?;
        let ignore_https_errors = non_empty(ENV_IGNORE_SSL)
            .map(|raw| parse_bool(ENV_IGNORE_SSL, &raw))
            .transpose()?;

        Ok(Self {
            base_url: non_empty(ENV_CONSOLE_URL),
            username: non_empty(ENV_USERNAME),
            password: non_empty(ENV_PASSWORD),
            timeout_ms,
            ignore_https_errors,
        })
    }

    /// Overlay `higher` on top of `self`; set fields in `higher` win
    #[must_use]
    pub fn merge(self, higher: Self) -> Self {
        Self {
            base_url: higher.base_url.or(self.base_url),
            username: higher.username.or(self.username),
            password: higher.password.or(self.password),
            timeout_ms: higher.timeout_ms.or(self.timeout_ms),
            ignore_https_errors: higher.ignore_https_errors.or(self.ignore_https_errors),
        }
    }

    fn validate(&self) -> ProbeResult<()> {
        if self.timeout_ms == Some(0) {
            return Err(ProbeError::config("timeout_ms must be a positive integer"));
        }
        Ok(())
    }

    /// Produce the final configuration; URL and credentials are required
    pub fn resolve(self) -> ProbeResult<SessionConfig> {
        self.validate()?;
        let required = |value: Option<String>, key: &str| {
            value.ok_or_else(|| ProbeError::config(format!("{key} is not set")))
        };

        let base_url = required(self.base_url, ENV_CONSOLE_URL)?;
        let username = required(self.username, ENV_USERNAME)?;
        let password = required(self.password, ENV_PASSWORD)?;

        let mut config = SessionConfig::new(base_url, username, password);
        if let Some(ms) = self.timeout_ms {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        if let Some(ignore) = self.ignore_https_errors {
            config = config.with_ignore_https_errors(ignore);
        }
        Ok(config)
    }
}

fn parse_timeout(raw: &str) -> ProbeResult<u64> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(ProbeError::config(format!(
            "{ENV_TIMEOUT} must be a positive integer of milliseconds, got '{raw}'"
        ))),
    }
}

fn parse_bool(key: &str, raw: &str) -> ProbeResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ProbeError::config(format!(
            "{key} must be a boolean, got '{raw}'"
        ))),
    }
}
