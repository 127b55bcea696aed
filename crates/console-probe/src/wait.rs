//! Bounded polling.
//!
//! Every wait in the suite goes through [`Waiter::poll_until`]: a probe is
//! awaited repeatedly until it reports `true` or the deadline passes. The
//! deadline is measured with [`tokio::time::Instant`], so tests can run on
//! paused time and exercise 90 second timeouts instantly.

use crate::result::{ProbeError, ProbeResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Default session timeout (90 seconds)
pub const DEFAULT_SESSION_TIMEOUT_MS: u64 = 90_000;

/// Fixed bound for the "no data" empty-state check
pub const NO_DATA_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Upper bound for the wait
    pub timeout: Duration,
    /// Delay between probes
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self::with_timeout(Duration::from_millis(DEFAULT_SESSION_TIMEOUT_MS))
    }
}

impl WaitOptions {
    /// Options with the given timeout and default polling
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Timeout in milliseconds
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

/// Result of a successful wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Number of probes performed
    pub attempts: u32,
    /// Description of what was waited for
    pub waited_for: String,
}

/// Waiter for synchronization operations
#[derive(Debug, Clone, Copy, Default)]
pub struct Waiter;

impl Waiter {
    /// Poll `probe` until it returns `Ok(true)`.
    ///
    /// The probe always runs at least once, even with a zero timeout.
    /// Transient errors (see [`ProbeError::is_transient`]) count as a miss;
    /// any other error aborts the wait and is returned unchanged. Running
    /// out of time yields [`ProbeError::Timeout`].
    pub async fn poll_until<F, Fut>(
        waited_for: impl Into<String>,
        options: WaitOptions,
        mut probe: F,
    ) -> ProbeResult<WaitResult>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ProbeResult<bool>>,
    {
        let waited_for = waited_for.into();
        let start = Instant::now();
        let deadline = start + options.timeout;
        let mut attempts = 0_u32;

        loop {
            attempts += 1;
            let satisfied = match probe().await {
                Ok(satisfied) => satisfied,
                Err(err) if err.is_transient() => {
                    tracing::debug!(%waited_for, error = %err, "probe interrupted, retrying");
                    false
                }
                Err(err) => return Err(err),
            };
            if satisfied {
                return Ok(WaitResult {
                    elapsed: start.elapsed(),
                    attempts,
                    waited_for,
                });
            }

            let now = Instant::now();
            if now >= deadline {
                tracing::debug!(%waited_for, attempts, "wait timed out");
                return Err(ProbeError::timeout(waited_for, options.timeout_ms()));
            }
            tokio::time::sleep(options.poll_interval.min(deadline - now)).await;
        }
    }
}

/// Whether the path of `url` ends with `suffix` on a segment boundary.
///
/// Query string and fragment are ignored and a trailing slash on either side
/// is tolerated, so `https://host/k8s/tasks/all-namespaces/?ns=a` ends with
/// `tasks/all-namespaces` but `https://host/subtasks/all-namespaces` does not.
#[must_use]
pub fn url_ends_with(url: &str, suffix: &str) -> bool {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let without_query = without_fragment
        .split('?')
        .next()
        .unwrap_or(without_fragment);
    let path = without_query.trim_end_matches('/');
    let suffix = suffix.trim_matches('/');

    if suffix.is_empty() {
        return true;
    }
    match path.strip_suffix(suffix) {
        Some(head) => head.is_empty() || head.ends_with('/'),
        None => false,
    }
}
