//! Result and error types for console-probe.

use thiserror::Error;

/// Result type for console-probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while driving the console
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A bounded wait was never satisfied
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// Description of the awaited condition
        waited_for: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// URL or header mismatch while verifying a page
    #[error("{page} verification failed: {reason}")]
    PageVerificationFailed {
        /// Page name (e.g. "Overview page")
        page: String,
        /// What did not match, including expected and actual values
        reason: String,
    },

    /// Data never rendered and no "no data" fallback matched
    #[error(
        "Data load verification failed for {context}: Data element ({locator}) did not become visible within the timeout."
    )]
    DataLoadFailed {
        /// Tab or page name
        context: String,
        /// Locator of the data element
        locator: String,
    },

    /// Unrecognised symbolic name passed to a lookup table
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Configuration could not be resolved
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// A driver primitive failed for a reason other than a timeout
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// The page's script context went away mid-call, usually because a
    /// navigation replaced the document; waits keep polling through it
    #[error("Page context lost: {message}")]
    ContextLost {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// CDP messages seen when the document is replaced during a call
const CONTEXT_LOST_MARKERS: &[&str] = &[
    "Execution context was destroyed",
    "Cannot find context with specified id",
    "Inspected target navigated or closed",
    "Node with given id does not belong to the document",
];

impl ProbeError {
    /// Create a timeout error
    #[must_use]
    pub fn timeout(waited_for: impl Into<String>, ms: u64) -> Self {
        Self::Timeout {
            waited_for: waited_for.into(),
            ms,
        }
    }

    /// Create a page verification error
    #[must_use]
    pub fn page_verification(page: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PageVerificationFailed {
            page: page.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a driver error.
    ///
    /// Messages the browser reports while a navigation swaps the document
    /// become [`ProbeError::ContextLost`].
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        let message = message.into();
        if CONTEXT_LOST_MARKERS
            .iter()
            .any(|marker| message.contains(marker))
        {
            Self::ContextLost { message }
        } else {
            Self::Driver { message }
        }
    }

    /// Whether this error is a bounded wait that ran out
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Whether a wait should keep polling after this error
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::ContextLost { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = ProbeError::timeout("url ending with 'dashboards'", 90_000);
        assert_eq!(
            err.to_string(),
            "Timed out after 90000ms waiting for url ending with 'dashboards'"
        );
        assert!(err.is_timeout());
    }

    #[test]
    fn test_page_verification_display() {
        let err = ProbeError::page_verification("Tasks page", "URL does not end with 'x'");
        assert!(err.to_string().starts_with("Tasks page verification failed"));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_data_load_display() {
        let err = ProbeError::DataLoadFailed {
            context: "TaskRuns tab".to_string(),
            locator: "table.grid".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("TaskRuns tab"));
        assert!(msg.contains("table.grid"));
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = ProbeError::invalid_argument("Invalid login ldap provided");
        assert!(err.to_string().contains("Invalid argument"));
    }

    #[test]
    fn test_navigation_messages_are_transient() {
        let err = ProbeError::driver("Execution context was destroyed, most likely because of a navigation.");
        assert!(matches!(err, ProbeError::ContextLost { .. }));
        assert!(err.is_transient());
        assert!(!err.is_timeout());

        let err = ProbeError::driver("connection closed");
        assert!(matches!(err, ProbeError::Driver { .. }));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_io_conversion() {
        let err: ProbeError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, ProbeError::Io(_)));
    }
}
