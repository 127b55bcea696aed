//! ConsoleDriver - abstract browser automation seam
//!
//! Page objects never talk to a browser directly. They go through
//! [`ConsoleDriver`], whose primitives are single attempts: waiting and
//! timeouts are owned by [`BasePage`](crate::BasePage).
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  ConsoleDriver (async trait)                               │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌──────────────────────┐      ┌──────────────────────┐    │
//! │  │  ChromiumDriver      │      │  MockDriver          │    │
//! │  │  (feature `browser`) │      │  (unit + features)   │    │
//! │  │  CDP via             │      │  scripted console    │    │
//! │  │  chromiumoxide       │      │  model               │    │
//! │  └──────────────────────┘      └──────────────────────┘    │
//! └────────────────────────────────────────────────────────────┘
//! ```

use crate::locator::{BoundingBox, Selector};
use crate::result::ProbeResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Snapshot of one element as seen by a single probe
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementState {
    /// Element matched the selector
    pub found: bool,
    /// Element is rendered with a non-empty box
    pub visible: bool,
    /// Element accepts input
    pub enabled: bool,
    /// Geometry at probe time
    pub bounds: Option<BoundingBox>,
}

impl ElementState {
    /// State of a selector with no match
    #[must_use]
    pub const fn missing() -> Self {
        Self {
            found: false,
            visible: false,
            enabled: false,
            bounds: None,
        }
    }

    /// State of a visible, enabled element
    #[must_use]
    pub const fn ready(bounds: BoundingBox) -> Self {
        Self {
            found: true,
            visible: true,
            enabled: true,
            bounds: Some(bounds),
        }
    }

    /// Actionable means visible, enabled and positionally stable: the box
    /// must equal the box seen by the previous probe.
    #[must_use]
    pub fn is_actionable_after(&self, previous: Option<&Self>) -> bool {
        self.visible
            && self.enabled
            && previous.is_some_and(|prev| prev.visible && prev.bounds == self.bounds)
    }
}

/// Condition evaluated inside the browsing context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagePredicate {
    /// `window.location.href` contains the substring
    UrlIncludes(String),
}

impl PagePredicate {
    /// JavaScript expression returning a boolean
    #[must_use]
    pub fn to_script(&self) -> String {
        match self {
            Self::UrlIncludes(needle) => {
                // serde_json quoting keeps arbitrary substrings inert
                let literal = serde_json::Value::String(needle.clone()).to_string();
                format!("window.location.href.includes({literal})")
            }
        }
    }

    /// Evaluate against a known URL (drivers without a JS engine)
    #[must_use]
    pub fn matches_url(&self, url: &str) -> bool {
        match self {
            Self::UrlIncludes(needle) => url.contains(needle.as_str()),
        }
    }
}

impl std::fmt::Display for PagePredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UrlIncludes(needle) => write!(f, "url containing '{needle}'"),
        }
    }
}

/// Abstract driver trait for browser automation.
///
/// Every method is a single attempt against the live document.
#[async_trait]
pub trait ConsoleDriver: Send + Sync + std::fmt::Debug {
    /// Navigate to URL
    async fn goto(&self, url: &str) -> ProbeResult<()>;

    /// Get current URL
    async fn current_url(&self) -> ProbeResult<String>;

    /// Inspect the first element matching `selector`
    async fn probe(&self, selector: &Selector) -> ProbeResult<ElementState>;

    /// Click the first element matching `selector`
    async fn click(&self, selector: &Selector) -> ProbeResult<()>;

    /// Replace the value of the input matching `selector`
    async fn fill(&self, selector: &Selector, value: &str) -> ProbeResult<()>;

    /// Evaluate a predicate in the browsing context
    async fn check(&self, predicate: &PagePredicate) -> ProbeResult<bool>;
}

/// Shared handle to a driver
pub type SharedDriver = Arc<dyn ConsoleDriver>;

/// Opens one fresh page handle per scenario
#[async_trait]
pub trait DriverLauncher: Send + Sync + std::fmt::Debug {
    /// Open a new page
    async fn open(&self) -> ProbeResult<SharedDriver>;

    /// Release browser resources
    async fn shutdown(&self) -> ProbeResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod element_state_tests {
        use super::*;

        fn bbox(x: f64) -> BoundingBox {
            BoundingBox::new(x, 0.0, 80.0, 30.0)
        }

        #[test]
        fn test_missing() {
            let state = ElementState::missing();
            assert!(!state.found);
            assert!(!state.is_actionable_after(None));
        }

        #[test]
        fn test_first_probe_is_never_actionable() {
            assert!(!ElementState::ready(bbox(0.0)).is_actionable_after(None));
        }

        #[test]
        fn test_stable_element_is_actionable() {
            let first = ElementState::ready(bbox(0.0));
            let second = ElementState::ready(bbox(0.0));
            assert!(second.is_actionable_after(Some(&first)));
        }

        #[test]
        fn test_moving_element_is_not_actionable() {
            let first = ElementState::ready(bbox(0.0));
            let second = ElementState::ready(bbox(12.0));
            assert!(!second.is_actionable_after(Some(&first)));
        }

        #[test]
        fn test_disabled_element_is_not_actionable() {
            let first = ElementState::ready(bbox(0.0));
            let second = ElementState {
                enabled: false,
                ..first
            };
            assert!(!second.is_actionable_after(Some(&first)));
        }
    }

    mod predicate_tests {
        use super::*;

        #[test]
        fn test_url_includes_script() {
            let script = PagePredicate::UrlIncludes("oauth".to_string()).to_script();
            assert_eq!(script, "window.location.href.includes(\"oauth\")");
        }

        #[test]
        fn test_script_quotes_hostile_input() {
            let script = PagePredicate::UrlIncludes("a'); alert(1); ('".to_string()).to_script();
            assert_eq!(
                script,
                "window.location.href.includes(\"a'); alert(1); ('\")"
            );
        }

        #[test]
        fn test_matches_url() {
            let pred = PagePredicate::UrlIncludes("oauth".to_string());
            assert!(pred.matches_url("https://oauth-openshift.apps.c/login"));
            assert!(!pred.matches_url("https://console.apps.c/dashboards"));
        }
    }
}
