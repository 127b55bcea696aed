//! Locator registries for every console screen.
//!
//! Pure data: one module per page, each a set of selector strings in the
//! notation understood by [`Selector::parse`](crate::Selector::parse).

use crate::result::{ProbeError, ProbeResult};
use std::str::FromStr;

/// OpenShift OAuth login page
pub mod login {
    /// Container listing the identity providers
    pub const LOGIN_WITH_AUTH: &str = "div.pf-v6-c-login__main-body";
    /// kube:admin identity provider link
    pub const KUBE_ADMIN_AUTH_LINK: &str = "a:has-text(\"kube:admin\")";
    /// htpasswd identity provider link
    pub const HTPASSWD_AUTH_LINK: &str = "a:has-text(\"htpasswd\")";
    /// Username field
    pub const USERNAME_INPUT: &str = "[id=\"inputUsername\"]";
    /// Password field
    pub const PASSWORD_INPUT: &str = "[id=\"inputPassword\"]";
    /// Submit button
    pub const LOGIN_BUTTON: &str = "button:has-text(\"Log in\")";
}

/// Persistent left-hand side menu
pub mod navigation {
    /// Pipelines section toggle
    pub const PIPELINES_BUTTON: &str = "[data-test=\"nav-pipelines\"]";
    /// User menu in the masthead
    pub const KUBE_ADMIN_MENU: &str = "button[aria-label=\"User menu\"]";
    /// Overview link under Pipelines
    pub const NAV_OVERVIEW_LINK: &str = "a[href=\"/pipelines-overview/all-namespaces\"]";
    /// Pipelines link under Pipelines
    pub const NAV_PIPELINES_LINK: &str = "a:has-text(\"Pipelines\")";
    /// Tasks link under Pipelines
    pub const NAV_TASKS_LINK: &str = "a:has-text(\"Tasks\")";
    /// Triggers link under Pipelines
    pub const NAV_TRIGGERS_LINK: &str = "a:has-text(\"Triggers\")";
}

/// Cluster overview dashboard shown after login
pub mod overview {
    /// Page header
    pub const OVERVIEW_HEADER: &str = "h1:has-text(\"Overview\")";
    /// Dismiss control of the first-run guided tour
    pub const SKIP_TOUR_BUTTON: &str = "button:has-text(\"Skip tour\")";
}

/// Pipelines overview (metrics) page
pub mod pipelines_overview {
    /// Page header
    pub const OVERVIEW_HEADER: &str = "h2:has-text(\"Overview\")";
}

/// Grid shown by every list page once rows render
pub const DATA_GRID: &str = "table.ReactVirtualized__VirtualGrid";
/// Empty-state message shown by every list page without resources
pub const NO_RESOURCE_MSG: &str = "#no-resource-msg";

/// Pipelines list page
pub mod pipelines {
    /// Page header
    pub const PIPELINES_HEADER: &str = "h1:has-text(\"Pipelines\")";
    /// Pipelines tab
    pub const PIPELINES_TAB: &str = "a[href=\"/pipelines/all-namespaces/\"]";
    /// PipelineRuns tab
    pub const PIPELINE_RUNS_TAB: &str = "a[href=\"/pipelines/all-namespaces/pipeline-runs\"]";
    /// Repositories tab
    pub const REPOSITORIES_TAB: &str = "a[href=\"/pipelines/all-namespaces/repositories\"]";
    /// Rendered rows
    pub const DATA_LOAD_CHECK: &str = super::DATA_GRID;
    /// Empty state
    pub const NO_DATA_LOAD_CHECK: &str = super::NO_RESOURCE_MSG;
}

/// Tasks list page
pub mod tasks {
    /// Page header
    pub const TASKS_HEADER: &str = "h1:has-text(\"Tasks\")";
    /// Tasks tab
    pub const TASKS_TAB: &str = "a[href=\"/tasks/all-namespaces/\"]";
    /// TaskRuns tab
    pub const TASK_RUNS_TAB: &str = "a[href=\"/tasks/all-namespaces/task-runs\"]";
    /// Rendered rows
    pub const DATA_LOAD_CHECK: &str = super::DATA_GRID;
    /// Empty state
    pub const NO_DATA_LOAD_CHECK: &str = super::NO_RESOURCE_MSG;
}

/// Triggers list page
pub mod triggers {
    /// Page header
    pub const TRIGGERS_HEADER: &str = "h1:has-text(\"Triggers\")";
    /// EventListeners tab
    pub const EVENT_LISTENERS_TAB: &str = "a[href=\"/triggers/all-namespaces/\"]";
    /// TriggerTemplates tab
    pub const TRIGGER_TEMPLATES_TAB: &str = "a[href=\"/triggers/all-namespaces/trigger-templates\"]";
    /// TriggerBindings tab
    pub const TRIGGER_BINDINGS_TAB: &str = "a[href=\"/triggers/all-namespaces/trigger-bindings\"]";
    /// ClusterTriggerBindings tab
    pub const CLUSTER_TRIGGER_BINDINGS_TAB: &str =
        "a[href=\"/triggers/all-namespaces/cluster-trigger-bindings\"]";
    /// Rendered rows
    pub const DATA_LOAD_CHECK: &str = super::DATA_GRID;
    /// Empty state
    pub const NO_DATA_LOAD_CHECK: &str = super::NO_RESOURCE_MSG;
}

/// Identity provider offered on the login page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthType {
    /// Cluster bootstrap administrator
    KubeAdmin,
    /// htpasswd identity provider
    Htpasswd,
}

impl AuthType {
    /// All identity providers
    pub const ALL: [Self; 2] = [Self::KubeAdmin, Self::Htpasswd];

    /// Name as shown on the login page
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KubeAdmin => "kube:admin",
            Self::Htpasswd => "htpasswd",
        }
    }

    /// Link selecting this provider
    #[must_use]
    pub const fn locator(self) -> &'static str {
        match self {
            Self::KubeAdmin => login::KUBE_ADMIN_AUTH_LINK,
            Self::Htpasswd => login::HTPASSWD_AUTH_LINK,
        }
    }
}

impl FromStr for AuthType {
    type Err = ProbeError;

    /// Case-insensitive match on `kube:admin` / `htpasswd`
    fn from_str(s: &str) -> ProbeResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProbeError::invalid_argument(format!("Invalid login {s} provided")))
    }
}

impl std::fmt::Display for AuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Link listed under the Pipelines section of the side menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavLink {
    /// Pipelines overview
    Overview,
    /// Pipelines list
    Pipelines,
    /// Tasks list
    Tasks,
    /// Triggers list
    Triggers,
}

impl NavLink {
    /// All links in menu order
    pub const ALL: [Self; 4] = [Self::Overview, Self::Pipelines, Self::Tasks, Self::Triggers];

    /// Label of the link
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Pipelines => "Pipelines",
            Self::Tasks => "Tasks",
            Self::Triggers => "Triggers",
        }
    }

    /// Locator of the link
    #[must_use]
    pub const fn locator(self) -> &'static str {
        match self {
            Self::Overview => navigation::NAV_OVERVIEW_LINK,
            Self::Pipelines => navigation::NAV_PIPELINES_LINK,
            Self::Tasks => navigation::NAV_TASKS_LINK,
            Self::Triggers => navigation::NAV_TRIGGERS_LINK,
        }
    }
}

impl FromStr for NavLink {
    type Err = ProbeError;

    fn from_str(s: &str) -> ProbeResult<Self> {
        Self::ALL
            .into_iter()
            .find(|link| link.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|l| l.as_str()).collect();
                ProbeError::invalid_argument(format!(
                    "Invalid link name '{s}' provided. Valid options: {valid:?}"
                ))
            })
    }
}

impl std::fmt::Display for NavLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::locator::Selector;

    mod auth_type_tests {
        use super::*;

        #[test]
        fn test_case_insensitive() {
            for raw in ["KUBE:ADMIN", "kube:admin", "Kube:Admin"] {
                let kind: AuthType = raw.parse().unwrap();
                assert_eq!(kind, AuthType::KubeAdmin);
                assert_eq!(kind.locator(), login::KUBE_ADMIN_AUTH_LINK);
            }
            assert_eq!("HtPasswd".parse::<AuthType>().unwrap(), AuthType::Htpasswd);
        }

        #[test]
        fn test_unknown_is_invalid_argument() {
            for raw in ["ldap", "kubeadmin", ""] {
                let err = raw.parse::<AuthType>().unwrap_err();
                assert!(matches!(err, ProbeError::InvalidArgument { .. }), "{raw}");
            }
        }
    }

    mod nav_link_tests {
        use super::*;

        #[test]
        fn test_known_links() {
            for link in NavLink::ALL {
                assert_eq!(link.as_str().parse::<NavLink>().unwrap(), link);
            }
        }

        #[test]
        fn test_unknown_lists_options() {
            let err = "Repositories".parse::<NavLink>().unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains("Repositories"));
            assert!(msg.contains("Overview"));
            assert!(msg.contains("Triggers"));
        }

        #[test]
        fn test_lookup_is_case_sensitive() {
            assert!("tasks".parse::<NavLink>().is_err());
        }
    }

    mod registry_tests {
        use super::*;

        #[test]
        fn test_tab_selectors_are_closed() {
            for raw in [
                pipelines::PIPELINES_TAB,
                tasks::TASKS_TAB,
                triggers::EVENT_LISTENERS_TAB,
            ] {
                assert!(raw.ends_with("\"]"), "{raw}");
            }
        }

        #[test]
        fn test_text_locators_parse_with_text_filter() {
            assert_eq!(
                Selector::parse(login::LOGIN_BUTTON),
                Selector::css_with_text("button", "Log in")
            );
            assert_eq!(
                Selector::parse(overview::SKIP_TOUR_BUTTON),
                Selector::css_with_text("button", "Skip tour")
            );
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_only_known_auth_types_parse(raw in "[a-zA-Z:]{0,12}") {
                let known = raw.eq_ignore_ascii_case("kube:admin")
                    || raw.eq_ignore_ascii_case("htpasswd");
                prop_assert_eq!(raw.parse::<AuthType>().is_ok(), known);
            }

            #[test]
            fn prop_only_four_links_parse(raw in "[A-Za-z]{0,12}") {
                let known = ["Overview", "Pipelines", "Tasks", "Triggers"].contains(&raw.as_str());
                prop_assert_eq!(raw.parse::<NavLink>().is_ok(), known);
            }
        }
    }
}
