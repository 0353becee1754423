//! Route-table schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::types::NavigationState;

/// Root configuration: a declarative route table.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Declarative route entries, registered in file order.
    pub routes: Vec<RouteEntry>,

    /// Resolution settings.
    pub resolution: ResolutionConfig,
}

/// One declarative route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteEntry {
    /// Template pattern (e.g. `/tickets/{[0-9]+}`).
    pub pattern: String,

    /// What resolving this route does.
    pub action: RouteAction,
}

/// Action taken when a declarative route matches.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAction {
    /// Handle the route, reporting `label` to the caller.
    Handle {
        /// Label surfaced in the resolution payload.
        label: String,
    },
    /// Redirect to another path, optionally overriding the navigation state.
    Redirect {
        /// Absolute redirect target.
        to: String,
        /// Navigation-state override applied before redirecting.
        nav: Option<NavMode>,
    },
}

/// Serializable navigation-state token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavMode {
    /// Push a new history entry.
    Push,
    /// Replace the current history entry.
    Replace,
    /// Leave history untouched.
    Ignore,
}

impl From<NavMode> for NavigationState {
    fn from(mode: NavMode) -> Self {
        match mode {
            NavMode::Push => NavigationState::Push,
            NavMode::Replace => NavigationState::Replace,
            NavMode::Ignore => NavigationState::Ignore,
        }
    }
}

/// Resolution settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Path resolved once at startup, with navigation state `ignore`.
    pub initial_path: Option<String>,
}
