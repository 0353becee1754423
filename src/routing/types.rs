//! Core routing types: navigation state, contexts, captures, outcomes.

use thiserror::Error;

use crate::path;

/// How the external history mechanism should record a successful route
/// change.
///
/// The router never touches history itself; it threads this token through
/// the resolution and hands it to the notification callback. Handlers may
/// overwrite it, and the overwritten value survives redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationState {
    /// Push a new history entry.
    #[default]
    Push,
    /// Replace the current history entry.
    Replace,
    /// Leave history untouched (used for the initial resolution).
    Ignore,
}

/// Per-resolution context handed to every handler on the chain.
///
/// The same context instance is threaded through every redirect hop, so a
/// navigation-state mutation made before redirecting is visible to the
/// handlers (and the notification callback) downstream.
#[derive(Debug, Clone)]
pub struct RouteContext {
    nav: NavigationState,
}

impl RouteContext {
    pub(crate) fn new(nav: NavigationState) -> Self {
        Self { nav }
    }

    /// Current navigation-state token.
    pub fn navigation(&self) -> NavigationState {
        self.nav
    }

    /// Overwrite the navigation-state token.
    pub fn set_navigation(&mut self, nav: NavigationState) {
        self.nav = nav;
    }
}

/// Value captured by one dynamic segment matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// The matched substring (predicates and non-sticky patterns).
    Text(String),
    /// The full match-group list (sticky patterns). Index 0 is the whole
    /// match; unmatched optional groups are `None`.
    Groups(Vec<Option<String>>),
}

impl Capture {
    /// The captured text for the common single-value case.
    ///
    /// For `Groups` this is the whole-match group.
    pub fn text(&self) -> Option<&str> {
        match self {
            Capture::Text(s) => Some(s),
            Capture::Groups(groups) => groups.first().and_then(|g| g.as_deref()),
        }
    }
}

/// Result of invoking a handler.
pub enum Outcome<T> {
    /// The route was handled; resolution stops and the value reaches the
    /// notification callback.
    Handled(T),
    /// Re-resolve against a different path.
    Redirect(Redirect),
    /// This handler does not take the path after all. Sibling branches are
    /// tried next; declining never triggers the ancestor fallback.
    Declined,
}

/// A handler-issued redirect target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// A path string, split and decoded like any routed path.
    Path(String),
    /// Pre-split, already-decoded segments.
    Segments(Vec<String>),
}

impl Redirect {
    pub(crate) fn into_segments(self) -> Vec<String> {
        match self {
            Redirect::Path(raw) => path::split(&raw),
            Redirect::Segments(segments) => segments,
        }
    }
}

impl From<&str> for Redirect {
    fn from(raw: &str) -> Self {
        Redirect::Path(raw.to_string())
    }
}

impl From<String> for Redirect {
    fn from(raw: String) -> Self {
        Redirect::Path(raw)
    }
}

impl From<Vec<String>> for Redirect {
    fn from(segments: Vec<String>) -> Self {
        Redirect::Segments(segments)
    }
}

/// Errors surfaced at registration time. Both are fatal to the failing
/// `register` call and leave the trie's previously registered routes intact.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The exact pattern already carries a terminal handler.
    #[error("duplicate route: a handler is already registered at '{pattern}'")]
    DuplicateRoute {
        /// Full pattern, including any scope prefix.
        pattern: String,
    },

    /// A template segment could not be compiled into a matcher.
    #[error("invalid matcher in segment '{segment}': {reason}")]
    InvalidMatcher {
        /// The offending template segment.
        segment: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Errors surfaced during resolution.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A redirect chain exceeded the hop cap without settling.
    #[error("redirect loop: {hops} hops without settling, last target '{path}'")]
    RedirectLoop {
        /// Hops taken before giving up.
        hops: u32,
        /// Canonical form of the last target attempted.
        path: String,
    },
}
