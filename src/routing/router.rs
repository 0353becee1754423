//! Router facade: registration and resolution.
//!
//! # Responsibilities
//! - Own the route trie and the notification callback
//! - Register patterns, flat or through chainable scopes
//! - Resolve paths, following handler-issued redirects from the root
//! - Track the advisory current path
//!
//! # Design Decisions
//! - The trie is extended by registration and never pruned
//! - Redirect chains re-resolve from the root and are capped at
//!   [`MAX_REDIRECT_HOPS`]; exceeding the cap is an error, not a not-found
//! - Exactly one notification fires per top-level resolution

use crate::path;
use crate::routing::matcher::IntoPattern;
use crate::routing::trie::{self, Handler, Node, WalkOutcome};
use crate::routing::types::{
    Capture, NavigationState, Outcome, RegisterError, RouteContext, RouteError,
};

/// Upper bound on redirect hops in one resolution.
pub const MAX_REDIRECT_HOPS: u32 = 16;

/// Payload handed to the notification callback on success.
#[derive(Debug)]
pub struct Resolved<T> {
    /// Value returned by the handler that settled the route.
    pub value: T,
    /// Context after all handler mutations.
    pub context: RouteContext,
}

/// Notification callback: `Some` on success, `None` on total match failure,
/// always paired with the canonical (percent-re-encoded) path.
pub type OnRoute<T> = Box<dyn FnMut(Option<Resolved<T>>, &str)>;

/// A path-trie router.
///
/// Built once at startup by sequential [`register`](PathRouter::register)
/// calls, then driven by [`route`](PathRouter::route) for every navigation
/// event. Single-threaded by design: registration and resolution are plain
/// synchronous calls and the only mutable state outside the trie is the
/// advisory current path.
pub struct PathRouter<T> {
    root: Node<T>,
    current: Option<String>,
    on_route: OnRoute<T>,
}

impl<T> PathRouter<T> {
    /// Create a router with its notification callback.
    pub fn new<F>(on_route: F) -> Self
    where
        F: FnMut(Option<Resolved<T>>, &str) + 'static,
    {
        Self {
            root: Node::new(),
            current: None,
            on_route: Box::new(on_route),
        }
    }

    /// Register `pattern` and attach `handler` at its terminal node.
    ///
    /// Returns a [`Scope`] borrowing the node just created, so deeper routes
    /// can be registered relative to the shared prefix. Scoped registration
    /// is a convenience only: the resulting trie is identical to registering
    /// the full patterns flat.
    pub fn register<P, H>(&mut self, pattern: P, handler: H) -> Result<Scope<'_, T>, RegisterError>
    where
        P: IntoPattern,
        H: Fn(&mut RouteContext, &[Capture]) -> Outcome<T> + 'static,
    {
        register_at(&mut self.root, pattern, Box::new(handler), "")
    }

    /// Resolve `path`, following handler-issued redirects.
    ///
    /// Returns `Ok(true)` if some handler ultimately handled the path
    /// (directly or at the end of a redirect chain), `Ok(false)` if nothing
    /// matched. The notification callback fires exactly once either way.
    pub fn route(&mut self, raw: &str, nav: NavigationState) -> Result<bool, RouteError> {
        self.route_segments(path::split(raw), nav)
    }

    /// Resolve pre-split, already-decoded segments.
    pub fn route_segments(
        &mut self,
        mut segments: Vec<String>,
        nav: NavigationState,
    ) -> Result<bool, RouteError> {
        let mut ctx = RouteContext::new(nav);
        let mut hops = 0u32;

        loop {
            let canonical = path::canonicalize(&segments);
            let mut captures = Vec::new();
            match trie::walk(&self.root, &segments, &mut captures, &mut ctx) {
                WalkOutcome::Handled(value) => {
                    tracing::debug!(path = %canonical, nav = ?ctx.navigation(), hops, "route handled");
                    self.current = Some(canonical.clone());
                    (self.on_route)(Some(Resolved { value, context: ctx }), &canonical);
                    return Ok(true);
                }
                WalkOutcome::Redirect(redirect) => {
                    hops += 1;
                    if hops > MAX_REDIRECT_HOPS {
                        tracing::warn!(path = %canonical, hops, "redirect chain did not settle");
                        return Err(RouteError::RedirectLoop {
                            hops,
                            path: canonical,
                        });
                    }
                    segments = redirect.into_segments();
                    tracing::debug!(target = %path::canonicalize(&segments), hops, "redirect");
                }
                WalkOutcome::NoMatch => {
                    tracing::warn!(path = %canonical, "no route matched");
                    (self.on_route)(None, &canonical);
                    return Ok(false);
                }
            }
        }
    }

    /// Resolve the ambient startup location without touching history
    /// (navigation state `Ignore`).
    pub fn init(&mut self, location: &str) -> Result<bool, RouteError> {
        self.route(location, NavigationState::Ignore)
    }

    /// Canonical path of the last successful resolution, if any.
    ///
    /// Advisory: never consulted during matching.
    pub fn current_path(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

/// A sub-registrar scoped to one trie node.
///
/// Produced by every successful `register` call; registering through it
/// extends the trie below that node.
pub struct Scope<'r, T> {
    node: &'r mut Node<T>,
    prefix: String,
}

impl<T> std::fmt::Debug for Scope<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl<T> Scope<'_, T> {
    /// Register `pattern` relative to this scope's node.
    pub fn register<P, H>(&mut self, pattern: P, handler: H) -> Result<Scope<'_, T>, RegisterError>
    where
        P: IntoPattern,
        H: Fn(&mut RouteContext, &[Capture]) -> Outcome<T> + 'static,
    {
        register_at(self.node, pattern, Box::new(handler), &self.prefix)
    }

    /// Full pattern this scope is rooted at, for diagnostics.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

fn register_at<'n, T, P>(
    node: &'n mut Node<T>,
    pattern: P,
    handler: Handler<T>,
    prefix: &str,
) -> Result<Scope<'n, T>, RegisterError>
where
    P: IntoPattern,
{
    let pattern = pattern.into_pattern()?;
    let display_path = if pattern.is_root() {
        if prefix.is_empty() {
            "/".to_string()
        } else {
            prefix.to_string()
        }
    } else {
        format!("{prefix}{pattern}")
    };

    let target = node.extend(pattern.segments());
    if target.has_terminal() {
        return Err(RegisterError::DuplicateRoute { pattern: display_path });
    }
    target.set_terminal(handler);
    tracing::debug!(pattern = %display_path, "route registered");

    Ok(Scope {
        node: target,
        prefix: display_path,
    })
}
