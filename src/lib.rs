//! Path-trie routing library.

pub mod config;
pub mod path;
pub mod routing;

pub use config::schema::RouterConfig;
pub use routing::matcher::{IntoPattern, Matcher, Pattern};
pub use routing::router::{PathRouter, Resolved, Scope, MAX_REDIRECT_HOPS};
pub use routing::types::{
    Capture, NavigationState, Outcome, Redirect, RegisterError, RouteContext, RouteError,
};
