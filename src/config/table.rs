//! Materializing a route table into a live router.

use crate::config::schema::{RouteAction, RouterConfig};
use crate::routing::router::{PathRouter, Resolved};
use crate::routing::types::{Capture, Outcome, Redirect, RegisterError};

/// Resolution payload produced by declarative `handle` entries.
#[derive(Debug, Clone)]
pub struct TableHit {
    /// Label of the matching entry.
    pub label: String,
    /// Captures the handler was invoked with, in matcher order.
    pub captures: Vec<Capture>,
}

/// Build a [`PathRouter`] from a validated route table.
///
/// Entries are registered in file order, so earlier entries win sibling
/// ties exactly as earlier `register` calls do.
pub fn build_router<F>(
    config: &RouterConfig,
    on_route: F,
) -> Result<PathRouter<TableHit>, RegisterError>
where
    F: FnMut(Option<Resolved<TableHit>>, &str) + 'static,
{
    let mut router = PathRouter::new(on_route);

    for entry in &config.routes {
        match &entry.action {
            RouteAction::Handle { label } => {
                let label = label.clone();
                router.register(entry.pattern.as_str(), move |_ctx, captures| {
                    Outcome::Handled(TableHit {
                        label: label.clone(),
                        captures: captures.to_vec(),
                    })
                })?;
            }
            RouteAction::Redirect { to, nav } => {
                let to = to.clone();
                let nav = *nav;
                router.register(entry.pattern.as_str(), move |ctx, _captures| {
                    if let Some(mode) = nav {
                        ctx.set_navigation(mode.into());
                    }
                    Outcome::Redirect(Redirect::Path(to.clone()))
                })?;
            }
        }
    }

    Ok(router)
}
