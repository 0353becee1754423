//! Shared utilities for integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use path_router::{NavigationState, PathRouter, Resolved};

/// One notification: the handled value and final navigation state (`None`
/// for not-found), plus the canonical path.
pub type Entry<T> = (Option<(T, NavigationState)>, String);

/// Notification log, one entry per top-level resolution.
pub type Log<T> = Rc<RefCell<Vec<Entry<T>>>>;

/// A router whose notification callback appends to the returned log.
pub fn recording_router<T: 'static>() -> (PathRouter<T>, Log<T>) {
    let log: Log<T> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let router = PathRouter::new(move |resolved: Option<Resolved<T>>, canonical: &str| {
        sink.borrow_mut().push((
            resolved.map(|r| (r.value, r.context.navigation())),
            canonical.to_string(),
        ));
    });
    (router, log)
}
