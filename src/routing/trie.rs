//! Trie build and traversal.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     matcher sequence
//!     → extend (reuse same-key edges, append new ones)
//!     → terminal handler attached at the final node
//!
//! Resolution:
//!     decoded segments
//!     → walk (ordered depth-first, captures accumulate)
//!     → terminal handler → Handled | Redirect | NoMatch
//! ```
//!
//! # Design Decisions
//! - Children are an ordered Vec of (matcher, node) pairs; insertion order
//!   is load-bearing (siblings are tried first-registered-first)
//! - A subtree must fail entirely before the next sibling is tried
//! - A node that carries its own handler while segments remain stashes the
//!   captures accumulated so far and restarts the list for the descent; a
//!   redirect escaping that descent is replaced by the node's own handler,
//!   invoked with the stashed captures

use crate::routing::matcher::{Matcher, SegmentMatch};
use crate::routing::types::{Capture, Outcome, Redirect, RouteContext};

/// Terminal callback attached to a fully specified route.
pub(crate) type Handler<T> = Box<dyn Fn(&mut RouteContext, &[Capture]) -> Outcome<T>>;

pub(crate) struct Node<T> {
    children: Vec<(Matcher, Node<T>)>,
    terminal: Option<Handler<T>>,
}

impl<T> Node<T> {
    pub(crate) fn new() -> Self {
        Self {
            children: Vec::new(),
            terminal: None,
        }
    }

    /// Walk/extend the trie along `matchers`, creating intermediate nodes as
    /// needed, and return the node the sequence terminates at.
    pub(crate) fn extend(&mut self, matchers: &[Matcher]) -> &mut Node<T> {
        let mut node = self;
        for matcher in matchers {
            let idx = match node
                .children
                .iter()
                .position(|(key, _)| key.same_key(matcher))
            {
                Some(idx) => idx,
                None => {
                    node.children.push((matcher.clone(), Node::new()));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[idx].1;
        }
        node
    }

    pub(crate) fn has_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    pub(crate) fn set_terminal(&mut self, handler: Handler<T>) {
        self.terminal = Some(handler);
    }
}

/// Result of resolving a segment list against a subtree.
pub(crate) enum WalkOutcome<T> {
    /// Some terminal handler handled the path.
    Handled(T),
    /// A terminal handler redirected and no ancestor intercepted it.
    Redirect(Redirect),
    /// No terminal handler in the subtree produced a settled result.
    NoMatch,
}

/// Ordered depth-first resolution.
pub(crate) fn walk<T>(
    node: &Node<T>,
    segments: &[String],
    captures: &mut Vec<Capture>,
    ctx: &mut RouteContext,
) -> WalkOutcome<T> {
    if segments.is_empty() {
        return match &node.terminal {
            Some(handler) => invoke(handler, ctx, captures),
            None => WalkOutcome::NoMatch,
        };
    }

    if let Some(handler) = &node.terminal {
        // Ancestor prefix of a deeper match: the deeper attempt runs first
        // on a fresh capture list. A redirect escaping it falls back to this
        // node's own handler with the stashed prefix captures; a plain
        // no-match never does.
        let mut inner = Vec::new();
        return match descend(node, segments, &mut inner, ctx) {
            WalkOutcome::Redirect(_) => invoke(handler, ctx, captures),
            settled => settled,
        };
    }

    descend(node, segments, captures, ctx)
}

fn descend<T>(
    node: &Node<T>,
    segments: &[String],
    captures: &mut Vec<Capture>,
    ctx: &mut RouteContext,
) -> WalkOutcome<T> {
    let (head, rest) = match segments.split_first() {
        Some(parts) => parts,
        None => return WalkOutcome::NoMatch,
    };

    for (key, child) in &node.children {
        let Some(matched) = key.matches(head) else {
            continue;
        };
        let captured = matches!(matched, SegmentMatch::Captured(_));
        if let SegmentMatch::Captured(value) = matched {
            captures.push(value);
        }
        match walk(child, rest, captures, ctx) {
            WalkOutcome::NoMatch => {
                // Whole subtree failed; undo the capture and try the next
                // sibling in registration order.
                if captured {
                    captures.pop();
                }
            }
            settled => return settled,
        }
    }

    WalkOutcome::NoMatch
}

fn invoke<T>(
    handler: &Handler<T>,
    ctx: &mut RouteContext,
    captures: &[Capture],
) -> WalkOutcome<T> {
    match handler(ctx, captures) {
        Outcome::Handled(value) => WalkOutcome::Handled(value),
        Outcome::Redirect(redirect) => WalkOutcome::Redirect(redirect),
        Outcome::Declined => WalkOutcome::NoMatch,
    }
}
