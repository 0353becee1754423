//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (startup):
//!     pattern (template string or matcher sequence)
//!     → matcher.rs (compile segments)
//!     → trie.rs (extend trie, attach terminal handler)
//!
//! Resolution (per navigation event):
//!     raw path
//!     → path (percent-decode + split)
//!     → trie.rs (ordered depth-first walk, captures)
//!     → handler → Handled | Redirect | Declined
//!     → router.rs (redirect chain, notification, current path)
//! ```
//!
//! # Design Decisions
//! - Siblings are tried in registration order; the first match descends
//! - A subtree must fail entirely before the next sibling is tried
//! - Redirects re-resolve from the root with the same context
//! - Exactly one notification per top-level resolution

pub mod matcher;
pub mod router;
pub mod types;

mod trie;
