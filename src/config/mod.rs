//! Declarative route tables.
//!
//! # Data Flow
//! ```text
//! route table (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → table.rs (materialize into a live PathRouter)
//! ```
//!
//! # Design Decisions
//! - Tables are immutable once loaded; they are registered in file order,
//!   so entry order carries the same sibling-priority meaning as the order
//!   of `register` calls
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every error, not just the first

pub mod loader;
pub mod schema;
pub mod table;
pub mod validation;

pub use schema::RouteAction;
pub use schema::RouteEntry;
pub use schema::RouterConfig;
pub use table::TableHit;
