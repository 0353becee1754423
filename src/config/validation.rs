//! Route-table validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every pattern compiles into a matcher sequence
//! - Check redirect targets are absolute paths
//! - Detect duplicate patterns before registration would
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before a table is materialized into a router

use std::collections::HashSet;
use std::fmt;

use crate::config::schema::{RouteAction, RouterConfig};
use crate::routing::matcher::Pattern;

/// One semantic problem found in a route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The pattern could not be compiled.
    BadPattern { pattern: String, reason: String },
    /// The same pattern appears twice.
    DuplicatePattern { pattern: String },
    /// A redirect target is not an absolute path.
    RelativeRedirect { pattern: String, target: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::BadPattern { pattern, reason } => {
                write!(f, "pattern '{}' does not compile: {}", pattern, reason)
            }
            ValidationError::DuplicatePattern { pattern } => {
                write!(f, "pattern '{}' is registered twice", pattern)
            }
            ValidationError::RelativeRedirect { pattern, target } => {
                write!(
                    f,
                    "route '{}' redirects to '{}', which is not absolute",
                    pattern, target
                )
            }
        }
    }
}

/// Validate a route table. Returns every error found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for entry in &config.routes {
        match Pattern::parse(&entry.pattern) {
            Ok(pattern) => {
                // Compare canonical displays so `/a/b` and `a/b/` collide.
                if !seen.insert(pattern.to_string()) {
                    errors.push(ValidationError::DuplicatePattern {
                        pattern: entry.pattern.clone(),
                    });
                }
            }
            Err(err) => errors.push(ValidationError::BadPattern {
                pattern: entry.pattern.clone(),
                reason: err.to_string(),
            }),
        }

        if let RouteAction::Redirect { to, .. } = &entry.action {
            if !to.starts_with('/') {
                errors.push(ValidationError::RelativeRedirect {
                    pattern: entry.pattern.clone(),
                    target: to.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
