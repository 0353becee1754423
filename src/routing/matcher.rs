//! Segment matchers and route patterns.
//!
//! # Responsibilities
//! - Test one decoded path segment (literal, predicate, or regex pattern)
//! - Capture dynamic values for handler arguments
//! - Compile template strings into matcher sequences
//!
//! # Design Decisions
//! - Matcher kinds are a tagged enum, not trait objects
//! - Literal matching is exact and case-sensitive
//! - Pattern matching is a sub-match: the regex may hit anywhere in the
//!   segment unless the pattern itself anchors
//! - Sticky patterns capture the full group list, non-sticky the matched text
//! - Two matchers denote the same trie edge only for the *same key*:
//!   literals compare by text, patterns by (source, stickiness), predicates
//!   by function identity

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::routing::types::{Capture, RegisterError};

/// Predicate signature: decoded segment in, captured value out.
///
/// `None` means the segment does not match.
pub type Predicate = Arc<dyn Fn(&str) -> Option<Capture> + Send + Sync>;

/// One rule for testing one path segment.
#[derive(Clone)]
pub enum Matcher {
    /// Matches iff the decoded segment equals the text exactly.
    Literal(String),
    /// Matches iff the predicate returns a captured value.
    Predicate(Predicate),
    /// Matches iff the regex finds a match in the decoded segment.
    Pattern {
        /// Compiled segment regex.
        regex: Regex,
        /// Sticky patterns capture the full group list instead of the
        /// matched substring.
        sticky: bool,
    },
}

/// Result of testing one segment against one matcher.
pub enum SegmentMatch {
    /// Matched without capturing (literals).
    Matched,
    /// Matched and captured a value (dynamic matchers).
    Captured(Capture),
}

impl Matcher {
    /// Literal segment matcher.
    pub fn literal(text: impl Into<String>) -> Self {
        Matcher::Literal(text.into())
    }

    /// Predicate segment matcher.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str) -> Option<Capture> + Send + Sync + 'static,
    {
        Matcher::Predicate(Arc::new(f))
    }

    /// Non-sticky pattern matcher: captures the whole matched substring.
    pub fn pattern(source: &str) -> Result<Self, RegisterError> {
        Ok(Matcher::Pattern {
            regex: compile(source)?,
            sticky: false,
        })
    }

    /// Sticky pattern matcher: captures the full match-group list.
    pub fn pattern_sticky(source: &str) -> Result<Self, RegisterError> {
        Ok(Matcher::Pattern {
            regex: compile(source)?,
            sticky: true,
        })
    }

    /// Test one decoded segment.
    pub fn matches(&self, segment: &str) -> Option<SegmentMatch> {
        match self {
            Matcher::Literal(text) => (segment == text).then_some(SegmentMatch::Matched),
            Matcher::Predicate(pred) => pred(segment).map(SegmentMatch::Captured),
            Matcher::Pattern { regex, sticky } => {
                if *sticky {
                    regex.captures(segment).map(|caps| {
                        let groups = caps
                            .iter()
                            .map(|group| group.map(|m| m.as_str().to_string()))
                            .collect();
                        SegmentMatch::Captured(Capture::Groups(groups))
                    })
                } else {
                    regex.find(segment).map(|found| {
                        SegmentMatch::Captured(Capture::Text(found.as_str().to_string()))
                    })
                }
            }
        }
    }

    /// Whether two matchers denote the same trie edge at registration time.
    pub(crate) fn same_key(&self, other: &Matcher) -> bool {
        match (self, other) {
            (Matcher::Literal(a), Matcher::Literal(b)) => a == b,
            (
                Matcher::Pattern { regex: a, sticky: sa },
                Matcher::Pattern { regex: b, sticky: sb },
            ) => a.as_str() == b.as_str() && sa == sb,
            (Matcher::Predicate(a), Matcher::Predicate(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Literal(text) => write!(f, "Literal({text:?})"),
            Matcher::Predicate(_) => write!(f, "Predicate(..)"),
            Matcher::Pattern { regex, sticky } => {
                write!(f, "Pattern({:?}, sticky: {sticky})", regex.as_str())
            }
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Literal(text) => f.write_str(text),
            Matcher::Predicate(_) => f.write_str("{<predicate>}"),
            Matcher::Pattern { regex, .. } => write!(f, "{{{}}}", regex.as_str()),
        }
    }
}

/// A parsed route pattern: an ordered sequence of segment matchers.
#[derive(Debug, Clone)]
pub struct Pattern {
    segments: Vec<Matcher>,
}

impl Pattern {
    /// Parse a template string.
    ///
    /// The template is split on `/` like any routed path. Each segment is
    /// either literal text, a single `{regex}` marker (a non-sticky pattern
    /// capturing the matched substring), or an interleaving of literal text
    /// and markers, which compiles to one anchored regex with the literal
    /// chunks escaped and each marker contributing a capture group (captured
    /// sticky-style as the group list).
    pub fn parse(template: &str) -> Result<Self, RegisterError> {
        let segments = template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(parse_segment)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Pattern { segments })
    }

    /// The ordered matcher sequence.
    pub fn segments(&self) -> &[Matcher] {
        &self.segments
    }

    /// Whether this pattern addresses the registration root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<Vec<Matcher>> for Pattern {
    fn from(segments: Vec<Matcher>) -> Self {
        Pattern { segments }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for matcher in &self.segments {
            write!(f, "/{matcher}")?;
        }
        Ok(())
    }
}

/// Conversion into a [`Pattern`], accepted by the registration surface.
///
/// Implemented for template strings (parsed, fallible) and for explicit
/// matcher sequences (infallible).
pub trait IntoPattern {
    /// Produce the pattern, or the template parse error.
    fn into_pattern(self) -> Result<Pattern, RegisterError>;
}

impl IntoPattern for Pattern {
    fn into_pattern(self) -> Result<Pattern, RegisterError> {
        Ok(self)
    }
}

impl IntoPattern for &str {
    fn into_pattern(self) -> Result<Pattern, RegisterError> {
        Pattern::parse(self)
    }
}

impl IntoPattern for String {
    fn into_pattern(self) -> Result<Pattern, RegisterError> {
        Pattern::parse(&self)
    }
}

impl IntoPattern for Vec<Matcher> {
    fn into_pattern(self) -> Result<Pattern, RegisterError> {
        Ok(Pattern::from(self))
    }
}

fn compile(source: &str) -> Result<Regex, RegisterError> {
    if source.is_empty() {
        return Err(RegisterError::InvalidMatcher {
            segment: source.to_string(),
            reason: "empty pattern".to_string(),
        });
    }
    Regex::new(source).map_err(|err| RegisterError::InvalidMatcher {
        segment: source.to_string(),
        reason: err.to_string(),
    })
}

/// One chunk of a template segment: literal text or a `{...}` marker body.
enum Chunk<'a> {
    Text(&'a str),
    Marker(&'a str),
}

fn parse_segment(segment: &str) -> Result<Matcher, RegisterError> {
    let chunks = scan_chunks(segment)?;

    let marker_count = chunks
        .iter()
        .filter(|c| matches!(c, Chunk::Marker(_)))
        .count();
    if marker_count == 0 {
        return Ok(Matcher::literal(segment));
    }

    // A bare marker keeps the original sub-match semantics; anything mixed
    // must anchor so the literal chunks are positional.
    if let [Chunk::Marker(body)] = chunks.as_slice() {
        return marker_matcher(segment, body);
    }

    let mut source = String::from("^");
    for chunk in &chunks {
        match chunk {
            Chunk::Text(text) => source.push_str(&regex::escape(text)),
            Chunk::Marker(body) => {
                if body.is_empty() {
                    return Err(RegisterError::InvalidMatcher {
                        segment: segment.to_string(),
                        reason: "empty marker".to_string(),
                    });
                }
                source.push('(');
                source.push_str(body);
                source.push(')');
            }
        }
    }
    source.push('$');

    let regex = Regex::new(&source).map_err(|err| RegisterError::InvalidMatcher {
        segment: segment.to_string(),
        reason: err.to_string(),
    })?;
    Ok(Matcher::Pattern { regex, sticky: true })
}

fn marker_matcher(segment: &str, body: &str) -> Result<Matcher, RegisterError> {
    if body.is_empty() {
        return Err(RegisterError::InvalidMatcher {
            segment: segment.to_string(),
            reason: "empty marker".to_string(),
        });
    }
    let regex = Regex::new(body).map_err(|err| RegisterError::InvalidMatcher {
        segment: segment.to_string(),
        reason: err.to_string(),
    })?;
    Ok(Matcher::Pattern {
        regex,
        sticky: false,
    })
}

/// Split a template segment into literal text and `{...}` marker bodies.
///
/// Braces nest (regex quantifiers like `{2,3}` stay inside their marker);
/// unbalanced braces are rejected.
fn scan_chunks(segment: &str) -> Result<Vec<Chunk<'_>>, RegisterError> {
    let mut chunks = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, ch) in segment.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    if start < i {
                        chunks.push(Chunk::Text(&segment[start..i]));
                    }
                    start = i + 1;
                }
                depth += 1;
            }
            '}' => {
                if depth == 0 {
                    return Err(RegisterError::InvalidMatcher {
                        segment: segment.to_string(),
                        reason: "unbalanced '}'".to_string(),
                    });
                }
                depth -= 1;
                if depth == 0 {
                    chunks.push(Chunk::Marker(&segment[start..i]));
                    start = i + 1;
                }
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(RegisterError::InvalidMatcher {
            segment: segment.to_string(),
            reason: "unbalanced '{'".to_string(),
        });
    }
    if start < segment.len() {
        chunks.push(Chunk::Text(&segment[start..]));
    }
    Ok(chunks)
}
