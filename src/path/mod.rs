//! Path segmentation and canonicalization.
//!
//! # Responsibilities
//! - Split raw paths into segments (strip outer slashes, drop empties)
//! - Percent-decode segments once, before any matching happens
//! - Re-encode resolved segments into a canonical path for notifications
//!
//! # Design Decisions
//! - Matchers only ever see decoded text
//! - Malformed percent sequences pass through as literal characters
//! - The canonical form starts with `/`, has no trailing slash, and
//!   percent-encodes every reserved character; the empty path is `/`

use std::borrow::Cow;

/// Split a raw path into percent-decoded segments.
///
/// Leading and trailing slashes are stripped and empty segments produced by
/// repeated slashes are discarded, so `/a//b/` splits identically to `/a/b`.
pub fn split(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(decode)
        .collect()
}

/// Percent-decode one raw segment.
///
/// Decoding that produces invalid UTF-8 falls back to the raw text so that
/// matching still sees something deterministic.
pub fn decode(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    }
}

/// Percent-encode one decoded segment.
pub fn encode(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}

/// Join decoded segments back into the canonical `/`-prefixed path.
pub fn canonicalize(segments: &[String]) -> String {
    if segments.is_empty() {
        return "/".to_string();
    }
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(&encode(segment));
    }
    out
}
