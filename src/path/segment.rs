//! Segment grammar.
//!
//! ```text
//! static    users        any non-empty text without \ / { } *
//! param     {id}         identifier in braces
//! wildcard  * | *file    star with an optional [A-Za-z0-9_-]* suffix
//! ```

use std::fmt;
use thiserror::Error;

/// Class of a single path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Literal text, e.g. `users`.
    Static,
    /// Single-segment capture, e.g. `{id}`.
    Param,
    /// Absorbs the remaining path, e.g. `*` or `*file`.
    Wildcard,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Static => write!(f, "static"),
            SegmentKind::Param => write!(f, "param"),
            SegmentKind::Wildcard => write!(f, "wildcard"),
        }
    }
}

/// A segment that matches none of the three grammars.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid segment: {segment:?}")]
pub struct InvalidSegment {
    pub segment: String,
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns true if the segment is literal text.
pub fn is_static(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains(['\\', '/', '{', '}', '*'])
}

/// Returns true if the segment is `{name}` with a valid identifier.
///
/// The name starts with a letter, or with `_` followed somewhere by at least
/// one letter or digit. `{_}`, `{__}` and `{1}` are rejected.
pub fn is_param(segment: &str) -> bool {
    let Some(name) = segment
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
    else {
        return false;
    };

    if !name.chars().all(is_word) {
        return false;
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => true,
        Some('_') => chars.any(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// Returns true if the segment is `*` with an optional identifier-like suffix.
pub fn is_wildcard(segment: &str) -> bool {
    segment
        .strip_prefix('*')
        .is_some_and(|rest| rest.chars().all(|c| is_word(c) || c == '-'))
}

/// Classify a segment.
pub fn classify(segment: &str) -> Result<SegmentKind, InvalidSegment> {
    if is_static(segment) {
        Ok(SegmentKind::Static)
    } else if is_param(segment) {
        Ok(SegmentKind::Param)
    } else if is_wildcard(segment) {
        Ok(SegmentKind::Wildcard)
    } else {
        Err(InvalidSegment {
            segment: segment.to_string(),
        })
    }
}

/// Name captured by a param segment: `{id}` → `id`.
pub fn param_name(segment: &str) -> Option<&str> {
    if !is_param(segment) {
        return None;
    }
    Some(&segment[1..segment.len() - 1])
}
