//! Depot path representation
//!
//! A depot path is a `//`-rooted sequence of segments. Segments are stored in
//! a SmallVec since nearly all depot paths are shallower than eight levels.

use crate::error::PathError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Prefix shared by every depot (and client) path
pub const ROOT: &str = "//";

/// Recursive wildcard
pub const RECURSIVE_WILDCARD: &str = "...";

/// Normalized, immutable depot path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DepotPath {
    segments: SmallVec<[String; 8]>,
}

impl DepotPath {
    /// Parse a depot path such as `//depot/proj/src/...`
    ///
    /// A single trailing `/` is dropped. Empty segments, `..` segments, double
    /// quotes and control characters are rejected; the `...` wildcard is
    /// allowed anywhere.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        if text.is_empty() {
            return Err(PathError::Empty);
        }
        let rest = text
            .strip_prefix(ROOT)
            .ok_or_else(|| PathError::MissingRoot(text.to_string()))?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        if rest.is_empty() {
            return Err(PathError::Empty);
        }

        if rest.chars().any(|c| c == '"' || c.is_control()) {
            return Err(PathError::InvalidChar(text.to_string()));
        }

        let mut segments = SmallVec::new();
        for segment in rest.split('/') {
            if segment.is_empty() {
                return Err(PathError::EmptySegment(text.to_string()));
            }
            if segment == ".." {
                return Err(PathError::ParentSegment(text.to_string()));
            }
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    /// Path segments after the `//` root
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for a parsed path; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Trailing segment (file name, or wildcard)
    pub fn last_segment(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Path made of the first `n` segments, or `None` if `n` is zero or
    /// exceeds the path length
    pub fn prefix(&self, n: usize) -> Option<DepotPath> {
        if n == 0 || n > self.segments.len() {
            return None;
        }
        Some(Self {
            segments: self.segments[..n].iter().cloned().collect(),
        })
    }

    /// Append a relative path (`name` may itself contain `/`)
    pub fn join(&self, name: &str) -> Result<DepotPath, PathError> {
        Self::parse(&format!("{}/{}", self, name.trim_start_matches('/')))
    }

    /// Path text without the leading `//`
    pub fn without_root(&self) -> String {
        self.segments.join("/")
    }

    /// True if any segment carries a `...` or `*` wildcard
    pub fn has_wildcard(&self) -> bool {
        self.segments
            .iter()
            .any(|s| s.contains(RECURSIVE_WILDCARD) || s.contains('*'))
    }

    /// True if any segment contains whitespace (view lines must be quoted)
    pub fn needs_quoting(&self) -> bool {
        self.segments.iter().any(|s| s.contains(char::is_whitespace))
    }
}

impl fmt::Display for DepotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ROOT, self.segments.join("/"))
    }
}

impl FromStr for DepotPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DepotPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DepotPath> for String {
    fn from(path: DepotPath) -> Self {
        path.to_string()
    }
}
