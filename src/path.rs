//! Logical paths into a document.
//!
//! A path is decided once, at the boundary where it enters the crate, into a
//! sequence of typed segments. Descent code matches on the variants instead of
//! re-parsing `name[index]` strings at every step.

use crate::error::Error;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

static BRACKET_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+)\[(\d+)\]$").expect("Regex pattern is hardcoded and valid")
});

/// One step of a [`LogicalPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawSegment", into = "RawSegment")]
pub enum PathSegment {
    /// An object key. All-digit keys such as `"200"` stay keys.
    Key(String),
    /// A position in an array.
    Index(usize),
    /// `name[index]`: descend into key `name`, then into item `index`.
    Bracketed { key: String, index: usize },
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSegment {
    Number(usize),
    Text(String),
}

impl From<RawSegment> for PathSegment {
    fn from(raw: RawSegment) -> Self {
        match raw {
            RawSegment::Number(index) => Self::Index(index),
            RawSegment::Text(text) => Self::parse(&text),
        }
    }
}

impl From<PathSegment> for RawSegment {
    fn from(segment: PathSegment) -> Self {
        match segment {
            PathSegment::Index(index) => Self::Number(index),
            other => Self::Text(other.as_key().into_owned()),
        }
    }
}

impl PathSegment {
    /// Classifies a textual segment, recognising the `name[index]` form.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        BRACKET_SEGMENT
            .captures(text)
            .and_then(|caps| {
                let index = caps[2].parse::<usize>().ok()?;
                Some(Self::Bracketed {
                    key: caps[1].to_string(),
                    index,
                })
            })
            .unwrap_or_else(|| Self::Key(text.to_string()))
    }

    /// The segment as an object key, as it would be written in a dotted path.
    #[must_use]
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Self::Key(key) => Cow::Borrowed(key),
            Self::Index(index) => Cow::Owned(index.to_string()),
            Self::Bracketed { key, index } => Cow::Owned(format!("{key}[{index}]")),
        }
    }

    /// The segment as an array position, if it can be read as one.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Key(key) => key.parse().ok(),
            Self::Bracketed { .. } => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

impl From<&str> for PathSegment {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for PathSegment {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// An ordered list of keys and indices identifying a location in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogicalPath(Vec<PathSegment>);

impl LogicalPath {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Splits a dot-joined path. The empty string is the root path.
    #[must_use]
    pub fn from_dotted(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::new();
        }
        dotted.split('.').map(PathSegment::parse).collect()
    }

    /// Builds a path from a JSON value supplied by an external caller.
    ///
    /// Accepts a dotted string or an array of strings and non-negative integers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for any other shape. This signals a bug in
    /// the caller rather than a problem with the document.
    pub fn from_json(value: &Value) -> Result<Self, Error> {
        match value {
            Value::String(dotted) => Ok(Self::from_dotted(dotted)),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(text) => Ok(PathSegment::parse(text)),
                    Value::Number(n) => n
                        .as_u64()
                        .and_then(|n| usize::try_from(n).ok())
                        .map(PathSegment::Index)
                        .ok_or_else(|| {
                            Error::InvalidArgument(format!(
                                "path index must be a non-negative integer, got {n}"
                            ))
                        }),
                    other => Err(Error::InvalidArgument(format!(
                        "path segments must be strings or integers, got {other}"
                    ))),
                })
                .collect(),
            other => Err(Error::InvalidArgument(format!(
                "path must be a string or an array, got {other}"
            ))),
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }

    /// Returns a copy of this path with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathSegment> {
        self.0.iter()
    }

    /// Joins the segments with `.`.
    #[must_use]
    pub fn to_dotted(&self) -> String {
        self.to_strings().join(".")
    }

    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|s| s.as_key().into_owned()).collect()
    }

    /// True when every segment of `self` matches the start of `other` by key text.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.len() <= other.len()
            && self
                .0
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.as_key() == b.as_key())
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dotted())
    }
}

impl FromIterator<PathSegment> for LogicalPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<PathSegment>> for LogicalPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for LogicalPath {
    fn from(segments: &[&str]) -> Self {
        segments.iter().map(|s| PathSegment::parse(s)).collect()
    }
}

impl<const N: usize> From<[&str; N]> for LogicalPath {
    fn from(segments: [&str; N]) -> Self {
        segments.iter().map(|s| PathSegment::parse(s)).collect()
    }
}

impl From<Vec<String>> for LogicalPath {
    fn from(segments: Vec<String>) -> Self {
        segments.iter().map(|s| PathSegment::parse(s)).collect()
    }
}

impl<'a> IntoIterator for &'a LogicalPath {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
