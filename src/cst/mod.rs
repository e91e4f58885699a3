//! Position-bearing syntax tree for YAML and JSON sources.
//!
//! The tree is built independently of the data parse so that every mapping key,
//! value and sequence item keeps the line and column range it occupies in the
//! original text. Lines and columns are zero-indexed; columns count characters.

pub mod builder;
pub mod cache;

pub use builder::parse;
pub use cache::CstCache;

use serde::{Deserialize, Serialize};

/// A zero-indexed location in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: i64,
    pub column: i64,
}

impl Position {
    #[must_use]
    pub const fn new(line: i64, column: i64) -> Self {
        Self { line, column }
    }
}

/// The extent of a node, from its first character to just past its last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionRange {
    pub start: Position,
    pub end: Position,
}

impl PositionRange {
    /// Returned when a path cannot be located.
    pub const INVALID: Self = Self {
        start: Position::new(-1, -1),
        end: Position::new(-1, -1),
    };

    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }

    /// Whether `position` falls inside this range.
    ///
    /// Single-line ranges are bounded by column on both sides. For multi-line
    /// ranges the start line is bounded on the left, the end line on the right,
    /// and every line strictly between is contained.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        let (start, end) = (self.start, self.end);
        if start.line == end.line {
            return position.line == start.line
                && start.column <= position.column
                && end.column >= position.column;
        }
        if position.line == start.line {
            return position.column >= start.column;
        }
        if position.line == end.line {
            return position.column <= end.column;
        }
        start.line < position.line && end.line > position.line
    }
}

/// A mapping entry. The key's range covers only the key token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Node,
    pub value: Node,
}

impl Entry {
    /// The key text, when the key is a scalar.
    #[must_use]
    pub fn key_text(&self) -> Option<&str> {
        self.key.as_scalar()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Entries in source order.
    Mapping(Vec<Entry>),
    Sequence(Vec<Node>),
    Scalar(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub start: Position,
    pub end: Position,
}

impl Node {
    #[must_use]
    pub const fn range(&self) -> PositionRange {
        PositionRange::new(self.start, self.end)
    }

    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self.kind, NodeKind::Mapping(_))
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Scalar(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn entries(&self) -> Option<&[Entry]> {
        match &self.kind {
            NodeKind::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    #[must_use]
    pub fn items(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Value of the first entry whose scalar key equals `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.entries()?
            .iter()
            .find(|entry| entry.key_text() == Some(key))
            .map(|entry| &entry.value)
    }
}

/// A parsed source: the root node plus the character length of every line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub root: Node,
    pub line_lengths: Vec<usize>,
}

impl SyntaxTree {
    /// Whether `position` addresses an existing line and a column on it.
    #[must_use]
    pub fn is_in_bounds(&self, position: Position) -> bool {
        let (Ok(line), Ok(column)) = (
            usize::try_from(position.line),
            usize::try_from(position.column),
        ) else {
            return false;
        };
        self.line_lengths
            .get(line)
            .is_some_and(|&length| column <= length)
    }
}
