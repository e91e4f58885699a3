//! Mapping between logical paths and source positions.
//!
//! Findings are reported against the resolved document, whose shape can drift
//! from the authored YAML (flattened references, merged composite schemas).
//! Descent therefore degrades instead of failing: an unmatched segment stops
//! the walk and the last node reached answers the query.

use crate::cst::{CstCache, Node, NodeKind, Position, PositionRange, SyntaxTree};
use crate::error::Error;
use crate::path::{LogicalPath, PathSegment};
use tracing::trace;

/// Answers position queries against source texts, parsing each text once per cache.
#[derive(Debug, Clone, Copy)]
pub struct PositionResolver<'c> {
    cache: &'c CstCache,
}

impl<'c> PositionResolver<'c> {
    #[must_use]
    pub const fn new(cache: &'c CstCache) -> Self {
        Self { cache }
    }

    /// Best-effort line number for `path` in `source`.
    ///
    /// # Errors
    ///
    /// Only if `source` fails to parse. Unresolvable paths fall back to the
    /// line of the last node reached.
    pub fn line_for_path(&self, source: &str, path: &LogicalPath) -> Result<usize, Error> {
        let tree = self.cache.get_or_parse(source)?;
        let line = line_for_path_in(&tree, path);
        trace!(target: "oaslint::position", %path, line, "line for path");
        Ok(line)
    }

    /// Exact range of the node at `path`, or [`PositionRange::INVALID`].
    ///
    /// # Errors
    ///
    /// Only if `source` fails to parse.
    pub fn position_range_for_path(
        &self,
        source: &str,
        path: &LogicalPath,
    ) -> Result<PositionRange, Error> {
        let tree = self.cache.get_or_parse(source)?;
        Ok(position_range_for_path_in(&tree, path))
    }

    /// Path of the innermost node containing `position`; empty when the
    /// position lies outside the document.
    ///
    /// # Errors
    ///
    /// Only if `source` fails to parse.
    pub fn path_for_position(&self, source: &str, position: Position) -> Result<LogicalPath, Error> {
        let tree = self.cache.get_or_parse(source)?;
        Ok(path_for_position_in(&tree, position))
    }

    /// Same as [`Self::line_for_path`], resolved after yielding to the scheduler once.
    ///
    /// # Errors
    ///
    /// See [`Self::line_for_path`].
    pub async fn line_for_path_async(&self, source: &str, path: &LogicalPath) -> Result<usize, Error> {
        let result = self.line_for_path(source, path);
        tokio::task::yield_now().await;
        result
    }

    /// Same as [`Self::position_range_for_path`], resolved after yielding once.
    ///
    /// # Errors
    ///
    /// See [`Self::position_range_for_path`].
    pub async fn position_range_for_path_async(
        &self,
        source: &str,
        path: &LogicalPath,
    ) -> Result<PositionRange, Error> {
        let result = self.position_range_for_path(source, path);
        tokio::task::yield_now().await;
        result
    }

    /// Same as [`Self::path_for_position`], resolved after yielding once.
    ///
    /// # Errors
    ///
    /// See [`Self::path_for_position`].
    pub async fn path_for_position_async(
        &self,
        source: &str,
        position: Position,
    ) -> Result<LogicalPath, Error> {
        let result = self.path_for_position(source, position);
        tokio::task::yield_now().await;
        result
    }
}

/// Outcome of one descent step in [`line_for_path_in`].
enum Step<'a> {
    /// Continue from this node; `true` if it was reached through an array index.
    Into(&'a Node, bool),
    /// Stop at this node.
    Stop(&'a Node, bool),
    /// A bracketed index points past its sequence; no line can be reported.
    Unresolved,
}

/// Line reported for the node a walk ends on. Mappings reached by key report
/// their own start line (the first key, which sits below the parent key);
/// everything else reports the line after.
fn terminal_line(node: &Node, entered_by_index: bool) -> usize {
    let line = usize::try_from(node.start.line).unwrap_or(0);
    if node.is_mapping() && !entered_by_index {
        line
    } else {
        line + 1
    }
}

fn step_mapping<'a>(entries: &'a [crate::cst::Entry], segment: &PathSegment) -> Option<Step<'a>> {
    let wanted = segment.as_key();
    for entry in entries {
        let Some(key) = entry.key_text() else {
            continue;
        };
        if key == wanted {
            return Some(Step::Into(&entry.value, false));
        }
        let PathSegment::Bracketed { key: name, index } = segment else {
            continue;
        };
        if key != name {
            continue;
        }
        let Some(items) = entry.value.items() else {
            return Some(Step::Stop(&entry.value, false));
        };
        // A lone item stands in for any requested index: upstream dereferencing
        // sometimes reports positions in a longer array than was authored.
        let item = if items.len() == 1 && *index != 0 {
            items.first()
        } else {
            items.get(*index)
        };
        return Some(item.map_or(Step::Unresolved, |item| Step::Into(item, true)));
    }
    None
}

/// Line lookup against an already-built tree. See [`PositionResolver::line_for_path`].
#[must_use]
pub fn line_for_path_in(tree: &SyntaxTree, path: &LogicalPath) -> usize {
    let mut current = &tree.root;
    let mut entered_by_index = false;
    let mut remaining = path.segments();

    while let Some((segment, rest)) = remaining.split_first() {
        let step = match &current.kind {
            NodeKind::Mapping(entries) => step_mapping(entries, segment),
            NodeKind::Sequence(items) => segment
                .as_index()
                .and_then(|index| items.get(index))
                .map(|item| Step::Into(item, true)),
            NodeKind::Scalar(_) => None,
        };
        match step {
            Some(Step::Into(node, by_index)) => {
                current = node;
                entered_by_index = by_index;
                remaining = rest;
            }
            Some(Step::Stop(node, by_index)) => {
                current = node;
                entered_by_index = by_index;
                break;
            }
            Some(Step::Unresolved) => return 0,
            None => break,
        }
    }

    terminal_line(current, entered_by_index)
}

/// Range lookup against an already-built tree. Bracketed segments are matched
/// literally as keys here.
#[must_use]
pub fn position_range_for_path_in(tree: &SyntaxTree, path: &LogicalPath) -> PositionRange {
    let mut current = &tree.root;

    for segment in path {
        let next = match &current.kind {
            NodeKind::Mapping(entries) => {
                let wanted = segment.as_key();
                entries
                    .iter()
                    .find(|entry| entry.key_text() == Some(wanted.as_ref()))
                    .map(|entry| &entry.value)
            }
            NodeKind::Sequence(items) => segment.as_index().and_then(|index| items.get(index)),
            NodeKind::Scalar(_) => None,
        };
        let Some(next) = next else {
            return PositionRange::INVALID;
        };
        current = next;
    }

    current.range()
}

/// Path lookup against an already-built tree. See [`PositionResolver::path_for_position`].
#[must_use]
pub fn path_for_position_in(tree: &SyntaxTree, position: Position) -> LogicalPath {
    let mut path = LogicalPath::new();
    if !tree.is_in_bounds(position) {
        return path;
    }

    let mut current = &tree.root;
    loop {
        let next = match &current.kind {
            NodeKind::Mapping(entries) => {
                let mut next = None;
                for entry in entries {
                    if entry.key.range().contains(position) {
                        return path;
                    }
                    if entry.value.range().contains(position) {
                        path.push(PathSegment::Key(
                            entry.key_text().unwrap_or_default().to_string(),
                        ));
                        next = Some(&entry.value);
                        break;
                    }
                }
                next
            }
            NodeKind::Sequence(items) => items
                .iter()
                .enumerate()
                .find(|(_, item)| item.range().contains(position))
                .map(|(index, item)| {
                    path.push(PathSegment::Index(index));
                    item
                }),
            NodeKind::Scalar(_) => None,
        };
        match next {
            Some(node) => current = node,
            None => return path,
        }
    }
}
