//! Builds a [`SyntaxTree`] from yaml-rust2's marked event stream.
//!
//! yaml-rust2 reports only roughly where each event starts, so positions are
//! recovered from the source text. Quoted scalars are scanned to their
//! closing quote, and plain and block scalars by matching the value's visible
//! characters. Flow collections span their brackets. Block collections start
//! at their first key or `-` and end where their last child ends. Block
//! scalars start at their `|` or `>` header.

use super::{Entry, Node, NodeKind, Position, SyntaxTree};
use crate::error::Error;
use std::collections::HashMap;
use tracing::trace;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Parses YAML (or JSON) source into a position-bearing tree.
///
/// Only the first document of a multi-document stream is kept. An empty
/// source yields an empty scalar root at `0:0`.
///
/// # Errors
///
/// Returns [`Error::SourceParse`] with the parser's location if the text is
/// not well-formed YAML.
pub fn parse(source: &str) -> Result<SyntaxTree, Error> {
    let text = SourceText::new(source);
    let mut builder = TreeBuilder::new(&text);
    let mut parser = Parser::new_from_str(source);

    parser
        .load(&mut builder, false)
        .map_err(|e| Error::SourceParse {
            message: e.info().to_string(),
            line: e.marker().line(),
            column: e.marker().col() + 1,
        })?;

    let root = builder.root.unwrap_or_else(|| Node {
        kind: NodeKind::Scalar(String::new()),
        start: Position::new(0, 0),
        end: Position::new(0, 0),
    });
    trace!(target: "oaslint::cst", lines = text.line_starts.len(), "built syntax tree");

    Ok(SyntaxTree {
        root,
        line_lengths: text.line_lengths(),
    })
}

/// Character view of the source with line start offsets.
struct SourceText {
    chars: Vec<char>,
    line_starts: Vec<usize>,
}

impl SourceText {
    fn new(source: &str) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let mut line_starts = vec![0];
        line_starts.extend(
            chars
                .iter()
                .enumerate()
                .filter(|(_, &c)| c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { chars, line_starts }
    }

    fn line_lengths(&self) -> Vec<usize> {
        self.line_starts
            .iter()
            .enumerate()
            .map(|(line, &start)| {
                let end = self
                    .line_starts
                    .get(line + 1)
                    .map_or(self.chars.len(), |next| next - 1);
                let content = &self.chars[start..end];
                content.len() - usize::from(content.last() == Some(&'\r'))
            })
            .collect()
    }

    fn line_of(&self, index: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= index) - 1
    }

    fn position_of(&self, index: usize) -> Position {
        let line = self.line_of(index);
        to_position(line, index - self.line_starts[line])
    }

    /// Inverse of [`Self::position_of`] for positions inside the text.
    fn index_at(&self, position: Position) -> usize {
        let line = usize::try_from(position.line)
            .unwrap_or(0)
            .min(self.line_starts.len() - 1);
        let column = usize::try_from(position.column).unwrap_or(0);
        (self.line_starts[line] + column).min(self.chars.len())
    }

    /// The `-` introducing a block sequence whose first item starts at `item`.
    fn sequence_dash_before(&self, item: usize) -> Option<usize> {
        let dash = (0..item)
            .rev()
            .find(|&i| self.char_at(i).is_some_and(|c| !c.is_whitespace()))?;
        (self.char_at(dash) == Some('-')).then_some(dash)
    }

    /// A `|` or `>` at `index` followed only by header indicators.
    fn is_block_header(&self, index: usize) -> bool {
        if !matches!(self.char_at(index), Some('|' | '>')) {
            return false;
        }
        if index > 0 && self.char_at(index - 1).is_some_and(|c| !c.is_whitespace()) {
            return false;
        }
        self.chars[index + 1..]
            .iter()
            .take_while(|c| !c.is_whitespace())
            .all(|&c| c.is_ascii_digit() || c == '+' || c == '-')
    }

    /// The header of the block scalar whose content the parser reported at
    /// `content`. Blank lines between header and content are skipped.
    fn block_header_before(&self, content: usize) -> Option<usize> {
        let mut line = self.line_of(content);
        let mut search_end = (content + 1).min(self.chars.len());
        let mut blank_end = content.min(self.chars.len());
        loop {
            let start = self.line_starts[line];
            if let Some(header) = (start..search_end).find(|&i| self.is_block_header(i)) {
                return Some(header);
            }
            if line == 0 || self.chars[start..blank_end].iter().any(|c| !c.is_whitespace()) {
                return None;
            }
            line -= 1;
            search_end = self.line_starts[line + 1];
            blank_end = search_end;
        }
    }

    /// Character index of a marker. The marker's own index is trusted when it
    /// agrees with its column; otherwise the line and column are used.
    fn index_of(&self, marker: &Marker) -> usize {
        let index = marker.index().min(self.chars.len());
        let line = self.line_starts.partition_point(|&start| start <= index) - 1;
        if index - self.line_starts[line] == marker.col() {
            return index;
        }
        let line = marker
            .line()
            .saturating_sub(1)
            .min(self.line_starts.len() - 1);
        (self.line_starts[line] + marker.col()).min(self.chars.len())
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Index just past the last character of `value` matched from `from`,
    /// ignoring whitespace on both sides. Stops at the first mismatch.
    fn match_visible(&self, from: usize, value: &str) -> usize {
        let mut cursor = from;
        let mut end = from;
        for expected in value.chars().filter(|c| !c.is_whitespace()) {
            while self.char_at(cursor).is_some_and(char::is_whitespace) {
                cursor += 1;
            }
            if self.char_at(cursor) != Some(expected) {
                break;
            }
            cursor += 1;
            end = cursor;
        }
        end
    }

    fn scalar_end(&self, start: usize, value: &str, style: TScalarStyle) -> usize {
        match style {
            TScalarStyle::DoubleQuoted if self.char_at(start) == Some('"') => {
                let mut cursor = start + 1;
                while let Some(c) = self.char_at(cursor) {
                    match c {
                        '\\' => cursor += 2,
                        '"' => return cursor + 1,
                        _ => cursor += 1,
                    }
                }
                self.chars.len()
            }
            TScalarStyle::SingleQuoted if self.char_at(start) == Some('\'') => {
                let mut cursor = start + 1;
                while let Some(c) = self.char_at(cursor) {
                    if c != '\'' {
                        cursor += 1;
                    } else if self.char_at(cursor + 1) == Some('\'') {
                        cursor += 2;
                    } else {
                        return cursor + 1;
                    }
                }
                self.chars.len()
            }
            TScalarStyle::Literal | TScalarStyle::Folded => {
                let header_end = self.chars[start..]
                    .iter()
                    .position(|&c| c == '\n')
                    .map_or(self.chars.len(), |offset| start + offset + 1);
                let end = self.match_visible(header_end, value);
                if end == header_end {
                    // Empty block scalar: cover only the indicator.
                    start + 1
                } else {
                    end
                }
            }
            _ => self.match_visible(start, value),
        }
    }
}

fn to_position(line: usize, column: usize) -> Position {
    Position::new(
        i64::try_from(line).unwrap_or(i64::MAX),
        i64::try_from(column).unwrap_or(i64::MAX),
    )
}

/// A collection still receiving children.
enum Frame {
    Sequence {
        start: usize,
        anchor: usize,
        items: Vec<Node>,
    },
    Mapping {
        start: usize,
        anchor: usize,
        entries: Vec<Entry>,
        pending_key: Option<Node>,
    },
}

struct TreeBuilder<'a> {
    text: &'a SourceText,
    stack: Vec<Frame>,
    anchors: HashMap<usize, Node>,
    root: Option<Node>,
    done: bool,
}

impl<'a> TreeBuilder<'a> {
    fn new(text: &'a SourceText) -> Self {
        Self {
            text,
            stack: Vec::new(),
            anchors: HashMap::new(),
            root: None,
            done: false,
        }
    }

    fn complete(&mut self, mut node: Node, anchor: usize) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }

        let Some(frame) = self.stack.last_mut() else {
            self.root = Some(node);
            self.done = true;
            return;
        };

        match frame {
            Frame::Sequence { items, .. } => items.push(node),
            Frame::Mapping {
                entries,
                pending_key,
                ..
            } => match pending_key.take() {
                None => *pending_key = Some(node),
                Some(key) => {
                    // An omitted value is reported at the following token;
                    // pin it to the end of its key instead.
                    if node.start == node.end && node.start > key.end {
                        node.start = key.end;
                        node.end = key.end;
                    }
                    entries.push(Entry { key, value: node });
                }
            },
        }
    }

    fn scalar(&self, value: String, style: TScalarStyle, marker: &Marker) -> Node {
        let mut start = self.text.index_of(marker);
        if matches!(style, TScalarStyle::Literal | TScalarStyle::Folded) {
            start = self.text.block_header_before(start).unwrap_or(start);
        }
        let end = self.text.scalar_end(start, &value, style);
        Node {
            kind: NodeKind::Scalar(value),
            start: self.text.position_of(start),
            end: self.text.position_of(end),
        }
    }

    /// Range of a finished collection. Flow style spans from the opening
    /// bracket at `start` to the closing one at `marker`. Block style spans
    /// from `first_child` (already moved back to its `-` for sequences) to the
    /// end of the last child.
    fn collection_range(
        &self,
        start: usize,
        open: char,
        first_child: Option<usize>,
        last_child_end: Option<Position>,
        marker: &Marker,
    ) -> (Position, Position) {
        let flow = self.text.char_at(start) == Some(open)
            && first_child.map_or(true, |child| child > start);
        if flow {
            let close = self.text.index_of(marker);
            return (
                self.text.position_of(start),
                self.text.position_of((close + 1).min(self.text.chars.len())),
            );
        }
        let begin = self.text.position_of(first_child.unwrap_or(start));
        (begin, last_child_end.unwrap_or(begin))
    }
}

impl MarkedEventReceiver for TreeBuilder<'_> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        if self.done {
            return;
        }

        match ev {
            Event::Scalar(value, style, anchor, ..) => {
                let node = self.scalar(value, style, &marker);
                self.complete(node, anchor);
            }
            Event::Alias(anchor) => {
                let node = self.anchors.get(&anchor).cloned().unwrap_or_else(|| {
                    let at = self.text.position_of(self.text.index_of(&marker));
                    Node {
                        kind: NodeKind::Scalar(String::new()),
                        start: at,
                        end: at,
                    }
                });
                self.complete(node, 0);
            }
            Event::SequenceStart(anchor, ..) => {
                self.stack.push(Frame::Sequence {
                    start: self.text.index_of(&marker),
                    anchor,
                    items: Vec::new(),
                });
            }
            Event::MappingStart(anchor, ..) => {
                self.stack.push(Frame::Mapping {
                    start: self.text.index_of(&marker),
                    anchor,
                    entries: Vec::new(),
                    pending_key: None,
                });
            }
            Event::SequenceEnd | Event::MappingEnd => {
                let Some(frame) = self.stack.pop() else {
                    return;
                };
                let (node, anchor) = match frame {
                    Frame::Sequence {
                        start,
                        anchor,
                        items,
                    } => {
                        let first = items.first().map(|item| {
                            let at = self.text.index_at(item.start);
                            self.text.sequence_dash_before(at).unwrap_or(at)
                        });
                        let (start, end) = self.collection_range(
                            start,
                            '[',
                            first,
                            items.last().map(|n| n.end),
                            &marker,
                        );
                        let node = Node {
                            kind: NodeKind::Sequence(items),
                            start,
                            end,
                        };
                        (node, anchor)
                    }
                    Frame::Mapping {
                        start,
                        anchor,
                        entries,
                        ..
                    } => {
                        let first = entries.first().map(|e| self.text.index_at(e.key.start));
                        let (start, end) = self.collection_range(
                            start,
                            '{',
                            first,
                            entries.last().map(|e| e.value.end),
                            &marker,
                        );
                        let node = Node {
                            kind: NodeKind::Mapping(entries),
                            start,
                            end,
                        };
                        (node, anchor)
                    }
                };
                self.complete(node, anchor);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_value_positions() {
        let tree = parse("swagger: 2.0").unwrap();
        let value = tree.root.get("swagger").unwrap();
        assert_eq!(value.start, Position::new(0, 9));
        assert_eq!(value.end, Position::new(0, 12));
    }

    #[test]
    fn test_key_range_covers_only_key() {
        let tree = parse("info:\n  title: Pets\n").unwrap();
        let entry = &tree.root.entries().unwrap()[0];
        assert_eq!(entry.key.start, Position::new(0, 0));
        assert_eq!(entry.key.end, Position::new(0, 4));
        assert_eq!(entry.value.start, Position::new(1, 2));
        assert_eq!(entry.value.end, Position::new(1, 13));
    }

    #[test]
    fn test_entries_keep_source_order() {
        let tree = parse("b: 1\na: 2\nc: 3\n").unwrap();
        let keys: Vec<_> = tree
            .root
            .entries()
            .unwrap()
            .iter()
            .filter_map(Entry::key_text)
            .collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sequence_items() {
        let tree = parse("- abc\n- def").unwrap();
        let items = tree.root.items().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].start, Position::new(1, 2));
        assert_eq!(items[1].end, Position::new(1, 5));
        assert_eq!(tree.root.start, Position::new(0, 0));
        assert_eq!(tree.root.end, Position::new(1, 5));
    }

    #[test]
    fn test_json_positions() {
        let tree = parse("{\n  \"swagger\": \"2.0\",\n  \"tags\": [1, 2]\n}").unwrap();
        assert_eq!(tree.root.start, Position::new(0, 0));
        assert_eq!(tree.root.end, Position::new(3, 1));

        let swagger = tree.root.get("swagger").unwrap();
        assert_eq!(swagger.start, Position::new(1, 13));
        assert_eq!(swagger.end, Position::new(1, 18));

        let tags = tree.root.get("tags").unwrap();
        assert_eq!(tags.start, Position::new(2, 10));
        assert_eq!(tags.end, Position::new(2, 16));
    }

    #[test]
    fn test_quoted_scalar_with_escapes() {
        let tree = parse("a: 'it''s'\nb: \"x\\\"y\"\n").unwrap();
        let a = tree.root.get("a").unwrap();
        assert_eq!(a.as_scalar(), Some("it's"));
        assert_eq!((a.start.column, a.end.column), (3, 10));
        let b = tree.root.get("b").unwrap();
        assert_eq!((b.start.column, b.end.column), (3, 9));
    }

    #[test]
    fn test_literal_block_scalar_end() {
        let tree = parse("description: |\n  first line\n  second\nnext: 1\n").unwrap();
        let description = tree.root.get("description").unwrap();
        assert_eq!(description.start, Position::new(0, 13));
        assert_eq!(description.end, Position::new(2, 8));
    }

    #[test]
    fn test_folded_scalar_starts_at_header() {
        let tree = parse("a:\n  text: >-\n\n    folded\n    body\n").unwrap();
        let text = tree.root.get("a").unwrap().get("text").unwrap();
        assert_eq!(text.start, Position::new(1, 8));
        assert_eq!(text.end, Position::new(4, 8));
    }

    #[test]
    fn test_nested_mappings_start_at_first_key() {
        let tree = parse("paths:\n  /p:\n    get:\n      summary: s\n").unwrap();
        assert_eq!(tree.root.start, Position::new(0, 0));
        let paths = tree.root.get("paths").unwrap();
        assert_eq!(paths.start, Position::new(1, 2));
        let item = paths.get("/p").unwrap();
        assert_eq!(item.start, Position::new(2, 4));
        assert_eq!(item.end, Position::new(3, 16));
    }

    #[test]
    fn test_block_sequence_starts_at_dash() {
        let tree = parse("tags:\n  - name: a\n  - name: b\n").unwrap();
        let tags = tree.root.get("tags").unwrap();
        assert_eq!(tags.start, Position::new(1, 2));
        assert_eq!(tags.items().unwrap()[0].start, Position::new(1, 4));
        assert_eq!(tags.end, Position::new(2, 11));
    }

    #[test]
    fn test_flow_mapping_inside_block() {
        let tree = parse("a:\n  b: {x: 1}\n").unwrap();
        let b = tree.root.get("a").unwrap().get("b").unwrap();
        assert_eq!(b.start, Position::new(1, 5));
        assert_eq!(b.end, Position::new(1, 11));
    }

    #[test]
    fn test_multiline_plain_scalar_end() {
        let tree = parse("summary: one\n  two three\nx: y\n").unwrap();
        let summary = tree.root.get("summary").unwrap();
        assert_eq!(summary.as_scalar(), Some("one two three"));
        assert_eq!(summary.end, Position::new(1, 11));
    }

    #[test]
    fn test_empty_value_pinned_to_key() {
        let tree = parse("a:\nb: 1\n").unwrap();
        let a = tree.root.get("a").unwrap();
        assert_eq!(a.start, Position::new(0, 1));
        assert_eq!(a.end, Position::new(0, 1));
    }

    #[test]
    fn test_alias_reuses_anchor_node() {
        let tree = parse("base: &b\n  x: 1\ncopy: *b\n").unwrap();
        let copy = tree.root.get("copy").unwrap();
        assert!(copy.is_mapping());
        assert_eq!(copy.start, Position::new(1, 2));
    }

    #[test]
    fn test_line_lengths() {
        let tree = parse("a: 1\r\nbb: 22\n").unwrap();
        assert_eq!(tree.line_lengths, vec![4, 6, 0]);
    }

    #[test]
    fn test_empty_source() {
        let tree = parse("").unwrap();
        assert_eq!(tree.root.as_scalar(), Some(""));
        assert_eq!(tree.line_lengths, vec![0]);
    }

    #[test]
    fn test_parse_error_is_surfaced() {
        let result = parse("key: [unclosed\nother: 1");
        assert!(matches!(result, Err(Error::SourceParse { .. })));
    }
}
