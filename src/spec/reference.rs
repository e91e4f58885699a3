use crate::path::{LogicalPath, PathSegment};
use serde_json::Value;

/// Converts a `$ref` string into the path it points at.
///
/// Everything up to and including the `#` segment is dropped; the remaining
/// segments have their JSON-pointer (`~1`, `~0`) and percent escapes decoded.
/// A reference with no `#` segment keeps all of its segments, which then do
/// not resolve within the document.
#[must_use]
pub fn parse_ref(reference: &str) -> LogicalPath {
    let segments: Vec<&str> = reference.split('/').collect();
    let start = segments
        .iter()
        .position(|segment| *segment == "#")
        .map_or(0, |at| at + 1);

    segments[start..]
        .iter()
        .map(|segment| PathSegment::Key(decode_segment(segment)))
        .collect()
}

fn decode_segment(segment: &str) -> String {
    let unescaped = segment.replace("~1", "/").replace("~0", "~");
    urlencoding::decode(&unescaped).map_or(unescaped.clone(), std::borrow::Cow::into_owned)
}

/// Encodes a key as a JSON-pointer segment.
#[must_use]
pub fn escape_segment(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// The `$ref` string carried by `value`, if it is a reference object.
#[must_use]
pub fn ref_of(value: &Value) -> Option<&str> {
    value.get(crate::constants::REF_KEY)?.as_str()
}

/// Follows `path` from `root` through objects and arrays.
#[must_use]
pub fn lookup<'a>(root: &'a Value, path: &LogicalPath) -> Option<&'a Value> {
    path.iter().try_fold(root, |current, segment| child(current, segment))
}

/// One step of [`lookup`]: an object key, or an in-bounds array index.
#[must_use]
pub fn child<'a>(current: &'a Value, segment: &PathSegment) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(segment.as_key().as_ref()),
        Value::Array(items) => segment.as_index().and_then(|index| items.get(index)),
        _ => None,
    }
}
