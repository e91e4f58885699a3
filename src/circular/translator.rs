use crate::path::LogicalPath;
use crate::spec::reference::{child, lookup, parse_ref, ref_of};
use serde_json::Value;
use std::collections::HashSet;

/// Maps resolved cycle paths back to paths in the authored document, joined with `.`.
#[must_use]
pub fn convert(unresolved: &Value, cycle_paths: &[LogicalPath]) -> Vec<String> {
    cycle_paths
        .iter()
        .map(|path| translate_path(unresolved, path).to_dotted())
        .collect()
}

/// Walks `path` through the unresolved document.
///
/// Whenever a step before the last lands on a reference object, the output
/// path restarts at the reference target, and the walk continues from there.
/// The last step is never redirected, so the result names the `$ref` site
/// that closes the cycle.
#[must_use]
pub fn translate_path(unresolved: &Value, path: &LogicalPath) -> LogicalPath {
    let mut real = LogicalPath::new();
    let mut current = Some(unresolved);
    let last = path.len().saturating_sub(1);

    for (step, segment) in path.iter().enumerate() {
        current = current.and_then(|value| child(value, segment));
        real.push(segment.clone());
        if step < last {
            if let Some((target, value)) = current.and_then(|value| follow(unresolved, value)) {
                real = target;
                current = Some(value);
            }
        }
    }
    real
}

/// Follows a reference, and any reference the target is itself, to the
/// first non-reference value.
fn follow<'a>(root: &'a Value, value: &'a Value) -> Option<(LogicalPath, &'a Value)> {
    let mut seen = HashSet::new();
    let mut resolved = None;
    let mut current = value;
    while let Some(reference) = ref_of(current) {
        if !seen.insert(reference) {
            break;
        }
        let target = parse_ref(reference);
        let Some(next) = lookup(root, &target) else {
            break;
        };
        current = next;
        resolved = Some((target, next));
    }
    resolved
}
