//! Component-path backfilling.
//!
//! A finding found while walking the resolved document may sit under a
//! `$ref`. Its `path` then names the place the component is used, not the
//! component itself. This fills in `componentPath` with the location of the
//! definition, by walking the unresolved document and jumping to each
//! `$ref` target the walk runs into.

use crate::findings::FindingsByValidator;
use crate::path::{LogicalPath, PathSegment};
use crate::spec::reference::{parse_ref, ref_of};
use serde_json::Value;
use std::collections::HashSet;
use tracing::trace;

/// Sets `component_path` on every finding whose path reaches through a
/// reference. Findings whose path is invalid, or reaches no reference, are
/// left untouched.
pub fn add_component_paths(findings: &mut FindingsByValidator, unresolved: &Value) {
    for finding in findings.iter_mut() {
        if let Some(component_path) = component_path_for(&finding.path, unresolved) {
            trace!(
                target: "oaslint::component_paths",
                path = %finding.path,
                component = %component_path,
                "backfilled component path"
            );
            finding.component_path = Some(component_path);
        }
    }
}

enum Walk {
    Invalid,
    Complete,
    /// A `$ref` found where the key at `at` was missing.
    Redirect { reference: String, at: usize },
}

fn walk(path: &[String], document: &Value) -> Walk {
    let mut current = document;
    for (at, key) in path.iter().enumerate() {
        if let Value::Array(items) = current {
            match key.parse::<usize>().ok().and_then(|index| items.get(index)) {
                Some(item) => {
                    current = item;
                    continue;
                }
                None => return Walk::Invalid,
            }
        }
        if let Some(next) = current.get(key.as_str()) {
            current = next;
        } else if let Some(reference) = ref_of(current) {
            return Walk::Redirect {
                reference: reference.to_string(),
                at,
            };
        } else if at + 1 < path.len() {
            return Walk::Invalid;
        }
    }
    Walk::Complete
}

/// The component path for `path`, if following it requires at least one
/// reference and the redirected path is valid.
#[must_use]
pub fn component_path_for(path: &LogicalPath, unresolved: &Value) -> Option<LogicalPath> {
    let mut candidate = path.to_strings();
    let mut followed = false;
    let mut seen = HashSet::new();

    loop {
        match walk(&candidate, unresolved) {
            Walk::Invalid => return None,
            Walk::Complete => {
                return followed
                    .then(|| candidate.into_iter().map(PathSegment::Key).collect());
            }
            Walk::Redirect { reference, at } => {
                let mut next = parse_ref(&reference).to_strings();
                next.extend_from_slice(&candidate[at..]);
                if !seen.insert(next.clone()) {
                    return None;
                }
                candidate = next;
                followed = true;
            }
        }
    }
}
