//! Circular reference handling
//!
//! [`detector::correct`] cuts cycles out of a resolved document and reports
//! where, in resolved coordinates. [`translator::convert`] turns those paths
//! into locations in the document as written.

pub mod detector;
pub mod translator;

pub use detector::correct;
pub use translator::{convert, translate_path};

use crate::path::LogicalPath;
use crate::resolver::ResolvedDocument;
use serde_json::Value;

/// Cuts all cycles from `resolved` and returns them as authored-document paths.
pub fn correct_and_translate(resolved: &mut ResolvedDocument, unresolved: &Value) -> Vec<LogicalPath> {
    correct(resolved)
        .iter()
        .map(|path| translate_path(unresolved, path))
        .collect()
}
