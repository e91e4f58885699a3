//! API description document handling
//!
//! Source normalisation, parsing into an unresolved document, `$ref` pointer
//! handling and version detection.

use crate::constants;

pub mod parser;
pub mod reference;

pub use parser::{parse_document, preprocess};
pub use reference::{lookup, parse_ref, ref_of};

use openapiv3::{Operation, PathItem};
use serde_json::Value;

/// Which family of API description a document declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecVersion {
    /// `swagger: "2.0"`
    Swagger2,
    /// `openapi: 3.x`
    OpenApi3,
    Unknown,
}

impl SpecVersion {
    /// Detects the version from the top-level `swagger`/`openapi` field.
    #[must_use]
    pub fn detect(document: &Value) -> Self {
        let field = |name: &str| match document.get(name) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        if let Some(version) = field(constants::FIELD_OPENAPI) {
            if version.starts_with('3') {
                return Self::OpenApi3;
            }
        }
        if field(constants::FIELD_SWAGGER).is_some_and(|v| v.starts_with('2')) {
            return Self::Swagger2;
        }
        Self::Unknown
    }
}

/// A helper type to iterate over all HTTP methods in a `PathItem`
pub type HttpMethodsIter<'a> = [(&'static str, &'a Option<Operation>); 8];

/// Creates an iterator over all HTTP methods and their operations in a `PathItem`
///
/// # Arguments
/// * `item` - The `PathItem` to extract operations from
///
/// # Returns
/// An array of tuples containing the HTTP method name and its optional operation
#[must_use]
pub const fn http_methods_iter(item: &PathItem) -> HttpMethodsIter<'_> {
    [
        (constants::HTTP_METHOD_GET, &item.get),
        (constants::HTTP_METHOD_PUT, &item.put),
        (constants::HTTP_METHOD_POST, &item.post),
        (constants::HTTP_METHOD_DELETE, &item.delete),
        (constants::HTTP_METHOD_OPTIONS, &item.options),
        (constants::HTTP_METHOD_HEAD, &item.head),
        (constants::HTTP_METHOD_PATCH, &item.patch),
        (constants::HTTP_METHOD_TRACE, &item.trace),
    ]
}
