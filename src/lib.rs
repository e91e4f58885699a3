//! Linting for OpenAPI 3.x and Swagger 2.0 definitions.
//!
//! The core maps between logical paths in a document and positions in its
//! source text, cuts reference cycles out of the dereferenced document, and
//! relates findings back to the components they come from.

pub mod circular;
pub mod cli;
pub mod component_paths;
pub mod config;
pub mod constants;
pub mod cst;
pub mod error;
pub mod findings;
pub mod fs;
pub mod linter;
pub mod output;
pub mod path;
pub mod position;
pub mod report;
pub mod resolver;
pub mod rules;
pub mod spec;
