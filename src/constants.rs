//! Centralized string constants for oaslint
//!
//! This module contains commonly used string literals to:
//! - Reduce string duplication
//! - Improve maintainability
//! - Ensure consistency across the codebase

// Document keywords
pub const REF_KEY: &str = "$ref";
pub const FIELD_OPENAPI: &str = "openapi";
pub const FIELD_SWAGGER: &str = "swagger";
pub const FIELD_PATHS: &str = "paths";
pub const FIELD_OPERATION_ID: &str = "operationId";

/// Value written in place of an edge that closed a reference cycle.
pub const CIRCULAR_SENTINEL: &str = "[Circular]";

// HTTP methods, in the order operations are visited
pub const HTTP_METHOD_GET: &str = "get";
pub const HTTP_METHOD_PUT: &str = "put";
pub const HTTP_METHOD_POST: &str = "post";
pub const HTTP_METHOD_DELETE: &str = "delete";
pub const HTTP_METHOD_OPTIONS: &str = "options";
pub const HTTP_METHOD_HEAD: &str = "head";
pub const HTTP_METHOD_PATCH: &str = "patch";
pub const HTTP_METHOD_TRACE: &str = "trace";

pub const HTTP_METHODS: &[&str] = &[
    HTTP_METHOD_GET,
    HTTP_METHOD_PUT,
    HTTP_METHOD_POST,
    HTTP_METHOD_DELETE,
    HTTP_METHOD_OPTIONS,
    HTTP_METHOD_HEAD,
    HTTP_METHOD_PATCH,
    HTTP_METHOD_TRACE,
];

// Rule identifiers
pub const RULE_NO_CIRCULAR_REFS: &str = "no-circular-refs";
pub const RULE_OPERATION_IDS: &str = "operation-ids";
pub const RULE_OPENAPI_STRUCTURE: &str = "openapi-structure";

// Validator groups findings are filed under
pub const VALIDATOR_CIRCULAR_REFS: &str = "circular-refs";
pub const VALIDATOR_OPERATIONS: &str = "operations";
pub const VALIDATOR_STRUCTURE: &str = "structure";

// Messages
pub const MSG_CIRCULAR_REF: &str = "API definition should not contain circular references.";

// Configuration
pub const DEFAULT_CONFIG_FILE: &str = ".oaslintrc.toml";
pub const DEFAULT_CST_CACHE_CAPACITY: usize = 16;

// Environment variables
pub const ENV_LOG: &str = "OASLINT_LOG";
pub const ENV_LOG_FORMAT: &str = "OASLINT_LOG_FORMAT";
pub const ENV_LOG_FILE: &str = "OASLINT_LOG_FILE";

// Error hints
pub const ERR_FILE_NOT_FOUND: &str = "Check that the file path is correct and the file exists.";
pub const ERR_PERMISSION: &str = "Check file permissions or run with appropriate privileges.";
pub const ERR_YAML_SYNTAX: &str = "Check that your API definition is valid YAML syntax.";
pub const ERR_JSON_SYNTAX: &str = "Check that your API definition is valid JSON syntax.";
pub const ERR_TOML_SYNTAX: &str = "Check that your configuration file is valid TOML syntax.";
pub const ERR_SOURCE_SYNTAX: &str =
    "Fix the syntax error before linting; locations cannot be computed without a successful parse.";
pub const ERR_CONFIG: &str = "Check the rule names and severities in your configuration file.";
pub const ERR_CALLER_BUG: &str =
    "This is a bug in the caller. Please report it with the command you were running.";
