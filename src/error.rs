use crate::constants;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    /// The source text could not be parsed into a syntax tree.
    #[error("Source parse error at line {line}, column {column}: {message}")]
    SourceParse {
        message: String,
        line: usize,
        column: usize,
    },
    #[error("Configuration error: {0}")]
    Config(String),
    /// A caller handed a malformed argument to a library operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// JSON representation of an error for structured output
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonError {
    pub error_type: String,
    pub message: String,
    pub context: Option<String>,
}

impl Error {
    /// Add context to an error for better user messaging
    #[must_use]
    pub fn with_context(self, context: &str) -> Self {
        match self {
            Self::Io(e) => Self::Config(format!("{context}: {e}")),
            Self::SourceParse {
                message,
                line,
                column,
            } => Self::SourceParse {
                message: format!("{context}: {message}"),
                line,
                column,
            },
            _ => self,
        }
    }

    /// Convert error to JSON representation for structured output
    #[must_use]
    pub fn to_json(&self) -> JsonError {
        let (error_type, message, context) = match self {
            Self::Config(msg) => (
                "Configuration",
                msg.clone(),
                Some(constants::ERR_CONFIG.to_string()),
            ),
            Self::Io(io_err) => {
                let context = match io_err.kind() {
                    std::io::ErrorKind::NotFound => {
                        Some(constants::ERR_FILE_NOT_FOUND)
                    }
                    std::io::ErrorKind::PermissionDenied => {
                        Some(constants::ERR_PERMISSION)
                    }
                    _ => None,
                };
                ("FileSystem", io_err.to_string(), context.map(str::to_string))
            }
            Self::Yaml(yaml_err) => (
                "YAMLParsing",
                yaml_err.to_string(),
                Some(constants::ERR_YAML_SYNTAX.to_string()),
            ),
            Self::Json(json_err) => (
                "JSONParsing",
                json_err.to_string(),
                Some(constants::ERR_JSON_SYNTAX.to_string()),
            ),
            Self::Toml(toml_err) => (
                "TOMLParsing",
                toml_err.to_string(),
                Some(constants::ERR_TOML_SYNTAX.to_string()),
            ),
            Self::SourceParse { .. } => (
                "SourceParsing",
                self.to_string(),
                Some(constants::ERR_SOURCE_SYNTAX.to_string()),
            ),
            Self::InvalidArgument(msg) => (
                "InvalidArgument",
                msg.clone(),
                Some(constants::ERR_CALLER_BUG.to_string()),
            ),
        };

        JsonError {
            error_type: error_type.to_string(),
            message,
            context,
        }
    }
}
