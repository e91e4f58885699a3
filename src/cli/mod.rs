pub mod errors;
pub mod tracing_init;

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(
    author,
    version,
    about = "oaslint: lint OpenAPI 3.x and Swagger 2.0 definitions",
    long_about = "oaslint checks OpenAPI 3.x and Swagger 2.0 definitions written in YAML or JSON.\n\
                  Every finding carries the line it refers to in the file as written, and\n\
                  findings inside referenced components also name the component.\n\n\
                  Examples:\n  \
                  oaslint api.yaml\n  \
                  oaslint --errors-only specs/*.yaml\n  \
                  oaslint --json --config lint.toml api.json"
)]
pub struct Cli {
    /// Definitions to lint
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Print the report as JSON
    #[arg(long, help = "Print the report as JSON")]
    pub json: bool,

    /// Report errors only
    #[arg(long, short = 'e', help = "Only report error-severity findings")]
    pub errors_only: bool,

    /// Configuration file, instead of .oaslintrc.toml in the working directory
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output all errors as structured JSON to stderr
    #[arg(long, help = "Output errors in JSON format")]
    pub json_errors: bool,

    /// Suppress non-essential output (summary, tips)
    #[arg(long, short = 'q', help = "Suppress informational output")]
    pub quiet: bool,

    /// Increase logging verbosity
    #[arg(
        short = 'v',
        action = ArgAction::Count,
        help = "Increase logging verbosity (-v for debug, -vv for trace)"
    )]
    pub verbosity: u8,
}
