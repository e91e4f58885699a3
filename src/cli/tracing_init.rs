//! Tracing/logging initialization for the CLI.

use crate::constants;
use tracing_subscriber::EnvFilter;

/// Wrapper type to write logs to file or stderr.
struct FileOrStderr {
    file: Option<std::sync::Mutex<std::fs::File>>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for FileOrStderr {
    type Writer = Box<dyn std::io::Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        self.file
            .as_ref()
            .and_then(|mutex| mutex.lock().ok())
            .and_then(|file| file.try_clone().ok())
            .map_or_else(
                || Box::new(std::io::stderr()) as Self::Writer,
                |cloned| Box::new(cloned) as Self::Writer,
            )
    }
}

/// Filter directive for a `-v` count: one for debug, two or more for trace.
/// Without `-v` the directive comes from the environment, defaulting to `error`.
fn filter_directive(verbosity: u8, from_env: Option<String>) -> String {
    match verbosity {
        0 => from_env.unwrap_or_else(|| "error".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Initialize tracing-subscriber for lint diagnostics.
///
/// Logs go to stderr, or to the file named by `OASLINT_LOG_FILE`, so they
/// never mix with report output on stdout.
pub fn init_tracing(verbosity: u8) {
    use std::fs::OpenOptions;
    use std::sync::Mutex;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let directive = filter_directive(verbosity, std::env::var(constants::ENV_LOG).ok());
    let env_filter = EnvFilter::try_new(&directive)
        .or_else(|_| EnvFilter::try_new("error"))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    let log_format = std::env::var(constants::ENV_LOG_FORMAT)
        .map_or_else(|_| "text".to_string(), |s| s.to_lowercase());

    if log_format != "json" && log_format != "text" {
        // Tracing is not yet initialized; eprintln! is the only output channel available.
        eprintln!(
            "Warning: Unrecognized {} '{log_format}'. Valid values: 'json', 'text'. Using 'text'.",
            constants::ENV_LOG_FORMAT
        );
    }

    let writer = std::env::var(constants::ENV_LOG_FILE).ok().map_or_else(
        || FileOrStderr { file: None },
        |path| match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => FileOrStderr {
                file: Some(Mutex::new(file)),
            },
            Err(e) => {
                eprintln!("Warning: Could not open log file '{path}': {e}. Using stderr.");
                FileOrStderr { file: None }
            }
        },
    );

    if log_format == "json" {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_span_list(false)
            .with_target(true)
            .with_thread_ids(false)
            .with_line_number(true)
            .with_writer(writer);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(false)
            .with_line_number(false)
            .with_writer(writer);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(0, None), "error");
        assert_eq!(
            filter_directive(0, Some("oaslint=debug".to_string())),
            "oaslint=debug"
        );
        assert_eq!(filter_directive(1, Some("warn".to_string())), "debug");
        assert_eq!(filter_directive(3, None), "trace");
    }
}
