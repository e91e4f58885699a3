use clap::Parser;
use oaslint::cli::errors::print_error_with_json;
use oaslint::cli::tracing_init::init_tracing;
use oaslint::cli::Cli;
use oaslint::config::ConfigManager;
use oaslint::error::Error;
use oaslint::fs::OsFileSystem;
use oaslint::linter::LintRun;
use oaslint::output::Output;
use oaslint::report;
use oaslint::rules::RuleRegistry;
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);
    let json_errors = cli.json_errors;

    match run_command(&cli) {
        Ok(failed) => std::process::exit(i32::from(failed)),
        Err(e) => {
            print_error_with_json(&e, json_errors);
            std::process::exit(1);
        }
    }
}

/// Lints every file and prints the report. Returns whether the run failed.
fn run_command(cli: &Cli) -> Result<bool, Error> {
    let output = Output::new(cli.quiet, cli.json_errors, cli.json);
    let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = ConfigManager::new(base_dir).load(cli.config.as_deref())?;
    let registry = RuleRegistry::with_builtin_rules();
    config.validate(registry.ids())?;

    let run = LintRun::new(&OsFileSystem, &config, &registry);
    let mut reports = Vec::with_capacity(cli.files.len());
    let mut failed = false;
    for file in &cli.files {
        // A file that cannot be read or parsed fails the run without
        // stopping the files after it.
        let mut file_report = match run.lint_file(file) {
            Ok(file_report) => file_report,
            Err(e) => {
                tracing::warn!(target: "oaslint::cli", file = %file.display(), "skipping file");
                print_error_with_json(&e, cli.json_errors);
                failed = true;
                continue;
            }
        };
        failed |= file_report.is_failure(config.warnings_as_errors);
        if cli.errors_only {
            file_report.findings.retain_errors();
        }
        reports.push(file_report);
    }

    if cli.json {
        output.data(format!("{}\n", report::render_json(&reports)?));
    } else {
        output.data(report::render_text(&reports));
        output.info(report::summary(&reports));
    }
    Ok(failed)
}
