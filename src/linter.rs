//! One validation run over one or more documents.

use crate::circular;
use crate::component_paths::add_component_paths;
use crate::config::LintConfig;
use crate::cst::CstCache;
use crate::error::Error;
use crate::findings::{FindingsByValidator, Severity};
use crate::fs::FileSystem;
use crate::position::PositionResolver;
use crate::resolver::resolve;
use crate::rules::{RuleContext, RuleRegistry};
use crate::spec::{parse_document, preprocess, SpecVersion};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Findings for one document.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub findings: FindingsByValidator,
}

impl FileReport {
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.findings.count(severity)
    }

    /// Whether this report should fail the run.
    #[must_use]
    pub fn is_failure(&self, warnings_as_errors: bool) -> bool {
        self.count(Severity::Error) > 0
            || (warnings_as_errors && self.count(Severity::Warning) > 0)
    }
}

/// Runs the lint pipeline. Holds the syntax tree cache for its lifetime, so
/// every position lookup of a document reuses a single parse.
pub struct LintRun<'a, F: FileSystem> {
    fs: &'a F,
    config: &'a LintConfig,
    registry: &'a RuleRegistry,
    cache: CstCache,
}

impl<'a, F: FileSystem> LintRun<'a, F> {
    #[must_use]
    pub fn new(fs: &'a F, config: &'a LintConfig, registry: &'a RuleRegistry) -> Self {
        Self {
            fs,
            config,
            registry,
            cache: CstCache::new(config.cst_cache_capacity),
        }
    }

    #[must_use]
    pub const fn cache(&self) -> &CstCache {
        &self.cache
    }

    /// Reads and lints a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn lint_file(&self, path: &Path) -> Result<FileReport, Error> {
        let source = self
            .fs
            .read_to_string(path)
            .map_err(|e| Error::Io(e).with_context(&format!("Failed to read {}", path.display())))?;
        self.lint_source(&path.display().to_string(), &source)
    }

    /// Lints source text already in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed. A syntax error stops the
    /// run for this document before any rule sees it.
    pub fn lint_source(&self, name: &str, source: &str) -> Result<FileReport, Error> {
        info!(target: "oaslint::linter", file = name, "linting");
        let text = preprocess(source);

        // Positions are computed against this same text later.
        self.cache.get_or_parse(&text)?;
        let unresolved = parse_document(&text)?;
        let version = SpecVersion::detect(&unresolved);

        let mut resolved = resolve(&unresolved);
        let circular_paths = circular::correct_and_translate(&mut resolved, &unresolved);
        let resolved = resolved.to_value();
        debug!(
            target: "oaslint::linter",
            file = name,
            ?version,
            cycles = circular_paths.len(),
            "document prepared"
        );

        let context = RuleContext {
            unresolved: &unresolved,
            resolved: &resolved,
            circular_paths: &circular_paths,
            version,
        };
        let mut findings = self.registry.run(&context, self.config);

        add_component_paths(&mut findings, &unresolved);

        let positions = PositionResolver::new(&self.cache);
        for finding in findings.iter_mut() {
            finding.line = Some(positions.line_for_path(&text, &finding.path)?);
        }

        debug!(
            target: "oaslint::linter",
            file = name,
            errors = findings.count(Severity::Error),
            warnings = findings.count(Severity::Warning),
            "lint finished"
        );
        Ok(FileReport {
            file: name.to_string(),
            findings,
        })
    }
}
