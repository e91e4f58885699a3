//! Lint findings and how they are grouped for reporting.

use crate::error::Error;
use crate::path::LogicalPath;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Hint => "hint",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            "hint" => Ok(Self::Hint),
            other => Err(Error::Config(format!(
                "unknown severity '{other}', expected error, warning, info or hint"
            ))),
        }
    }
}

/// A single diagnostic produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Location in the authored document.
    pub path: LogicalPath,
    pub message: String,
    pub rule: String,
    pub severity: Severity,
    /// Where the problem really lives when `path` runs through a `$ref`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_path: Option<LogicalPath>,
    /// Line of `path` in the authored source, filled in after rules have run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Finding {
    pub fn new(
        path: LogicalPath,
        message: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            path,
            message: message.into(),
            rule: rule.into(),
            severity,
            component_path: None,
            line: None,
        }
    }
}

/// Findings of one validator, split by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorFindings {
    #[serde(default)]
    pub errors: Vec<Finding>,
    #[serde(default)]
    pub warnings: Vec<Finding>,
    #[serde(default)]
    pub infos: Vec<Finding>,
    #[serde(default)]
    pub hints: Vec<Finding>,
}

impl ValidatorFindings {
    /// Files the finding under its severity.
    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
            Severity::Info => self.infos.push(finding),
            Severity::Hint => self.hints.push(finding),
        }
    }

    #[must_use]
    pub fn category(&self, severity: Severity) -> &[Finding] {
        match severity {
            Severity::Error => &self.errors,
            Severity::Warning => &self.warnings,
            Severity::Info => &self.infos,
            Severity::Hint => &self.hints,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .chain(&self.infos)
            .chain(&self.hints)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Finding> {
        self.errors
            .iter_mut()
            .chain(&mut self.warnings)
            .chain(&mut self.infos)
            .chain(&mut self.hints)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.infos.len() + self.hints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Findings of a whole run, keyed by validator name in the order validators ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FindingsByValidator(IndexMap<String, ValidatorFindings>);

impl FindingsByValidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, validator: &str, finding: Finding) {
        self.0.entry(validator.to_string()).or_default().push(finding);
    }

    #[must_use]
    pub fn get(&self, validator: &str) -> Option<&ValidatorFindings> {
        self.0.get(validator)
    }

    pub fn validators(&self) -> impl Iterator<Item = (&String, &ValidatorFindings)> {
        self.0.iter()
    }

    /// Every finding, validator by validator.
    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.0.values().flat_map(ValidatorFindings::iter)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Finding> {
        self.0.values_mut().flat_map(ValidatorFindings::iter_mut)
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.0.values().map(|group| group.category(severity).len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(ValidatorFindings::is_empty)
    }

    /// Drops every category but errors.
    pub fn retain_errors(&mut self) {
        for group in self.0.values_mut() {
            group.warnings.clear();
            group.infos.clear();
            group.hints.clear();
        }
        self.0.retain(|_, group| !group.is_empty());
    }
}
