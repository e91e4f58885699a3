//! Lint rules and the registry that runs them.

pub mod circular_refs;
pub mod operation_ids;
pub mod structure;

pub use circular_refs::NoCircularRefs;
pub use operation_ids::OperationIds;
pub use structure::OpenApiStructure;

use crate::config::LintConfig;
use crate::findings::{Finding, FindingsByValidator, Severity};
use crate::path::LogicalPath;
use crate::spec::SpecVersion;
use serde_json::Value;
use tracing::debug;

/// What a rule gets to look at.
pub struct RuleContext<'a> {
    /// The document as written.
    pub unresolved: &'a Value,
    /// The document with references replaced and cycles cut.
    pub resolved: &'a Value,
    /// Cycles found during correction, as paths in the authored document.
    pub circular_paths: &'a [LogicalPath],
    pub version: SpecVersion,
}

pub trait Rule: Send + Sync {
    fn id(&self) -> &'static str;

    /// Validator group the rule's findings are filed under.
    fn validator(&self) -> &'static str;

    fn default_severity(&self) -> Severity;

    /// Findings at the rule's default severity.
    fn check(&self, context: &RuleContext<'_>) -> Vec<Finding>;
}

pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtin_rules()
    }
}

impl RuleRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    #[must_use]
    pub fn with_builtin_rules() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(NoCircularRefs));
        registry.register(Box::new(OperationIds));
        registry.register(Box::new(OpenApiStructure));
        registry
    }

    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.id())
    }

    /// Runs every enabled rule and files its findings at the configured severity.
    #[must_use]
    pub fn run(&self, context: &RuleContext<'_>, config: &LintConfig) -> FindingsByValidator {
        let mut findings = FindingsByValidator::new();
        for rule in &self.rules {
            let Some(severity) = config.severity_for(rule.id(), rule.default_severity()) else {
                debug!(target: "oaslint::rules", rule = rule.id(), "rule disabled");
                continue;
            };
            let produced = rule.check(context);
            debug!(target: "oaslint::rules", rule = rule.id(), count = produced.len(), "rule finished");
            for mut finding in produced {
                finding.severity = severity;
                findings.add(rule.validator(), finding);
            }
        }
        findings
    }
}
