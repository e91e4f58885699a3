use super::{Rule, RuleContext};
use crate::constants;
use crate::findings::{Finding, Severity};

/// Reports each reference that closes a cycle.
pub struct NoCircularRefs;

impl Rule for NoCircularRefs {
    fn id(&self) -> &'static str {
        constants::RULE_NO_CIRCULAR_REFS
    }

    fn validator(&self) -> &'static str {
        constants::VALIDATOR_CIRCULAR_REFS
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, context: &RuleContext<'_>) -> Vec<Finding> {
        context
            .circular_paths
            .iter()
            .map(|path| {
                Finding::new(
                    path.clone(),
                    constants::MSG_CIRCULAR_REF,
                    self.id(),
                    self.default_severity(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::LogicalPath;
    use crate::spec::SpecVersion;
    use serde_json::json;

    #[test]
    fn test_one_finding_per_cycle() {
        let doc = json!({});
        let cycles = vec![
            LogicalPath::from(["definitions", "A", "next"]),
            LogicalPath::from(["definitions", "B", "next"]),
        ];
        let context = RuleContext {
            unresolved: &doc,
            resolved: &doc,
            circular_paths: &cycles,
            version: SpecVersion::Swagger2,
        };
        let findings = NoCircularRefs.check(&context);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].path.to_dotted(), "definitions.A.next");
        assert_eq!(findings[1].message, constants::MSG_CIRCULAR_REF);
        assert_eq!(findings[1].severity, Severity::Warning);
    }
}
