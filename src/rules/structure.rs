use super::{Rule, RuleContext};
use crate::constants;
use crate::findings::{Finding, Severity};
use crate::path::LogicalPath;
use crate::spec::SpecVersion;
use openapiv3::OpenAPI;
use serde_json::Value;

/// Checks that an OpenAPI 3.0 document has the shape of one.
///
/// Other versions are not checked.
pub struct OpenApiStructure;

impl Rule for OpenApiStructure {
    fn id(&self) -> &'static str {
        constants::RULE_OPENAPI_STRUCTURE
    }

    fn validator(&self) -> &'static str {
        constants::VALIDATOR_STRUCTURE
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, context: &RuleContext<'_>) -> Vec<Finding> {
        if context.version != SpecVersion::OpenApi3 || !is_openapi_30(context.unresolved) {
            return Vec::new();
        }
        match serde_json::from_value::<OpenAPI>(context.unresolved.clone()) {
            Ok(_) => Vec::new(),
            Err(e) => vec![Finding::new(
                LogicalPath::new(),
                format!("Document is not a valid OpenAPI 3.0 definition: {e}"),
                self.id(),
                self.default_severity(),
            )],
        }
    }
}

fn is_openapi_30(document: &Value) -> bool {
    document
        .get(constants::FIELD_OPENAPI)
        .and_then(Value::as_str)
        .is_some_and(|version| version.starts_with("3.0"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(doc: &Value) -> Vec<Finding> {
        let context = RuleContext {
            unresolved: doc,
            resolved: doc,
            circular_paths: &[],
            version: SpecVersion::detect(doc),
        };
        OpenApiStructure.check(&context)
    }

    #[test]
    fn test_valid_document() {
        let doc = json!({
            "openapi": "3.0.0",
            "info": {"title": "Pets", "version": "1.0"},
            "paths": {}
        });
        assert!(run(&doc).is_empty());
    }

    #[test]
    fn test_missing_info() {
        let doc = json!({"openapi": "3.0.0", "paths": {}});
        let findings = run(&doc);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].path.is_empty());
        assert!(findings[0].message.contains("info"));
    }

    #[test]
    fn test_swagger_is_not_checked() {
        assert!(run(&json!({"swagger": "2.0"})).is_empty());
    }

    #[test]
    fn test_openapi_31_is_not_checked() {
        assert!(run(&json!({"openapi": "3.1.0"})).is_empty());
    }
}
