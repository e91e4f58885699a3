use super::{Rule, RuleContext};
use crate::constants;
use crate::findings::{Finding, Severity};
use crate::path::{LogicalPath, PathSegment};
use crate::spec::{http_methods_iter, SpecVersion};
use openapiv3::{OpenAPI, ReferenceOr};
use serde_json::Value;
use std::collections::HashMap;

/// Reports operations that reuse an `operationId`.
pub struct OperationIds;

impl Rule for OperationIds {
    fn id(&self) -> &'static str {
        constants::RULE_OPERATION_IDS
    }

    fn validator(&self) -> &'static str {
        constants::VALIDATOR_OPERATIONS
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, context: &RuleContext<'_>) -> Vec<Finding> {
        let mut first_use: HashMap<String, LogicalPath> = HashMap::new();
        let mut findings = Vec::new();

        for (path, operation_id) in collect_operation_ids(context) {
            if let Some(first) = first_use.get(&operation_id) {
                findings.push(Finding::new(
                    path,
                    format!(
                        "operationIds must be unique. '{operation_id}' is already used at {first}"
                    ),
                    self.id(),
                    self.default_severity(),
                ));
            } else {
                first_use.insert(operation_id, path);
            }
        }
        findings
    }
}

/// `(path to the operationId field, operationId)` for every operation, in
/// document order.
fn collect_operation_ids(context: &RuleContext<'_>) -> Vec<(LogicalPath, String)> {
    if context.version == SpecVersion::OpenApi3 {
        if let Ok(spec) = serde_json::from_value::<OpenAPI>(context.unresolved.clone()) {
            return typed_operation_ids(&spec);
        }
    }
    raw_operation_ids(context.unresolved)
}

fn typed_operation_ids(spec: &OpenAPI) -> Vec<(LogicalPath, String)> {
    let mut ids = Vec::new();
    for (path, item) in spec.paths.iter() {
        let ReferenceOr::Item(item) = item else {
            continue;
        };
        for (method, operation) in http_methods_iter(item) {
            if let Some(operation_id) = operation.as_ref().and_then(|op| op.operation_id.clone()) {
                ids.push((operation_id_path(path, method), operation_id));
            }
        }
    }
    ids
}

fn raw_operation_ids(document: &Value) -> Vec<(LogicalPath, String)> {
    let Some(paths) = document
        .get(constants::FIELD_PATHS)
        .and_then(Value::as_object)
    else {
        return Vec::new();
    };

    let mut ids = Vec::new();
    for (path, item) in paths {
        for method in constants::HTTP_METHODS {
            let operation_id = item
                .get(*method)
                .and_then(|operation| operation.get(constants::FIELD_OPERATION_ID))
                .and_then(Value::as_str);
            if let Some(operation_id) = operation_id {
                ids.push((operation_id_path(path, method), operation_id.to_string()));
            }
        }
    }
    ids
}

fn operation_id_path(path: &str, method: &str) -> LogicalPath {
    LogicalPath::from(vec![
        constants::FIELD_PATHS.into(),
        PathSegment::Key(path.to_string()),
        method.into(),
        constants::FIELD_OPERATION_ID.into(),
    ])
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
        OperationIds.check(&context)
    }

    #[test]
    fn test_swagger_duplicate_operation_ids() {
        let doc = json!({
            "swagger": "2.0",
            "info": {"title": "t", "version": "1"},
            "paths": {
                "/pets": {"get": {"operationId": "listPets"}},
                "/pets/{id}": {"get": {"operationId": "listPets"}}
            }
        });
        let findings = run(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].path.to_strings(),
            vec!["paths", "/pets/{id}", "get", "operationId"]
        );
        assert!(findings[0].message.contains("paths./pets.get.operationId"));
    }

    #[test]
    fn test_openapi3_duplicates_read_through_typed_model() {
        let doc = json!({
            "openapi": "3.0.3",
            "info": {"title": "t", "version": "1"},
            "paths": {
                "/pets": {
                    "get": {"operationId": "pets", "responses": {}},
                    "post": {"operationId": "pets", "responses": {}}
                }
            }
        });
        let findings = run(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].path.to_dotted(), "paths./pets.post.operationId");
    }

    #[test]
    fn test_unique_operation_ids() {
        let doc = json!({
            "swagger": "2.0",
            "paths": {
                "/pets": {"get": {"operationId": "a"}, "post": {"operationId": "b"}}
            }
        });
        assert!(run(&doc).is_empty());
    }

    #[test]
    fn test_missing_paths() {
        assert!(run(&json!({"swagger": "2.0"})).is_empty());
    }
}
