mod common;

use common::{CLEAN_OPENAPI, SWAGGER_PETSTORE};
use oaslint::config::{LintConfig, RuleSetting};
use oaslint::constants;
use oaslint::findings::Severity;
use oaslint::fs::OsFileSystem;
use oaslint::linter::LintRun;
use oaslint::rules::RuleRegistry;

const CHAINED_COMPONENTS: &str = "\
openapi: 3.0.0
info:
  title: Chained
  version: '1.0'
paths:
  /path1:
    get:
      operationId: getPath1
      responses:
        '200':
          $ref: '#/components/responses/GenericResponse'
components:
  responses:
    GenericResponse:
      description: ok
      content:
        application/json:
          schema:
            $ref: '#/components/schemas/GenericSchema'
  schemas:
    GenericSchema:
      type: object
      properties:
        stringProp:
          type: string
";

#[test]
fn test_swagger_findings_with_lines() {
    let config = LintConfig::default();
    let registry = RuleRegistry::with_builtin_rules();
    let run = LintRun::new(&OsFileSystem, &config, &registry);
    let report = run.lint_source("petstore.yaml", SWAGGER_PETSTORE).unwrap();

    let operations = report.findings.get(constants::VALIDATOR_OPERATIONS).unwrap();
    assert_eq!(operations.errors.len(), 1);
    let duplicate = &operations.errors[0];
    assert_eq!(duplicate.path.to_dotted(), "paths./pets/{id}.get.operationId");
    assert_eq!(duplicate.line, Some(16));

    let circular = report.findings.get(constants::VALIDATOR_CIRCULAR_REFS).unwrap();
    assert_eq!(circular.warnings.len(), 1);
    assert_eq!(
        circular.warnings[0].path.to_dotted(),
        "definitions.Pet.properties.parent"
    );
    assert_eq!(circular.warnings[0].message, constants::MSG_CIRCULAR_REF);

    assert!(report.is_failure(false));
}

#[test]
fn test_clean_document() {
    let config = LintConfig::default();
    let registry = RuleRegistry::with_builtin_rules();
    let run = LintRun::new(&OsFileSystem, &config, &registry);
    let report = run.lint_source("clean.json", CLEAN_OPENAPI).unwrap();
    assert!(report.findings.is_empty());
}

#[test]
fn test_component_path_through_reference_chain() {
    let config = LintConfig::default();
    let registry = RuleRegistry::with_builtin_rules();
    let run = LintRun::new(&OsFileSystem, &config, &registry);
    let report = run.lint_source("chained.yaml", CHAINED_COMPONENTS).unwrap();
    assert!(report.findings.is_empty());

    let finding_path = oaslint::path::LogicalPath::from_dotted(
        "paths./path1.get.responses.200.content.application/json.schema.properties.stringProp",
    );
    let unresolved = oaslint::spec::parse_document(CHAINED_COMPONENTS).unwrap();
    let component =
        oaslint::component_paths::component_path_for(&finding_path, &unresolved).unwrap();
    assert_eq!(
        component.to_strings(),
        vec!["components", "schemas", "GenericSchema", "properties", "stringProp"]
    );
}

#[test]
fn test_severity_overrides() {
    let mut config = LintConfig::default();
    config
        .rules
        .insert(constants::RULE_OPERATION_IDS.to_string(), RuleSetting::Off);
    config
        .rules
        .insert(constants::RULE_NO_CIRCULAR_REFS.to_string(), RuleSetting::Error);
    let registry = RuleRegistry::with_builtin_rules();
    let run = LintRun::new(&OsFileSystem, &config, &registry);
    let report = run.lint_source("petstore.yaml", SWAGGER_PETSTORE).unwrap();

    assert!(report.findings.get(constants::VALIDATOR_OPERATIONS).is_none());
    assert_eq!(report.count(Severity::Error), 1);
    assert_eq!(report.count(Severity::Warning), 0);
}

#[test]
fn test_structure_rule_on_broken_openapi() {
    let config = LintConfig::default();
    let registry = RuleRegistry::with_builtin_rules();
    let run = LintRun::new(&OsFileSystem, &config, &registry);
    let report = run
        .lint_source("broken.yaml", "openapi: 3.0.0\npaths: {}\n")
        .unwrap();
    let structure = report.findings.get(constants::VALIDATOR_STRUCTURE).unwrap();
    assert_eq!(structure.errors.len(), 1);
    assert_eq!(structure.errors[0].line, Some(0));
}

#[test]
fn test_tabs_are_normalised_before_parsing() {
    let config = LintConfig::default();
    let registry = RuleRegistry::with_builtin_rules();
    let run = LintRun::new(&OsFileSystem, &config, &registry);
    let source = "swagger: '2.0'\npaths:\n\t/a:\n\t\tget:\n\t\t\toperationId: same\n\t/b:\n\t\tget:\n\t\t\toperationId: same\n";
    let report = run.lint_source("tabs.yaml", source).unwrap();
    assert_eq!(report.count(Severity::Error), 1);
}
