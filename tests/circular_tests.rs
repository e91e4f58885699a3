use oaslint::circular::{convert, correct};
use oaslint::constants::CIRCULAR_SENTINEL;
use oaslint::path::LogicalPath;
use oaslint::resolver::{resolve, Edge};
use serde_json::{json, Value};

/// Depth-first walk of a plain value; returns the number of nodes visited.
fn count_nodes(value: &Value) -> usize {
    1 + match value {
        Value::Object(map) => map.values().map(count_nodes).sum(),
        Value::Array(items) => items.iter().map(count_nodes).sum(),
        _ => 0,
    }
}

#[test]
fn test_self_cycle_through_nesting() {
    let doc = json!({"key": {"foo": {"bar": {"$ref": "#"}}}});
    let mut resolved = resolve(&doc);

    let cycles = correct(&mut resolved);

    assert_eq!(cycles, vec![LogicalPath::from(["key", "foo", "bar"])]);
    assert_eq!(
        resolved.edge_at(&LogicalPath::from(["key", "foo", "bar"])),
        Some(Edge::Circular)
    );
    assert_eq!(resolved.to_value()["key"]["foo"]["bar"], json!(CIRCULAR_SENTINEL));
}

#[test]
fn test_cycle_path_translates_to_definition() {
    let doc = json!({
        "first": {"second": {"$ref": "#/definitions/something"}},
        "definitions": {
            "something": {"foo": {"$ref": "#/definitions/something"}}
        }
    });
    let translated = convert(&doc, &[LogicalPath::from(["first", "second", "foo"])]);
    assert_eq!(translated, vec!["definitions.something.foo".to_string()]);
}

#[test]
fn test_detect_then_translate() {
    let doc = json!({
        "first": {"second": {"$ref": "#/definitions/something"}},
        "definitions": {
            "something": {"foo": {"$ref": "#/definitions/something"}}
        }
    });
    let mut resolved = resolve(&doc);
    let cycles = correct(&mut resolved);
    assert_eq!(cycles, vec![LogicalPath::from(["first", "second", "foo"])]);
    assert_eq!(convert(&doc, &cycles), vec!["definitions.something.foo".to_string()]);
}

#[test]
fn test_correction_terminates_and_leaves_no_cycles() {
    let doc = json!({
        "paths": {
            "/a": {"schema": {"$ref": "#/definitions/A"}},
            "/b": {"schema": {"$ref": "#/definitions/B"}}
        },
        "definitions": {
            "A": {
                "properties": {
                    "b": {"$ref": "#/definitions/B"},
                    "self": {"$ref": "#/definitions/A"}
                }
            },
            "B": {
                "allOf": [{"$ref": "#/definitions/A"}],
                "properties": {"list": {"items": {"$ref": "#/definitions/B"}}}
            }
        }
    });
    let mut resolved = resolve(&doc);
    let cycles = correct(&mut resolved);
    assert!(!cycles.is_empty());
    assert!(correct(&mut resolved).is_empty());

    let value = resolved.to_value();
    assert!(count_nodes(&value) > 0);
    assert!(value.to_string().contains(CIRCULAR_SENTINEL));
}

#[test]
fn test_shared_but_acyclic_references_are_not_cycles() {
    let doc = json!({
        "paths": {
            "/a": {"schema": {"$ref": "#/definitions/Pet"}},
            "/b": {"schema": {"$ref": "#/definitions/Pet"}}
        },
        "definitions": {
            "Pet": {"properties": {"tag": {"$ref": "#/definitions/Tag"}}},
            "Tag": {"type": "string"}
        }
    });
    let mut resolved = resolve(&doc);
    assert!(correct(&mut resolved).is_empty());
    assert_eq!(
        resolved.to_value()["paths"]["/b"]["schema"]["properties"]["tag"],
        json!({"type": "string"})
    );
}
