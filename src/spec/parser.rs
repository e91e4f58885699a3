use crate::error::Error;
use serde_json::{Map, Number, Value};
use tracing::debug;

/// Normalises source text before it reaches either parser.
///
/// This function handles:
/// - Tabs, which the YAML scanner rejects as indentation, become two spaces
/// - Escaped solidus (`\/`) sequences become a plain `/`
///
/// The same normalised text must feed both the syntax tree and the data parse
/// so that positions computed from one line up with paths found in the other.
#[must_use]
pub fn preprocess(content: &str) -> String {
    content.replace('\t', "  ").replace("\\/", "/")
}

/// Parses preprocessed YAML or JSON content into an unresolved document.
///
/// Content that looks like JSON (leading `{`) is parsed as JSON first with a
/// YAML fallback; everything else the other way round.
///
/// # Errors
///
/// Returns the error of the format the content looked like if both parsers fail.
pub fn parse_document(content: &str) -> Result<Value, Error> {
    if content.trim_start().starts_with('{') {
        parse_json_with_fallback(content)
    } else {
        parse_yaml_with_fallback(content)
    }
}

/// Parse JSON content with YAML fallback
fn parse_json_with_fallback(content: &str) -> Result<Value, Error> {
    match serde_json::from_str::<Value>(content) {
        Ok(value) => Ok(value),
        Err(json_err) => {
            debug!(target: "oaslint::spec", error = %json_err, "JSON parse failed, trying YAML");
            serde_yaml::from_str::<serde_yaml::Value>(content)
                .map(yaml_to_json)
                .map_err(|_| Error::Json(json_err))
        }
    }
}

/// Parse YAML content with JSON fallback
fn parse_yaml_with_fallback(content: &str) -> Result<Value, Error> {
    match serde_yaml::from_str::<serde_yaml::Value>(content) {
        Ok(value) => Ok(yaml_to_json(value)),
        Err(yaml_err) => {
            debug!(target: "oaslint::spec", error = %yaml_err, "YAML parse failed, trying JSON");
            serde_json::from_str::<Value>(content).map_err(|_| Error::Yaml(yaml_err))
        }
    }
}

/// Converts a YAML value into JSON, stringifying non-string mapping keys
/// (`200:` becomes `"200"`) and dropping tags.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                object.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number)
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
