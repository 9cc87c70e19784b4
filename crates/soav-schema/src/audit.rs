//! # Schema Audit
//!
//! Every bundled schema rejects unknown keys at every level of nesting. A
//! new property block added without `additionalProperties: false` would
//! silently accept typos, so the bundle is audited in tests.
//!
//! An object schema (`"type": "object"`) passes the audit when
//! `additionalProperties` is `false` or is itself a schema (an open map with
//! typed values, such as `env`).

use std::fmt;

use serde_json::Value;

/// An object schema that leaves `additionalProperties` open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalPropertiesFinding {
    /// JSON Pointer to the offending object schema.
    pub json_path: String,
    /// Current value of `additionalProperties`.
    pub current_value: String,
}

impl fmt::Display for AdditionalPropertiesFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/additionalProperties: {} (set to false)",
            self.json_path, self.current_value
        )
    }
}

/// Walk `schema` and report every object schema with open `additionalProperties`.
pub fn audit_additional_properties(schema: &Value) -> Vec<AdditionalPropertiesFinding> {
    let mut findings = Vec::new();
    walk(schema, "", &mut findings);
    findings
}

fn walk(schema: &Value, path: &str, findings: &mut Vec<AdditionalPropertiesFinding>) {
    let Some(obj) = schema.as_object() else {
        return;
    };

    // Conditional fragments (`if`/`then`) carry `properties` without a type
    // and are not object definitions of their own.
    if obj.get("type") == Some(&Value::String("object".to_string())) {
        match obj.get("additionalProperties") {
            Some(Value::Bool(false)) | Some(Value::Object(_)) => {}
            Some(other) => findings.push(AdditionalPropertiesFinding {
                json_path: path.to_string(),
                current_value: other.to_string(),
            }),
            None => findings.push(AdditionalPropertiesFinding {
                json_path: path.to_string(),
                current_value: "(absent, defaults to true)".to_string(),
            }),
        }
    }

    for keyword in ["properties", "patternProperties", "definitions"] {
        if let Some(Value::Object(children)) = obj.get(keyword) {
            for (name, child) in children {
                walk(child, &format!("{path}/{keyword}/{}", escape(name)), findings);
            }
        }
    }
    for keyword in ["items", "additionalProperties", "if", "then", "else", "not"] {
        if let Some(child) = obj.get(keyword) {
            walk(child, &format!("{path}/{keyword}"), findings);
        }
    }
    for keyword in ["anyOf", "oneOf", "allOf"] {
        if let Some(Value::Array(variants)) = obj.get(keyword) {
            for (i, variant) in variants.iter().enumerate() {
                walk(variant, &format!("{path}/{keyword}/{i}"), findings);
            }
        }
    }
}

/// JSON Pointer escaping (RFC 6901).
fn escape(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
