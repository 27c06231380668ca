//! Validation and normalization of a submitted artifact against its
//! declarative [`ArtifactSchema`].

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::FieldError;

use super::types::{ArtifactSchema, FieldSchema, FieldType};

/// Validate `value` against `schema`, returning a normalized copy (enum
/// fields case-folded to their canonical form) on success, or every
/// field-level failure found (not just the first) on error.
pub fn validate(
    schema: &ArtifactSchema,
    value: &Value,
) -> Result<Value, Vec<FieldError>> {
    let mut errors = Vec::new();
    let normalized = validate_object(schema.fields, value, "", &mut errors);
    if errors.is_empty() {
        Ok(normalized)
    } else {
        Err(errors)
    }
}

fn validate_object(
    fields: &[FieldSchema],
    value: &Value,
    path_prefix: &str,
    errors: &mut Vec<FieldError>,
) -> Value {
    let Some(obj) = value.as_object() else {
        errors.push(FieldError::new(
            path_prefix_or_root(path_prefix),
            "expected a JSON object",
        ));
        return Value::Object(Map::new());
    };

    let mut out = Map::new();
    for field in fields {
        let path = join_path(path_prefix, field.name);
        match obj.get(field.name) {
            Some(raw) => {
                if let Some(normalized) = validate_field(field, raw, &path, errors) {
                    out.insert(field.name.to_owned(), normalized);
                }
            }
            None if field.required => {
                errors.push(FieldError::new(path, "required field is missing"));
            }
            None => {}
        }
    }
    Value::Object(out)
}

fn validate_field(
    field: &FieldSchema,
    raw: &Value,
    path: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Value> {
    match &field.field_type {
        FieldType::Str => {
            let Some(s) = raw.as_str() else {
                errors.push(FieldError::new(path, "expected a string"));
                return None;
            };
            if let Some(min) = field.min_length
                && s.len() < min
            {
                errors.push(FieldError::new(
                    path,
                    format!("string shorter than minimum length {min}"),
                ));
            }
            if let Some(pattern) = field.pattern {
                match Regex::new(pattern) {
                    Ok(re) if !re.is_match(s) => {
                        errors.push(FieldError::new(
                            path,
                            format!("does not match required pattern {pattern}"),
                        ));
                    }
                    Err(e) => {
                        errors.push(FieldError::new(
                            path,
                            format!("internal schema error: invalid pattern {pattern}: {e}"),
                        ));
                    }
                    Ok(_) => {}
                }
            }
            Some(Value::String(s.to_owned()))
        }
        FieldType::Int => {
            if raw.as_i64().is_none() {
                errors.push(FieldError::new(path, "expected an integer"));
                return None;
            }
            Some(raw.clone())
        }
        FieldType::Bool => {
            if raw.as_bool().is_none() {
                errors.push(FieldError::new(path, "expected a boolean"));
                return None;
            }
            Some(raw.clone())
        }
        FieldType::Enum(allowed) => {
            let Some(s) = raw.as_str() else {
                errors.push(FieldError::new(path, "expected a string"));
                return None;
            };
            match allowed.iter().find(|candidate| candidate.eq_ignore_ascii_case(s)) {
                Some(canonical) => Some(Value::String((*canonical).to_owned())),
                None => {
                    errors.push(FieldError::new(
                        path,
                        format!("'{s}' is not one of {allowed:?}"),
                    ));
                    None
                }
            }
        }
        FieldType::ListOf(inner) => {
            let Some(items) = raw.as_array() else {
                errors.push(FieldError::new(path, "expected an array"));
                return None;
            };
            let mut normalized_items = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{i}]");
                let synthetic = FieldSchema::required("", (**inner).clone());
                if let Some(n) = validate_field(&synthetic, item, &item_path, errors) {
                    normalized_items.push(n);
                }
            }
            Some(Value::Array(normalized_items))
        }
        FieldType::MapOfStr => {
            let Some(obj) = raw.as_object() else {
                errors.push(FieldError::new(path, "expected an object of string values"));
                return None;
            };
            let mut out = Map::new();
            for (k, v) in obj {
                match v.as_str() {
                    Some(s) => {
                        out.insert(k.clone(), Value::String(s.to_owned()));
                    }
                    None => {
                        errors.push(FieldError::new(
                            join_path(path, k),
                            "expected a string value",
                        ));
                    }
                }
            }
            Some(Value::Object(out))
        }
        FieldType::Object(nested_fields) => Some(validate_object(nested_fields, raw, path, errors)),
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

fn path_prefix_or_root(prefix: &str) -> &str {
    if prefix.is_empty() { "<root>" } else { prefix }
}
