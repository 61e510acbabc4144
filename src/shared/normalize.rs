//! Declarative field defaults and the one routine that applies them.
//!
//! Every resource declares a [`FieldTable`]: which fields it reads and what
//! an absent value becomes. Raw server records go through [`normalize_record`]
//! before deserialization, so entities never carry "missing" fields.

use crate::error::GestinfoError;
use serde_json::{Map, Value};

/// What an absent (or unusable) field is replaced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// Absent or null becomes `""`. Numbers and booleans are rendered as text.
    Text,
    /// Absent becomes `null`. Present strings and numbers are kept as text.
    NullableText,
    /// Absent, null or non-numeric becomes `null`. Numeric strings are parsed.
    NullableId,
    /// Absent, null or non-numeric becomes `0`.
    Number,
    /// Nested client object, normalized with [`super::CLIENT_REF_DEFAULTS`].
    /// Anything that is not an object becomes `null`.
    ClientRef,
}

/// Field name → default, per resource.
pub type FieldTable = &'static [(&'static str, FieldDefault)];

/// Normalize one raw record against `table`.
///
/// The record must be a JSON object with a numeric (or numeric-string) `id`.
/// Fields not listed in the table are passed through untouched.
pub fn normalize_record(raw: Value, table: FieldTable) -> Result<Value, GestinfoError> {
    let mut map = match raw {
        Value::Object(map) => map,
        other => {
            return Err(GestinfoError::Validation(format!(
                "expected an object, got {}",
                kind(&other)
            )))
        }
    };

    let id = map
        .get("id")
        .and_then(as_id)
        .ok_or_else(|| GestinfoError::Validation("record without a numeric id".to_string()))?;
    map.insert("id".to_string(), Value::from(id));

    apply(&mut map, table);
    Ok(Value::Object(map))
}

/// Normalize a nested object against `table`, without requiring an id.
pub(crate) fn normalize_nested(raw: Value, table: FieldTable) -> Value {
    match raw {
        Value::Object(mut map) => {
            apply(&mut map, table);
            Value::Object(map)
        }
        _ => Value::Null,
    }
}

fn apply(map: &mut Map<String, Value>, table: FieldTable) {
    for (field, default) in table {
        let current = map.remove(*field).unwrap_or(Value::Null);
        map.insert((*field).to_string(), fill(current, *default));
    }
}

fn fill(value: Value, default: FieldDefault) -> Value {
    match default {
        FieldDefault::Text => Value::String(as_text(&value).unwrap_or_default()),
        FieldDefault::NullableText => as_text(&value).map(Value::String).unwrap_or(Value::Null),
        FieldDefault::NullableId => as_id(&value).map(Value::from).unwrap_or(Value::Null),
        FieldDefault::Number => Value::from(as_number(&value).unwrap_or(0.0)),
        FieldDefault::ClientRef => normalize_nested(value, super::CLIENT_REF_DEFAULTS),
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
