//! Scalar Coercer - turn edited text back into a value of the field's kind.
//!
//! The reference value decides how the text is read:
//!
//! | reference      | accepted text                              | result          |
//! |----------------|--------------------------------------------|-----------------|
//! | `null`         | empty, whitespace, `null` (any case)       | `null`          |
//! | `null`         | anything else                              | string, verbatim|
//! | number         | decimal literal, finite                    | number          |
//! | boolean        | `true` / `false` (any case)                | boolean         |
//! | string         | anything                                   | string, verbatim|
//! | object / array | any JSON document                          | parsed value    |
//! | none           | anything                                   | string, verbatim|

use serde_json::{Number, Value};

use crate::error::{EditError, EditResult};

pub const MUST_BE_NUMBER: &str = "must be a number";
pub const MUST_BE_BOOLEAN: &str = "must be true or false";
pub const INVALID_JSON: &str = "invalid JSON for object/array value";

/// Coerce `input` to the kind of `reference`.
///
/// `reference` is `None` when the original value is unknown; the text is then
/// kept as a string.
pub fn parse_input_to_type(input: &str, reference: Option<&Value>) -> EditResult<Value> {
    let trimmed = input.trim();
    match reference {
        Some(Value::Null) => {
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
                Ok(Value::Null)
            } else {
                Ok(Value::String(input.to_string()))
            }
        }
        Some(Value::Number(_)) => parse_number(trimmed)
            .map(Value::Number)
            .ok_or(EditError::InvalidValue(MUST_BE_NUMBER)),
        Some(Value::Bool(_)) => {
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(EditError::InvalidValue(MUST_BE_BOOLEAN))
            }
        }
        Some(Value::Object(_)) | Some(Value::Array(_)) => {
            serde_json::from_str(input).map_err(|_| EditError::InvalidValue(INVALID_JSON))
        }
        Some(Value::String(_)) | None => Ok(Value::String(input.to_string())),
    }
}

/// Integral text stays integral so `"5"` compares equal to `5`, not `5.0`.
fn parse_number(text: &str) -> Option<Number> {
    if let Ok(i) = text.parse::<i64>() {
        return Some(Number::from(i));
    }
    if let Ok(u) = text.parse::<u64>() {
        return Some(Number::from(u));
    }
    let f = text.parse::<f64>().ok().filter(|f| f.is_finite())?;
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        return Some(Number::from(f as i64));
    }
    Number::from_f64(f)
}

/// Text shown in an input box for `value`, the inverse of
/// [`parse_input_to_type`] for every kind.
pub fn format_value_for_input(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => {
            serde_json::to_string_pretty(value).unwrap_or_default()
        }
        Value::Bool(_) | Value::Number(_) => value.to_string(),
    }
}
