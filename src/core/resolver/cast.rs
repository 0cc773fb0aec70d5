use super::ResolveError;
use crate::core::schema::ParamType;
use serde_json::{Number, Value};

/// Convert one raw submitted string to the declared parameter type.
pub fn cast_value(param: &str, param_type: &ParamType, raw: &str) -> Result<Value, ResolveError> {
    match param_type {
        ParamType::Boolean => Ok(Value::Bool(truthy(raw))),
        ParamType::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| type_cast(param, raw, "integer")),
        ParamType::Number => raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| type_cast(param, raw, "number")),
        ParamType::String | ParamType::Other(_) => Ok(Value::String(raw.to_string())),
    }
}

/// Any non-empty text is true, including "false" and "0"; only an empty
/// submission is false.
fn truthy(raw: &str) -> bool {
    !raw.is_empty()
}

fn type_cast(param: &str, raw: &str, expected: &'static str) -> ResolveError {
    ResolveError::TypeCast {
        param: param.to_string(),
        value: raw.to_string(),
        expected,
    }
}
