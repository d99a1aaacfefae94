use serde_json::{Number, Value};
use crate::error::Error;

/// Interpret value as str
macro_rules! val_as_str {
    ($val:expr, $element:literal) => {
        $val
            .as_str()
            .ok_or($crate::error::Error::MalformedResponse(std::concat!("can't extract ", $element, " from LLM API response.")))?
    }
}

pub(crate) use val_as_str;

pub fn set_i64_param(payload: &mut Value, key: &str, val: Option<i64>) {
    if let Some(v) = val {
        payload[key] = Value::Number(Number::from(v));
    }
}

pub fn set_f64_param(payload: &mut Value, key: &str, val: Option<f64>) {
    if let Some(n) = val.and_then(Number::from_f64) {
        payload[key] = Value::Number(n);
    }
}

/// Message of a provider error value: a string, an object with `message`,
/// or a list of strings.
pub fn error_message(error: &Value) -> Option<String> {
    match error {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("message").and_then(Value::as_str).map(str::to_owned),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        },
        _ => None,
    }
}

/// Fail if the response is a provider error envelope.
/// An error value of unknown shape is reported as raw JSON.
pub fn check_for_error(response: &Value) -> Result<(), Error> {
    match response.get("error") {
        None | Some(Value::Null) => Ok(()),
        Some(error) => Err(Error::ProviderMessage(error_message(error).unwrap_or_else(|| error.to_string()))),
    }
}
