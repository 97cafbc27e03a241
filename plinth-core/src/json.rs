//! Compact JSON encoding with exact decimals, and null stripping.
//!
//! [`rust_decimal::Decimal`] values are encoded as their exact base-10 string
//! (`"12.50"`), never as a float approximation.

use miette::Diagnostic;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum JsonError {
    #[error("value is not JSON serializable: {0}")]
    #[diagnostic(code(plinth::json::unsupported))]
    Unsupported(#[source] serde_json::Error),

    #[error("malformed JSON document: {0}")]
    #[diagnostic(code(plinth::json::malformed))]
    Malformed(#[source] serde_json::Error),
}

/// Serialize a value to compact JSON text.
///
/// Fails without producing partial output when the value cannot be
/// represented, e.g. a map keyed by something other than strings.
pub fn json_dumps<T: Serialize + ?Sized>(value: &T) -> Result<String, JsonError> {
    serde_json::to_string(value).map_err(JsonError::Unsupported)
}

/// Parse JSON text into a document.
pub fn json_loads(text: &str) -> Result<Value, JsonError> {
    serde_json::from_str(text).map_err(JsonError::Malformed)
}

/// Recursively drop `null` array items and `null`-valued object entries.
pub fn exclude_none(document: Value) -> Value {
    match document {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|item| !item.is_null())
                .map(exclude_none)
                .collect(),
        ),
        Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| (key, exclude_none(value)))
                .collect(),
        ),
        scalar => scalar,
    }
}
