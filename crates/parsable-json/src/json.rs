//! Thin `serde_json` wrappers that route a single value through the adapter.

use serde_json::Value;

use crate::adapter::{Formatted, ParsableAdapter};
use crate::errors::Result;
use crate::parsable::Parsable;

/// Serialize to a JSON string scalar, or `null` for `None`.
pub fn to_string<T: Parsable>(value: Option<&T>) -> Result<String> {
    serde_json::to_string(&Formatted(value)).map_err(Into::into)
}

/// Deserialize a JSON document holding one string scalar or `null`.
/// Trailing non-whitespace input is an error.
pub fn from_str<T: Parsable>(json: &str) -> Result<Option<T>> {
    let mut de = serde_json::Deserializer::from_str(json);
    let value = ParsableAdapter::<T>::new().deserialize(&mut de)?;
    de.end()?;
    Ok(value)
}

pub fn to_value<T: Parsable>(value: Option<&T>) -> Result<Value> {
    serde_json::to_value(Formatted(value)).map_err(Into::into)
}

pub fn from_value<T: Parsable>(value: Value) -> Result<Option<T>> {
    ParsableAdapter::<T>::new()
        .deserialize(value)
        .map_err(Into::into)
}
