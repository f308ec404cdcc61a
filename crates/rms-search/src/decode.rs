//! Decoding search endpoint payloads into typed records

use crate::error::SearchError;
use crate::types::{CustomerRecord, MenuItemRecord, OrderRecord, SearchResult, SearchType};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a response body for the given search type.
///
/// The body is either a bare JSON array of records or an object holding that
/// array under the type's envelope key (`customers`, `items`, `orders`) or
/// under `results`.
pub fn decode_results(search_type: SearchType, body: &[u8]) -> Result<Vec<SearchResult>, SearchError> {
    let value: Value = serde_json::from_slice(body)?;
    let records = unwrap_envelope(search_type, value)?;

    match search_type {
        SearchType::Customers => decode_as::<CustomerRecord>(records, SearchResult::Customer),
        SearchType::Menu => decode_as::<MenuItemRecord>(records, SearchResult::MenuItem),
        SearchType::Orders => decode_as::<OrderRecord>(records, SearchResult::Order),
    }
}

fn unwrap_envelope(search_type: SearchType, value: Value) -> Result<Value, SearchError> {
    match value {
        Value::Array(_) => Ok(value),
        Value::Object(mut map) => {
            let key = search_type.envelope_key();
            match map.remove(key).or_else(|| map.remove("results")) {
                Some(inner @ Value::Array(_)) => Ok(inner),
                Some(other) => Err(SearchError::UnexpectedPayload(format!(
                    "expected an array under '{key}', found {}",
                    kind_of(&other)
                ))),
                None => Err(SearchError::UnexpectedPayload(format!(
                    "object has neither '{key}' nor 'results'"
                ))),
            }
        }
        other => Err(SearchError::UnexpectedPayload(format!(
            "expected an array, found {}",
            kind_of(&other)
        ))),
    }
}

fn decode_as<T: DeserializeOwned>(
    records: Value,
    wrap: fn(T) -> SearchResult,
) -> Result<Vec<SearchResult>, SearchError> {
    let typed: Vec<T> = serde_json::from_value(records)?;
    Ok(typed.into_iter().map(wrap).collect())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
