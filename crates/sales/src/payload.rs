//! Typed decoding of the form payload (`{"items": [...]}`).

use serde::Deserialize;
use serde_json::{Map, Value};

use lineforge_core::{DomainError, DomainResult};

use crate::item::ItemRecord;

pub const ITEMS_KEY: &str = "items";

/// Decode the forest carried under `items`.
///
/// - `Ok(None)`: the payload has no `items` (or it is `null`).
/// - `Ok(Some(forest))`: a decoded, possibly empty, forest.
/// - `Err(MalformedInput)`: the payload is not an object, `items` is not an
///   array, or one of the items does not decode.
pub fn parse_items(payload: &Value) -> DomainResult<Option<Vec<ItemRecord>>> {
    let Value::Object(map) = payload else {
        return Err(DomainError::malformed(format!(
            "payload must be an object, got {}",
            json_kind(payload)
        )));
    };

    match map.get(ITEMS_KEY) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(raw)) => raw
            .iter()
            .enumerate()
            .map(|(i, value)| {
                ItemRecord::deserialize(value)
                    .map_err(|e| DomainError::malformed(format!("{ITEMS_KEY}[{i}]: {e}")))
            })
            .collect::<DomainResult<Vec<_>>>()
            .map(Some),
        Some(other) => Err(DomainError::malformed(format!(
            "{ITEMS_KEY} must be an array, got {}",
            json_kind(other)
        ))),
    }
}

/// Response payload carrying the reconciled forest under `items`.
pub fn items_response(items: &[ItemRecord]) -> Value {
    let mut map = Map::new();
    map.insert(
        ITEMS_KEY.to_string(),
        serde_json::to_value(items).unwrap_or(Value::Array(Vec::new())),
    );
    Value::Object(map)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
