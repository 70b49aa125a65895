//! Custom-function fields.

use serde_json::Value;

use super::Converted;
use crate::error::MapError;
use crate::scheme::Scheme;
use crate::JsonObject;

pub(super) fn to_usage(source: &JsonObject, scheme: &Scheme) -> Result<Converted, MapError> {
    let converter = scheme
        .from
        .converter
        .as_ref()
        .ok_or_else(|| MapError::MissingConverter {
            field: scheme.to.name.clone(),
        })?;
    Ok(Converted::Entry {
        key: scheme.to.name.clone(),
        value: converter(source),
    })
}

/// Without an original-side function the field writes nothing; otherwise the
/// function's object is merged into `result`.
pub(super) fn to_original(
    source: &JsonObject,
    scheme: &Scheme,
    result: &JsonObject,
) -> Result<Converted, MapError> {
    let Some(converter) = scheme.to.converter.as_ref() else {
        return Ok(Converted::Skip);
    };
    match converter(source, result) {
        Value::Object(partial) => Ok(Converted::Merge(partial)),
        _ => Err(MapError::CustomResultNotObject {
            field: scheme.to.name.clone(),
        }),
    }
}
