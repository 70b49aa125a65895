//! Rename-and-cast: copy a property under its other-side name, casting it to
//! the destination type.

use serde_json::Value;

use super::{expect_array, read, ConvertContext, Converted};
use crate::error::MapError;
use crate::scheme::{Direction, Scheme};
use crate::JsonObject;

pub(super) fn convert(
    source: &JsonObject,
    scheme: &Scheme,
    ctx: &ConvertContext<'_>,
    direction: Direction,
) -> Result<Converted, MapError> {
    let source_name = scheme.source_name(direction);
    let target_name = scheme.target_name(direction);
    ctx.check_property(source, source_name);

    let tag = scheme.target_type(direction).cast_tag().unwrap_or_default();
    let cast = ctx
        .config
        .casts
        .get(tag)
        .ok_or_else(|| MapError::UnknownCastType {
            field: target_name.to_string(),
            type_tag: tag.to_string(),
            available: ctx.config.casts.tags().collect::<Vec<_>>().join(", "),
        })?;

    let value = read(source, source_name);
    let value = if scheme.array_type {
        let items = expect_array(value, target_name)?;
        Value::Array(
            items
                .iter()
                .map(|item| ctx.cast(cast, item, target_name))
                .collect(),
        )
    } else {
        ctx.cast(cast, value, target_name)
    };

    Ok(Converted::Entry {
        key: target_name.to_string(),
        value,
    })
}
