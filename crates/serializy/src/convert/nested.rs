//! Nested-model delegation.

use serde_json::Value;

use super::{expect_array, read, ConvertContext, Converted};
use crate::error::MapError;
use crate::model::Model;
use crate::scheme::{Direction, Scheme};

pub(super) fn convert(
    source: &crate::JsonObject,
    scheme: &Scheme,
    ctx: &ConvertContext<'_>,
    direction: Direction,
) -> Result<Converted, MapError> {
    let source_name = scheme.source_name(direction);
    let target_name = scheme.target_name(direction);
    ctx.check_property(source, source_name);

    let model = scheme
        .target_type(direction)
        .model()
        .ok_or_else(|| MapError::NotAModel {
            field: target_name.to_string(),
        })?;

    let value = read(source, source_name);
    let value = if scheme.array_type {
        let items = expect_array(value, target_name)?;
        Value::Array(
            items
                .iter()
                .map(|item| delegate(model, item, ctx.warnings, direction))
                .collect::<Result<_, _>>()?,
        )
    } else {
        delegate(model, value, ctx.warnings, direction)?
    };

    Ok(Converted::Entry {
        key: target_name.to_string(),
        value,
    })
}

fn delegate(
    model: &Model,
    value: &Value,
    warnings: bool,
    direction: Direction,
) -> Result<Value, MapError> {
    let object = match direction {
        Direction::ToUsage => model.serialize_with(value, warnings)?.into_data(),
        Direction::ToOriginal => model.deserialize_with(value, warnings)?,
    };
    Ok(Value::Object(object))
}
