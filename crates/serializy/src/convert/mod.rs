//! Conversion dispatcher.
//!
//! Each field's [`Scheme`] selects one algorithm per direction:
//!
//! | scheme type       | toward usage              | toward original              |
//! |-------------------|---------------------------|------------------------------|
//! | `RenameCast`      | read, cast, rename        | read, cast, rename           |
//! | `NestedModel`     | nested `serialize`        | nested `deserialize`         |
//! | `CustomFunction`  | `from` function → value   | `to` function → merged object|

mod custom;
mod nested;
mod rename_cast;

use serde_json::Value;

use crate::cast::{Cast, CastFn};
use crate::config::ModelConfiguration;
use crate::error::MapError;
use crate::scheme::{Direction, Scheme, SchemeType};
use crate::JsonObject;

static NULL: Value = Value::Null;

/// Result of converting one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Converted {
    /// Write `value` under `key`.
    Entry { key: String, value: Value },
    /// Shallow-merge the object into the result, overwriting existing keys.
    Merge(JsonObject),
    /// Leave the result untouched.
    Skip,
}

impl Converted {
    pub fn apply(self, result: &mut JsonObject) {
        match self {
            Self::Entry { key, value } => {
                result.insert(key, value);
            }
            Self::Merge(partial) => {
                for (key, value) in partial {
                    result.insert(key, value);
                }
            }
            Self::Skip => {}
        }
    }
}

/// State shared by every field conversion of one model call.
#[derive(Debug, Clone, Copy)]
pub struct ConvertContext<'a> {
    pub model: &'a str,
    pub config: &'a ModelConfiguration,
    /// Effective warnings gate: the model's option combined with every
    /// enclosing model's.
    pub warnings: bool,
}

impl<'a> ConvertContext<'a> {
    pub fn new(model: &'a str, config: &'a ModelConfiguration, outer_warnings: bool) -> Self {
        Self {
            model,
            config,
            warnings: outer_warnings && config.options.warnings,
        }
    }

    /// Advisory check: warn when `name` is absent from `source`.
    pub(crate) fn check_property(&self, source: &JsonObject, name: &str) {
        if self.warnings && !source.contains_key(name) {
            tracing::warn!(
                model = %self.model,
                field = %name,
                "property is not present in source model"
            );
        }
    }

    pub(crate) fn warn_not_object(&self, value: &Value) {
        if self.warnings {
            tracing::warn!(
                model = %self.model,
                value = %value,
                "source model is not an object, an empty object is used instead"
            );
        }
    }

    /// Run a cast, reporting its warning if any.
    pub(crate) fn cast(&self, cast: CastFn, value: &Value, field: &str) -> Value {
        let Cast { value, warning } = cast(value);
        if let (true, Some(warning)) = (self.warnings, warning) {
            tracing::warn!(model = %self.model, field = %field, "{warning}");
        }
        value
    }
}

/// Read a property, `null` when absent.
pub(crate) fn read<'s>(source: &'s JsonObject, name: &str) -> &'s Value {
    source.get(name).unwrap_or(&NULL)
}

/// Require an array for array-typed fields.
pub(crate) fn expect_array<'v>(value: &'v Value, field: &str) -> Result<&'v [Value], MapError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| MapError::ExpectedArray {
            field: field.to_string(),
        })
}

/// Convert one field of `source` toward usage.
pub fn to_usage(
    source: &JsonObject,
    scheme: &Scheme,
    ctx: &ConvertContext<'_>,
) -> Result<Converted, MapError> {
    if !scheme.converts(Direction::ToUsage) {
        return Ok(Converted::Skip);
    }
    match scheme.scheme_type {
        SchemeType::RenameCast => rename_cast::convert(source, scheme, ctx, Direction::ToUsage),
        SchemeType::NestedModel => nested::convert(source, scheme, ctx, Direction::ToUsage),
        SchemeType::CustomFunction => custom::to_usage(source, scheme),
    }
}

/// Convert one field of `source` toward original. `result` is the original
/// object built so far, handed to custom converters.
pub fn to_original(
    source: &JsonObject,
    scheme: &Scheme,
    ctx: &ConvertContext<'_>,
    result: &JsonObject,
) -> Result<Converted, MapError> {
    if !scheme.converts(Direction::ToOriginal) {
        return Ok(Converted::Skip);
    }
    match scheme.scheme_type {
        SchemeType::RenameCast => rename_cast::convert(source, scheme, ctx, Direction::ToOriginal),
        SchemeType::NestedModel => nested::convert(source, scheme, ctx, Direction::ToOriginal),
        SchemeType::CustomFunction => custom::to_original(source, scheme, result),
    }
}

/// Convert a whole object over every declaration of `ctx.config`.
///
/// Toward original, the original key of every property-reading field is
/// first seeded with `null` so the result keeps declaration order. Custom
/// fields and fields skipped in this direction are never seeded and never
/// remove keys. Custom converters run last, in declaration order, see the
/// complete result and merge what they return.
pub fn convert_model(
    source: &JsonObject,
    ctx: &ConvertContext<'_>,
    direction: Direction,
) -> Result<JsonObject, MapError> {
    let declarations = &ctx.config.declarations;
    let mut result = JsonObject::new();

    if direction == Direction::ToUsage {
        for (_, declaration) in declarations {
            to_usage(source, declaration.scheme(), ctx)?.apply(&mut result);
        }
        return Ok(result);
    }

    let (custom, plain): (Vec<&Scheme>, Vec<&Scheme>) = declarations
        .iter()
        .map(|(_, declaration)| declaration.scheme())
        .filter(|scheme| scheme.converts(Direction::ToOriginal))
        .partition(|scheme| scheme.scheme_type == SchemeType::CustomFunction);

    for scheme in &plain {
        result.insert(scheme.from.name.clone(), Value::Null);
    }
    for scheme in plain {
        to_original(source, scheme, ctx, &result)?.apply(&mut result);
    }
    for scheme in custom {
        to_original(source, scheme, ctx, &result)?.apply(&mut result);
    }
    Ok(result)
}
