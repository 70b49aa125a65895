//! Conversion error type.

use thiserror::Error;

use crate::scheme::SchemeType;

/// Fatal conditions raised while declaring or converting a model.
///
/// Advisory conditions (missing properties, casts that could not coerce their
/// input) are never errors; they are reported as `tracing` warnings.
#[derive(Debug, Error)]
pub enum MapError {
    #[error(
        "type `{type_tag}` of property `{field}` is not available for type casting, \
         use one of [{available}]"
    )]
    UnknownCastType {
        field: String,
        type_tag: String,
        available: String,
    },
    #[error("property `{field}` is declared as an array field and should have type array")]
    ExpectedArray { field: String },
    #[error(
        "original-side converter of `{field}` should return an object, \
         because its return value is merged into the result"
    )]
    CustomResultNotObject { field: String },
    #[error("custom field `{field}` requires a usage-side function")]
    MissingConverter { field: String },
    #[error("declared model for `{field}` is not a model created via Model::builder()")]
    NotAModel { field: String },
    #[error("usage value for model `{model}` is not an object")]
    NotAnObject { model: String },
    #[error("instance of model `{found}` was never produced by serialize() of model `{expected}`")]
    ForeignInstance { expected: String, found: String },
    #[error("invalid {scheme_type} declaration of `{field}`: {reason}")]
    InvalidScheme {
        field: String,
        scheme_type: SchemeType,
        reason: &'static str,
    },
    #[error("model `{model}` declares usage key `{key}` more than once")]
    DuplicateField { model: String, key: String },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MapError {
    /// Name of the offending field, when the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnknownCastType { field, .. }
            | Self::ExpectedArray { field }
            | Self::CustomResultNotObject { field }
            | Self::MissingConverter { field }
            | Self::NotAModel { field }
            | Self::InvalidScheme { field, .. } => Some(field),
            Self::DuplicateField { key, .. } => Some(key),
            Self::NotAnObject { .. } | Self::ForeignInstance { .. } | Self::Json(_) => None,
        }
    }
}
