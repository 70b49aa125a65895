//! Structural validation of a bound scheme.

use super::{Scheme, SchemeType};
use crate::error::MapError;

/// Validate a scheme once it is bound to its usage key.
///
/// Only registration-time structure is checked here. Contract violations that
/// depend on the data (cast tags, array shapes, converter results) are raised
/// by the dispatcher while converting.
pub fn validate_scheme(scheme: &Scheme) -> Result<(), MapError> {
    let field = if scheme.to.name.is_empty() {
        scheme.from.name.clone()
    } else {
        scheme.to.name.clone()
    };
    let invalid = |reason| MapError::InvalidScheme {
        field: field.clone(),
        scheme_type: scheme.scheme_type,
        reason,
    };

    if scheme.to.name.is_empty() {
        return Err(invalid("usage name is empty"));
    }
    if scheme.read_only && scheme.write_only {
        return Err(invalid("a field cannot be both read-only and write-only"));
    }
    match scheme.scheme_type {
        SchemeType::RenameCast | SchemeType::NestedModel => {
            if scheme.from.name.is_empty() {
                return Err(invalid("original name is empty"));
            }
            if scheme.to.converter.is_some() {
                return Err(invalid("only custom fields take an original-side function"));
            }
        }
        SchemeType::CustomFunction => {
            if scheme.array_type {
                return Err(invalid("custom fields cannot be declared as arrays"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JsonObject;
    use serde_json::Value;
    use std::sync::Arc;

    fn bound(mut scheme: Scheme, key: &str) -> Scheme {
        scheme.to.name = key.to_string();
        scheme
    }

    #[test]
    fn accepts_bound_rename_cast() {
        let s = bound(Scheme::rename_cast("a", "any", "any"), "a");
        assert!(validate_scheme(&s).is_ok());
    }

    #[test]
    fn rejects_unbound_usage_name() {
        let s = Scheme::rename_cast("a", "any", "any");
        let err = validate_scheme(&s).unwrap_err();
        assert!(matches!(err, MapError::InvalidScheme { ref field, .. } if field == "a"));
    }

    #[test]
    fn rejects_empty_original_name() {
        let s = bound(Scheme::rename_cast("", "any", "any"), "a");
        assert!(matches!(
            validate_scheme(&s),
            Err(MapError::InvalidScheme {
                reason: "original name is empty",
                ..
            })
        ));
    }

    #[test]
    fn rejects_both_direction_flags() {
        let mut s = bound(Scheme::rename_cast("a", "any", "any"), "a");
        s.read_only = true;
        s.write_only = true;
        assert!(validate_scheme(&s).is_err());
    }

    #[test]
    fn rejects_original_function_on_rename_field() {
        let mut s = bound(Scheme::rename_cast("a", "any", "any"), "a");
        s.to.converter = Some(Arc::new(|_: &JsonObject, _: &JsonObject| Value::Null));
        let err = validate_scheme(&s).unwrap_err();
        assert!(matches!(
            err,
            MapError::InvalidScheme {
                scheme_type: SchemeType::RenameCast,
                ..
            }
        ));
        assert!(err.to_string().contains("RENAME_CAST"));
    }

    #[test]
    fn rejects_array_custom_field() {
        let mut s = bound(Scheme::custom(Arc::new(|_: &JsonObject| Value::Null)), "c");
        assert!(validate_scheme(&s).is_ok());
        s.array_type = true;
        assert!(validate_scheme(&s).is_err());
    }
}
