//! Model options and the per-shape configuration.

use serde::Deserialize;
use serde_json::Value;

use crate::cast::CastTable;
use crate::declaration::PropDeclaration;
use crate::error::MapError;

/// Options recognised by a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ModelOptions {
    /// Reserved for default-value injection; has no effect on conversion.
    pub default_values: bool,
    /// Enables advisory diagnostics (missing properties, failed casts).
    pub warnings: bool,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            default_values: false,
            warnings: true,
        }
    }
}

impl ModelOptions {
    /// Merge a partial options object over the defaults.
    ///
    /// `null` yields the defaults; unknown keys are rejected.
    pub fn from_value(value: &Value) -> Result<Self, MapError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(Self::deserialize(value)?)
    }
}

/// Everything a model needs to convert: options, the ordered declarations
/// and the cast table. Immutable once built.
#[derive(Debug, Clone)]
pub struct ModelConfiguration {
    pub options: ModelOptions,
    pub declarations: Vec<(String, PropDeclaration)>,
    pub casts: CastTable,
}

impl ModelConfiguration {
    pub fn declaration(&self, key: &str) -> Option<&PropDeclaration> {
        self.declarations
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, d)| d)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(|(k, _)| k.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let o = ModelOptions::default();
        assert!(!o.default_values);
        assert!(o.warnings);
    }

    #[test]
    fn partial_options_merge_over_defaults() {
        let o = ModelOptions::from_value(&json!({"warnings": false})).unwrap();
        assert!(!o.warnings);
        assert!(!o.default_values);

        let o = ModelOptions::from_value(&json!({"defaultValues": true})).unwrap();
        assert!(o.default_values);
        assert!(o.warnings);

        assert_eq!(
            ModelOptions::from_value(&json!(null)).unwrap(),
            ModelOptions::default()
        );
    }

    #[test]
    fn unknown_options_are_rejected() {
        let err = ModelOptions::from_value(&json!({"strict": true})).unwrap_err();
        assert!(matches!(err, MapError::Json(_)));
    }
}
