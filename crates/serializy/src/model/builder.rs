use std::collections::HashSet;

use super::Model;
use crate::cast::CastTable;
use crate::config::{ModelConfiguration, ModelOptions};
use crate::declaration::PropDeclaration;
use crate::error::MapError;
use crate::scheme::validate_scheme;

/// Collects the options and declarations of a model.
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    name: String,
    options: ModelOptions,
    casts: CastTable,
    declarations: Vec<(String, PropDeclaration)>,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: ModelOptions::default(),
            casts: CastTable::standard(),
            declarations: Vec::new(),
        }
    }

    pub fn options(mut self, options: ModelOptions) -> Self {
        self.options = options;
        self
    }

    pub fn warnings(mut self, enabled: bool) -> Self {
        self.options.warnings = enabled;
        self
    }

    /// Replace the cast table, e.g. with [`CastTable::basic`].
    pub fn cast_table(mut self, casts: CastTable) -> Self {
        self.casts = casts;
        self
    }

    /// Declare the usage field `key`. Fields convert in declaration order.
    pub fn field(mut self, key: impl Into<String>, declaration: PropDeclaration) -> Self {
        let key = key.into();
        let declaration = declaration.bind(&key);
        self.declarations.push((key, declaration));
        self
    }

    /// Validate every declaration and freeze the configuration.
    pub fn build(self) -> Result<Model, MapError> {
        let mut seen = HashSet::new();
        for (key, declaration) in &self.declarations {
            if !seen.insert(key.as_str()) {
                return Err(MapError::DuplicateField {
                    model: self.name.clone(),
                    key: key.clone(),
                });
            }
            validate_scheme(declaration.scheme())?;
        }
        let config = ModelConfiguration {
            options: self.options,
            declarations: self.declarations,
            casts: self.casts,
        };
        Ok(Model::from_configuration(self.name, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{from, from_array, from_fn};
    use serde_json::{json, Value};

    #[test]
    fn build_keeps_declaration_order() {
        let model = ModelBuilder::new("M")
            .field("b", from("b"))
            .field("a", from("a"))
            .build()
            .unwrap();
        let keys: Vec<&str> = model.configuration().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert!(model.options().warnings);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = ModelBuilder::new("M")
            .field("a", from("x"))
            .field("a", from("y"))
            .build()
            .unwrap_err();
        assert!(matches!(err, MapError::DuplicateField { ref key, .. } if key == "a"));
    }

    #[test]
    fn invalid_declarations_are_rejected() {
        let err = ModelBuilder::new("M")
            .field("a", from("a").read_only().write_only())
            .build()
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidScheme { .. }));

        let err = ModelBuilder::new("M")
            .field("a", from(""))
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some("a"));

        let err = ModelBuilder::new("M")
            .field("a", from("a").to(|_, _| json!({"a": 1})))
            .build()
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidScheme { ref field, .. } if field == "a"));
    }

    #[test]
    fn options_and_casts_are_carried() {
        let options = ModelOptions::from_value(&json!({"warnings": false})).unwrap();
        let model = ModelBuilder::new("M")
            .options(options)
            .cast_table(CastTable::basic())
            .field("xs", from_array("xs"))
            .field("c", from_fn(|_| Value::Null))
            .build()
            .unwrap();
        assert!(!model.options().warnings);
        assert!(!model.configuration().casts.contains("float"));
        assert!(model.configuration().declaration("xs").unwrap().is_array());
    }
}
