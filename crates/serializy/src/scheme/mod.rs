//! Per-field conversion rules.
//!
//! A [`Scheme`] pairs an original-side descriptor (`from`) with a usage-side
//! descriptor (`to`). The destination side's type governs a conversion:
//! toward usage the `to` type applies, toward original the `from` type.

mod validate;

pub use validate::validate_scheme;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::model::Model;
use crate::JsonObject;

/// Computes a usage value from the whole original object.
pub type ToUsageFn = Arc<dyn Fn(&JsonObject) -> Value + Send + Sync>;

/// Computes a partial original object from the usage object and the result
/// built so far. The returned value must be an object.
pub type ToOriginalFn = Arc<dyn Fn(&JsonObject, &JsonObject) -> Value + Send + Sync>;

/// Conversion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToUsage,
    ToOriginal,
}

/// Selects the conversion algorithm of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeType {
    RenameCast,
    NestedModel,
    CustomFunction,
}

impl SchemeType {
    pub fn name(self) -> &'static str {
        match self {
            Self::RenameCast => "RENAME_CAST",
            Self::NestedModel => "NESTED_MODEL",
            Self::CustomFunction => "CUSTOM_FUNCTION",
        }
    }
}

impl fmt::Display for SchemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type attached to one side of a scheme.
#[derive(Debug, Clone, Default)]
pub enum FieldType {
    /// Cast-table tag, resolved when the field is converted.
    Cast(String),
    /// Declared model the field delegates to.
    Model(Model),
    #[default]
    None,
}

impl FieldType {
    pub fn cast_tag(&self) -> Option<&str> {
        match self {
            Self::Cast(tag) => Some(tag.as_str()),
            _ => None,
        }
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            Self::Model(model) => Some(model),
            _ => None,
        }
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        Self::Cast(tag.to_string())
    }
}

impl From<&Model> for FieldType {
    fn from(model: &Model) -> Self {
        Self::Model(model.clone())
    }
}

/// One side of a scheme: property name, type and optional custom function.
#[derive(Clone)]
pub struct SchemeSide<F> {
    pub name: String,
    pub type_: FieldType,
    pub converter: Option<F>,
}

impl<F> SchemeSide<F> {
    pub fn new(name: impl Into<String>, type_: FieldType) -> Self {
        Self {
            name: name.into(),
            type_,
            converter: None,
        }
    }
}

impl<F> Default for SchemeSide<F> {
    fn default() -> Self {
        Self::new(String::new(), FieldType::None)
    }
}

impl<F> fmt::Debug for SchemeSide<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemeSide")
            .field("name", &self.name)
            .field("type_", &self.type_)
            .field("converter", &self.converter.is_some())
            .finish()
    }
}

/// Declarative conversion rule of one field.
#[derive(Debug, Clone)]
pub struct Scheme {
    pub scheme_type: SchemeType,
    /// The field holds a sequence of entries, each converted on its own.
    pub array_type: bool,
    pub from: SchemeSide<ToUsageFn>,
    pub to: SchemeSide<ToOriginalFn>,
    /// Converted toward usage only.
    pub read_only: bool,
    /// Converted toward original only.
    pub write_only: bool,
}

impl Scheme {
    fn with_sides(
        scheme_type: SchemeType,
        from: SchemeSide<ToUsageFn>,
        to: SchemeSide<ToOriginalFn>,
    ) -> Self {
        Self {
            scheme_type,
            array_type: false,
            from,
            to,
            read_only: false,
            write_only: false,
        }
    }

    /// Rename `original_name` and cast in both directions. The usage name is
    /// left empty until the scheme is bound to a declaration key.
    pub fn rename_cast(original_name: &str, usage_cast: &str, original_cast: &str) -> Self {
        Self::with_sides(
            SchemeType::RenameCast,
            SchemeSide::new(original_name, original_cast.into()),
            SchemeSide::new(String::new(), usage_cast.into()),
        )
    }

    pub fn nested_model(original_name: &str, model: &Model) -> Self {
        Self::with_sides(
            SchemeType::NestedModel,
            SchemeSide::new(original_name, model.into()),
            SchemeSide::new(String::new(), model.into()),
        )
    }

    pub fn custom(to_usage: ToUsageFn) -> Self {
        let from = SchemeSide {
            converter: Some(to_usage),
            ..SchemeSide::default()
        };
        Self::with_sides(SchemeType::CustomFunction, from, SchemeSide::default())
    }

    /// Whether the field takes part in conversions toward `direction`.
    pub fn converts(&self, direction: Direction) -> bool {
        match direction {
            Direction::ToUsage => !self.write_only,
            Direction::ToOriginal => !self.read_only,
        }
    }

    /// Property read from the source object in `direction`.
    pub fn source_name(&self, direction: Direction) -> &str {
        match direction {
            Direction::ToUsage => &self.from.name,
            Direction::ToOriginal => &self.to.name,
        }
    }

    /// Property written to the result object in `direction`.
    pub fn target_name(&self, direction: Direction) -> &str {
        match direction {
            Direction::ToUsage => &self.to.name,
            Direction::ToOriginal => &self.from.name,
        }
    }

    /// Type governing a conversion toward `direction`.
    pub fn target_type(&self, direction: Direction) -> &FieldType {
        match direction {
            Direction::ToUsage => &self.to.type_,
            Direction::ToOriginal => &self.from.type_,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_cast_puts_casts_on_their_destination_side() {
        let s = Scheme::rename_cast("full_name", "number", "string");
        assert_eq!(s.scheme_type, SchemeType::RenameCast);
        assert_eq!(s.target_type(Direction::ToUsage).cast_tag(), Some("number"));
        assert_eq!(
            s.target_type(Direction::ToOriginal).cast_tag(),
            Some("string")
        );
        assert_eq!(s.source_name(Direction::ToUsage), "full_name");
        assert_eq!(s.target_name(Direction::ToOriginal), "full_name");
    }

    #[test]
    fn one_directional_flags() {
        let mut s = Scheme::rename_cast("a", "any", "any");
        assert!(s.converts(Direction::ToUsage));
        assert!(s.converts(Direction::ToOriginal));
        s.read_only = true;
        assert!(s.converts(Direction::ToUsage));
        assert!(!s.converts(Direction::ToOriginal));
        s.read_only = false;
        s.write_only = true;
        assert!(!s.converts(Direction::ToUsage));
        assert!(s.converts(Direction::ToOriginal));
    }

    #[test]
    fn custom_scheme_holds_usage_function() {
        let s = Scheme::custom(Arc::new(|_o: &JsonObject| Value::Null));
        assert_eq!(s.scheme_type, SchemeType::CustomFunction);
        assert!(s.from.converter.is_some());
        assert!(s.to.converter.is_none());
        let debug = format!("{:?}", s.from);
        assert!(debug.contains("converter: true"));
    }

    #[test]
    fn scheme_type_display() {
        assert_eq!(SchemeType::NestedModel.to_string(), "NESTED_MODEL");
        assert_eq!(FieldType::from("string").cast_tag(), Some("string"));
        assert!(FieldType::None.model().is_none());
    }
}
