//! Models: the configured conversion between an original shape and a usage
//! shape.
//!
//! A [`ModelBuilder`] collects declarations; [`ModelBuilder::build`] validates
//! them once and produces a [`Model`], a cheap shared handle. Serializing
//! through a model yields an [`Instance`] that remembers its model and can be
//! converted back at any time.

mod builder;
mod instance;

pub use builder::ModelBuilder;
pub use instance::Instance;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::config::{ModelConfiguration, ModelOptions};
use crate::convert::{convert_model, ConvertContext};
use crate::error::MapError;
use crate::scheme::Direction;
use crate::JsonObject;

/// Inner state of a model, shared by every handle and instance.
struct ModelInner {
    name: String,
    config: ModelConfiguration,
}

/// A configured model. Cloning shares the configuration.
#[derive(Clone)]
pub struct Model {
    inner: Arc<ModelInner>,
}

impl Model {
    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder::new(name)
    }

    pub(crate) fn from_configuration(name: String, config: ModelConfiguration) -> Self {
        Self {
            inner: Arc::new(ModelInner { name, config }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn configuration(&self) -> &ModelConfiguration {
        &self.inner.config
    }

    pub fn options(&self) -> &ModelOptions {
        &self.inner.config.options
    }

    /// Whether both handles refer to the same built model.
    pub fn same_shape(&self, other: &Model) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Convert an original object into a usage [`Instance`].
    ///
    /// A non-object input is reported and treated as `{}`.
    pub fn serialize(&self, original: &Value) -> Result<Instance, MapError> {
        self.serialize_with(original, true)
    }

    /// Serialize any `serde` value through its JSON form.
    pub fn serialize_from<T>(&self, original: &T) -> Result<Instance, MapError>
    where
        T: Serialize + ?Sized,
    {
        self.serialize(&serde_json::to_value(original)?)
    }

    /// Convert an instance produced by this model back to the original shape.
    pub fn deserialize(&self, instance: &Instance) -> Result<JsonObject, MapError> {
        if !self.same_shape(instance.model()) {
            return Err(MapError::ForeignInstance {
                expected: self.name().to_string(),
                found: instance.model().name().to_string(),
            });
        }
        self.to_original(instance.data(), true)
    }

    /// Convert a plain usage object back to the original shape.
    pub fn deserialize_value(&self, usage: &Value) -> Result<JsonObject, MapError> {
        self.deserialize_with(usage, true)
    }

    pub(crate) fn serialize_with(
        &self,
        original: &Value,
        outer_warnings: bool,
    ) -> Result<Instance, MapError> {
        let ctx = ConvertContext::new(self.name(), self.configuration(), outer_warnings);
        tracing::trace!(
            model = %self.name(),
            declarations = self.inner.config.declarations.len(),
            "serialize"
        );
        let empty = JsonObject::new();
        let source = match original {
            Value::Object(object) => object,
            other => {
                ctx.warn_not_object(other);
                &empty
            }
        };
        let data = convert_model(source, &ctx, Direction::ToUsage)?;
        Ok(Instance::from_parts(self.clone(), data))
    }

    pub(crate) fn deserialize_with(
        &self,
        usage: &Value,
        outer_warnings: bool,
    ) -> Result<JsonObject, MapError> {
        match usage {
            Value::Object(object) => self.to_original(object, outer_warnings),
            _ => Err(MapError::NotAnObject {
                model: self.name().to_string(),
            }),
        }
    }

    fn to_original(
        &self,
        usage: &JsonObject,
        outer_warnings: bool,
    ) -> Result<JsonObject, MapError> {
        let ctx = ConvertContext::new(self.name(), self.configuration(), outer_warnings);
        tracing::trace!(
            model = %self.name(),
            declarations = self.inner.config.declarations.len(),
            "deserialize"
        );
        convert_model(usage, &ctx, Direction::ToOriginal)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.inner.name)
            .field("fields", &self.inner.config.keys().collect::<Vec<_>>())
            .finish()
    }
}
