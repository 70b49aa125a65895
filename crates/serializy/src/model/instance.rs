use std::fmt;
use std::ops::Index;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Model;
use crate::convert::read;
use crate::error::MapError;
use crate::JsonObject;

/// A usage object bound to the model that produced it.
///
/// Field values may be changed freely; [`Instance::deserialize`] always
/// converts the current values.
#[derive(Clone)]
pub struct Instance {
    model: Model,
    data: JsonObject,
}

impl Instance {
    /// Same as `model.serialize(original)`.
    pub fn new(model: &Model, original: &Value) -> Result<Self, MapError> {
        model.serialize(original)
    }

    pub(crate) fn from_parts(model: Model, data: JsonObject) -> Self {
        Self { model, data }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.data.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    pub fn data(&self) -> &JsonObject {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut JsonObject {
        &mut self.data
    }

    pub fn into_data(self) -> JsonObject {
        self.data
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.data.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.data)
    }

    /// Convert the current field values back to the original shape.
    pub fn deserialize(&self) -> Result<JsonObject, MapError> {
        self.model.deserialize(self)
    }

    /// Deserialize into a typed original value.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, MapError> {
        Ok(serde_json::from_value(Value::Object(self.deserialize()?))?)
    }
}

/// Missing keys index as `null`.
impl Index<&str> for Instance {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        read(&self.data, key)
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.model.same_shape(&other.model) && self.data == other.data
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("model", &self.model.name())
            .field("data", &self.data)
            .finish()
    }
}
