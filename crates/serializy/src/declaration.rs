//! Field declarations: the builder layer over [`Scheme`].
//!
//! ```
//! use serializy::{from, from_array, from_fn, Model};
//! use serde_json::{json, Value};
//!
//! let tag = Model::builder("Tag").field("label", from("name")).build().unwrap();
//! let post = Model::builder("Post")
//!     .field("id", from(("post_id", "number", "string")))
//!     .field("tags", from_array(("tag_list", &tag)))
//!     .field("title", from_fn(|o| o.get("raw_title").cloned().unwrap_or(Value::Null)))
//!     .build()
//!     .unwrap();
//!
//! let usage = post
//!     .serialize(&json!({"post_id": "7", "tag_list": [{"name": "rust"}], "raw_title": "Hi"}))
//!     .unwrap();
//! assert_eq!(usage.to_value(), json!({"id": 7, "tags": [{"label": "rust"}], "title": "Hi"}));
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::cast;
use crate::model::Model;
use crate::scheme::Scheme;
use crate::JsonObject;

/// A declared conversion field, wrapping its [`Scheme`].
///
/// The usage name is filled in when the declaration is added to a
/// [`ModelBuilder`](crate::ModelBuilder) under its key.
#[derive(Debug, Clone)]
pub struct PropDeclaration {
    scheme: Scheme,
}

impl PropDeclaration {
    pub fn new(scheme: Scheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn is_array(&self) -> bool {
        self.scheme.array_type
    }

    /// Attach the toward-original function of a custom field.
    ///
    /// The function receives the usage object and the original object built
    /// so far, and returns an object merged into the result. Only custom
    /// fields consult it.
    pub fn to<F>(mut self, converter: F) -> Self
    where
        F: Fn(&JsonObject, &JsonObject) -> Value + Send + Sync + 'static,
    {
        self.scheme.to.converter = Some(Arc::new(converter));
        self
    }

    /// Convert toward usage only.
    pub fn read_only(mut self) -> Self {
        self.scheme.read_only = true;
        self
    }

    /// Convert toward original only.
    pub fn write_only(mut self) -> Self {
        self.scheme.write_only = true;
        self
    }

    /// Custom fields keep an empty original name: their converters choose
    /// which original keys they write.
    pub(crate) fn bind(mut self, key: &str) -> Self {
        self.scheme.to.name = key.to_string();
        self
    }
}

/// Positional arguments accepted by [`from`] and [`from_array`].
///
/// - `"name"`: rename only
/// - `("name", usage_cast)`: rename and cast toward usage
/// - `("name", usage_cast, original_cast)`: cast both ways
/// - `("name", &model)`: delegate to a nested model
pub trait DeclarationArgs {
    fn into_scheme(self) -> Scheme;
}

impl DeclarationArgs for &str {
    fn into_scheme(self) -> Scheme {
        Scheme::rename_cast(self, cast::ANY, cast::ANY)
    }
}

impl DeclarationArgs for (&str, &str) {
    fn into_scheme(self) -> Scheme {
        Scheme::rename_cast(self.0, self.1, cast::ANY)
    }
}

impl DeclarationArgs for (&str, &str, &str) {
    fn into_scheme(self) -> Scheme {
        Scheme::rename_cast(self.0, self.1, self.2)
    }
}

impl DeclarationArgs for (&str, &Model) {
    fn into_scheme(self) -> Scheme {
        Scheme::nested_model(self.0, self.1)
    }
}

/// Declare a field read from a property of the original object.
pub fn from(args: impl DeclarationArgs) -> PropDeclaration {
    PropDeclaration::new(args.into_scheme())
}

/// Declare a field holding an array whose entries convert independently.
pub fn from_array(args: impl DeclarationArgs) -> PropDeclaration {
    let mut scheme = args.into_scheme();
    scheme.array_type = true;
    PropDeclaration::new(scheme)
}

/// Declare a field computed from the whole original object.
pub fn from_fn<F>(converter: F) -> PropDeclaration
where
    F: Fn(&JsonObject) -> Value + Send + Sync + 'static,
{
    PropDeclaration::new(Scheme::custom(Arc::new(converter)))
}
