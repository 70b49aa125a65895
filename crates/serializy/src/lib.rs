//! Declarative, bidirectional mapping between an *original* JSON shape (as
//! received from an API) and a *usage* shape (as consumed by application
//! code).
//!
//! Each usage field is declared with [`from`], [`from_array`] or [`from_fn`]
//! on a [`ModelBuilder`]. A built [`Model`] serializes original objects into
//! usage [`Instance`]s and deserializes them back:
//!
//! ```
//! use serializy::{from, from_fn, Model};
//! use serde_json::{json, Value};
//!
//! let user = Model::builder("User")
//!     .field("age", from(("user_age", "number", "string")))
//!     .field(
//!         "fullName",
//!         from_fn(|o| {
//!             let first = o.get("first").and_then(Value::as_str).unwrap_or_default();
//!             let last = o.get("last").and_then(Value::as_str).unwrap_or_default();
//!             json!(format!("{first} {last}"))
//!         }),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let usage = user
//!     .serialize(&json!({"user_age": "36", "first": "Ada", "last": "Lovelace"}))
//!     .unwrap();
//! assert_eq!(usage["age"], json!(36));
//! assert_eq!(usage["fullName"], json!("Ada Lovelace"));
//!
//! let original = usage.deserialize().unwrap();
//! assert_eq!(Value::Object(original), json!({"user_age": "36"}));
//! ```
//!
//! Advisory diagnostics (missing properties, values a cast could not coerce)
//! are emitted as `tracing` warnings and never change the result. Contract
//! violations are returned as [`MapError`].

pub mod cast;
pub mod config;
pub mod convert;
pub mod declaration;
pub mod error;
pub mod model;
pub mod scheme;

/// A JSON object with insertion-ordered keys.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

pub use cast::{Cast, CastFn, CastTable};
pub use config::{ModelConfiguration, ModelOptions};
pub use convert::{ConvertContext, Converted};
pub use declaration::{from, from_array, from_fn, DeclarationArgs, PropDeclaration};
pub use error::MapError;
pub use model::{Instance, Model, ModelBuilder};
pub use scheme::{Direction, FieldType, Scheme, SchemeSide, SchemeType};
