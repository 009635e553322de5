//! # dokapi_schema
//!
//! Declarative rule trees and the recursive schema walker used to validate
//! Dokapi configuration documents.
//!
//! A [`Schema`] is an ordered list of named [`FieldRule`]s. Each rule states
//! whether the field must be present, which [`ValueKind`] it must have, an
//! optional [`Check`] to run against the value, and whether the value nests
//! another schema (as an object or as an array of objects). The walker
//! descends a `serde_json::Value` along the rule tree and reports every
//! violation with the full [`KeyPath`] of the offending value.
//!
//! ## Example
//!
//! ```rust
//! use dokapi_schema::{validate, Check, FieldRule, Schema, ValueKind};
//! use serde_json::json;
//!
//! let entry = Schema::new()
//!     .field("name", FieldRule::required().of_type(ValueKind::String))
//!     .field("title", FieldRule::optional().check(Check::NonEmpty));
//!
//! let schema: Schema = Schema::new()
//!     .field("entries", FieldRule::required().array_of(entry));
//!
//! let data = json!({ "entries": [{ "name": "a" }, { "title": "b" }] });
//! let err = validate("doc", &data, &schema, &mut ()).unwrap_err();
//! assert_eq!(err.to_string(), "doc.entries[1].name: missing required field");
//! ```

pub mod check;
pub mod error;
pub mod kind;
pub mod path;
pub mod rule;
pub mod walker;

pub use check::{AnchoredPattern, Check, CheckFailure, CustomCheck};
pub use error::{SchemaError, SchemaResult, ValidationError, Violation, ViolationKind};
pub use kind::ValueKind;
pub use path::{KeyPath, Segment};
pub use rule::{FieldRule, Presence, Schema, Shape};
pub use walker::{validate, ValidationMode, Validator};
