//! # argvalid
//!
//! Chainable runtime validation of untrusted request fields.
//!
//! ## Quick Start
//!
//! ```rust
//! use argvalid::prelude::*;
//! use serde_json::json;
//!
//! let body = json!({"iban": "FR14 2004 1010 0505 0001 3M02 606", "tags": ["a", null]});
//! let payload = Payload::body(Some(&body))?;
//!
//! let iban = payload.field("iban").string()?.required()?.notnull()?.iban()?;
//! let tags = payload.field("tags").string_array()?.default_empty_array();
//!
//! assert_eq!(iban.value(), "FR14 2004 1010 0505 0001 3M02 606");
//! assert_eq!(tags.value().len(), 1);
//! # Ok::<(), FieldError>(())
//! ```
//!
//! ## Lattice
//!
//! Every field starts in [`OptionalNullable`](lattice::OptionalNullable) and
//! narrows through `required()` / `notnull()` / `default(..)` until its value
//! type is exactly what the handler needs. See [`lattice`].
//!
//! ## Kinds
//!
//! - **Scalar**: [`StringField`](kinds::StringField), [`PasswordField`](kinds::PasswordField),
//!   [`NumberField`](kinds::NumberField), [`BooleanField`](kinds::BooleanField),
//!   [`DateField`](kinds::DateField), [`EnumField`](kinds::EnumField),
//!   [`KeyOfField`](kinds::KeyOfField), [`ObjectIdField`](kinds::ObjectIdField)
//! - **Collection**: [`StringArrayField`](kinds::StringArrayField),
//!   [`NumberArrayField`](kinds::NumberArrayField),
//!   [`ObjectIdArrayField`](kinds::ObjectIdArrayField), [`EnumArrayField`](kinds::EnumArrayField)
//! - **Composite**: [`ObjectField`](kinds::ObjectField),
//!   [`ObjectArrayField`](kinds::ObjectArrayField), [`MetasField`](kinds::MetasField)
//!
//! ## Errors
//!
//! Every failure is one [`FieldError`] with a code from [`ErrorCode`]. With
//! the `serde` feature (on by default), [`response::classify`] turns it into
//! a `400` body and leaves every other error type alone.

pub mod checksum;
mod coerce;
pub mod error;
pub mod kinds;
pub mod lattice;
pub mod payload;
pub mod prelude;
#[cfg(feature = "serde")]
pub mod response;

pub use error::{ErrorCode, FieldError, FieldName, FieldResult, UnknownErrorCode};
pub use kinds::{InvalidObjectId, Metas, ObjectId};
pub use lattice::{Field, Slot};
pub use payload::{FieldInput, Payload, Source};
#[cfg(feature = "serde")]
pub use response::{ErrorResponse, classify};
