//! Nested objects.
//!
//! The shape of a nested value is described by a caller-supplied
//! sub-validator, usually a function that builds fields from the raw object
//! with [`Payload::params`](crate::Payload::params) and returns a typed
//! struct. A [`FieldError`] raised inside it leaves the enclosing field with
//! its code, field name, message and detail unchanged.

use std::marker::PhantomData;

use serde_json::Value;

use crate::coerce;
use crate::error::{ErrorCode, FieldError, FieldName, FieldResult};
use crate::lattice::{Field, Kind, ListKind};

/// Nested value of type `T`, built by a sub-validator.
pub struct ObjectKind<T>(PhantomData<fn() -> T>);

impl<T> Kind for ObjectKind<T> {
    type Value = T;
    const NAME: &'static str = "object";
}

/// Array of nested values of type `T`.
pub struct ObjectArrayKind<T>(PhantomData<fn() -> T>);

impl<T> Kind for ObjectArrayKind<T> {
    type Value = Vec<T>;
    const NAME: &'static str = "object-array";
}

impl<T> ListKind for ObjectArrayKind<T> {}

/// Nested object field in lattice state `S`.
pub type ObjectField<T, S = crate::lattice::OptionalNullable> = Field<ObjectKind<T>, S>;

/// Nested object array field in lattice state `S`.
pub type ObjectArrayField<T, S = crate::lattice::OptionalNullable> = Field<ObjectArrayKind<T>, S>;

impl<T> ObjectField<T> {
    /// Root nested object field.
    ///
    /// Arrays fail with `array-not-allowed`; anything else is handed to
    /// `validate`.
    ///
    /// # Examples
    ///
    /// ```
    /// use argvalid::prelude::*;
    /// use serde_json::{Value, json};
    ///
    /// fn zip(raw: &Value) -> FieldResult<String> {
    ///     let params = Payload::params(raw);
    ///     params.field("zip").string()?.required()?.notnull().map(Field::into_value)
    /// }
    ///
    /// let raw = json!({"zip": "75001"});
    /// let address = ObjectField::new(Some(&raw), "address", zip)?;
    /// assert_eq!(address.into_value().present().as_deref(), Some("75001"));
    ///
    /// let raw = json!({});
    /// let err = ObjectField::new(Some(&raw), "address", zip).unwrap_err();
    /// assert_eq!(err.field(), "zip");
    /// # Ok::<(), FieldError>(())
    /// ```
    pub fn new(
        raw: Option<&Value>,
        name: impl Into<FieldName>,
        validate: impl FnOnce(&Value) -> FieldResult<T>,
    ) -> FieldResult<Self> {
        Field::admit(raw, name, |raw, name| {
            if raw.is_array() {
                return Err(FieldError::new(ErrorCode::ArrayNotAllowed, name.clone()));
            }
            validate(raw).map_err(|err| err.crossing(name))
        })
    }
}

impl<T> ObjectArrayField<T> {
    /// Root nested object array field; `validate` runs on every non-null
    /// item, in order, until one fails.
    pub fn new(
        raw: Option<&Value>,
        name: impl Into<FieldName>,
        mut validate: impl FnMut(&Value) -> FieldResult<T>,
    ) -> FieldResult<Self> {
        Field::admit(raw, name, |raw, name| {
            coerce::items(raw, name, true, |item| {
                validate(item).map_err(|err| err.crossing(name))
            })
        })
    }
}
