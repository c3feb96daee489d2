//! Entry point: field lookup in a request body or URL parameters.
//!
//! A [`Payload`] borrows the raw JSON of one request part and hands out
//! [`FieldInput`]s, each of which starts one validation chain in the root
//! lattice state.
//!
//! # Examples
//!
//! ```
//! use argvalid::prelude::*;
//! use serde_json::json;
//!
//! let body = json!({"email": " ada@example.com ", "age": "36"});
//! let payload = Payload::body(Some(&body))?;
//!
//! let email = payload.field("email").string()?.has_content()?;
//! let age = payload.field("age").number()?.required()?.notnull()?.min(18.0)?;
//! let nickname = payload.field("nickname").string()?.default(String::new());
//!
//! assert_eq!(email.value(), "ada@example.com");
//! assert_eq!(*age.value(), 36.0);
//! assert_eq!(nickname.value(), "");
//! # Ok::<(), FieldError>(())
//! ```

use std::fmt;

use serde_json::{Map, Value};

use crate::error::{ErrorCode, FieldError, FieldName, FieldResult};
use crate::kinds::{
    BooleanField, DateField, EnumArrayField, EnumField, KeyOfField, KeySet, MetasField,
    NumberArrayField, NumberField, ObjectArrayField, ObjectField, ObjectIdArrayField,
    ObjectIdField, PasswordField, StringArrayField, StringField,
};

/// Field name used for errors about the request body as a whole.
pub const BODY_FIELD: &str = "body";

/// Request part a field was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Source {
    /// Parsed request body.
    Body,
    /// Path and query parameters.
    Params,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::Body => "body",
            Source::Params => "params",
        })
    }
}

// ============================================================================
// PAYLOAD
// ============================================================================

/// Borrowed view over one request part.
#[derive(Debug, Clone, Copy)]
pub struct Payload<'a> {
    source: Source,
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Payload<'a> {
    /// Wraps a parsed request body.
    ///
    /// Fails with `body-undefined`, `body-null` or `body-array` (field
    /// `body`). A scalar body is accepted but every field lookup on it is
    /// absent.
    pub fn body(raw: Option<&'a Value>) -> FieldResult<Self> {
        let code = match raw {
            None => ErrorCode::BodyUndefined,
            Some(Value::Null) => ErrorCode::BodyNull,
            Some(Value::Array(_)) => ErrorCode::BodyArray,
            Some(value) => {
                return Ok(Self {
                    source: Source::Body,
                    fields: value.as_object(),
                });
            }
        };
        tracing::debug!(%code, "request body rejected");
        Err(FieldError::new(code, BODY_FIELD))
    }

    /// Wraps path or query parameters. Never fails.
    pub fn params(raw: &'a Value) -> Self {
        Self {
            source: Source::Params,
            fields: raw.as_object(),
        }
    }

    /// Request part this payload was built from.
    #[must_use]
    pub fn source(&self) -> Source {
        self.source
    }

    /// Raw value of `name`; `None` when the key is absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.fields.and_then(|fields| fields.get(name))
    }

    /// Starts a validation chain for `name`.
    pub fn field(&self, name: impl Into<FieldName>) -> FieldInput<'a> {
        let name = name.into();
        FieldInput::new(self.get(&name), name, self.source)
    }
}

// ============================================================================
// FIELD INPUT
// ============================================================================

/// One raw slot waiting for a kind.
///
/// Every method builds the root state of one kind and consumes the input.
#[derive(Debug, Clone)]
pub struct FieldInput<'a> {
    raw: Option<&'a Value>,
    name: FieldName,
    source: Source,
}

impl<'a> FieldInput<'a> {
    /// Builds an input by hand, e.g. inside a nested sub-validator.
    pub fn new(raw: Option<&'a Value>, name: impl Into<FieldName>, source: Source) -> Self {
        let name = name.into();
        tracing::trace!(field = %name, %source, present = raw.is_some(), "field requested");
        Self { raw, name, source }
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Request part the field comes from.
    #[must_use]
    pub fn source(&self) -> Source {
        self.source
    }

    /// Raw value, `None` when absent.
    #[must_use]
    pub fn raw(&self) -> Option<&'a Value> {
        self.raw
    }

    /// Free text, numbers and booleans printed as strings.
    pub fn string(self) -> FieldResult<StringField> {
        StringField::new(self.raw, self.name)
    }

    /// Secret text; coerced like a string.
    pub fn password(self) -> FieldResult<PasswordField> {
        PasswordField::new(self.raw, self.name)
    }

    /// Number, numeric strings parsed.
    pub fn number(self) -> FieldResult<NumberField> {
        NumberField::new(self.raw, self.name)
    }

    /// Boolean from `true`/`false`, `1`/`0` or their string forms.
    pub fn boolean(self) -> FieldResult<BooleanField> {
        BooleanField::new(self.raw, self.name)
    }

    /// Canonical UTC timestamp such as `2023-01-01T00:00:00.000Z`.
    pub fn date(self) -> FieldResult<DateField> {
        DateField::new(self.raw, self.name)
    }

    /// Value restricted to `allowed`.
    pub fn enumeration<A: AsRef<str>>(self, allowed: &[A]) -> FieldResult<EnumField> {
        EnumField::new(self.raw, self.name, allowed)
    }

    /// Value restricted to the keys of `reference`.
    pub fn key_of(self, reference: &(impl KeySet + ?Sized)) -> FieldResult<KeyOfField> {
        KeyOfField::new(self.raw, self.name, reference)
    }

    /// 24-hex-digit object identifier.
    pub fn object_id(self) -> FieldResult<ObjectIdField> {
        ObjectIdField::new(self.raw, self.name)
    }

    /// Array of strings.
    pub fn string_array(self) -> FieldResult<StringArrayField> {
        StringArrayField::new(self.raw, self.name)
    }

    /// Array of numbers.
    pub fn number_array(self) -> FieldResult<NumberArrayField> {
        NumberArrayField::new(self.raw, self.name)
    }

    /// Array of object identifiers.
    pub fn object_id_array(self) -> FieldResult<ObjectIdArrayField> {
        ObjectIdArrayField::new(self.raw, self.name)
    }

    /// Array whose items are restricted to `allowed`.
    pub fn enum_array<A: AsRef<str>>(self, allowed: &[A]) -> FieldResult<EnumArrayField> {
        EnumArrayField::new(self.raw, self.name, allowed)
    }

    /// Nested object built by `validate`.
    pub fn object<T>(
        self,
        validate: impl FnOnce(&Value) -> FieldResult<T>,
    ) -> FieldResult<ObjectField<T>> {
        ObjectField::new(self.raw, self.name, validate)
    }

    /// Array of nested objects, each built by `validate`.
    pub fn object_array<T>(
        self,
        validate: impl FnMut(&Value) -> FieldResult<T>,
    ) -> FieldResult<ObjectArrayField<T>> {
        ObjectArrayField::new(self.raw, self.name, validate)
    }

    /// String-keyed map of optional strings.
    pub fn metas(self) -> FieldResult<MetasField> {
        MetasField::new(self.raw, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Slot;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(None, ErrorCode::BodyUndefined)]
    #[case(Some(json!(null)), ErrorCode::BodyNull)]
    #[case(Some(json!([{"a": 1}])), ErrorCode::BodyArray)]
    fn body_must_be_an_object(#[case] raw: Option<Value>, #[case] expected: ErrorCode) {
        let err = Payload::body(raw.as_ref()).unwrap_err();
        assert_eq!(err.code(), expected);
        assert_eq!(err.field(), BODY_FIELD);
    }

    #[test]
    fn scalar_body_has_no_fields() {
        let raw = json!("text");
        let payload = Payload::body(Some(&raw)).unwrap();
        assert!(payload.get("anything").is_none());
        assert!(payload.field("a").string().unwrap().value().is_absent());
    }

    #[test]
    fn lookup_distinguishes_absent_and_null() {
        let raw = json!({"a": null});
        let payload = Payload::params(&raw);
        assert_eq!(payload.source(), Source::Params);
        assert!(payload.field("a").number().unwrap().value().is_null());
        assert!(payload.field("b").number().unwrap().value().is_absent());
    }

    #[test]
    fn field_input_exposes_its_parts() {
        let raw = json!({"id": "507f1f77bcf86cd799439011"});
        let input = Payload::body(Some(&raw)).unwrap().field("id");
        assert_eq!(input.name(), "id");
        assert_eq!(input.source(), Source::Body);
        assert!(input.raw().is_some());
        assert!(matches!(input.object_id().unwrap().value(), Slot::Present(_)));
    }

    #[test]
    fn source_display() {
        assert_eq!(Source::Body.to_string(), "body");
        assert_eq!(Source::Params.to_string(), "params");
    }
}
