//! Membership kinds: enumerated values and keys of a reference mapping.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;
use serde_json::Value;

use crate::coerce;
use crate::error::{ErrorCode, FieldError, FieldName, FieldResult};
use crate::lattice::Field;

kind! {
    /// String constrained to a caller-supplied list.
    EnumKind("enum") => String;
    /// Enumerated field in lattice state `S`.
    EnumField;
}

kind! {
    /// String constrained to the keys of a caller-supplied mapping.
    KeyOfKind("key-of") => String;
    /// Key-of field in lattice state `S`.
    KeyOfField;
}

/// A mapping whose keys can be checked for membership.
///
/// Implemented for the common string-keyed maps so a key-of field can
/// validate a foreign key against an in-memory lookup table.
pub trait KeySet {
    /// Returns `true` when `key` is one of the mapping's keys.
    fn contains_key(&self, key: &str) -> bool;
}

impl<V, H: BuildHasher> KeySet for HashMap<String, V, H> {
    fn contains_key(&self, key: &str) -> bool {
        Self::contains_key(self, key)
    }
}

impl<V> KeySet for BTreeMap<String, V> {
    fn contains_key(&self, key: &str) -> bool {
        Self::contains_key(self, key)
    }
}

impl<V, H: BuildHasher> KeySet for IndexMap<String, V, H> {
    fn contains_key(&self, key: &str) -> bool {
        Self::contains_key(self, key)
    }
}

impl KeySet for serde_json::Map<String, Value> {
    fn contains_key(&self, key: &str) -> bool {
        Self::contains_key(self, key)
    }
}

/// String form of a scalar, checked with `allowed`; `code` on a miss.
pub(crate) fn admit_member(
    raw: &Value,
    name: &FieldName,
    code: ErrorCode,
    allowed: impl FnOnce(&str) -> bool,
) -> FieldResult<String> {
    coerce::scalar(raw, name)?;
    match coerce::to_text(raw) {
        Some(key) if allowed(&key) => Ok(key),
        _ => Err(FieldError::new(code, name.clone())),
    }
}

impl EnumField {
    /// Root enumerated field; the value must be one of `allowed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use argvalid::prelude::*;
    /// use serde_json::json;
    ///
    /// let raw = json!("b");
    /// assert!(EnumField::new(Some(&raw), "f", &["a", "b"]).is_ok());
    ///
    /// let raw = json!("z");
    /// let err = EnumField::new(Some(&raw), "f", &["a", "b"]).unwrap_err();
    /// assert_eq!(err.code(), ErrorCode::InvalidKey);
    /// ```
    pub fn new<A: AsRef<str>>(
        raw: Option<&Value>,
        name: impl Into<FieldName>,
        allowed: &[A],
    ) -> FieldResult<Self> {
        Field::admit(raw, name, |raw, name| {
            admit_member(raw, name, ErrorCode::InvalidKey, |key| {
                allowed.iter().any(|a| a.as_ref() == key)
            })
        })
    }
}

impl KeyOfField {
    /// Root key-of field; the value must be a key of `reference`.
    pub fn new(
        raw: Option<&Value>,
        name: impl Into<FieldName>,
        reference: &(impl KeySet + ?Sized),
    ) -> FieldResult<Self> {
        Field::admit(raw, name, |raw, name| {
            admit_member(raw, name, ErrorCode::InvalidKey, |key| {
                reference.contains_key(key)
            })
        })
    }
}
