//! Object identifiers: 12 bytes written as 24 hexadecimal characters.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::coerce;
use crate::error::{ErrorCode, FieldError, FieldName, FieldResult};
use crate::lattice::Field;

/// A 12-byte database identifier.
///
/// Parsed from exactly 24 hex digits (either case) and displayed lower-case.
///
/// # Examples
///
/// ```
/// use argvalid::ObjectId;
///
/// let id: ObjectId = "507F1F77BCF86CD799439011".parse()?;
/// assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");
/// assert!("507f1f77".parse::<ObjectId>().is_err());
/// # Ok::<(), argvalid::InvalidObjectId>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Wraps raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    #[must_use]
    pub const fn bytes(&self) -> [u8; 12] {
        self.0
    }
}

/// Returned when a string is not 24 hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a 24-character hexadecimal object id")]
pub struct InvalidObjectId(pub String);

impl FromStr for ObjectId {
    type Err = InvalidObjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 12];
        // decode_to_slice also checks the length: 24 chars for 12 bytes
        hex::decode_to_slice(s, &mut bytes).map_err(|_| InvalidObjectId(s.to_owned()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ObjectId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

kind! {
    /// Identifier in the 24-hex-character format.
    ObjectIdKind("object-id") => ObjectId;
    /// Object id field in lattice state `S`.
    ObjectIdField;
}

/// Parses the string form of a scalar, `code` on failure.
pub(crate) fn admit_object_id(
    raw: &Value,
    name: &FieldName,
    code: ErrorCode,
) -> FieldResult<ObjectId> {
    coerce::to_text(raw)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| FieldError::new(code, name.clone()))
}

impl ObjectIdField {
    /// Root object id field over a raw slot.
    pub fn new(raw: Option<&Value>, name: impl Into<FieldName>) -> FieldResult<Self> {
        Field::admit(raw, name, |raw, name| {
            coerce::scalar(raw, name)?;
            admit_object_id(raw, name, ErrorCode::ObjectidRequired)
        })
    }
}
