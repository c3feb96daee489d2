//! Free-form string metadata.

use indexmap::IndexMap;
use serde_json::Value;

use crate::coerce;
use crate::error::{ErrorCode, FieldError, FieldName, FieldResult};
use crate::lattice::Field;

/// Metadata map: every value is a string or `null`.
pub type Metas = IndexMap<String, Option<String>>;

kind! {
    /// String-keyed map of optional strings.
    MetasKind("metas") => Metas;
    /// Metas field in lattice state `S`.
    MetasField;
}

fn admit_metas(raw: &Value, name: &FieldName) -> FieldResult<Metas> {
    let object = match raw {
        Value::Object(object) => object,
        Value::Array(_) => return Err(FieldError::new(ErrorCode::ArrayNotAllowed, name.clone())),
        _ => return Err(FieldError::new(ErrorCode::ObjectRequired, name.clone())),
    };
    Ok(object
        .iter()
        .map(|(key, value)| {
            let value = match value {
                scalar @ (Value::Null | Value::String(_) | Value::Number(_) | Value::Bool(_)) => {
                    coerce::to_text(scalar)
                }
                nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
            };
            (key.clone(), value)
        })
        .collect())
}

impl MetasField {
    /// Root metas field over a raw slot.
    ///
    /// Nested arrays and objects are kept as their compact JSON text.
    pub fn new(raw: Option<&Value>, name: impl Into<FieldName>) -> FieldResult<Self> {
        Field::admit(raw, name, admit_metas)
    }
}
