//! Boolean fields.

use serde_json::Value;

use crate::coerce;
use crate::error::{ErrorCode, FieldError, FieldName, FieldResult};
use crate::lattice::Field;

kind! {
    /// `true` or `false`, also accepted as `1`/`0` and their string forms.
    BooleanKind("boolean") => bool;
    /// Boolean field in lattice state `S`.
    BooleanField;
}

fn admit_boolean(raw: &Value, name: &FieldName) -> FieldResult<bool> {
    coerce::scalar(raw, name)?;
    let parsed = match raw {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(1.0) => Some(true),
            Some(0.0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };
    parsed.ok_or_else(|| FieldError::new(ErrorCode::BooleanRequired, name.clone()))
}

impl BooleanField {
    /// Root boolean field over a raw slot.
    pub fn new(raw: Option<&Value>, name: impl Into<FieldName>) -> FieldResult<Self> {
        Field::admit(raw, name, admit_boolean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Slot;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!(false), false)]
    #[case(json!(1), true)]
    #[case(json!(0), false)]
    #[case(json!("true"), true)]
    #[case(json!("0"), false)]
    fn accepted_forms(#[case] raw: Value, #[case] expected: bool) {
        let field = BooleanField::new(Some(&raw), "b").unwrap();
        assert_eq!(field.value(), &Slot::Present(expected));
    }

    #[rstest]
    #[case(json!("yes"), ErrorCode::BooleanRequired)]
    #[case(json!(2), ErrorCode::BooleanRequired)]
    #[case(json!("TRUE"), ErrorCode::BooleanRequired)]
    #[case(json!([true]), ErrorCode::ArrayNotAllowed)]
    #[case(json!({}), ErrorCode::ObjectNotAllowed)]
    fn rejected_forms(#[case] raw: Value, #[case] expected: ErrorCode) {
        assert_eq!(BooleanField::new(Some(&raw), "b").unwrap_err().code(), expected);
    }

    #[test]
    fn default_fills_missing_value() {
        let flag = BooleanField::new(None, "b").unwrap().default(true);
        assert!(flag.into_value());
    }
}
