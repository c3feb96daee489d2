//! Admission helpers shared by the kind constructors.
//!
//! These turn a raw JSON value into the representation a kind works with:
//! shape checks, scalar-to-string and scalar-to-number coercion, and the
//! per-item walk used by every array kind.

use serde_json::Value;

use crate::error::{ErrorCode, FieldError, FieldName, FieldResult};

/// Largest integer an IEEE double holds exactly (`2^53 - 1`).
pub(crate) const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Rejects arrays and objects where a scalar is expected.
pub(crate) fn scalar(raw: &Value, name: &FieldName) -> FieldResult<()> {
    match raw {
        Value::Array(_) => Err(FieldError::new(ErrorCode::ArrayNotAllowed, name.clone())),
        Value::Object(_) => Err(FieldError::new(ErrorCode::ObjectNotAllowed, name.clone())),
        _ => Ok(()),
    }
}

/// String form of a scalar: strings verbatim, numbers and booleans printed.
pub(crate) fn to_text(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => i.to_string(),
            None => match n.as_u64() {
                Some(u) => u.to_string(),
                None => format_number(n.as_f64().unwrap_or(f64::NAN)),
            },
        }),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric form of a scalar.
///
/// Strings are trimmed and parsed; blank strings and non-finite results
/// are not numbers. Booleans count as `1` and `0`.
pub(crate) fn to_number(raw: &Value) -> Option<f64> {
    let n = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// Shortest text that parses back to `n`, without exponent notation.
/// Integral values print without a fractional part.
pub(crate) fn format_number(n: f64) -> String {
    n.to_string()
}

/// Returns `true` when `n` is an integer a double represents exactly.
pub(crate) fn is_safe_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER
}

/// Walks the items of an array field, failing on the first bad item.
///
/// Non-arrays fail with `array-required`. `null` items are dropped without
/// being validated or counted. Nested arrays always fail; objects fail unless
/// `objects` is set (object arrays hand them to their sub-validator).
pub(crate) fn items<T>(
    raw: &Value,
    name: &FieldName,
    objects: bool,
    mut admit: impl FnMut(&Value) -> FieldResult<T>,
) -> FieldResult<Vec<T>> {
    let Value::Array(values) = raw else {
        return Err(FieldError::new(ErrorCode::ArrayRequired, name.clone()));
    };
    let mut admitted = Vec::with_capacity(values.len());
    for value in values {
        match value {
            Value::Null => continue,
            Value::Array(_) => {
                return Err(FieldError::new(ErrorCode::ItemArrayNotAllowed, name.clone()));
            }
            Value::Object(_) if !objects => {
                return Err(FieldError::new(ErrorCode::ItemObjectNotAllowed, name.clone()));
            }
            _ => admitted.push(admit(value)?),
        }
    }
    Ok(admitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("abc"), Some("abc"))]
    #[case(json!(42), Some("42"))]
    #[case(json!(-7), Some("-7"))]
    #[case(json!(1.5), Some("1.5"))]
    #[case(json!(2.0), Some("2"))]
    #[case(json!(123_456_789_012_345_680_000.0), Some("123456789012345680000"))]
    #[case(json!(1e-7), Some("0.0000001"))]
    #[case(json!(-0.25), Some("-0.25"))]
    #[case(json!(true), Some("true"))]
    #[case(json!(null), None)]
    #[case(json!([1]), None)]
    #[case(json!({"a": 1}), None)]
    fn text_coercion(#[case] raw: Value, #[case] expected: Option<&str>) {
        assert_eq!(to_text(&raw).as_deref(), expected);
    }

    #[rstest]
    #[case(json!(42), Some(42.0))]
    #[case(json!("42"), Some(42.0))]
    #[case(json!(" 3.5 "), Some(3.5))]
    #[case(json!("-1e3"), Some(-1000.0))]
    #[case(json!(true), Some(1.0))]
    #[case(json!(false), Some(0.0))]
    #[case(json!("abc"), None)]
    #[case(json!(""), None)]
    #[case(json!("   "), None)]
    #[case(json!("NaN"), None)]
    #[case(json!("inf"), None)]
    #[case(json!([1]), None)]
    fn number_coercion(#[case] raw: Value, #[case] expected: Option<f64>) {
        assert_eq!(to_number(&raw), expected);
    }

    #[test]
    fn safe_integer_bounds() {
        assert!(is_safe_integer(0.0));
        assert!(is_safe_integer(-MAX_SAFE_INTEGER));
        assert!(is_safe_integer(MAX_SAFE_INTEGER));
        assert!(!is_safe_integer(MAX_SAFE_INTEGER + 1.0));
        assert!(!is_safe_integer(1.5));
    }

    #[test]
    fn scalar_rejects_containers() {
        let name: FieldName = "f".into();
        assert!(scalar(&json!("x"), &name).is_ok());
        assert_eq!(
            scalar(&json!([]), &name).unwrap_err().code(),
            ErrorCode::ArrayNotAllowed
        );
        assert_eq!(
            scalar(&json!({}), &name).unwrap_err().code(),
            ErrorCode::ObjectNotAllowed
        );
    }

    #[test]
    fn items_drop_nulls_and_stop_at_first_failure() {
        let name: FieldName = "f".into();
        let kept = items(&json!([1, null, 2]), &name, false, |v| Ok(v.clone())).unwrap();
        assert_eq!(kept, vec![json!(1), json!(2)]);

        let mut visited = 0;
        let err = items(&json!([1, [2], {}]), &name, false, |v| {
            visited += 1;
            Ok(v.clone())
        })
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemArrayNotAllowed);
        assert_eq!(visited, 1);
    }

    #[test]
    fn items_require_an_array() {
        let name: FieldName = "f".into();
        let err = items(&json!("x"), &name, false, |v| Ok(v.clone())).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ArrayRequired);
    }
}
