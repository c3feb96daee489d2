//! Array kinds.
//!
//! Admission walks the items in order with the matching scalar rule and
//! stops at the first bad item; `null` items are dropped. Array-length
//! constraints come from the list impl in [`lattice`](crate::lattice), the
//! per-item re-checks live here.

use regex::Regex;
use serde_json::Value;

use crate::coerce;
use crate::error::{ErrorCode, FieldError, FieldName, FieldResult};
use crate::kinds::choice::admit_member;
use crate::kinds::number::check_bounds;
use crate::kinds::object_id::{ObjectId, admit_object_id};
use crate::kinds::string::{EMAIL_REGEX, check_length};
use crate::lattice::{Field, ListKind, State};

kind! {
    /// Array of strings; numbers and booleans are printed.
    StringArrayKind("string-array") => Vec<String>;
    /// String array field in lattice state `S`.
    StringArrayField;
}

kind! {
    /// Array of finite numbers.
    NumberArrayKind("number-array") => Vec<f64>;
    /// Number array field in lattice state `S`.
    NumberArrayField;
}

kind! {
    /// Array of object ids.
    ObjectIdArrayKind("object-id-array") => Vec<ObjectId>;
    /// Object id array field in lattice state `S`.
    ObjectIdArrayField;
}

kind! {
    /// Array of values from a caller-supplied list.
    EnumArrayKind("enum-array") => Vec<String>;
    /// Enumerated array field in lattice state `S`.
    EnumArrayField;
}

impl ListKind for StringArrayKind {}
impl ListKind for NumberArrayKind {}
impl ListKind for ObjectIdArrayKind {}
impl ListKind for EnumArrayKind {}

// ============================================================================
// STRING ARRAY
// ============================================================================

impl StringArrayField {
    /// Root string array field over a raw slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use argvalid::prelude::*;
    /// use serde_json::json;
    ///
    /// let raw = json!(["a", null, 2]);
    /// let tags = StringArrayField::new(Some(&raw), "tags")?.default_empty_array();
    /// assert_eq!(tags.value(), &["a", "2"]);
    ///
    /// let raw = json!(["ok", 123, {}]);
    /// let err = StringArrayField::new(Some(&raw), "tags").unwrap_err();
    /// assert_eq!(err.code(), ErrorCode::ItemObjectNotAllowed);
    /// # Ok::<(), FieldError>(())
    /// ```
    pub fn new(raw: Option<&Value>, name: impl Into<FieldName>) -> FieldResult<Self> {
        Field::admit(raw, name, |raw, name| {
            coerce::items(raw, name, false, |item| {
                coerce::to_text(item)
                    .ok_or_else(|| FieldError::new(ErrorCode::ItemObjectNotAllowed, name.clone()))
            })
        })
    }
}

impl<S: State> Field<StringArrayKind, S> {
    fn each(self, check: impl Fn(&str, &FieldName) -> FieldResult<()>) -> FieldResult<Self> {
        self.ensure(|items, name| items.iter().try_for_each(|item| check(item, name)))
    }

    /// Requires every item to have at least `min` characters.
    pub fn min(self, min: usize) -> FieldResult<Self> {
        self.each(|item, name| {
            check_length(
                item,
                Some(min),
                None,
                name,
                (ErrorCode::ItemStringMinLength, ErrorCode::ItemStringMaxLength),
            )
        })
    }

    /// Allows every item at most `max` characters.
    pub fn max(self, max: usize) -> FieldResult<Self> {
        self.each(|item, name| {
            check_length(
                item,
                None,
                Some(max),
                name,
                (ErrorCode::ItemStringMinLength, ErrorCode::ItemStringMaxLength),
            )
        })
    }

    /// Rejects empty items.
    pub fn not_empty(self) -> FieldResult<Self> {
        self.min(1)
    }

    /// Requires every item to be an email address. Empty items fail too;
    /// run [`trim_array`](Self::trim_array) first to drop blanks.
    pub fn email(self) -> FieldResult<Self> {
        self.each(|item, name| {
            if EMAIL_REGEX.is_match(item) {
                Ok(())
            } else {
                Err(FieldError::new(ErrorCode::ItemEmailRequired, name.clone()))
            }
        })
    }

    /// Requires every item to match `pattern`.
    pub fn pattern(self, pattern: &Regex) -> FieldResult<Self> {
        self.each(|item, name| {
            if pattern.is_match(item) {
                Ok(())
            } else {
                Err(FieldError::new(ErrorCode::ItemPatternNotMatching, name.clone())
                    .with_detail(pattern.as_str()))
            }
        })
    }

    /// Trims every item in place.
    pub fn trim(self) -> Self {
        self.rewrite(|items| {
            for item in items.iter_mut() {
                *item = item.trim().to_owned();
            }
        })
    }

    /// Drops blank items in place.
    pub fn trim_array(self) -> Self {
        self.rewrite(|items| items.retain(|item| !item.trim().is_empty()))
    }
}

// ============================================================================
// NUMBER ARRAY
// ============================================================================

impl NumberArrayField {
    /// Root number array field; items are coerced like number fields.
    pub fn new(raw: Option<&Value>, name: impl Into<FieldName>) -> FieldResult<Self> {
        Field::admit(raw, name, |raw, name| {
            coerce::items(raw, name, false, |item| {
                coerce::to_number(item)
                    .ok_or_else(|| FieldError::new(ErrorCode::ItemNumberRequired, name.clone()))
            })
        })
    }
}

impl<S: State> Field<NumberArrayKind, S> {
    fn bounds(self, min: Option<f64>, max: Option<f64>) -> FieldResult<Self> {
        self.ensure(|items, name| {
            items.iter().try_for_each(|n| {
                check_bounds(
                    *n,
                    min,
                    max,
                    name,
                    (ErrorCode::ItemNumberMinValue, ErrorCode::ItemNumberMaxValue),
                )
            })
        })
    }

    /// Requires every item `>= min`.
    pub fn min(self, min: f64) -> FieldResult<Self> {
        self.bounds(Some(min), None)
    }

    /// Requires every item `<= max`.
    pub fn max(self, max: f64) -> FieldResult<Self> {
        self.bounds(None, Some(max))
    }

    /// Same as `min(0)`.
    pub fn positive(self) -> FieldResult<Self> {
        self.min(0.0)
    }

    /// Same as `max(0)`.
    pub fn negative(self) -> FieldResult<Self> {
        self.max(0.0)
    }

    /// Requires every item to be a safe integer.
    pub fn integer(self) -> FieldResult<Self> {
        self.ensure(|items, name| {
            if items.iter().all(|n| coerce::is_safe_integer(*n)) {
                Ok(())
            } else {
                Err(FieldError::new(ErrorCode::ItemNumberNotInteger, name.clone()))
            }
        })
    }
}

// ============================================================================
// OBJECT ID ARRAY / ENUM ARRAY
// ============================================================================

impl ObjectIdArrayField {
    /// Root object id array field.
    pub fn new(raw: Option<&Value>, name: impl Into<FieldName>) -> FieldResult<Self> {
        Field::admit(raw, name, |raw, name| {
            coerce::items(raw, name, false, |item| {
                admit_object_id(item, name, ErrorCode::ItemObjectidRequired)
            })
        })
    }
}

impl EnumArrayField {
    /// Root enumerated array field; every item must be one of `allowed`.
    pub fn new<A: AsRef<str>>(
        raw: Option<&Value>,
        name: impl Into<FieldName>,
        allowed: &[A],
    ) -> FieldResult<Self> {
        Field::admit(raw, name, |raw, name| {
            coerce::items(raw, name, false, |item| {
                admit_member(item, name, ErrorCode::ItemInvalidKey, |key| {
                    allowed.iter().any(|a| a.as_ref() == key)
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Slot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn strings(raw: Value) -> StringArrayField {
        StringArrayField::new(Some(&raw), "tags").unwrap()
    }

    fn numbers(raw: Value) -> NumberArrayField {
        NumberArrayField::new(Some(&raw), "scores").unwrap()
    }

    #[rstest]
    #[case(json!("a"), ErrorCode::ArrayRequired)]
    #[case(json!({"0": "a"}), ErrorCode::ArrayRequired)]
    #[case(json!(["a", ["b"]]), ErrorCode::ItemArrayNotAllowed)]
    #[case(json!(["ok", 123, {}]), ErrorCode::ItemObjectNotAllowed)]
    fn string_array_admission_failures(#[case] raw: Value, #[case] expected: ErrorCode) {
        let err = StringArrayField::new(Some(&raw), "tags").unwrap_err();
        assert_eq!(err.code(), expected);
        assert_eq!(err.field(), "tags");
    }

    #[test]
    fn string_items_are_coerced_and_nulls_dropped() {
        let field = strings(json!(["a", null, 1, true]));
        assert_eq!(
            field.into_value(),
            Slot::Present(vec!["a".into(), "1".into(), "true".into()])
        );
    }

    #[test]
    fn string_item_lengths() {
        let err = strings(json!(["abc", "a"])).min(2).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemStringMinLength);
        assert_eq!(err.detail(), Some("2"));
        let err = strings(json!(["abc"])).max(2).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemStringMaxLength);
        let err = strings(json!(["a", ""])).not_empty().unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemStringMinLength);
    }

    #[test]
    fn string_item_formats() {
        assert!(strings(json!(["a@b.fr", "c@d.com"])).email().is_ok());
        let err = strings(json!(["a@b.fr", "nope"])).email().unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemEmailRequired);
        let err = strings(json!(["a@b.fr", ""])).email().unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemEmailRequired);
        let cleaned = strings(json!(["a@b.fr", " "])).trim_array().email();
        assert!(cleaned.is_ok());

        let re = Regex::new("^[a-z]+$").unwrap();
        let err = strings(json!(["abc", "ABC"])).pattern(&re).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemPatternNotMatching);
        assert_eq!(err.detail(), Some("^[a-z]+$"));
    }

    #[test]
    fn trim_and_trim_array_keep_state() {
        let field = strings(json!([" a ", "  ", "b"])).trim();
        assert_eq!(
            field.value(),
            &Slot::Present(vec!["a".into(), String::new(), "b".into()])
        );
        let field = field.trim_array();
        assert_eq!(field.value(), &Slot::Present(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn number_items_are_coerced() {
        let field = numbers(json!([1, "2", null, " 3.5 "]));
        assert_eq!(field.into_value(), Slot::Present(vec![1.0, 2.0, 3.5]));
        let err = NumberArrayField::new(Some(&json!([1, "x"])), "scores").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemNumberRequired);
    }

    #[test]
    fn number_item_checks() {
        let err = numbers(json!([1, 5])).max(4.0).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemNumberMaxValue);
        assert_eq!(err.detail(), Some("4"));
        let err = numbers(json!([1, -5])).positive().unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemNumberMinValue);
        assert!(numbers(json!([-1, 0])).negative().is_ok());
        let err = numbers(json!([1, 1.5])).integer().unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemNumberNotInteger);
    }

    #[test]
    fn array_length_constraints_apply_to_every_array_kind() {
        let err = numbers(json!([1, 2, 3])).max_array_length(2).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ArrayMaxLength);
        let err = strings(json!([null])).not_empty_array().unwrap_err();
        assert_eq!(err.code(), ErrorCode::ArrayNotEmpty);
    }

    #[test]
    fn object_id_items() {
        let raw = json!(["507f1f77bcf86cd799439011", null]);
        let ids = ObjectIdArrayField::new(Some(&raw), "ids").unwrap();
        assert_eq!(ids.default_empty_array().into_value().len(), 1);

        let raw = json!(["507f1f77bcf86cd799439011", "nope"]);
        let err = ObjectIdArrayField::new(Some(&raw), "ids").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemObjectidRequired);
    }

    #[test]
    fn enum_items() {
        let raw = json!(["red", "blue"]);
        assert!(EnumArrayField::new(Some(&raw), "colors", &["red", "blue"]).is_ok());
        let raw = json!(["red", "green"]);
        let err = EnumArrayField::new(Some(&raw), "colors", &["red", "blue"]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemInvalidKey);
    }

    #[test]
    fn default_empty_array_replaces_null() {
        let field = StringArrayField::new(Some(&Value::Null), "tags")
            .unwrap()
            .default_empty_array();
        assert!(field.value().is_empty());
    }
}
