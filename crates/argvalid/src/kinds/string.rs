//! String fields.
//!
//! Admission rejects arrays and objects, prints numbers and booleans, and
//! takes strings verbatim. Format checks (`email`, `rpps`, `iban`, `nir`,
//! `phone_fr`) never rewrite the held value.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::checksum;
use crate::coerce;
use crate::error::{ErrorCode, FieldError, FieldName, FieldResult};
use crate::lattice::{Field, RequiredNotnull, State};

kind! {
    /// Free-form text.
    StringKind("string") => String;
    /// String field in lattice state `S`.
    StringField;
}

pub(crate) static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$").unwrap());

static RPPS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{11}$").unwrap());

static IBAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Z0-9]{1,30}$").unwrap());

// sex, year, month (01-12 or INSEE fictitious 20-42 / 50-99), department,
// commune, order, key
static NIR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[12][0-9]{2}(0[1-9]|1[0-2]|[2-3][0-9]|4[0-2]|[5-9][0-9])([0-9]{2}|2[AB])[0-9]{3}[0-9]{3}(0[1-9]|[1-8][0-9]|9[0-7])$",
    )
    .unwrap()
});

static PHONE_FR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0|\+33|0033)[1-9][0-9]{8}$").unwrap());

/// Length in Unicode scalar values.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Shared `length(min, max)` check for string-like kinds.
pub(crate) fn check_length(
    s: &str,
    min: Option<usize>,
    max: Option<usize>,
    name: &FieldName,
    (min_code, max_code): (ErrorCode, ErrorCode),
) -> FieldResult<()> {
    let len = char_len(s);
    if let Some(min) = min.filter(|&min| len < min) {
        return Err(FieldError::new(min_code, name.clone()).with_detail(min.to_string()));
    }
    if let Some(max) = max.filter(|&max| len > max) {
        return Err(FieldError::new(max_code, name.clone()).with_detail(max.to_string()));
    }
    Ok(())
}

/// Removes whitespace and upper-cases, as the checksum predicates expect.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Text admission shared by string and password fields.
pub(crate) fn admit_text(raw: &Value, name: &FieldName) -> FieldResult<String> {
    coerce::scalar(raw, name)?;
    coerce::to_text(raw).ok_or_else(|| FieldError::new(ErrorCode::ObjectNotAllowed, name.clone()))
}

impl StringField {
    /// Root string field over a raw slot (`None` is an absent key).
    ///
    /// # Examples
    ///
    /// ```
    /// use argvalid::prelude::*;
    /// use serde_json::json;
    ///
    /// let raw = json!(" abcd ");
    /// let field = StringField::new(Some(&raw), "f")?.trim();
    /// assert_eq!(field.value(), &Slot::Present("abcd".to_owned()));
    /// # Ok::<(), FieldError>(())
    /// ```
    pub fn new(raw: Option<&Value>, name: impl Into<FieldName>) -> FieldResult<Self> {
        Field::admit(raw, name, admit_text)
    }
}

impl<S: State> Field<StringKind, S> {
    /// Inclusive length bounds; either side may be omitted.
    pub fn length(self, min: Option<usize>, max: Option<usize>) -> FieldResult<Self> {
        self.ensure(|s, name| {
            check_length(
                s,
                min,
                max,
                name,
                (ErrorCode::StringMinLength, ErrorCode::StringMaxLength),
            )
        })
    }

    /// Requires at least `min` characters.
    pub fn min_length(self, min: usize) -> FieldResult<Self> {
        self.length(Some(min), None)
    }

    /// Allows at most `max` characters.
    pub fn max_length(self, max: usize) -> FieldResult<Self> {
        self.length(None, Some(max))
    }

    /// Trims surrounding whitespace in place; the state is unchanged.
    pub fn trim(self) -> Self {
        self.rewrite(|s| {
            let trimmed = s.trim();
            if trimmed.len() != s.len() {
                *s = trimmed.to_owned();
            }
        })
    }

    /// Rejects the empty string as `string-min-length` with bound `1`.
    pub fn not_empty(self) -> FieldResult<Self> {
        self.min_length(1)
    }

    /// Requires `local@domain.tld`; the empty string is let through.
    pub fn email(self) -> FieldResult<Self> {
        self.ensure(|s, name| {
            if s.is_empty() || EMAIL_REGEX.is_match(s) {
                Ok(())
            } else {
                Err(FieldError::new(ErrorCode::EmailRequired, name.clone()))
            }
        })
    }

    /// Requires a match of `pattern`.
    pub fn pattern(self, pattern: &Regex) -> FieldResult<Self> {
        self.ensure(|s, name| {
            if pattern.is_match(s) {
                Ok(())
            } else {
                Err(FieldError::new(ErrorCode::PatternNotMatching, name.clone())
                    .with_detail(pattern.as_str()))
            }
        })
    }

    /// French health professional number: 11 digits with a Luhn check digit.
    pub fn rpps(self) -> FieldResult<Self> {
        self.ensure(|s, name| {
            if RPPS_REGEX.is_match(s) && checksum::luhn(s) {
                Ok(())
            } else {
                Err(FieldError::new(ErrorCode::RppsRequired, name.clone()))
            }
        })
    }

    /// International bank account number with a valid MOD 97-10 checksum.
    ///
    /// Spaces and case are ignored for the check.
    pub fn iban(self) -> FieldResult<Self> {
        self.ensure(|s, name| {
            let iban = normalize(s);
            if IBAN_REGEX.is_match(&iban) && checksum::iban(&iban) {
                Ok(())
            } else {
                Err(FieldError::new(ErrorCode::IbanRequired, name.clone()))
            }
        })
    }

    /// French social-security number (15 characters including the key).
    ///
    /// Spaces and case are ignored for the check.
    pub fn nir(self) -> FieldResult<Self> {
        self.ensure(|s, name| {
            let nir = normalize(s);
            if NIR_REGEX.is_match(&nir) && checksum::nir(&nir) {
                Ok(())
            } else {
                Err(FieldError::new(ErrorCode::NirRequired, name.clone()))
            }
        })
    }

    /// French phone number: `0` followed by 9 digits, or the same 9 digits
    /// after `+33` / `0033`. Spaces, dots and hyphens are ignored.
    pub fn phone_fr(self) -> FieldResult<Self> {
        self.ensure(|s, name| {
            let phone: String = s
                .chars()
                .filter(|c| !matches!(c, ' ' | '.' | '-'))
                .collect();
            if PHONE_FR_REGEX.is_match(&phone) {
                Ok(())
            } else {
                Err(FieldError::new(ErrorCode::PhoneFrRequired, name.clone()))
            }
        })
    }

    /// Shortcut for required, notnull, trim and email.
    pub fn has_content(self) -> FieldResult<Field<StringKind, RequiredNotnull>> {
        self.settle()?.trim().email()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Slot;
    use rstest::rstest;
    use serde_json::json;

    fn field(raw: Value) -> StringField {
        StringField::new(Some(&raw), "f").unwrap()
    }

    fn code<T>(result: FieldResult<T>) -> ErrorCode {
        match result {
            Ok(_) => panic!("expected a field error"),
            Err(err) => err.code(),
        }
    }

    #[rstest]
    #[case(json!("abc"), "abc")]
    #[case(json!(12), "12")]
    #[case(json!(false), "false")]
    #[case(json!(2.0), "2")]
    #[case(json!(1e-7), "0.0000001")]
    #[case(json!(123_456_789_012_345_680_000.0), "123456789012345680000")]
    fn admission_coerces_scalars(#[case] raw: Value, #[case] expected: &str) {
        assert_eq!(field(raw).value(), &Slot::Present(expected.to_owned()));
    }

    #[rstest]
    #[case(json!(["a"]), ErrorCode::ArrayNotAllowed)]
    #[case(json!({"a": 1}), ErrorCode::ObjectNotAllowed)]
    fn admission_rejects_containers(#[case] raw: Value, #[case] expected: ErrorCode) {
        assert_eq!(code(StringField::new(Some(&raw), "f")), expected);
    }

    #[test]
    fn trim_rewrites_in_place() {
        let trimmed = field(json!(" abcd ")).trim();
        assert_eq!(trimmed.value(), &Slot::Present("abcd".to_owned()));
        let absent = StringField::new(None, "f").unwrap().trim();
        assert!(absent.value().is_absent());
    }

    #[test]
    fn length_bounds_carry_detail() {
        let err = field(json!("abc")).length(Some(4), None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::StringMinLength);
        assert_eq!(err.detail(), Some("4"));
        let err = field(json!("abc")).length(None, Some(2)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::StringMaxLength);
        assert_eq!(err.detail(), Some("2"));
        assert!(field(json!("abc")).length(Some(3), Some(3)).is_ok());
        assert!(field(json!("éèà")).max_length(3).is_ok());
    }

    #[test]
    fn not_empty_reports_min_length_one() {
        let err = field(json!("")).not_empty().unwrap_err();
        assert_eq!(err.code(), ErrorCode::StringMinLength);
        assert_eq!(err.detail(), Some("1"));
    }

    #[rstest]
    #[case("user@example.com", true)]
    #[case("first.last-x@mail.example.fr", true)]
    #[case("", true)]
    #[case("user@example", false)]
    #[case("user@example.toolongtld", false)]
    #[case("user example@mail.com", false)]
    fn email_format(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(field(json!(input)).email().is_ok(), valid);
    }

    #[test]
    fn pattern_reports_the_regex() {
        let re = Regex::new(r"^\d{3}$").unwrap();
        assert!(field(json!("123")).pattern(&re).is_ok());
        let err = field(json!("12a")).pattern(&re).unwrap_err();
        assert_eq!(err.code(), ErrorCode::PatternNotMatching);
        assert_eq!(err.detail(), Some(r"^\d{3}$"));
    }

    #[rstest]
    #[case("10100000008", true)]
    #[case("10100000009", false)]
    #[case("4539148803436467", false)]
    #[case("1010000000a", false)]
    fn rpps_format(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(field(json!(input)).rpps().is_ok(), valid);
    }

    #[rstest]
    #[case("FR1420041010050500013M02606", true)]
    #[case("FR14 2004 1010 0505 0001 3M02 606", true)]
    #[case("fr1420041010050500013m02606", true)]
    #[case("FR1520041010050500013M02606", false)]
    #[case("1420041010050500013M02606", false)]
    fn iban_format(#[case] input: &str, #[case] valid: bool) {
        let result = field(json!(input)).iban();
        assert_eq!(result.is_ok(), valid);
        if let Ok(field) = result {
            assert_eq!(field.value(), &Slot::Present(input.to_owned()));
        }
    }

    #[rstest]
    #[case("185057800604830", true)]
    #[case("1 85 05 78 006 048 30", true)]
    #[case("185052a00604871", true)]
    #[case("185052B00604801", true)]
    #[case("385057800604830", false)]
    #[case("185137800604830", false)]
    #[case("185057800604831", false)]
    #[case("18505780060483", false)]
    fn nir_format(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(field(json!(input)).nir().is_ok(), valid);
    }

    #[rstest]
    #[case("0612345678", true)]
    #[case("06 12 34 56 78", true)]
    #[case("06.12.34.56.78", true)]
    #[case("+33612345678", true)]
    #[case("0033612345678", true)]
    #[case("0012345678", false)]
    #[case("061234567", false)]
    #[case("+3306123456789", false)]
    fn phone_fr_format(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(field(json!(input)).phone_fr().is_ok(), valid);
    }

    #[test]
    fn format_checks_skip_null() {
        let null = StringField::new(Some(&Value::Null), "f").unwrap();
        let null = null.email().unwrap().rpps().unwrap().iban().unwrap();
        let null = null.nir().unwrap().phone_fr().unwrap().not_empty().unwrap();
        assert!(null.value().is_null());
    }

    #[test]
    fn has_content_settles_and_trims() {
        let done = field(json!("  a@b.fr ")).has_content().unwrap();
        assert_eq!(done.into_value(), "a@b.fr");
        assert_eq!(
            code(StringField::new(None, "f").unwrap().has_content()),
            ErrorCode::UndefinedNotAllowed
        );
        assert_eq!(
            code(field(json!(null)).has_content()),
            ErrorCode::NullNotAllowed
        );
        assert_eq!(
            code(field(json!("not-an-email")).has_content()),
            ErrorCode::EmailRequired
        );
    }
}
