//! Error taxonomy for field validation.
//!
//! Every violation surfaces as exactly one [`FieldError`]. Its [`ErrorCode`]
//! comes from a closed, flat catalog; the human message is looked up from the
//! code, so two errors with the same code always read the same.
//!
//! Field names use `Cow<'static, str>`, which keeps the common case of
//! literal field names allocation-free.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Name of the input field a validator is bound to.
pub type FieldName = Cow<'static, str>;

/// Result alias used by every validation step.
pub type FieldResult<T> = Result<T, FieldError>;

// ============================================================================
// ERROR CODES
// ============================================================================

macro_rules! error_codes {
    ($( $(#[$meta:meta])* $variant:ident => $code:literal, $message:literal; )+) => {
        /// Closed catalog of validation failures.
        ///
        /// [`as_str`](Self::as_str) gives the stable machine-readable code,
        /// [`message`](Self::message) the canonical text shown to clients.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ErrorCode {
            $( $(#[$meta])* $variant, )+
        }

        impl ErrorCode {
            /// Every code in the catalog, in declaration order.
            pub const ALL: &'static [ErrorCode] = &[ $( ErrorCode::$variant, )+ ];

            /// Stable kebab-case code, e.g. `"null-not-allowed"`.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( ErrorCode::$variant => $code, )+
                }
            }

            /// Canonical human-readable message for this code.
            #[must_use]
            pub const fn message(self) -> &'static str {
                match self {
                    $( ErrorCode::$variant => $message, )+
                }
            }
        }

        impl FromStr for ErrorCode {
            type Err = UnknownErrorCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $code => Ok(ErrorCode::$variant), )+
                    other => Err(UnknownErrorCode(other.to_owned())),
                }
            }
        }
    };
}

error_codes! {
    // presence
    UndefinedNotAllowed => "undefined-not-allowed", "undefined not allowed";
    NullNotAllowed => "null-not-allowed", "null not allowed";

    // request body shape
    BodyUndefined => "body-undefined", "request body is undefined, object expected";
    BodyNull => "body-null", "request body is null, object expected";
    BodyArray => "body-array", "request body is an array, object expected";

    // value shape
    ArrayNotAllowed => "array-not-allowed", "array not allowed";
    ObjectNotAllowed => "object-not-allowed", "object not allowed";
    ArrayRequired => "array-required", "array required";
    ObjectRequired => "object-required", "object required";

    // scalar formats
    NumberRequired => "number-required", "number required";
    NumberNotInteger => "number-not-integer", "number must be an integer";
    NumberMinValue => "number-min-value", "minimum number value not reached";
    NumberMaxValue => "number-max-value", "maximum number value exceeded";
    BooleanRequired => "boolean-required", "boolean required";
    DateUtcRequired => "date-utc-required", "UTC ISO-8601 date required";
    DatePast => "date-past", "date must be in the past";
    DateFuture => "date-future", "date must be in the future";
    ObjectidRequired => "objectid-required", "valid object id required";
    InvalidKey => "invalid-key", "invalid key";
    EmailRequired => "email-required", "valid email required";
    PatternNotMatching => "pattern-not-matching", "pattern not matching";
    RppsRequired => "rpps-required", "valid RPPS number required";
    IbanRequired => "iban-required", "valid IBAN required";
    NirRequired => "nir-required", "valid social security number required";
    PhoneFrRequired => "phoneFR-required", "valid French phone number required";

    // password strength
    PasswordUppercaseRequired => "password-uppercase-required", "at least one uppercase letter required";
    PasswordLowercaseRequired => "password-lowercase-required", "at least one lowercase letter required";
    PasswordDigitRequired => "password-digit-required", "at least one digit required";

    // string length
    StringMinLength => "string-min-length", "minimum string length not reached";
    StringMaxLength => "string-max-length", "maximum string length exceeded";

    // array length
    ArrayMinLength => "array-min-length", "minimum array length not reached";
    ArrayMaxLength => "array-max-length", "maximum array length exceeded";
    ArrayNotEmpty => "array-not-empty", "empty array not allowed";

    // array items
    ItemArrayNotAllowed => "item-array-not-allowed", "array not allowed inside this array";
    ItemObjectNotAllowed => "item-object-not-allowed", "object not allowed inside this array";
    ItemNumberRequired => "item-number-required", "one element is not a number";
    ItemNumberNotInteger => "item-number-not-integer", "one element is not an integer";
    ItemNumberMinValue => "item-number-min-value", "one element is below the minimum value";
    ItemNumberMaxValue => "item-number-max-value", "one element exceeds the maximum value";
    ItemObjectidRequired => "item-objectid-required", "one element is not a valid object id";
    ItemInvalidKey => "item-invalid-key", "one element is not an allowed key";
    ItemEmailRequired => "item-email-required", "one element is not a valid email";
    ItemPatternNotMatching => "item-pattern-not-matching", "one element does not match the pattern";
    ItemStringMinLength => "item-string-min-length", "one element is shorter than the minimum length";
    ItemStringMaxLength => "item-string-max-length", "one element exceeds the maximum length";
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ErrorCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Returned by [`ErrorCode::from_str`] for codes outside the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code `{0}`")]
pub struct UnknownErrorCode(pub String);

// ============================================================================
// FIELD ERROR
// ============================================================================

/// A validation failure bound to the field that caused it.
///
/// Immutable once built; read it through the accessors.
///
/// # Examples
///
/// ```
/// use argvalid::{ErrorCode, FieldError};
///
/// let err = FieldError::new(ErrorCode::NumberMinValue, "age").with_detail("18");
/// assert_eq!(err.code(), ErrorCode::NumberMinValue);
/// assert_eq!(err.field(), "age");
/// assert_eq!(err.message(), "minimum number value not reached");
/// assert_eq!(err.detail(), Some("18"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error("[{field}] {code}: {message}")]
pub struct FieldError {
    code: ErrorCode,
    field: FieldName,
    message: Cow<'static, str>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    detail: Option<String>,
}

impl FieldError {
    /// Creates an error for `field`, taking the message from the catalog.
    pub fn new(code: ErrorCode, field: impl Into<FieldName>) -> Self {
        Self {
            code,
            field: field.into(),
            message: Cow::Borrowed(code.message()),
            detail: None,
        }
    }

    /// Attaches the violated bound, pattern or offending value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Machine-readable code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Name of the field that failed.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Catalog message for [`code`](Self::code).
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Bound or pattern that was violated, when the check has one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Lets an error raised by a nested sub-validator leave the enclosing
    /// object or object-array field.
    ///
    /// Code, field, message and detail are kept as raised; `outer` is only
    /// recorded in the trace log.
    pub(crate) fn crossing(self, outer: &str) -> Self {
        tracing::trace!(
            outer,
            field = %self.field,
            code = %self.code,
            "field error left nested validator"
        );
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn message_comes_from_catalog() {
        let err = FieldError::new(ErrorCode::NullNotAllowed, "name");
        assert_eq!(err.message(), "null not allowed");
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn codes_are_unique_and_round_trip() {
        let mut seen = HashSet::new();
        for code in ErrorCode::ALL {
            assert!(seen.insert(code.as_str()), "duplicate code {code}");
            assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = "not-a-code".parse::<ErrorCode>().unwrap_err();
        assert_eq!(err, UnknownErrorCode("not-a-code".into()));
    }

    #[test]
    fn display_includes_field_and_code() {
        let err = FieldError::new(ErrorCode::PhoneFrRequired, "phone");
        assert_eq!(
            err.to_string(),
            "[phone] phoneFR-required: valid French phone number required"
        );
    }

    #[test]
    fn static_field_name_is_borrowed() {
        let err = FieldError::new(ErrorCode::ArrayRequired, "tags");
        assert!(matches!(err.field, Cow::Borrowed(_)));
        assert!(matches!(err.message, Cow::Borrowed(_)));
    }

    #[test]
    fn crossing_keeps_every_part() {
        let inner = FieldError::new(ErrorCode::NumberRequired, "age").with_detail("abc");
        let outer = inner.clone().crossing("profile");
        assert_eq!(outer, inner);
    }
}
