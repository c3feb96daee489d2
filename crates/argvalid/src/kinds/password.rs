//! Password fields.
//!
//! Admitted like strings, with character-class requirements on top of the
//! length checks.

use serde_json::Value;

use crate::error::{ErrorCode, FieldError, FieldName, FieldResult};
use crate::kinds::string::{admit_text, check_length};
use crate::lattice::{Field, State};

kind! {
    /// Secret text with strength requirements.
    PasswordKind("password") => String;
    /// Password field in lattice state `S`.
    PasswordField;
}

impl PasswordField {
    /// Root password field over a raw slot.
    pub fn new(raw: Option<&Value>, name: impl Into<FieldName>) -> FieldResult<Self> {
        Field::admit(raw, name, admit_text)
    }
}

impl<S: State> Field<PasswordKind, S> {
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

    /// Trims surrounding whitespace in place.
    pub fn trim(self) -> Self {
        self.rewrite(|s| *s = s.trim().to_owned())
    }

    /// Rejects the empty string.
    pub fn not_empty(self) -> FieldResult<Self> {
        self.min_length(1)
    }

    /// Requires an ASCII uppercase letter.
    pub fn uppercase(self) -> FieldResult<Self> {
        self.contains(ErrorCode::PasswordUppercaseRequired, |c| c.is_ascii_uppercase())
    }

    /// Requires an ASCII lowercase letter.
    pub fn lowercase(self) -> FieldResult<Self> {
        self.contains(ErrorCode::PasswordLowercaseRequired, |c| c.is_ascii_lowercase())
    }

    /// Requires an ASCII digit.
    pub fn digit(self) -> FieldResult<Self> {
        self.contains(ErrorCode::PasswordDigitRequired, |c| c.is_ascii_digit())
    }

    fn contains(self, code: ErrorCode, class: impl Fn(char) -> bool) -> FieldResult<Self> {
        self.ensure(|s, name| {
            if s.chars().any(class) {
                Ok(())
            } else {
                Err(FieldError::new(code, name.clone()))
            }
        })
    }
}
