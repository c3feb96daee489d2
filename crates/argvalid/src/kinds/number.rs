//! Number fields.

use serde_json::Value;

use crate::coerce;
use crate::error::{ErrorCode, FieldError, FieldName, FieldResult};
use crate::lattice::{Field, RequiredNotnull, State};

kind! {
    /// Finite double-precision number.
    NumberKind("number") => f64;
    /// Number field in lattice state `S`.
    NumberField;
}

/// Shared bound check used by scalar and per-item number constraints.
pub(crate) fn check_bounds(
    n: f64,
    min: Option<f64>,
    max: Option<f64>,
    name: &FieldName,
    (min_code, max_code): (ErrorCode, ErrorCode),
) -> FieldResult<()> {
    if let Some(min) = min.filter(|&min| n < min) {
        return Err(FieldError::new(min_code, name.clone()).with_detail(coerce::format_number(min)));
    }
    if let Some(max) = max.filter(|&max| n > max) {
        return Err(FieldError::new(max_code, name.clone()).with_detail(coerce::format_number(max)));
    }
    Ok(())
}

/// Numeric admission: arrays and objects are shape errors, everything else
/// must coerce to a finite number.
pub(crate) fn admit_number(raw: &Value, name: &FieldName) -> FieldResult<f64> {
    coerce::scalar(raw, name)?;
    coerce::to_number(raw).ok_or_else(|| FieldError::new(ErrorCode::NumberRequired, name.clone()))
}

impl NumberField {
    /// Root number field over a raw slot.
    ///
    /// Numeric strings (surrounding whitespace allowed) and booleans are
    /// coerced; blank strings and non-finite values fail with
    /// `number-required`.
    pub fn new(raw: Option<&Value>, name: impl Into<FieldName>) -> FieldResult<Self> {
        Field::admit(raw, name, admit_number)
    }
}

impl<S: State> Field<NumberKind, S> {
    /// Requires `value >= min`.
    pub fn min(self, min: f64) -> FieldResult<Self> {
        self.ensure(|n, name| {
            check_bounds(
                *n,
                Some(min),
                None,
                name,
                (ErrorCode::NumberMinValue, ErrorCode::NumberMaxValue),
            )
        })
    }

    /// Requires `value <= max`.
    pub fn max(self, max: f64) -> FieldResult<Self> {
        self.ensure(|n, name| {
            check_bounds(
                *n,
                None,
                Some(max),
                name,
                (ErrorCode::NumberMinValue, ErrorCode::NumberMaxValue),
            )
        })
    }

    /// Same as `min(0)`.
    pub fn positive(self) -> FieldResult<Self> {
        self.min(0.0)
    }

    /// Same as `max(0)`.
    pub fn negative(self) -> FieldResult<Self> {
        self.max(0.0)
    }

    /// Requires an integer a double holds exactly.
    pub fn integer(self) -> FieldResult<Self> {
        self.ensure(|n, name| {
            if coerce::is_safe_integer(*n) {
                Ok(())
            } else {
                Err(FieldError::new(ErrorCode::NumberNotInteger, name.clone()))
            }
        })
    }

    /// Shortcut for required, notnull, integer and positive: a list index
    /// or page number.
    pub fn index(self) -> FieldResult<Field<NumberKind, RequiredNotnull>> {
        self.settle()?.integer()?.positive()
    }
}
