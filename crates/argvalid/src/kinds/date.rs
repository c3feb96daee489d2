//! Date fields.
//!
//! Only canonical UTC timestamps are admitted: the input must be exactly what
//! [`iso`] prints back for the parsed instant, e.g.
//! `2023-01-01T00:00:00.000Z`. Offsets, missing milliseconds and bare dates
//! are rejected so the stored instant is never ambiguous.

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use serde_json::Value;

use crate::coerce;
use crate::error::{ErrorCode, FieldError, FieldName, FieldResult};
use crate::lattice::{Field, RequiredNotnull, State};

kind! {
    /// Instant in UTC.
    DateKind("date") => DateTime<Utc>;
    /// Date field in lattice state `S`.
    DateField;
}

/// Canonical form: RFC 3339, millisecond precision, `Z` suffix.
#[must_use]
pub fn iso(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn admit_date(raw: &Value, name: &FieldName) -> FieldResult<DateTime<Utc>> {
    coerce::scalar(raw, name)?;
    let invalid = || FieldError::new(ErrorCode::DateUtcRequired, name.clone());
    let Value::String(s) = raw else {
        return Err(invalid());
    };
    let date = DateTime::parse_from_rfc3339(s)
        .map_err(|_| invalid())?
        .with_timezone(&Utc);
    // second 60 parses as a leap nanosecond, which is not a real instant
    if date.nanosecond() < 1_000_000_000 && iso(&date) == *s {
        Ok(date)
    } else {
        Err(invalid())
    }
}

impl DateField {
    /// Root date field over a raw slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use argvalid::prelude::*;
    /// use serde_json::json;
    ///
    /// let raw = json!("2023-01-01T00:00:00.000Z");
    /// let date = DateField::new(Some(&raw), "at")?.required()?.notnull()?;
    /// assert_eq!(date.value().timestamp(), 1_672_531_200);
    ///
    /// let raw = json!("2023-01-01");
    /// let err = DateField::new(Some(&raw), "at").unwrap_err();
    /// assert_eq!(err.code(), ErrorCode::DateUtcRequired);
    /// # Ok::<(), FieldError>(())
    /// ```
    pub fn new(raw: Option<&Value>, name: impl Into<FieldName>) -> FieldResult<Self> {
        Field::admit(raw, name, admit_date)
    }
}

impl<S: State> Field<DateKind, S> {
    /// Rejects instants later than now.
    pub fn past(self) -> FieldResult<Self> {
        let now = Utc::now();
        self.ensure(|date, name| {
            if *date > now {
                Err(FieldError::new(ErrorCode::DatePast, name.clone()).with_detail(iso(date)))
            } else {
                Ok(())
            }
        })
    }

    /// Rejects instants earlier than now.
    pub fn future(self) -> FieldResult<Self> {
        let now = Utc::now();
        self.ensure(|date, name| {
            if *date < now {
                Err(FieldError::new(ErrorCode::DateFuture, name.clone()).with_detail(iso(date)))
            } else {
                Ok(())
            }
        })
    }

    /// Collapses to the terminal state, substituting the current instant
    /// when the value is absent or null.
    pub fn default_now(self) -> Field<DateKind, RequiredNotnull> {
        self.default_with(Utc::now)
    }
}
