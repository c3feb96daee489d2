//! Client-facing rendering of validation failures.
//!
//! [`classify`] sorts arbitrary errors: a [`FieldError`] becomes a `400`
//! [`ErrorResponse`], anything else is left to the caller as an internal
//! failure.

use std::error::Error;

use serde::Serialize;

use crate::error::{ErrorCode, FieldError};

/// HTTP status used for every validation failure.
pub const BAD_REQUEST: u16 = 400;

/// Serialisable error body.
///
/// # Examples
///
/// ```
/// use argvalid::{ErrorCode, ErrorResponse, FieldError};
///
/// let err = FieldError::new(ErrorCode::ArrayMinLength, "tags").with_detail("2");
/// let response = ErrorResponse::from(&err);
/// assert_eq!(response.status, 400);
/// assert_eq!(
///     serde_json::to_string(&response).unwrap(),
///     r#"{"status":400,"code":"array-min-length","field":"tags","message":"minimum array length not reached","detail":"2"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// HTTP status, always 400.
    pub status: u16,
    /// Machine-readable error code.
    pub code: ErrorCode,
    /// Name of the offending field.
    pub field: String,
    /// Human-readable summary of the code.
    pub message: String,
    /// Violated bound or pattern, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&FieldError> for ErrorResponse {
    fn from(err: &FieldError) -> Self {
        Self {
            status: BAD_REQUEST,
            code: err.code(),
            field: err.field().to_owned(),
            message: err.message().to_owned(),
            detail: err.detail().map(str::to_owned),
        }
    }
}

impl From<FieldError> for ErrorResponse {
    fn from(err: FieldError) -> Self {
        Self::from(&err)
    }
}

/// Translates `err` when it is a validation failure.
///
/// Returns `None` for every other error type; those signal a bug or an
/// infrastructure failure and must not be reported as a client error.
pub fn classify(err: &(dyn Error + 'static)) -> Option<ErrorResponse> {
    let field_error = err.downcast_ref::<FieldError>()?;
    tracing::debug!(
        field = field_error.field(),
        code = %field_error.code(),
        detail = field_error.detail(),
        "validation error translated"
    );
    Some(ErrorResponse::from(field_error))
}
