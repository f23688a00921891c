//! Constructor methods for AppError
//!
//! Every constructor that captures a stack is `#[inline(never)]` so the
//! frame skipping in [`AppError::build`] lands on the caller.

use super::types::{AppError, CODE_DELIMITER, GENERIC_CODE};
use crate::classification::Classification;
use crate::stack::Stacktrace;

impl AppError {
    /// Build a link and capture the stack `skip` frames above the caller
    /// of `build`.
    #[inline(never)]
    pub(crate) fn build(
        classification: Classification,
        code: String,
        message: String,
        skip: usize,
    ) -> Self {
        let mut err = Self::bare(classification, code, message);
        err.stacktrace = Stacktrace::capture(skip + 1);
        err
    }

    /// Build a link without capturing a stack
    pub(crate) fn bare(classification: Classification, code: String, message: String) -> Self {
        Self {
            code: if code.is_empty() {
                GENERIC_CODE.to_string()
            } else {
                code
            },
            message,
            classification,
            cause: None,
            stacktrace: None,
            input: None,
            panic: false,
        }
    }

    /// Create an unclassified error
    #[inline(never)]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::build(Classification::None, code.into(), message.into(), 1)
    }

    /// Create an error with an explicit classification
    #[inline(never)]
    pub fn with_type(
        classification: Classification,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::build(classification, code.into(), message.into(), 1)
    }

    /// Wrap any displayable error as an internal error, capturing the stack
    #[inline(never)]
    pub fn wrap(error: impl std::fmt::Display) -> Self {
        Self::build(
            Classification::InternalError,
            GENERIC_CODE.to_string(),
            error.to_string(),
            1,
        )
    }

    /// Lift foreign error text into a minimal internal error with no stack
    pub fn foreign(message: impl Into<String>) -> Self {
        Self::bare(
            Classification::InternalError,
            GENERIC_CODE.to_string(),
            message.into(),
        )
    }

    /// Parse `code: message` text back into an error of unknown
    /// classification. Text without a delimiter becomes both code and
    /// message.
    pub fn parse(text: &str) -> Self {
        match parse_error_message(text) {
            Some((code, message)) => {
                Self::bare(Classification::Unknown, code.to_string(), message.to_string())
            }
            None => Self::bare(Classification::Unknown, text.to_string(), text.to_string()),
        }
    }

    /// Create a bad request error
    #[inline(never)]
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::build(Classification::BadRequest, code.into(), message.into(), 1)
    }

    /// Create an unauthorized error
    #[inline(never)]
    pub fn unauthorized(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::build(Classification::Unauthorized, code.into(), message.into(), 1)
    }

    /// Create a forbidden error
    #[inline(never)]
    pub fn forbidden(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::build(Classification::Forbidden, code.into(), message.into(), 1)
    }

    /// Create a not found error
    #[inline(never)]
    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::build(Classification::NotFound, code.into(), message.into(), 1)
    }

    /// Create a timeout error
    #[inline(never)]
    pub fn timeout(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::build(Classification::Timeout, code.into(), message.into(), 1)
    }

    /// Create an internal error
    #[inline(never)]
    pub fn internal(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::build(Classification::InternalError, code.into(), message.into(), 1)
    }

    /// Create a not implemented error
    #[inline(never)]
    pub fn not_implemented(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::build(Classification::NotImplemented, code.into(), message.into(), 1)
    }

    /// Create an unavailable error
    #[inline(never)]
    pub fn unavailable(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::build(Classification::Unavailable, code.into(), message.into(), 1)
    }

    /// Create an error of unknown classification
    #[inline(never)]
    pub fn unknown(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::build(Classification::Unknown, code.into(), message.into(), 1)
    }
}

/// Split rendered error text on the first `": "` into (code, message)
pub fn parse_error_message(text: &str) -> Option<(&str, &str)> {
    text.split_once(CODE_DELIMITER)
}
