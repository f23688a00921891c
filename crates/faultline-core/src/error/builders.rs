//! Builder-style mutators for AppError
//!
//! All mutators take the error by value and hand it back, so a value is
//! never shared while it is still being built.

use super::types::{AppError, Cause, GENERIC_CODE};
use crate::classification::Classification;
use crate::stack::Stacktrace;
use serde_json::Value;

impl AppError {
    /// Link `cause` as the underlying error
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(Box::new(cause.into().into_error()));
        self
    }

    /// Link `cause` when present; `None` leaves the error untouched
    pub fn with_optional_cause<C: Into<Cause>>(self, cause: Option<C>) -> Self {
        match cause {
            Some(cause) => self.with_cause(cause),
            None => self,
        }
    }

    /// Attach diagnostic input to this link
    pub fn with_input(mut self, input: impl Into<Value>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Mark this link as originating from a panic
    pub fn with_panic(mut self) -> Self {
        self.panic = true;
        self
    }

    /// Replace the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Replace the code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.code = if code.is_empty() {
            GENERIC_CODE.to_string()
        } else {
            code
        };
        self
    }

    /// Replace the classification
    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self
    }

    /// Capture the stack at the caller of `with_caller`, replacing any
    /// earlier capture. Meant for links built without a stack, such as
    /// lifted foreign errors.
    #[inline(never)]
    pub fn with_caller(mut self) -> Self {
        self.stacktrace = Stacktrace::capture(1);
        self
    }

    /// Like [`AppError::with_caller`], skipping `skip` further frames
    #[inline(never)]
    pub fn with_caller_skip(mut self, skip: usize) -> Self {
        self.stacktrace = Stacktrace::capture(skip + 1);
        self
    }
}
