//! Reusable error definitions
//!
//! An [`ErrorDefinition`] is a catalog entry: a code, a classification and a
//! default message. It holds no per-failure state; each call to
//! [`ErrorDefinition::new`] stamps a fresh [`AppError`] whose stack is
//! captured at that call site.
//!
//! Definitions are usually declared as statics:
//!
//! ```rust
//! use faultline_core::define_errors;
//!
//! define_errors! {
//!     /// Requested user does not exist
//!     pub USER_NOT_FOUND = not_found("USER_NOT_FOUND", "user not found");
//!     pub DB_UNAVAILABLE = unavailable("DB_UNAVAILABLE", "database unavailable");
//! }
//!
//! let err = USER_NOT_FOUND.new();
//! assert!(USER_NOT_FOUND.is(&err));
//! assert_eq!(err.to_string(), "USER_NOT_FOUND: user not found");
//! ```

use crate::classification::Classification;
use crate::error::{AppError, Cause};
use serde_json::Value;
use std::borrow::Cow;

/// Immutable template producing [`AppError`] instances
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorDefinition {
    code: Cow<'static, str>,
    classification: Classification,
    message: Cow<'static, str>,
}

impl ErrorDefinition {
    /// Define an entry from static text, usable in `static` items
    pub const fn define(
        classification: Classification,
        code: &'static str,
        message: &'static str,
    ) -> Self {
        Self {
            code: Cow::Borrowed(code),
            classification,
            message: Cow::Borrowed(message),
        }
    }

    /// Define an entry from runtime text
    pub fn owned(
        classification: Classification,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: Cow::Owned(code.into()),
            classification,
            message: Cow::Owned(message.into()),
        }
    }

    pub const fn bad_request(code: &'static str, message: &'static str) -> Self {
        Self::define(Classification::BadRequest, code, message)
    }

    pub const fn unauthorized(code: &'static str, message: &'static str) -> Self {
        Self::define(Classification::Unauthorized, code, message)
    }

    pub const fn forbidden(code: &'static str, message: &'static str) -> Self {
        Self::define(Classification::Forbidden, code, message)
    }

    pub const fn not_found(code: &'static str, message: &'static str) -> Self {
        Self::define(Classification::NotFound, code, message)
    }

    pub const fn timeout(code: &'static str, message: &'static str) -> Self {
        Self::define(Classification::Timeout, code, message)
    }

    pub const fn internal(code: &'static str, message: &'static str) -> Self {
        Self::define(Classification::InternalError, code, message)
    }

    pub const fn not_implemented(code: &'static str, message: &'static str) -> Self {
        Self::define(Classification::NotImplemented, code, message)
    }

    pub const fn unavailable(code: &'static str, message: &'static str) -> Self {
        Self::define(Classification::Unavailable, code, message)
    }

    pub const fn unknown(code: &'static str, message: &'static str) -> Self {
        Self::define(Classification::Unknown, code, message)
    }

    /// Copy of this definition with a different default message
    pub fn with_default_message(&self, message: impl Into<String>) -> Self {
        Self {
            code: self.code.clone(),
            classification: self.classification,
            message: Cow::Owned(message.into()),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Default message used by [`ErrorDefinition::new`]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Stamp a new error with the default message
    #[allow(clippy::new_ret_no_self)]
    #[inline(never)]
    pub fn new(&self) -> AppError {
        AppError::build(
            self.classification,
            self.code.to_string(),
            self.message.to_string(),
            1,
        )
    }

    /// Stamp a new error with an overriding message
    #[inline(never)]
    pub fn new_with_message(&self, message: impl Into<String>) -> AppError {
        AppError::build(self.classification, self.code.to_string(), message.into(), 1)
    }

    /// Stamp a new error caused by `cause`
    #[inline(never)]
    pub fn with_cause(&self, cause: impl Into<Cause>) -> AppError {
        AppError::build(
            self.classification,
            self.code.to_string(),
            self.message.to_string(),
            1,
        )
        .with_cause(cause)
    }

    /// Stamp a new error carrying `input`
    #[inline(never)]
    pub fn with_input(&self, input: impl Into<Value>) -> AppError {
        AppError::build(
            self.classification,
            self.code.to_string(),
            self.message.to_string(),
            1,
        )
        .with_input(input)
    }

    /// Stamp a new error marked as a panic
    #[inline(never)]
    pub fn with_panic(&self) -> AppError {
        AppError::build(
            self.classification,
            self.code.to_string(),
            self.message.to_string(),
            1,
        )
        .with_panic()
    }

    /// Whether `err` itself was stamped from this definition (by code)
    pub fn is(&self, err: &AppError) -> bool {
        err.code() == self.code
    }

    /// Whether any link of `err`'s chain carries this definition's code
    pub fn in_chain(&self, err: &AppError) -> bool {
        err.is_code(&self.code)
    }
}

/// Declare [`ErrorDefinition`] statics.
///
/// Each entry names a per-classification constructor of `ErrorDefinition`.
#[macro_export]
macro_rules! define_errors {
    ($($(#[$meta:meta])* $vis:vis $name:ident = $kind:ident($code:expr, $message:expr);)*) => {
        $(
            $(#[$meta])*
            $vis static $name: $crate::ErrorDefinition =
                $crate::ErrorDefinition::$kind($code, $message);
        )*
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    define_errors! {
        USER_NOT_FOUND = not_found("USER_NOT_FOUND", "user not found");
    }

    #[inline(never)]
    fn find_user() -> AppError {
        USER_NOT_FOUND.new()
    }

    #[test]
    fn test_new_uses_defaults() {
        let err = USER_NOT_FOUND.new();
        assert_eq!(err.code(), "USER_NOT_FOUND");
        assert_eq!(err.message(), "user not found");
        assert_eq!(err.classification(), Classification::NotFound);
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_new_with_message_overrides() {
        let err = USER_NOT_FOUND.new_with_message("user 42 not found");
        assert_eq!(err.to_string(), "USER_NOT_FOUND: user 42 not found");
        assert_eq!(USER_NOT_FOUND.message(), "user not found");
    }

    #[test]
    fn test_stack_captured_at_new_call_site() {
        let err = find_user();
        let trace = err.stacktrace().expect("debug builds resolve symbols");
        assert_eq!(trace.caller().function, "find_user");
    }

    #[test]
    fn test_instances_are_independent() {
        let first = find_user();
        let second = USER_NOT_FOUND.new().with_input(1);

        assert!(first.input().is_none());
        assert_eq!(second.input(), Some(&Value::from(1)));
        assert_ne!(
            first.stacktrace().map(|t| t.caller().clone()),
            second.stacktrace().map(|t| t.caller().clone())
        );
    }

    #[test]
    fn test_is_compares_code_only() {
        let err = AppError::internal("USER_NOT_FOUND", "different message");
        assert!(USER_NOT_FOUND.is(&err));

        let wrapped = AppError::internal("WRAP", "w").with_cause(find_user());
        assert!(!USER_NOT_FOUND.is(&wrapped));
        assert!(USER_NOT_FOUND.in_chain(&wrapped));
    }

    #[test]
    fn test_stamping_shortcuts() {
        let err = USER_NOT_FOUND.with_cause("row missing");
        assert_eq!(err.cause().unwrap().message(), "row missing");

        let err = USER_NOT_FOUND.with_panic();
        assert!(err.is_panic());

        let err = USER_NOT_FOUND.with_input("id=7");
        assert_eq!(err.input(), Some(&Value::from("id=7")));
    }

    #[test]
    fn test_owned_and_redefined() {
        let def = ErrorDefinition::owned(Classification::Timeout, "SLOW", "too slow");
        assert_eq!(def.new().status_code(), Some(441));

        let redefined = USER_NOT_FOUND.with_default_message("no such account");
        assert_eq!(redefined.code(), "USER_NOT_FOUND");
        assert_eq!(redefined.new().message(), "no such account");
    }
}
