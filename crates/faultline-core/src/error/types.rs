//! The error value and its cause variant

use crate::classification::Classification;
use crate::stack::Stacktrace;
use serde_json::Value;
use std::fmt;

/// Placeholder code for errors that carry no code of their own.
///
/// Errors lifted from foreign error types use it; `Display` renders such
/// errors as the bare message.
pub const GENERIC_CODE: &str = "GenericError";

/// Separator between code and message in rendered error text
pub const CODE_DELIMITER: &str = ": ";

/// Result type alias for operations failing with an [`AppError`]
pub type AppResult<T> = Result<T, AppError>;

/// Structured, classified, causally-chained error.
///
/// Each link owns its cause, so a chain is a finite singly linked list.
/// The stack is captured once, when the link is constructed.
///
/// `Clone`, `PartialEq`, `Debug` and `Drop` walk the chain in a loop, so
/// chain length is not limited by the thread's stack.
pub struct AppError {
    pub(crate) code: String,
    pub(crate) message: String,
    pub(crate) classification: Classification,
    pub(crate) cause: Option<Box<AppError>>,
    pub(crate) stacktrace: Option<Stacktrace>,
    pub(crate) input: Option<Value>,
    pub(crate) panic: bool,
}

/// Something an [`AppError`] can be caused by.
///
/// Foreign errors are carried as their rendered text and lifted into a
/// minimal `AppError` when linked, so every link in a chain has one shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Cause {
    Structured(AppError),
    Foreign(String),
}

impl Cause {
    /// Capture any displayable error as a foreign cause
    pub fn foreign(error: impl fmt::Display) -> Self {
        Self::Foreign(error.to_string())
    }

    /// Turn the cause into a chain link
    pub fn into_error(self) -> AppError {
        match self {
            Self::Structured(err) => err,
            Self::Foreign(message) => AppError::foreign(message),
        }
    }
}

impl AppError {
    /// Stable machine-readable code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Classification of this link
    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Transport status of this link's classification
    pub fn status_code(&self) -> Option<u16> {
        self.classification.status_code()
    }

    /// Stack captured when this link was built
    pub fn stacktrace(&self) -> Option<&Stacktrace> {
        self.stacktrace.as_ref()
    }

    /// Diagnostic input attached to this link only
    pub fn input(&self) -> Option<&Value> {
        self.input.as_ref()
    }

    /// Whether this link itself was marked as a panic.
    ///
    /// See [`AppError::is_panic`] for the whole-chain view.
    pub fn panic(&self) -> bool {
        self.panic
    }

    /// Whether the code is the generic placeholder
    pub fn has_generic_code(&self) -> bool {
        self.code.is_empty() || self.code == GENERIC_CODE
    }

    /// `function file:line` for each captured frame, oldest first
    pub fn stack_strings(&self) -> Vec<String> {
        self.stacktrace
            .as_ref()
            .map(Stacktrace::strings)
            .unwrap_or_default()
    }

    /// Copy of this link without its cause
    fn clone_link(&self) -> Self {
        Self {
            code: self.code.clone(),
            message: self.message.clone(),
            classification: self.classification,
            cause: None,
            stacktrace: self.stacktrace.clone(),
            input: self.input.clone(),
            panic: self.panic,
        }
    }

    /// Field equality of this link alone
    fn link_eq(&self, other: &Self) -> bool {
        self.code == other.code
            && self.message == other.message
            && self.classification == other.classification
            && self.panic == other.panic
            && self.input == other.input
            && self.stacktrace == other.stacktrace
    }

    fn write_verbose(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, link) in self.chain().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{}", link)?;
            if let Some(trace) = &link.stacktrace {
                for frame in trace {
                    write!(f, "\n{}\t{}:{}", frame.function, frame.file_path, frame.line)?;
                }
            }
        }
        Ok(())
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        let causes: Vec<&AppError> = self.chain().skip(1).collect();
        let mut cause: Option<Box<AppError>> = None;
        for link in causes.into_iter().rev() {
            let mut copy = link.clone_link();
            copy.cause = cause;
            cause = Some(Box::new(copy));
        }
        let mut head = self.clone_link();
        head.cause = cause;
        head
    }
}

impl PartialEq for AppError {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.chain();
        let mut right = other.chain();
        loop {
            match (left.next(), right.next()) {
                (Some(a), Some(b)) if a.link_eq(b) => continue,
                (None, None) => return true,
                _ => return false,
            }
        }
    }
}

impl Drop for AppError {
    fn drop(&mut self) {
        let mut next = self.cause.take();
        while let Some(mut link) = next {
            next = link.cause.take();
        }
    }
}

/// One link rendered for `Debug`, cause omitted
struct LinkDebug<'a>(&'a AppError);

impl fmt::Debug for LinkDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let link = self.0;
        f.debug_struct("AppError")
            .field("code", &link.code)
            .field("message", &link.message)
            .field("classification", &link.classification)
            .field("panic", &link.panic)
            .field("input", &link.input)
            .field("stacktrace", &link.stacktrace)
            .finish()
    }
}

impl fmt::Debug for AppError {
    /// The chain as a list of links, outermost first
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.chain().map(LinkDebug)).finish()
    }
}

impl fmt::Display for AppError {
    /// `code: message`, or the bare message for generic codes.
    ///
    /// The alternate form (`{:#}`) renders the whole chain with stacks.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return self.write_verbose(f);
        }
        if self.has_generic_code() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}{}{}", self.code, CODE_DELIMITER, self.message)
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}
