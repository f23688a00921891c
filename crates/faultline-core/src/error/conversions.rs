//! From trait implementations for Cause conversions

use super::types::{AppError, Cause};

impl From<AppError> for Cause {
    fn from(error: AppError) -> Self {
        Self::Structured(error)
    }
}

impl From<Box<AppError>> for Cause {
    fn from(error: Box<AppError>) -> Self {
        Self::Structured(*error)
    }
}

impl From<String> for Cause {
    fn from(message: String) -> Self {
        Self::Foreign(message)
    }
}

impl From<&str> for Cause {
    fn from(message: &str) -> Self {
        Self::Foreign(message.to_string())
    }
}

impl From<std::io::Error> for Cause {
    fn from(error: std::io::Error) -> Self {
        Self::foreign(error)
    }
}

impl From<std::fmt::Error> for Cause {
    fn from(error: std::fmt::Error) -> Self {
        Self::foreign(error)
    }
}

impl From<serde_json::Error> for Cause {
    fn from(error: serde_json::Error) -> Self {
        Self::foreign(error)
    }
}

/// An `anyhow::Error` that already wraps an `AppError` keeps its structure.
impl From<anyhow::Error> for Cause {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<AppError>() {
            Ok(err) => Self::Structured(err),
            Err(other) => Self::Foreign(format!("{:#}", other)),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Cause::from(error).into_error()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Cause::from(error).into_error()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Cause::from(error).into_error()
    }
}
