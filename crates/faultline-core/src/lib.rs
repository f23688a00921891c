//! Faultline Core
//!
//! Structured errors for request-serving applications. An [`AppError`]
//! carries a machine-readable code, a [`Classification`], the stack captured
//! where it was built, optional diagnostic input and an owned cause, so a
//! failure keeps its whole history as it is wrapped on the way up.
//!
//! ```rust
//! use faultline_core::{AppError, Classification};
//!
//! let err = AppError::internal("LOAD_PROFILE", "cannot load profile")
//!     .with_cause(AppError::timeout("DB_TIMEOUT", "query timed out"));
//!
//! assert!(err.is_type(Classification::Timeout));
//! assert_eq!(err.root_error().code(), "DB_TIMEOUT");
//! ```

pub mod classification;
pub mod definition;
pub mod error;
pub mod record;
pub mod stack;

pub use classification::{Classification, UnknownClassification};
pub use definition::ErrorDefinition;
pub use error::{AppError, AppResult, Cause, Chain, GENERIC_CODE, Input, MAX_CHAIN_DEPTH};
pub use record::{ErrorRecord, RecordError, RecordResult};
pub use stack::{StackFrame, Stacktrace};
