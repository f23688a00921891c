//! The error value model
//!
//! An [`AppError`] is one link of a causal chain: a code, a message, a
//! classification, the stack captured where it was built, optional
//! diagnostic input and an owned cause. Chains are built outward by
//! wrapping (`with_cause`) as a failure propagates, and consumed at the
//! boundary by serialization or reporting.

mod builders;
mod chain;
mod constructors;
mod conversions;
mod input;
mod types;

#[cfg(test)]
mod tests;

pub use chain::{Chain, MAX_CHAIN_DEPTH, find_app_error, is, unwrap};
pub use constructors::parse_error_message;
pub use input::Input;
pub use types::{AppError, AppResult, CODE_DELIMITER, Cause, GENERIC_CODE};
