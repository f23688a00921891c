//! Traversal of causal chains

use super::types::AppError;
use crate::classification::Classification;
use serde_json::Value;
use std::error::Error as StdError;

/// Upper bound on errors visited when walking a foreign `source()` chain.
///
/// `AppError` chains own their causes and cannot loop, so their traversal
/// is not bounded. Arbitrary `std::error::Error` implementations give no
/// such guarantee.
pub const MAX_CHAIN_DEPTH: usize = 1024;

/// Iterator over a chain, from the outermost link to the root cause
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a AppError>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a AppError;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause.as_deref();
        Some(current)
    }
}

impl std::iter::FusedIterator for Chain<'_> {}

impl AppError {
    /// The directly linked cause, if any
    pub fn cause(&self) -> Option<&AppError> {
        self.cause.as_deref()
    }

    /// Detach and return the cause
    pub fn take_cause(&mut self) -> Option<AppError> {
        self.cause.take().map(|cause| *cause)
    }

    /// Iterate this link and every cause below it
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Number of causes below this link (0 when there is none)
    pub fn depth(&self) -> usize {
        self.chain().count() - 1
    }

    /// Whether this link or any cause carries `target`'s code
    pub fn is(&self, target: &AppError) -> bool {
        self.is_code(&target.code)
    }

    /// Whether this link or any cause carries `code`
    pub fn is_code(&self, code: &str) -> bool {
        self.chain().any(|link| link.code == code)
    }

    /// Whether this link or any cause has the requested classification
    pub fn is_type(&self, classification: Classification) -> bool {
        self.chain().any(|link| link.classification == classification)
    }

    /// Whether any link in the chain was marked as a panic
    pub fn is_panic(&self) -> bool {
        self.chain().any(|link| link.panic)
    }

    /// The deepest cause; `self` when there is no cause
    pub fn root_error(&self) -> &AppError {
        self.chain().last().unwrap_or(self)
    }

    /// Inputs of every link that has one, outermost first
    pub fn all_inputs(&self) -> Vec<&Value> {
        self.chain().filter_map(|link| link.input.as_ref()).collect()
    }

    /// Each link's text, outermost first, one per line
    pub fn error_with_cause(&self) -> String {
        self.chain()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Find the first [`AppError`] in a `source()` chain
pub fn find_app_error<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a AppError> {
    std::iter::successors(Some(error), |err| (*err).source())
        .take(MAX_CHAIN_DEPTH)
        .find_map(|err| err.downcast_ref::<AppError>())
}

/// Whether `error`, or any error it was caused by, carries `target`'s code
pub fn is(error: &(dyn StdError + 'static), target: &AppError) -> bool {
    find_app_error(error).is_some_and(|err| err.is(target))
}

/// The cause of `error` when it is an [`AppError`]
pub fn unwrap<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a AppError> {
    error.downcast_ref::<AppError>().and_then(AppError::cause)
}
