//! Error classification for user-facing reporting.
//!
//! Failures anticipated while talking to external systems (bad inputs,
//! non-2xx responses, nothing to roll back to) are raised as [`ExpectedError`]
//! and always shown verbatim. Everything else is an unexpected error whose
//! detail is hidden when running inside CI.

use thiserror::Error;

/// Message shown in CI in place of an unexpected error's detail.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// A failure anticipated as part of normal operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ExpectedError(pub String);

impl ExpectedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Returns true if any error in the chain is an [`ExpectedError`].
pub fn is_expected(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<ExpectedError>())
}

/// Build the message reported to the user for a fatal error.
///
/// Interactive runs always get full detail, including the context chain.
/// In CI only expected errors keep their text.
pub fn user_message(err: &anyhow::Error, running_in_ci: bool) -> String {
    if let Some(expected) = err.chain().find_map(|c| c.downcast_ref::<ExpectedError>()) {
        if running_in_ci {
            return expected.to_string();
        }
    } else if running_in_ci {
        return UNEXPECTED_ERROR_MESSAGE.to_string();
    }
    format!("{err:#}")
}
