//! Outcome — the result envelope returned by every mutating operation.
//!
//! DESIGN
//! ======
//! Rejections are expected outcomes, not faults. Every error type that can be
//! surfaced to a client implements `ErrorCode`, and `Outcome::from_error`
//! turns it into `{success: false, message, code}` so callers can match on
//! the grepable code instead of the human-readable message.

#[cfg(test)]
#[path = "outcome_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

/// Grepable error code for client-facing errors.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}

/// `{success, message, code}` result of a mutating operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Outcome {
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), code: None }
    }

    #[must_use]
    pub fn from_error(err: &(impl ErrorCode + ?Sized)) -> Self {
        Self { success: false, message: err.to_string(), code: Some(err.error_code().to_owned()) }
    }
}
