//! Error taxonomy for the reconciliation/categorization core
//!
//! Stable error kinds carried across port boundaries, defined with
//! `thiserror` for ergonomic derivation of `Display`/`Error`.

use thiserror::Error;

/// The error type returned by every fallible operation in this crate
#[derive(Error, Debug)]
pub enum ReconError {
    /// A constructor precondition was violated (blank id, non-positive
    /// count, out-of-range confidence, empty pattern set, `from > to`, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An ISO date or decimal amount could not be parsed
    #[error("parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// A referenced ledger entity does not exist
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Mapping learning detected overlapping patterns for a different
    /// category. Surfaced as a warning in batch responses, not a hard
    /// failure.
    #[error("conflicting category mapping: {0}")]
    Conflict(String),

    /// A precondition on a batch operation failed (e.g. more than 100
    /// transactions in one create-missing call, or an empty list)
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// Transport/remote-ledger failure
    #[error("ledger error: {reason}")]
    LedgerError { reason: String },

    /// Mapping-store persistence failure; must never leave partial state
    #[error("store error: {0}")]
    StoreError(String),
}

impl ReconError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn parse_error(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    pub fn not_found(entity_type: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            identifier: identifier.into(),
        }
    }

    pub fn ledger_error(reason: impl Into<String>) -> Self {
        Self::LedgerError {
            reason: reason.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a conflict (warning-grade) error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

/// Result type alias used throughout the crate
pub type ReconResult<T> = Result<T, ReconError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReconError::invalid_argument("blank id");
        assert_eq!(err.to_string(), "invalid argument: blank id");
    }

    #[test]
    fn test_not_found_error() {
        let err = ReconError::not_found("Category", "cat-123");
        assert_eq!(err.to_string(), "Category not found: cat-123");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_parse_error() {
        let err = ReconError::parse_error(3, "bad date");
        assert_eq!(err.to_string(), "parse error at line 3: bad date");
    }
}
