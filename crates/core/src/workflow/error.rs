//! Workflow error types for transaction lifecycle management.

use thiserror::Error;
use uuid::Uuid;

use crate::inventory::TransactionStatus;

/// Errors that can occur during workflow operations.
///
/// `AlreadyProcessed` is a benign, expected condition ("this transaction has
/// already been handled"); callers surface it as a failure result, never as
/// a fault.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Approve/reject was attempted on a transaction that is not pending.
    #[error("Transaction has already been processed (status: {status})")]
    AlreadyProcessed {
        /// The transaction's current status.
        status: TransactionStatus,
    },

    /// Transaction not found.
    #[error("Transaction {0} not found")]
    TransactionNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::AlreadyProcessed { .. } => 409,
            Self::TransactionNotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyProcessed { .. } => "ALREADY_PROCESSED",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_processed_error() {
        let err = WorkflowError::AlreadyProcessed {
            status: TransactionStatus::Approved,
        };
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "ALREADY_PROCESSED");
        assert!(err.to_string().contains("approved"));
    }

    #[test]
    fn test_not_found_error() {
        let err = WorkflowError::TransactionNotFound(Uuid::nil());
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "TRANSACTION_NOT_FOUND");
    }
}
