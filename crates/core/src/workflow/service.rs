//! Workflow service for transaction state transitions.
//!
//! All methods are associated functions that validate and execute state
//! transitions, returning the appropriate `WorkflowAction` with audit trail
//! information. Applying the action's side effects (stock, balances) is the
//! caller's responsibility and must happen atomically with the status change.

use chrono::Utc;
use uuid::Uuid;

use crate::inventory::TransactionStatus;
use crate::workflow::error::WorkflowError;
use crate::workflow::types::WorkflowAction;

/// Stateless service for managing transaction workflow transitions.
pub struct WorkflowService;

impl WorkflowService {
    /// Approve a pending transaction.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the transaction
    /// * `approved_by` - The accountant approving the transaction
    ///
    /// # Returns
    /// * `Ok(WorkflowAction::Approve)` if the transition is valid
    /// * `Err(WorkflowError::AlreadyProcessed)` if not in Pending status
    pub fn approve(
        current_status: TransactionStatus,
        approved_by: Uuid,
    ) -> Result<WorkflowAction, WorkflowError> {
        match current_status {
            TransactionStatus::Pending => Ok(WorkflowAction::Approve {
                new_status: TransactionStatus::Approved,
                approved_by,
                approved_at: Utc::now(),
            }),
            _ => Err(WorkflowError::AlreadyProcessed {
                status: current_status,
            }),
        }
    }

    /// Reject a pending transaction.
    ///
    /// Rejection applies no stock or balance effects; nothing was ever
    /// applied for a pending transaction.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the transaction
    /// * `rejected_by` - The accountant rejecting the transaction
    ///
    /// # Returns
    /// * `Ok(WorkflowAction::Reject)` if the transition is valid
    /// * `Err(WorkflowError::AlreadyProcessed)` if not in Pending status
    pub fn reject(
        current_status: TransactionStatus,
        rejected_by: Uuid,
    ) -> Result<WorkflowAction, WorkflowError> {
        match current_status {
            TransactionStatus::Pending => Ok(WorkflowAction::Reject {
                new_status: TransactionStatus::Rejected,
                approved_by: rejected_by,
                approved_at: Utc::now(),
            }),
            _ => Err(WorkflowError::AlreadyProcessed {
                status: current_status,
            }),
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Pending → Approved (approve)
    /// - Pending → Rejected (reject)
    ///
    /// Approved and rejected are terminal.
    #[must_use]
    pub fn is_valid_transition(from: TransactionStatus, to: TransactionStatus) -> bool {
        matches!(
            (from, to),
            (
                TransactionStatus::Pending,
                TransactionStatus::Approved | TransactionStatus::Rejected
            )
        )
    }

    /// Returns true if deleting a transaction in this status must first
    /// reverse its stock and balance effects.
    #[must_use]
    pub fn requires_reversal(status: TransactionStatus) -> bool {
        status.is_effective()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approve_from_pending() {
        let approver = Uuid::new_v4();
        let action = WorkflowService::approve(TransactionStatus::Pending, approver).unwrap();
        assert_eq!(action.new_status(), TransactionStatus::Approved);
        match action {
            WorkflowAction::Approve { approved_by, .. } => assert_eq!(approved_by, approver),
            WorkflowAction::Reject { .. } => panic!("expected approve action"),
        }
    }

    #[test]
    fn test_approve_from_approved_fails() {
        let result = WorkflowService::approve(TransactionStatus::Approved, Uuid::new_v4());
        assert!(matches!(
            result,
            Err(WorkflowError::AlreadyProcessed {
                status: TransactionStatus::Approved
            })
        ));
    }

    #[test]
    fn test_approve_from_rejected_fails() {
        let result = WorkflowService::approve(TransactionStatus::Rejected, Uuid::new_v4());
        assert!(matches!(
            result,
            Err(WorkflowError::AlreadyProcessed { .. })
        ));
    }

    #[test]
    fn test_reject_from_pending() {
        let action = WorkflowService::reject(TransactionStatus::Pending, Uuid::new_v4()).unwrap();
        assert_eq!(action.new_status(), TransactionStatus::Rejected);
    }

    #[test]
    fn test_reject_from_rejected_fails() {
        let result = WorkflowService::reject(TransactionStatus::Rejected, Uuid::new_v4());
        assert!(matches!(
            result,
            Err(WorkflowError::AlreadyProcessed {
                status: TransactionStatus::Rejected
            })
        ));
    }

    #[test]
    fn test_reject_from_approved_fails() {
        let result = WorkflowService::reject(TransactionStatus::Approved, Uuid::new_v4());
        assert!(matches!(
            result,
            Err(WorkflowError::AlreadyProcessed { .. })
        ));
    }

    #[test]
    fn test_is_valid_transition() {
        assert!(WorkflowService::is_valid_transition(
            TransactionStatus::Pending,
            TransactionStatus::Approved
        ));
        assert!(WorkflowService::is_valid_transition(
            TransactionStatus::Pending,
            TransactionStatus::Rejected
        ));

        assert!(!WorkflowService::is_valid_transition(
            TransactionStatus::Approved,
            TransactionStatus::Rejected
        ));
        assert!(!WorkflowService::is_valid_transition(
            TransactionStatus::Rejected,
            TransactionStatus::Approved
        ));
        assert!(!WorkflowService::is_valid_transition(
            TransactionStatus::Approved,
            TransactionStatus::Pending
        ));
    }

    #[test]
    fn test_requires_reversal() {
        assert!(WorkflowService::requires_reversal(
            TransactionStatus::Approved
        ));
        assert!(!WorkflowService::requires_reversal(
            TransactionStatus::Pending
        ));
        assert!(!WorkflowService::requires_reversal(
            TransactionStatus::Rejected
        ));
    }
}
