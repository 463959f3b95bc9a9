//! Property tests for the approval state machine.

use proptest::prelude::*;
use uuid::Uuid;

use crate::inventory::TransactionStatus;
use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;

/// Strategy for generating transaction statuses.
fn status_strategy() -> impl Strategy<Value = TransactionStatus> {
    prop_oneof![
        Just(TransactionStatus::Pending),
        Just(TransactionStatus::Approved),
        Just(TransactionStatus::Rejected),
    ]
}

/// Strategy for generating terminal (non-pending) statuses.
fn terminal_status_strategy() -> impl Strategy<Value = TransactionStatus> {
    prop_oneof![
        Just(TransactionStatus::Approved),
        Just(TransactionStatus::Rejected),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Approve and reject succeed from Pending and from nowhere else.
    #[test]
    fn prop_only_pending_transitions(status in status_strategy()) {
        let approve = WorkflowService::approve(status, Uuid::new_v4());
        let reject = WorkflowService::reject(status, Uuid::new_v4());

        if status.is_pending() {
            prop_assert!(approve.is_ok());
            prop_assert!(reject.is_ok());
        } else {
            prop_assert!(approve.is_err());
            prop_assert!(reject.is_err());
        }
    }

    /// Re-processing a terminal transaction always reports the benign
    /// already-processed failure carrying the current status.
    #[test]
    fn prop_terminal_statuses_report_already_processed(status in terminal_status_strategy()) {
        match WorkflowService::approve(status, Uuid::new_v4()) {
            Err(WorkflowError::AlreadyProcessed { status: reported }) => {
                prop_assert_eq!(reported, status);
            }
            other => prop_assert!(false, "expected AlreadyProcessed, got {:?}", other),
        }
    }

    /// The transition table and the transition constructors agree.
    #[test]
    fn prop_transition_table_consistent(from in status_strategy(), to in status_strategy()) {
        let reachable = match to {
            TransactionStatus::Approved => WorkflowService::approve(from, Uuid::new_v4()).is_ok(),
            TransactionStatus::Rejected => WorkflowService::reject(from, Uuid::new_v4()).is_ok(),
            TransactionStatus::Pending => false,
        };
        prop_assert_eq!(WorkflowService::is_valid_transition(from, to), reachable);
    }

    /// Only approved transactions carry effects that a delete must reverse.
    #[test]
    fn prop_reversal_required_iff_effective(status in status_strategy()) {
        prop_assert_eq!(
            WorkflowService::requires_reversal(status),
            status.is_effective()
        );
    }
}
