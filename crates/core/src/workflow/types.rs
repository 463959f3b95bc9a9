//! Workflow action types carrying audit trail information.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::inventory::TransactionStatus;

/// A validated state transition, ready to be persisted.
#[derive(Debug, Clone)]
pub enum WorkflowAction {
    /// A pending transaction was approved.
    Approve {
        /// The resulting status (`Approved`).
        new_status: TransactionStatus,
        /// The approving accountant.
        approved_by: Uuid,
        /// When the approval happened.
        approved_at: DateTime<Utc>,
    },
    /// A pending transaction was rejected.
    Reject {
        /// The resulting status (`Rejected`).
        new_status: TransactionStatus,
        /// The rejecting accountant.
        approved_by: Uuid,
        /// When the rejection happened.
        approved_at: DateTime<Utc>,
    },
}

impl WorkflowAction {
    /// Returns the status this action transitions to.
    #[must_use]
    pub const fn new_status(&self) -> TransactionStatus {
        match self {
            Self::Approve { new_status, .. } | Self::Reject { new_status, .. } => *new_status,
        }
    }
}
