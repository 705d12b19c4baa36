//! Execution gate: checks that an execute call's group carries exactly the
//! action a passed proposal approved.

use crate::error::GovernanceError;
use crate::proposal::ProposalKind;
use crate::transfer::{AmountRule, ExpectedTransfer, TransferMismatch, TransferVerifier};
use civitas_transactions::TransactionGroup;

/// Position of the payout within an execute group.
pub const PAYOUT_INDEX: usize = 1;

pub struct ExecutionGate;

impl ExecutionGate {
    /// Group size an execute call must have for `kind`.
    pub fn required_group_size(kind: &ProposalKind) -> usize {
        match kind {
            ProposalKind::NativeTransfer { .. } | ProposalKind::TokenTransfer { .. } => 2,
            ProposalKind::Message { .. } => 1,
        }
    }

    /// Mutates nothing; the caller marks the proposal executed on success.
    pub fn check(
        &self,
        kind: &ProposalKind,
        group: &TransactionGroup,
        verifier: &dyn TransferVerifier,
    ) -> Result<(), GovernanceError> {
        let expected_size = Self::required_group_size(kind);
        if group.len() != expected_size {
            return Err(GovernanceError::ExecutionMismatch(
                TransferMismatch::GroupSize {
                    expected: expected_size,
                    found: group.len(),
                },
            ));
        }

        let expected = match kind {
            ProposalKind::NativeTransfer {
                from,
                recipient,
                amount,
            } => ExpectedTransfer::native(*from, *recipient, *amount),
            ProposalKind::TokenTransfer {
                from,
                asset_id,
                recipient,
                amount,
            } => ExpectedTransfer::token(*asset_id, *recipient, AmountRule::Exactly(*amount))
                .from_sender(*from),
            ProposalKind::Message { .. } => return Ok(()),
        };

        verifier
            .verify(group, PAYOUT_INDEX, &expected)
            .map(|_| ())
            .map_err(GovernanceError::ExecutionMismatch)
    }
}
