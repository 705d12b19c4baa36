//! Voting-power deposits.
//!
//! A voter's deposit is collateral shared by every proposal they vote on; it
//! is not split per proposal. The lock keeps a voter from casting a vote and
//! then pulling the backing tokens before that vote's window has closed.

use crate::error::GovernanceError;
use crate::voter::VoterAccount;
use civitas_types::Timestamp;

pub struct DepositLedger;

impl DepositLedger {
    /// Credit a verified incoming transfer. Returns the new deposit.
    pub fn credit(&self, voter: &mut VoterAccount, amount: u64) -> Result<u64, GovernanceError> {
        voter.deposit = voter
            .deposit
            .checked_add(amount)
            .ok_or(GovernanceError::Overflow)?;
        Ok(voter.deposit)
    }

    /// Debit a withdrawal. Returns the remaining deposit.
    pub fn withdraw(
        &self,
        voter: &mut VoterAccount,
        amount: u64,
        now: Timestamp,
    ) -> Result<u64, GovernanceError> {
        if amount == 0 {
            return Err(GovernanceError::ZeroAmount);
        }
        if now <= voter.deposit_lock {
            return Err(GovernanceError::DepositLocked {
                until: voter.deposit_lock,
            });
        }
        voter.deposit =
            voter
                .deposit
                .checked_sub(amount)
                .ok_or(GovernanceError::InsufficientDeposit {
                    requested: amount,
                    available: voter.deposit,
                })?;
        Ok(voter.deposit)
    }

    /// Raise the lock to `until` if it is later. The lock never moves back.
    pub fn extend_lock(&self, voter: &mut VoterAccount, until: Timestamp) {
        voter.deposit_lock = voter.deposit_lock.max(until);
    }
}
