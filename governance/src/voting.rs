//! Vote registration and the double-vote guard.
//!
//! Each voter tracks at most one open vote. Voting again on the proposal that
//! holds it is a double vote. Voting on a different proposal moves the pointer
//! without revoking the weight already cast on the old one, and because the
//! deposit is shared collateral the same tokens can back several proposals.

use crate::deposit::DepositLedger;
use crate::error::GovernanceError;
use crate::proposal::{Proposal, ProposalRef};
use crate::result::is_active;
use crate::voter::VoterAccount;
use civitas_types::{Address, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteChoice {
    Yes,
    No,
    Abstain,
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Abstain => "abstain",
        })
    }
}

impl FromStr for VoteChoice {
    type Err = GovernanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "abstain" => Ok(Self::Abstain),
            other => Err(GovernanceError::UnsupportedCall(format!(
                "unknown vote choice {other:?}"
            ))),
        }
    }
}

pub struct VotingLedger;

impl VotingLedger {
    /// Cast `voter`'s whole deposit on `proposal`. Returns the weight added.
    ///
    /// Either both records are updated or neither is.
    pub fn register_vote(
        &self,
        voter_addr: &Address,
        voter: &mut VoterAccount,
        proposal_ref: ProposalRef,
        proposal: &mut Proposal,
        choice: VoteChoice,
        now: Timestamp,
    ) -> Result<u64, GovernanceError> {
        if !proposal.voting_open(now) {
            return Err(GovernanceError::VotingClosed {
                now,
                start: proposal.voting_start,
                end: proposal.voting_end,
            });
        }
        if voter.deposit == 0 {
            return Err(GovernanceError::NoVotingPower(*voter_addr));
        }
        if voter.open_vote == Some(proposal_ref) {
            return Err(GovernanceError::DoubleVote {
                voter: *voter_addr,
                proposal: proposal_ref.account,
            });
        }

        let weight = voter.deposit;
        let counter = match choice {
            VoteChoice::Yes => &mut proposal.yes,
            VoteChoice::No => &mut proposal.no,
            VoteChoice::Abstain => &mut proposal.abstain,
        };
        *counter = counter.checked_add(weight).ok_or(GovernanceError::Overflow)?;

        voter.open_vote = Some(proposal_ref);
        DepositLedger.extend_lock(voter, proposal.voting_end);
        Ok(weight)
    }

    /// Drop the voter's open vote on `account` once it no longer matters.
    ///
    /// `current` is the proposal now recorded on `account`, if any. A pointer to
    /// a proposal that was closed (or replaced) is always removable. Returns
    /// the cleared reference, or `None` when there was nothing to clear.
    pub fn clear_vote_record(
        &self,
        voter: &mut VoterAccount,
        account: &Address,
        current: Option<&Proposal>,
        now: Timestamp,
        min_support: u64,
    ) -> Result<Option<ProposalRef>, GovernanceError> {
        let open = match voter.open_vote {
            Some(open) if open.account == *account => open,
            _ => return Ok(None),
        };
        if let Some(proposal) = current {
            if proposal.id == open.id && is_active(proposal, now, min_support) {
                return Err(GovernanceError::VoteStillBinding(*account));
            }
        }
        voter.open_vote = None;
        Ok(Some(open))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::ProposalKind;
    use civitas_types::TxId;

    fn addr(seed: u8) -> Address {
        Address::new([seed; 32])
    }

    fn proposal(id: u8, start: u64, end: u64) -> Proposal {
        Proposal {
            id: TxId::new([id; 32]),
            name: "p".into(),
            url: String::new(),
            url_hash: String::new(),
            hash_algo: "sha256".into(),
            voting_start: Timestamp::new(start),
            voting_end: Timestamp::new(end),
            execute_before: Timestamp::new(end + 300),
            kind: ProposalKind::Message {
                message: "m".into(),
            },
            yes: 0,
            no: 0,
            abstain: 0,
            executed: false,
        }
    }

    fn funded(deposit: u64) -> VoterAccount {
        VoterAccount {
            deposit,
            ..Default::default()
        }
    }

    #[test]
    fn parses_choices() {
        assert_eq!("yes".parse::<VoteChoice>().unwrap(), VoteChoice::Yes);
        assert_eq!("abstain".parse::<VoteChoice>().unwrap(), VoteChoice::Abstain);
        assert!("maybe".parse::<VoteChoice>().is_err());
        assert_eq!(VoteChoice::No.to_string(), "no");
    }

    #[test]
    fn vote_adds_weight_and_locks_deposit() {
        let mut voter = funded(50);
        let mut p = proposal(1, 100, 500);
        let r = p.reference(addr(9));
        let weight = VotingLedger
            .register_vote(&addr(1), &mut voter, r, &mut p, VoteChoice::Yes, Timestamp::new(200))
            .unwrap();
        assert_eq!(weight, 50);
        assert_eq!(p.yes, 50);
        assert_eq!(voter.deposit_lock, Timestamp::new(500));
        assert_eq!(voter.open_vote, Some(r));
    }

    #[test]
    fn same_proposal_twice_is_a_double_vote() {
        let mut voter = funded(6);
        let mut p = proposal(1, 100, 500);
        let r = p.reference(addr(9));
        let now = Timestamp::new(200);
        VotingLedger
            .register_vote(&addr(1), &mut voter, r, &mut p, VoteChoice::Yes, now)
            .unwrap();
        voter.deposit += 4;
        let err = VotingLedger
            .register_vote(&addr(1), &mut voter, r, &mut p, VoteChoice::Yes, now)
            .unwrap_err();
        assert!(matches!(err, GovernanceError::DoubleVote { .. }));
        assert_eq!(p.yes, 6);
    }

    #[test]
    fn voting_elsewhere_moves_the_pointer() {
        let mut voter = funded(10);
        let mut p1 = proposal(1, 100, 500);
        let mut p2 = proposal(2, 100, 400);
        let r1 = p1.reference(addr(8));
        let r2 = p2.reference(addr(9));
        let now = Timestamp::new(200);
        VotingLedger
            .register_vote(&addr(1), &mut voter, r1, &mut p1, VoteChoice::Yes, now)
            .unwrap();
        VotingLedger
            .register_vote(&addr(1), &mut voter, r2, &mut p2, VoteChoice::No, now)
            .unwrap();
        assert_eq!(voter.open_vote, Some(r2));
        assert_eq!((p1.yes, p2.no), (10, 10));
        // lock keeps the later of the two windows
        assert_eq!(voter.deposit_lock, Timestamp::new(500));
    }

    #[test]
    fn rejects_outside_window_and_without_power() {
        let mut p = proposal(1, 100, 500);
        let r = p.reference(addr(9));
        let mut voter = funded(5);
        let err = VotingLedger
            .register_vote(&addr(1), &mut voter, r, &mut p, VoteChoice::Yes, Timestamp::new(99))
            .unwrap_err();
        assert!(matches!(err, GovernanceError::VotingClosed { .. }));

        let mut broke = funded(0);
        let err = VotingLedger
            .register_vote(&addr(2), &mut broke, r, &mut p, VoteChoice::Yes, Timestamp::new(200))
            .unwrap_err();
        assert_eq!(err, GovernanceError::NoVotingPower(addr(2)));
        assert_eq!(broke.open_vote, None);
    }

    #[test]
    fn tally_overflow_leaves_both_records_untouched() {
        let mut p = proposal(1, 100, 500);
        p.abstain = u64::MAX;
        let r = p.reference(addr(9));
        let mut voter = funded(1);
        let err = VotingLedger
            .register_vote(&addr(1), &mut voter, r, &mut p, VoteChoice::Abstain, Timestamp::new(200))
            .unwrap_err();
        assert_eq!(err, GovernanceError::Overflow);
        assert_eq!(voter.open_vote, None);
        assert_eq!(voter.deposit_lock, Timestamp::EPOCH);
    }

    #[test]
    fn clear_is_refused_while_binding() {
        let p = proposal(1, 100, 500);
        let r = p.reference(addr(9));
        let mut voter = VoterAccount {
            deposit: 5,
            deposit_lock: Timestamp::new(500),
            open_vote: Some(r),
        };
        let err = VotingLedger
            .clear_vote_record(&mut voter, &addr(9), Some(&p), Timestamp::new(300), 1)
            .unwrap_err();
        assert_eq!(err, GovernanceError::VoteStillBinding(addr(9)));

        // voting over, nothing passed: inactive
        let cleared = VotingLedger
            .clear_vote_record(&mut voter, &addr(9), Some(&p), Timestamp::new(501), 1)
            .unwrap();
        assert_eq!(cleared, Some(r));
        assert_eq!(voter.open_vote, None);
    }

    #[test]
    fn clear_of_closed_or_replaced_proposal_succeeds() {
        let old = proposal(1, 100, 500);
        let r = old.reference(addr(9));
        let mut voter = VoterAccount {
            open_vote: Some(r),
            ..Default::default()
        };
        let replacement = proposal(2, 100, 500);
        let cleared = VotingLedger
            .clear_vote_record(&mut voter, &addr(9), Some(&replacement), Timestamp::new(200), 1)
            .unwrap();
        assert_eq!(cleared, Some(r));

        voter.open_vote = Some(r);
        assert!(VotingLedger
            .clear_vote_record(&mut voter, &addr(9), None, Timestamp::new(200), 1)
            .unwrap()
            .is_some());
    }

    #[test]
    fn clear_for_another_account_is_a_no_op() {
        let p = proposal(1, 100, 500);
        let r = p.reference(addr(9));
        let mut voter = VoterAccount {
            open_vote: Some(r),
            ..Default::default()
        };
        let cleared = VotingLedger
            .clear_vote_record(&mut voter, &addr(7), None, Timestamp::new(200), 1)
            .unwrap();
        assert_eq!(cleared, None);
        assert_eq!(voter.open_vote, Some(r));
    }
}
