//! Proposal outcome evaluation.
//!
//! Precedence (first match wins):
//! 1. `now > execute_before` → [`ProposalResult::Expired`]
//! 2. `now <= voting_end` → [`ProposalResult::Pending`]
//! 3. `yes >= min_support && yes > no` → [`ProposalResult::Passed`]
//! 4. otherwise → [`ProposalResult::Rejected`]
//!
//! Expiry is absolute and overrides a "still voting" read. Once voting has
//! closed the pass test runs against the fixed tally, so repeated reads at the
//! same `now` always agree.

use crate::proposal::Proposal;
use civitas_types::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalResult {
    Passed,
    Pending,
    Expired,
    Rejected,
}

impl fmt::Display for ProposalResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Passed => "passed",
            Self::Pending => "pending",
            Self::Expired => "expired",
            Self::Rejected => "rejected",
        })
    }
}

/// Classify a proposal at `now`. Never reads `executed`.
pub fn evaluate(proposal: &Proposal, now: Timestamp, min_support: u64) -> ProposalResult {
    if now > proposal.execute_before {
        ProposalResult::Expired
    } else if now <= proposal.voting_end {
        ProposalResult::Pending
    } else if proposal.yes >= min_support && proposal.yes > proposal.no {
        ProposalResult::Passed
    } else {
        ProposalResult::Rejected
    }
}

/// Whether the proposal can still change outcome or still be executed.
///
/// Active while voting is open, or while it has passed, is unexecuted and the
/// execution deadline has not gone by.
pub fn is_active(proposal: &Proposal, now: Timestamp, min_support: u64) -> bool {
    now <= proposal.voting_end
        || (now <= proposal.execute_before
            && evaluate(proposal, now, min_support) == ProposalResult::Passed
            && !proposal.executed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::ProposalKind;
    use civitas_types::TxId;

    fn proposal(yes: u64, no: u64, voting_end: u64, execute_before: u64) -> Proposal {
        Proposal {
            id: TxId::ZERO,
            name: "p".into(),
            url: String::new(),
            url_hash: String::new(),
            hash_algo: "sha256".into(),
            voting_start: Timestamp::new(voting_end.saturating_sub(100)),
            voting_end: Timestamp::new(voting_end),
            execute_before: Timestamp::new(execute_before),
            kind: ProposalKind::Message {
                message: "hello".into(),
            },
            yes,
            no,
            abstain: 0,
            executed: false,
        }
    }

    #[test]
    fn passes_after_voting_then_expires() {
        let t = 10_000;
        let p = proposal(150, 20, t, t + 1000);
        assert_eq!(evaluate(&p, Timestamp::new(t + 1), 100), ProposalResult::Passed);
        assert_eq!(evaluate(&p, Timestamp::new(t + 1000), 100), ProposalResult::Passed);
        assert_eq!(evaluate(&p, Timestamp::new(t + 1001), 100), ProposalResult::Expired);
    }

    #[test]
    fn pending_through_voting_end() {
        let p = proposal(150, 20, 500, 900);
        assert_eq!(evaluate(&p, Timestamp::new(0), 100), ProposalResult::Pending);
        assert_eq!(evaluate(&p, Timestamp::new(500), 100), ProposalResult::Pending);
    }

    #[test]
    fn rejected_below_support_or_without_majority() {
        let now = Timestamp::new(501);
        assert_eq!(evaluate(&proposal(99, 0, 500, 900), now, 100), ProposalResult::Rejected);
        assert_eq!(evaluate(&proposal(150, 150, 500, 900), now, 100), ProposalResult::Rejected);
        assert_eq!(evaluate(&proposal(150, 200, 500, 900), now, 100), ProposalResult::Rejected);
        assert_eq!(evaluate(&proposal(100, 99, 500, 900), now, 100), ProposalResult::Passed);
    }

    #[test]
    fn expiry_wins_regardless_of_tally() {
        let now = Timestamp::new(901);
        assert_eq!(evaluate(&proposal(0, 0, 500, 900), now, 100), ProposalResult::Expired);
        assert_eq!(evaluate(&proposal(1000, 0, 500, 900), now, 100), ProposalResult::Expired);
    }

    #[test]
    fn evaluation_ignores_executed_flag() {
        let mut p = proposal(150, 20, 500, 900);
        let now = Timestamp::new(600);
        let before = evaluate(&p, now, 100);
        p.executed = true;
        assert_eq!(evaluate(&p, now, 100), before);
    }

    #[test]
    fn active_predicate() {
        let mut p = proposal(150, 20, 500, 900);
        assert!(is_active(&p, Timestamp::new(10), 100));
        assert!(is_active(&p, Timestamp::new(600), 100));
        p.executed = true;
        assert!(!is_active(&p, Timestamp::new(600), 100));

        let rejected = proposal(10, 20, 500, 900);
        assert!(is_active(&rejected, Timestamp::new(500), 100));
        assert!(!is_active(&rejected, Timestamp::new(501), 100));

        let passed = proposal(150, 20, 500, 900);
        assert!(!is_active(&passed, Timestamp::new(901), 100));
    }
}
