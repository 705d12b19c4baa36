use proptest::prelude::*;

use civitas_governance::{
    evaluate, is_active, Proposal, ProposalKind, ProposalResult, VoteChoice, VoterAccount,
    VotingLedger,
};
use civitas_types::{Address, Timestamp, TxId};

fn proposal(start: u64, end: u64, execute_before: u64, yes: u64, no: u64) -> Proposal {
    Proposal {
        id: TxId::new([1; 32]),
        name: "p".into(),
        url: String::new(),
        url_hash: String::new(),
        hash_algo: "sha256".into(),
        voting_start: Timestamp::new(start),
        voting_end: Timestamp::new(end),
        execute_before: Timestamp::new(execute_before),
        kind: ProposalKind::Message {
            message: "m".into(),
        },
        yes,
        no,
        abstain: 0,
        executed: false,
    }
}

proptest! {
    /// Evaluation is a pure function of the tally, the window and `now`.
    #[test]
    fn evaluate_is_idempotent_and_ignores_executed(
        end in 1u64..10_000,
        grace in 1u64..10_000,
        now in 0u64..30_000,
        yes in 0u64..1_000,
        no in 0u64..1_000,
        min_support in 0u64..1_000,
    ) {
        let mut p = proposal(0, end, end + grace, yes, no);
        let now = Timestamp::new(now);
        let first = evaluate(&p, now, min_support);
        prop_assert_eq!(first, evaluate(&p, now, min_support));
        p.executed = true;
        prop_assert_eq!(first, evaluate(&p, now, min_support));
    }

    /// Expiry wins over everything; pending only while voting is open.
    #[test]
    fn evaluate_precedence(
        end in 1u64..10_000,
        grace in 1u64..10_000,
        now in 0u64..30_000,
        yes in 0u64..1_000,
        no in 0u64..1_000,
        min_support in 0u64..1_000,
    ) {
        let p = proposal(0, end, end + grace, yes, no);
        let result = evaluate(&p, Timestamp::new(now), min_support);
        if now > end + grace {
            prop_assert_eq!(result, ProposalResult::Expired);
        } else if now <= end {
            prop_assert_eq!(result, ProposalResult::Pending);
        } else if yes >= min_support && yes > no {
            prop_assert_eq!(result, ProposalResult::Passed);
        } else {
            prop_assert_eq!(result, ProposalResult::Rejected);
        }
    }

    /// Nothing is active once its execution deadline has passed.
    #[test]
    fn nothing_active_after_deadline(
        end in 1u64..10_000,
        grace in 1u64..10_000,
        past in 1u64..10_000,
        yes in 0u64..1_000,
    ) {
        let p = proposal(0, end, end + grace, yes, 0);
        prop_assert!(!is_active(&p, Timestamp::new(end + grace + past), 0));
    }

    /// The deposit lock never decreases across votes.
    #[test]
    fn deposit_lock_is_monotonic(ends in proptest::collection::vec(10u64..10_000, 1..12)) {
        let voter_addr = Address::new([2; 32]);
        let mut voter = VoterAccount { deposit: 7, ..Default::default() };
        let mut previous = voter.deposit_lock;
        for (i, end) in ends.into_iter().enumerate() {
            let mut p = proposal(0, end, end + 1, 0, 0);
            let proposal_ref = p.reference(Address::new([i as u8 + 10; 32]));
            VotingLedger
                .register_vote(&voter_addr, &mut voter, proposal_ref, &mut p, VoteChoice::No, Timestamp::new(5))
                .unwrap();
            prop_assert!(voter.deposit_lock >= previous);
            prop_assert!(voter.deposit_lock >= Timestamp::new(end));
            previous = voter.deposit_lock;
        }
    }
}
