//! Deposit-weighted DAO governance.
//!
//! Proposers lock a fixed deposit of the governance token to record a proposal
//! on their account. Voters deposit governance tokens into custody and cast
//! their whole deposit as weight on a proposal's yes/no/abstain tally. Once
//! voting ends a proposal passes when `yes >= min_support` and `yes > no`; a
//! passed proposal can be executed once, before its deadline, by a group that
//! carries exactly the approved action.
//!
//! Key principle: voting power is the deposit, and a deposit stays locked until
//! every vote it backs has closed.

pub mod call;
pub mod config;
pub mod deposit;
pub mod engine;
pub mod error;
pub mod events;
pub mod execution;
pub mod params;
pub mod proposal;
pub mod records;
pub mod result;
pub mod transfer;
pub mod voter;
pub mod voting;

pub use call::DaoCall;
pub use config::GovernanceConfig;
pub use deposit::DepositLedger;
pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use events::{EventLog, EventSink, GovernanceEvent};
pub use execution::ExecutionGate;
pub use params::DaoParams;
pub use proposal::{
    proposal_id, Proposal, ProposalConfig, ProposalKind, ProposalRef, DEFAULT_HASH_ALGO,
};
pub use records::{RecordStore, PARAMS_META_KEY};
pub use result::{evaluate, is_active, ProposalResult};
pub use transfer::{
    AmountRule, ExpectedTransfer, GroupInspector, TransferAsset, TransferMismatch,
    TransferVerifier,
};
pub use voter::VoterAccount;
pub use voting::{VoteChoice, VotingLedger};
