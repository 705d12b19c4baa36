use crate::transfer::TransferMismatch;
use civitas_store::StoreError;
use civitas_transactions::TransactionError;
use civitas_types::{Address, Timestamp};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("invalid DAO parameters: {0}")]
    InvalidParams(String),

    #[error("DAO has not been initialized in this store")]
    NotInitialized,

    #[error("invalid proposal config: {0}")]
    InvalidProposalConfig(String),

    #[error("account {0} already holds an open proposal")]
    ProposalAlreadyOpen(Address),

    #[error("no proposal recorded on account {0}")]
    ProposalNotFound(Address),

    #[error("deposit transfer rejected: {0}")]
    DepositMismatch(TransferMismatch),

    #[error("invalid transaction group: {0}")]
    InvalidGroup(String),

    #[error("voting is closed: now {now}, window {start}..={end}")]
    VotingClosed {
        now: Timestamp,
        start: Timestamp,
        end: Timestamp,
    },

    #[error("voter {0} has no deposited voting power")]
    NoVotingPower(Address),

    #[error("voter {voter} already voted on proposal {proposal}")]
    DoubleVote { voter: Address, proposal: Address },

    #[error("deposit is locked until {until}")]
    DepositLocked { until: Timestamp },

    #[error("insufficient deposit: requested {requested}, available {available}")]
    InsufficientDeposit { requested: u64, available: u64 },

    #[error("amount must be positive")]
    ZeroAmount,

    #[error("proposal is not executable: {0}")]
    NotExecutable(String),

    #[error("action bundle does not match the proposal: {0}")]
    ExecutionMismatch(TransferMismatch),

    #[error("proposal is still active")]
    ProposalStillActive,

    #[error("vote on proposal {0} is still binding")]
    VoteStillBinding(Address),

    #[error("unsupported application call: {0}")]
    UnsupportedCall(String),

    #[error("arithmetic overflow")]
    Overflow,

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("record codec error: {0}")]
    Codec(String),

    #[error("config error: {0}")]
    Config(String),
}
