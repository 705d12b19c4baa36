//! Governance proposals and their recorded configuration.

use crate::error::GovernanceError;
use crate::params::DaoParams;
use civitas_transactions::hash::blake2b_256_multi;
use civitas_transactions::TransactionGroup;
use civitas_types::{Address, AssetId, Timestamp, TxId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hash algorithm recorded when the proposer leaves `hash_algo` empty.
pub const DEFAULT_HASH_ALGO: &str = "sha256";

/// Identity of one proposal: the account it is recorded on plus the id of the
/// call that recorded it. A proposal recorded on the same account after a
/// close is a different proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposalRef {
    pub account: Address,
    pub id: TxId,
}

impl fmt::Display for ProposalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{:?}", self.account, self.id)
    }
}

/// Id of the proposal recorded by `group` at `now`.
///
/// A proposal can only be closed after its voting window, which opens after
/// it was recorded. A later proposal on the same account is therefore always
/// recorded at a later `now`, and gets a fresh id even from an identical group.
pub fn proposal_id(group: &TransactionGroup, now: Timestamp) -> TxId {
    TxId::new(blake2b_256_multi(&[
        b"PROPOSAL",
        group.group_id().as_bytes(),
        &now.as_secs().to_le_bytes(),
    ]))
}

/// What an approved proposal does when executed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalKind {
    /// Pay native currency out of `from` (typically the treasury).
    NativeTransfer {
        from: Address,
        recipient: Address,
        amount: u64,
    },
    /// Transfer a token out of `from`.
    TokenTransfer {
        from: Address,
        asset_id: AssetId,
        recipient: Address,
        amount: u64,
    },
    /// A text resolution; executing it moves no funds.
    Message { message: String },
}

impl ProposalKind {
    /// Wire code of the kind: 1 native transfer, 2 token transfer, 3 message.
    pub fn code(&self) -> u8 {
        match self {
            Self::NativeTransfer { .. } => 1,
            Self::TokenTransfer { .. } => 2,
            Self::Message { .. } => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NativeTransfer { .. } => "native_transfer",
            Self::TokenTransfer { .. } => "token_transfer",
            Self::Message { .. } => "message",
        }
    }

    fn validate(&self) -> Result<(), GovernanceError> {
        let (from, recipient) = match self {
            Self::NativeTransfer { from, recipient, .. }
            | Self::TokenTransfer { from, recipient, .. } => (from, recipient),
            Self::Message { .. } => return Ok(()),
        };
        if from.is_zero() || recipient.is_zero() {
            return Err(GovernanceError::InvalidProposalConfig(format!(
                "{} needs both a source and a recipient",
                self.name()
            )));
        }
        Ok(())
    }
}

/// Proposal as submitted by the proposer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalConfig {
    pub name: String,
    pub url: String,
    pub url_hash: String,
    /// Empty means [`DEFAULT_HASH_ALGO`].
    #[serde(default)]
    pub hash_algo: String,
    pub voting_start: Timestamp,
    pub voting_end: Timestamp,
    pub execute_before: Timestamp,
    pub kind: ProposalKind,
}

impl ProposalConfig {
    /// Check the time ordering and window bounds against `now` and the DAO params.
    pub fn validate(&self, now: Timestamp, params: &DaoParams) -> Result<(), GovernanceError> {
        if self.voting_start <= now {
            return Err(GovernanceError::InvalidProposalConfig(format!(
                "voting_start {} must be after now {}",
                self.voting_start, now
            )));
        }
        if self.voting_end <= self.voting_start {
            return Err(GovernanceError::InvalidProposalConfig(format!(
                "voting_end {} must be after voting_start {}",
                self.voting_end, self.voting_start
            )));
        }
        let duration = self.voting_start.until(self.voting_end);
        if !params.allows_duration(duration) {
            return Err(GovernanceError::InvalidProposalConfig(format!(
                "voting window of {duration}s is outside [{}, {}]",
                params.min_duration, params.max_duration
            )));
        }
        if self.execute_before <= self.voting_end {
            return Err(GovernanceError::InvalidProposalConfig(format!(
                "execute_before {} must be after voting_end {}",
                self.execute_before, self.voting_end
            )));
        }
        self.kind.validate()
    }
}

/// A recorded proposal with its running tally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: TxId,
    pub name: String,
    pub url: String,
    pub url_hash: String,
    pub hash_algo: String,
    pub voting_start: Timestamp,
    pub voting_end: Timestamp,
    pub execute_before: Timestamp,
    pub kind: ProposalKind,
    pub yes: u64,
    pub no: u64,
    pub abstain: u64,
    /// Set once by a successful execute; never cleared.
    pub executed: bool,
}

impl Proposal {
    /// Validate `config` and build a fresh record with an empty tally.
    pub fn open(
        config: ProposalConfig,
        id: TxId,
        now: Timestamp,
        params: &DaoParams,
    ) -> Result<Self, GovernanceError> {
        config.validate(now, params)?;
        let hash_algo = if config.hash_algo.is_empty() {
            DEFAULT_HASH_ALGO.to_string()
        } else {
            config.hash_algo
        };
        Ok(Self {
            id,
            name: config.name,
            url: config.url,
            url_hash: config.url_hash,
            hash_algo,
            voting_start: config.voting_start,
            voting_end: config.voting_end,
            execute_before: config.execute_before,
            kind: config.kind,
            yes: 0,
            no: 0,
            abstain: 0,
            executed: false,
        })
    }

    pub fn reference(&self, account: Address) -> ProposalRef {
        ProposalRef {
            account,
            id: self.id,
        }
    }

    /// `voting_start <= now <= voting_end`.
    pub fn voting_open(&self, now: Timestamp) -> bool {
        self.voting_start <= now && now <= self.voting_end
    }
}
