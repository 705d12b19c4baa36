//! Typed DAO application calls.

use crate::proposal::ProposalConfig;
use crate::voting::VoteChoice;
use civitas_types::Address;
use serde::{Deserialize, Serialize};

/// One call into the DAO application, decoded from the group's leading
/// application-call transaction. Proposal-targeting calls name the account the
/// proposal is recorded on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DaoCall {
    OptInGovToken,
    AddProposal(ProposalConfig),
    DepositVoteToken,
    RegisterVote {
        proposal: Address,
        choice: VoteChoice,
    },
    Execute {
        proposal: Address,
    },
    WithdrawVoteDeposit {
        amount: u64,
    },
    ClearVoteRecord {
        proposal: Address,
    },
    CloseProposal,
}

impl DaoCall {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OptInGovToken => "optin_gov_token",
            Self::AddProposal(_) => "add_proposal",
            Self::DepositVoteToken => "deposit_vote_token",
            Self::RegisterVote { .. } => "register_vote",
            Self::Execute { .. } => "execute",
            Self::WithdrawVoteDeposit { .. } => "withdraw_vote_deposit",
            Self::ClearVoteRecord { .. } => "clear_vote_record",
            Self::CloseProposal => "close_proposal",
        }
    }
}
