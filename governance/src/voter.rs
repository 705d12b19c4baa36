//! Per-voter account record.

use crate::proposal::ProposalRef;
use civitas_types::Timestamp;
use serde::{Deserialize, Serialize};

/// A participant's locked voting power and vote bookkeeping.
///
/// Created implicitly by the first deposit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterAccount {
    /// Governance tokens held in custody; the weight of every vote cast.
    pub deposit: u64,
    /// Withdrawal is allowed only once `now > deposit_lock`.
    pub deposit_lock: Timestamp,
    /// Proposal currently holding this voter's cast vote, if any.
    pub open_vote: Option<ProposalRef>,
}
