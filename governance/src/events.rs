//! Governance events published after each committed operation.

use crate::proposal::{ProposalKind, ProposalRef};
use crate::result::ProposalResult;
use crate::voting::VoteChoice;
use civitas_types::{Address, Timestamp};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GovernanceEvent {
    ProposalAdded {
        proposal_ref: ProposalRef,
        name: String,
        voting_start: Timestamp,
        voting_end: Timestamp,
        execute_before: Timestamp,
    },
    VoteDeposited {
        voter: Address,
        amount: u64,
        total: u64,
    },
    VoteRegistered {
        voter: Address,
        proposal_ref: ProposalRef,
        choice: VoteChoice,
        weight: u64,
    },
    VoteDepositWithdrawn {
        voter: Address,
        amount: u64,
        remaining: u64,
    },
    ProposalExecuted {
        proposal_ref: ProposalRef,
        kind: ProposalKind,
    },
    ProposalClosed {
        proposal_ref: ProposalRef,
        result: ProposalResult,
    },
    VoteRecordCleared {
        voter: Address,
        proposal_ref: ProposalRef,
    },
}

impl GovernanceEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProposalAdded { .. } => "proposal_added",
            Self::VoteDeposited { .. } => "vote_deposited",
            Self::VoteRegistered { .. } => "vote_registered",
            Self::VoteDepositWithdrawn { .. } => "vote_deposit_withdrawn",
            Self::ProposalExecuted { .. } => "proposal_executed",
            Self::ProposalClosed { .. } => "proposal_closed",
            Self::VoteRecordCleared { .. } => "vote_record_cleared",
        }
    }
}

/// Receives events for indexers and notification hooks.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &GovernanceEvent);
}

/// Sink that keeps every event in memory.
///
/// Clones share the same buffer, so a handle can be kept after subscribing.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<GovernanceEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GovernanceEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One JSON object per line, oldest first.
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for event in self.events() {
            out.push_str(&serde_json::to_string(&event)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl EventSink for EventLog {
    fn publish(&self, event: &GovernanceEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}
