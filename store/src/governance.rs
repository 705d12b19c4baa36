//! Governance storage trait.

use crate::{StoreError, WriteBatch};
use civitas_types::Address;

/// Trait for storing governance records (proposals and voter accounts).
pub trait GovernanceStore {
    /// Get the encoded proposal recorded on a proposer account.
    fn get_proposal(&self, account: &Address) -> Result<Option<Vec<u8>>, StoreError>;

    /// Get a voter's encoded account record.
    fn get_voter(&self, voter: &Address) -> Result<Option<Vec<u8>>, StoreError>;

    /// List every account that currently holds a proposal.
    fn list_proposals(&self) -> Result<Vec<Address>, StoreError>;

    /// Apply all ops of a batch atomically.
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}
