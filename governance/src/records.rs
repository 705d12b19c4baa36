//! Typed access to the byte-oriented governance store.

use crate::error::GovernanceError;
use crate::params::DaoParams;
use crate::proposal::Proposal;
use crate::voter::VoterAccount;
use civitas_store::{GovernanceStore, MetaStore, RecordKey, WriteBatch};
use civitas_types::Address;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Meta key under which the DAO parameters are persisted.
pub const PARAMS_META_KEY: &str = "dao_params";

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, GovernanceError> {
    bincode::serialize(value).map_err(|e| GovernanceError::Codec(e.to_string()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, GovernanceError> {
    bincode::deserialize(bytes).map_err(|e| GovernanceError::Codec(e.to_string()))
}

/// Wraps a store and (de)serializes governance records with bincode.
pub struct RecordStore<S> {
    store: S,
}

impl<S: GovernanceStore + MetaStore> RecordStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn proposal(&self, account: &Address) -> Result<Option<Proposal>, GovernanceError> {
        self.store
            .get_proposal(account)?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    /// A voter with no record reads as an empty account.
    pub fn voter(&self, voter: &Address) -> Result<VoterAccount, GovernanceError> {
        Ok(self
            .store
            .get_voter(voter)?
            .map(|bytes| decode(&bytes))
            .transpose()?
            .unwrap_or_default())
    }

    pub fn proposal_accounts(&self) -> Result<Vec<Address>, GovernanceError> {
        Ok(self.store.list_proposals()?)
    }

    pub fn params(&self) -> Result<Option<DaoParams>, GovernanceError> {
        self.store
            .get_meta(PARAMS_META_KEY)?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    pub fn put_params(&self, params: &DaoParams) -> Result<(), GovernanceError> {
        Ok(self.store.put_meta(PARAMS_META_KEY, &encode(params)?)?)
    }

    pub fn commit(&self, batch: WriteBatch) -> Result<(), GovernanceError> {
        Ok(self.store.commit(batch)?)
    }
}

/// Stage typed record writes into a [`WriteBatch`].
pub trait StageRecords {
    fn put_proposal(&mut self, account: Address, proposal: &Proposal) -> Result<(), GovernanceError>;
    fn put_voter(&mut self, voter: Address, account: &VoterAccount) -> Result<(), GovernanceError>;
    fn delete_proposal(&mut self, account: Address);
}

impl StageRecords for WriteBatch {
    fn put_proposal(&mut self, account: Address, proposal: &Proposal) -> Result<(), GovernanceError> {
        self.put(RecordKey::Proposal(account), encode(proposal)?);
        Ok(())
    }

    fn put_voter(&mut self, voter: Address, account: &VoterAccount) -> Result<(), GovernanceError> {
        self.put(RecordKey::Voter(voter), encode(account)?);
        Ok(())
    }

    fn delete_proposal(&mut self, account: Address) {
        self.delete(RecordKey::Proposal(account));
    }
}
