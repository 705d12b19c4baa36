//! Atomic transaction groups.

use crate::error::TransactionError;
use crate::hash::blake2b_256_multi;
use crate::Transaction;
use civitas_types::TxId;
use serde::{Deserialize, Serialize};

/// Largest group the ledger accepts.
pub const MAX_GROUP_SIZE: usize = 16;

/// An ordered set of transactions that commit together or not at all.
///
/// Index 0 is the DAO application call; companion transfers follow it.
/// Deserialization goes through [`TransactionGroup::new`], so a decoded group
/// is never empty or oversized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGroup")]
pub struct TransactionGroup {
    txns: Vec<Transaction>,
}

#[derive(Deserialize)]
struct RawGroup {
    txns: Vec<Transaction>,
}

impl TryFrom<RawGroup> for TransactionGroup {
    type Error = TransactionError;

    fn try_from(raw: RawGroup) -> Result<Self, Self::Error> {
        Self::new(raw.txns)
    }
}

impl TransactionGroup {
    pub fn new(txns: Vec<Transaction>) -> Result<Self, TransactionError> {
        if txns.is_empty() {
            return Err(TransactionError::EmptyGroup);
        }
        if txns.len() > MAX_GROUP_SIZE {
            return Err(TransactionError::GroupTooLarge {
                size: txns.len(),
                limit: MAX_GROUP_SIZE,
            });
        }
        Ok(Self { txns })
    }

    /// A group holding one transaction.
    pub fn single(tx: Transaction) -> Self {
        Self { txns: vec![tx] }
    }

    pub fn len(&self) -> usize {
        self.txns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.txns.get(index)
    }

    /// The leading transaction (always present).
    pub fn first(&self) -> &Transaction {
        &self.txns[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.txns.iter()
    }

    /// Group id: Blake2b-256 over the member ids in order.
    pub fn group_id(&self) -> TxId {
        let ids: Vec<TxId> = self.iter().map(Transaction::id).collect();
        let mut parts: Vec<&[u8]> = Vec::with_capacity(ids.len() + 1);
        parts.push(b"TG");
        for id in &ids {
            parts.push(id.as_bytes());
        }
        TxId::new(blake2b_256_multi(&parts))
    }
}
