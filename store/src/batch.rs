//! Atomic write batches.
//!
//! An engine operation stages all of its record changes in one [`WriteBatch`]
//! and hands it to [`GovernanceStore::commit`](crate::GovernanceStore::commit),
//! which must apply every op or none.

use civitas_types::Address;

/// Key of a governance record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// Proposal recorded on a proposer account.
    Proposal(Address),
    /// Voter deposit and vote bookkeeping.
    Voter(Address),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchOp {
    Put { key: RecordKey, value: Vec<u8> },
    Delete { key: RecordKey },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<BatchOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: RecordKey, value: Vec<u8>) -> &mut Self {
        self.ops.push(BatchOp::Put { key, value });
        self
    }

    pub fn delete(&mut self, key: RecordKey) -> &mut Self {
        self.ops.push(BatchOp::Delete { key });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<BatchOp> {
        self.ops
    }
}
