//! Nullable store: thread-safe in-memory governance storage for testing.

use civitas_store::{BatchOp, GovernanceStore, MetaStore, RecordKey, StoreError, WriteBatch};
use civitas_types::Address;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    proposals: HashMap<Address, Vec<u8>>,
    voters: HashMap<Address, Vec<u8>>,
    meta: HashMap<String, Vec<u8>>,
}

/// An in-memory governance + meta store.
///
/// Clones share the same tables. `fail_commits` makes every later commit fail
/// without applying anything, for exercising error paths.
#[derive(Clone, Default)]
pub struct NullGovernanceStore {
    tables: Arc<Mutex<Tables>>,
    fail_commits: Arc<AtomicBool>,
    commits: Arc<AtomicUsize>,
}

impl NullGovernanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent commits fail (or succeed again).
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    /// Number of batches applied so far.
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn voter_count(&self) -> usize {
        self.lock().map(|t| t.voters.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|e| StoreError::Backend(format!("poisoned lock: {e}")))
    }
}

impl GovernanceStore for NullGovernanceStore {
    fn get_proposal(&self, account: &Address) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.lock()?.proposals.get(account).cloned())
    }

    fn get_voter(&self, voter: &Address) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.lock()?.voters.get(voter).cloned())
    }

    fn list_proposals(&self) -> Result<Vec<Address>, StoreError> {
        let mut accounts: Vec<Address> = self.lock()?.proposals.keys().copied().collect();
        accounts.sort();
        Ok(accounts)
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("commit refused by test store".into()));
        }
        // One lock for the whole batch: readers never observe half of it.
        let mut tables = self.lock()?;
        for op in batch.into_ops() {
            match op {
                BatchOp::Put { key: RecordKey::Proposal(a), value } => {
                    tables.proposals.insert(a, value);
                }
                BatchOp::Put { key: RecordKey::Voter(a), value } => {
                    tables.voters.insert(a, value);
                }
                BatchOp::Delete { key: RecordKey::Proposal(a) } => {
                    tables.proposals.remove(&a);
                }
                BatchOp::Delete { key: RecordKey::Voter(a) } => {
                    tables.voters.remove(&a);
                }
            }
        }
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl MetaStore for NullGovernanceStore {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.lock()?.meta.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.lock()?.meta.get(key).cloned())
    }

    fn delete_meta(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.meta.remove(key);
        Ok(())
    }
}
