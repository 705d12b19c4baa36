//! Metadata storage trait.

use crate::StoreError;

/// Key-value store for singleton records such as the DAO parameters.
pub trait MetaStore {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn delete_meta(&self, key: &str) -> Result<(), StoreError>;
}
