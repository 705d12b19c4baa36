//! Abstract storage traits for the governance engine.
//!
//! Every storage backend (embedded database, in-memory for testing) implements
//! these traits. The engine depends only on the traits and stores opaque,
//! already-encoded records.

pub mod batch;
pub mod error;
pub mod governance;
pub mod meta;

pub use batch::{BatchOp, RecordKey, WriteBatch};
pub use error::StoreError;
pub use governance::GovernanceStore;
pub use meta::MetaStore;
