//! Fundamental types for the Civitas governance engine.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account addresses, transaction ids, asset and application ids, timestamps and
//! the clock abstraction the engine reads time through.

pub mod address;
pub mod asset;
pub mod error;
pub mod hash;
pub mod time;

pub use address::Address;
pub use asset::{AppId, AssetId};
pub use error::TypeError;
pub use hash::TxId;
pub use time::{Clock, SystemClock, Timestamp};
