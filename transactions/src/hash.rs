//! Blake2b hashing of transactions and groups.

use crate::{Transaction, TxKind};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use civitas_types::TxId;

type Blake2b256 = Blake2b<U32>;

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute the id of a transaction.
///
/// Every field is fed to the hasher in a fixed order with little-endian
/// integers and length-prefixed variable fields, so encoding cannot fail and
/// distinct transactions never share a preimage.
pub fn tx_id(tx: &Transaction) -> TxId {
    let mut hasher = Blake2b256::new();
    hasher.update(b"TX");
    hasher.update(tx.sender.as_bytes());
    hasher.update(tx.fee.to_le_bytes());
    hasher.update((tx.note.len() as u64).to_le_bytes());
    hasher.update(&tx.note);
    hasher.update(tx.rekey_to.as_bytes());
    match &tx.kind {
        TxKind::Payment(pay) => {
            hasher.update([0u8]);
            hasher.update(pay.receiver.as_bytes());
            hasher.update(pay.amount.to_le_bytes());
            hasher.update(pay.close_remainder_to.as_bytes());
        }
        TxKind::AssetTransfer(xfer) => {
            hasher.update([1u8]);
            hasher.update(xfer.asset_id.0.to_le_bytes());
            hasher.update(xfer.receiver.as_bytes());
            hasher.update(xfer.amount.to_le_bytes());
            hasher.update(xfer.asset_sender.as_bytes());
            hasher.update(xfer.close_to.as_bytes());
        }
        TxKind::AppCall(call) => {
            hasher.update([2u8]);
            hasher.update(call.app_id.0.to_le_bytes());
            hasher.update([call.on_completion as u8]);
            hasher.update((call.foreign_assets.len() as u64).to_le_bytes());
            for asset in &call.foreign_assets {
                hasher.update(asset.0.to_le_bytes());
            }
        }
    }
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    TxId::new(output)
}
