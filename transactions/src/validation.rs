//! Stateless transaction checks.

use crate::error::TransactionError;
use crate::{Transaction, TxKind};

/// Reject a transaction that rekeys its sender or closes out a balance.
///
/// Any account the DAO pays from or refunds through must keep its key and its
/// holdings; `index` is the transaction's position in its group, for reporting.
pub fn basic_checks(tx: &Transaction, index: usize) -> Result<(), TransactionError> {
    if !tx.rekey_to.is_zero() {
        return Err(TransactionError::RekeyNotAllowed { index });
    }
    match &tx.kind {
        TxKind::Payment(pay) if !pay.close_remainder_to.is_zero() => {
            Err(TransactionError::CloseRemainderNotAllowed { index })
        }
        TxKind::AssetTransfer(xfer) if !xfer.close_to.is_zero() => {
            Err(TransactionError::AssetCloseNotAllowed { index })
        }
        _ => Ok(()),
    }
}
