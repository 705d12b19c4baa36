//! Companion-transfer verification.
//!
//! DAO calls that move value are paired with a transfer elsewhere in the same
//! atomic group: the entry deposit of `add_proposal`, the voter deposit of
//! `deposit_vote_token`, the payout of `execute`. The engine only states what
//! it expects; a [`TransferVerifier`] decides whether the group delivers it.

use civitas_transactions::{Transaction, TransactionGroup, TxKind};
use civitas_types::{Address, AssetId};
use thiserror::Error;

/// Currency a transfer moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferAsset {
    Native,
    Token(AssetId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmountRule {
    Exactly(u64),
    /// Any non-negative amount; the verified amount is returned to the caller.
    Any,
}

/// A transfer the engine needs to see at a given group position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpectedTransfer {
    pub asset: TransferAsset,
    /// `None` accepts any sender.
    pub sender: Option<Address>,
    pub receiver: Address,
    pub amount: AmountRule,
}

impl ExpectedTransfer {
    pub fn native(sender: Address, receiver: Address, amount: u64) -> Self {
        Self {
            asset: TransferAsset::Native,
            sender: Some(sender),
            receiver,
            amount: AmountRule::Exactly(amount),
        }
    }

    pub fn token(asset_id: AssetId, receiver: Address, amount: AmountRule) -> Self {
        Self {
            asset: TransferAsset::Token(asset_id),
            sender: None,
            receiver,
            amount,
        }
    }

    pub fn from_sender(mut self, sender: Address) -> Self {
        self.sender = Some(sender);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransferMismatch {
    #[error("no transaction at group index {index}")]
    Missing { index: usize },

    #[error("group index {index} is a {found}, expected a {expected}")]
    WrongType {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("transfer moves {found}, expected {expected}")]
    WrongAsset { expected: AssetId, found: AssetId },

    #[error("transfer sent by {found}, expected {expected}")]
    WrongSender { expected: Address, found: Address },

    #[error("transfer pays {found}, expected {expected}")]
    WrongReceiver { expected: Address, found: Address },

    #[error("transfer amount {found}, expected {expected}")]
    WrongAmount { expected: u64, found: u64 },

    #[error("clawback transfers are not accepted")]
    Clawback,

    #[error("transfer rekeys its sender")]
    Rekeyed,

    #[error("transfer closes out its sender")]
    ClosesOut,

    #[error("group has {found} transactions, expected {expected}")]
    GroupSize { expected: usize, found: usize },
}

/// Confirms that a group carries an expected transfer.
pub trait TransferVerifier: Send + Sync {
    /// Check the transaction at `index`. Returns the verified amount.
    fn verify(
        &self,
        group: &TransactionGroup,
        index: usize,
        expected: &ExpectedTransfer,
    ) -> Result<u64, TransferMismatch>;
}

/// Verifies transfers by inspecting the submitted group directly.
///
/// Beyond the expectation itself it always requires a plain transfer: no
/// rekey, no close-out, no clawback.
#[derive(Clone, Copy, Debug, Default)]
pub struct GroupInspector;

impl GroupInspector {
    fn check_amount(rule: AmountRule, found: u64) -> Result<u64, TransferMismatch> {
        match rule {
            AmountRule::Exactly(expected) if expected != found => {
                Err(TransferMismatch::WrongAmount { expected, found })
            }
            _ => Ok(found),
        }
    }
}

impl TransferVerifier for GroupInspector {
    fn verify(
        &self,
        group: &TransactionGroup,
        index: usize,
        expected: &ExpectedTransfer,
    ) -> Result<u64, TransferMismatch> {
        let tx: &Transaction = group.get(index).ok_or(TransferMismatch::Missing { index })?;

        if !tx.rekey_to.is_zero() {
            return Err(TransferMismatch::Rekeyed);
        }
        if let Some(sender) = expected.sender {
            if tx.sender != sender {
                return Err(TransferMismatch::WrongSender {
                    expected: sender,
                    found: tx.sender,
                });
            }
        }

        let (receiver, amount) = match (&tx.kind, expected.asset) {
            (TxKind::Payment(pay), TransferAsset::Native) => {
                if !pay.close_remainder_to.is_zero() {
                    return Err(TransferMismatch::ClosesOut);
                }
                (pay.receiver, pay.amount)
            }
            (TxKind::AssetTransfer(xfer), TransferAsset::Token(asset_id)) => {
                if xfer.asset_id != asset_id {
                    return Err(TransferMismatch::WrongAsset {
                        expected: asset_id,
                        found: xfer.asset_id,
                    });
                }
                if !xfer.asset_sender.is_zero() {
                    return Err(TransferMismatch::Clawback);
                }
                if !xfer.close_to.is_zero() {
                    return Err(TransferMismatch::ClosesOut);
                }
                (xfer.receiver, xfer.amount)
            }
            (_, asset) => {
                return Err(TransferMismatch::WrongType {
                    index,
                    expected: match asset {
                        TransferAsset::Native => "pay",
                        TransferAsset::Token(_) => "axfer",
                    },
                    found: tx.type_name(),
                })
            }
        };

        if receiver != expected.receiver {
            return Err(TransferMismatch::WrongReceiver {
                expected: expected.receiver,
                found: receiver,
            });
        }
        Self::check_amount(expected.amount, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civitas_types::AppId;

    const GOV: AssetId = AssetId(7);

    fn addr(seed: u8) -> Address {
        Address::new([seed; 32])
    }

    fn group(second: Transaction) -> TransactionGroup {
        TransactionGroup::new(vec![Transaction::app_call(addr(1), AppId(1)), second]).unwrap()
    }

    #[test]
    fn accepts_exact_token_deposit() {
        let g = group(Transaction::asset_transfer(addr(1), GOV, addr(9), 15));
        let expected = ExpectedTransfer::token(GOV, addr(9), AmountRule::Exactly(15));
        assert_eq!(GroupInspector.verify(&g, 1, &expected), Ok(15));
    }

    #[test]
    fn any_amount_reports_what_was_sent() {
        let g = group(Transaction::asset_transfer(addr(1), GOV, addr(9), 42));
        let expected = ExpectedTransfer::token(GOV, addr(9), AmountRule::Any).from_sender(addr(1));
        assert_eq!(GroupInspector.verify(&g, 1, &expected), Ok(42));
    }

    #[test]
    fn reports_each_mismatch() {
        let expected = ExpectedTransfer::token(GOV, addr(9), AmountRule::Exactly(15));
        let cases = [
            (
                Transaction::asset_transfer(addr(1), GOV, addr(9), 14),
                TransferMismatch::WrongAmount {
                    expected: 15,
                    found: 14,
                },
            ),
            (
                Transaction::asset_transfer(addr(1), AssetId(8), addr(9), 15),
                TransferMismatch::WrongAsset {
                    expected: GOV,
                    found: AssetId(8),
                },
            ),
            (
                Transaction::asset_transfer(addr(1), GOV, addr(3), 15),
                TransferMismatch::WrongReceiver {
                    expected: addr(9),
                    found: addr(3),
                },
            ),
            (
                Transaction::asset_transfer(addr(1), GOV, addr(9), 15).with_rekey_to(addr(4)),
                TransferMismatch::Rekeyed,
            ),
            (
                Transaction::asset_transfer(addr(1), GOV, addr(9), 15).with_asset_sender(addr(5)),
                TransferMismatch::Clawback,
            ),
            (
                Transaction::asset_transfer(addr(1), GOV, addr(9), 15).with_asset_close_to(addr(5)),
                TransferMismatch::ClosesOut,
            ),
            (
                Transaction::payment(addr(1), addr(9), 15),
                TransferMismatch::WrongType {
                    index: 1,
                    expected: "axfer",
                    found: "pay",
                },
            ),
        ];
        for (tx, mismatch) in cases {
            assert_eq!(GroupInspector.verify(&group(tx), 1, &expected), Err(mismatch));
        }
    }

    #[test]
    fn native_payment_checks_sender_and_close_out() {
        let expected = ExpectedTransfer::native(addr(2), addr(3), 1000);
        let ok = group(Transaction::payment(addr(2), addr(3), 1000));
        assert_eq!(GroupInspector.verify(&ok, 1, &expected), Ok(1000));

        let wrong_sender = group(Transaction::payment(addr(4), addr(3), 1000));
        assert_eq!(
            GroupInspector.verify(&wrong_sender, 1, &expected),
            Err(TransferMismatch::WrongSender {
                expected: addr(2),
                found: addr(4)
            })
        );

        let closing =
            group(Transaction::payment(addr(2), addr(3), 1000).with_close_remainder_to(addr(6)));
        assert_eq!(
            GroupInspector.verify(&closing, 1, &expected),
            Err(TransferMismatch::ClosesOut)
        );
    }

    #[test]
    fn missing_position() {
        let g = TransactionGroup::single(Transaction::app_call(addr(1), AppId(1)));
        let expected = ExpectedTransfer::native(addr(2), addr(3), 1);
        assert_eq!(
            GroupInspector.verify(&g, 1, &expected),
            Err(TransferMismatch::Missing { index: 1 })
        );
    }
}
