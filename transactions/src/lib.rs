//! Ledger transaction model consumed by the governance engine.
//!
//! The engine never submits or signs transactions. It inspects the atomic group
//! the caller submitted alongside a DAO call and, for payouts, hands back the
//! inner transactions the host must place in that same group.
//!
//! Transaction types:
//! - **Payment**: native currency transfer
//! - **AssetTransfer**: token transfer (also used for opt-ins with amount 0)
//! - **AppCall**: call into an application, carrying its foreign assets

pub mod error;
pub mod group;
pub mod hash;
pub mod validation;

pub use error::TransactionError;
pub use group::{TransactionGroup, MAX_GROUP_SIZE};
pub use validation::basic_checks;

use civitas_types::{Address, AppId, AssetId, TxId};
use serde::{Deserialize, Serialize};

/// A single ledger transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: Address,
    pub fee: u64,
    /// Arbitrary note bytes; distinguishes otherwise identical transactions.
    pub note: Vec<u8>,
    /// Zero unless the transaction rekeys the sender.
    pub rekey_to: Address,
    pub kind: TxKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    Payment(Payment),
    AssetTransfer(AssetTransfer),
    AppCall(AppCall),
}

/// Native currency payment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub receiver: Address,
    pub amount: u64,
    /// Zero unless the sender account is closed out to this address.
    pub close_remainder_to: Address,
}

/// Token transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTransfer {
    pub asset_id: AssetId,
    pub receiver: Address,
    pub amount: u64,
    /// Clawback source. Zero for a direct transfer by the sender.
    pub asset_sender: Address,
    /// Zero unless the sender's holding is closed out to this address.
    pub close_to: Address,
}

/// Application call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppCall {
    pub app_id: AppId,
    pub on_completion: OnComplete,
    pub foreign_assets: Vec<AssetId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnComplete {
    NoOp,
    OptIn,
    CloseOut,
    UpdateApplication,
    DeleteApplication,
}

impl Transaction {
    fn with_kind(sender: Address, kind: TxKind) -> Self {
        Self {
            sender,
            fee: 0,
            note: Vec::new(),
            rekey_to: Address::ZERO,
            kind,
        }
    }

    /// A plain native payment.
    pub fn payment(sender: Address, receiver: Address, amount: u64) -> Self {
        Self::with_kind(
            sender,
            TxKind::Payment(Payment {
                receiver,
                amount,
                close_remainder_to: Address::ZERO,
            }),
        )
    }

    /// A direct (non-clawback) token transfer.
    pub fn asset_transfer(
        sender: Address,
        asset_id: AssetId,
        receiver: Address,
        amount: u64,
    ) -> Self {
        Self::with_kind(
            sender,
            TxKind::AssetTransfer(AssetTransfer {
                asset_id,
                receiver,
                amount,
                asset_sender: Address::ZERO,
                close_to: Address::ZERO,
            }),
        )
    }

    /// A no-op application call.
    pub fn app_call(sender: Address, app_id: AppId) -> Self {
        Self::with_kind(
            sender,
            TxKind::AppCall(AppCall {
                app_id,
                on_completion: OnComplete::NoOp,
                foreign_assets: Vec::new(),
            }),
        )
    }

    pub fn with_note(mut self, note: impl Into<Vec<u8>>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_rekey_to(mut self, rekey_to: Address) -> Self {
        self.rekey_to = rekey_to;
        self
    }

    /// Set the application call's foreign assets. No effect on other kinds.
    pub fn with_foreign_assets(mut self, assets: Vec<AssetId>) -> Self {
        if let TxKind::AppCall(call) = &mut self.kind {
            call.foreign_assets = assets;
        }
        self
    }

    /// Set the application call's completion action. No effect on other kinds.
    pub fn with_on_completion(mut self, on_completion: OnComplete) -> Self {
        if let TxKind::AppCall(call) = &mut self.kind {
            call.on_completion = on_completion;
        }
        self
    }

    /// Set the payment close-out target. No effect on other kinds.
    pub fn with_close_remainder_to(mut self, to: Address) -> Self {
        if let TxKind::Payment(pay) = &mut self.kind {
            pay.close_remainder_to = to;
        }
        self
    }

    /// Set the asset close-out target. No effect on other kinds.
    pub fn with_asset_close_to(mut self, to: Address) -> Self {
        if let TxKind::AssetTransfer(xfer) = &mut self.kind {
            xfer.close_to = to;
        }
        self
    }

    /// Turn an asset transfer into a clawback from `source`. No effect on other kinds.
    pub fn with_asset_sender(mut self, source: Address) -> Self {
        if let TxKind::AssetTransfer(xfer) = &mut self.kind {
            xfer.asset_sender = source;
        }
        self
    }

    /// The transaction id: Blake2b-256 over the canonical field encoding.
    pub fn id(&self) -> TxId {
        hash::tx_id(self)
    }

    pub fn as_payment(&self) -> Option<&Payment> {
        match &self.kind {
            TxKind::Payment(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_app_call(&self) -> Option<&AppCall> {
        match &self.kind {
            TxKind::AppCall(c) => Some(c),
            _ => None,
        }
    }

    /// Short name of the transaction type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            TxKind::Payment(_) => "pay",
            TxKind::AssetTransfer(_) => "axfer",
            TxKind::AppCall(_) => "appl",
        }
    }
}
