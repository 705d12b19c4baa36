use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("transaction group is empty")]
    EmptyGroup,

    #[error("transaction group has {size} transactions, limit is {limit}")]
    GroupTooLarge { size: usize, limit: usize },

    #[error("transaction {index} rekeys its sender")]
    RekeyNotAllowed { index: usize },

    #[error("transaction {index} closes out the sender's balance")]
    CloseRemainderNotAllowed { index: usize },

    #[error("transaction {index} closes out the sender's asset holding")]
    AssetCloseNotAllowed { index: usize },
}
