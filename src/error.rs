use thiserror::Error;

/// Errors raised while signing, checking or admitting transactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("cannot sign transactions for other wallets")]
    UnauthorizedSigner,

    #[error("no signature in this transaction")]
    MissingSignature,

    #[error("transaction must have a from and a to address")]
    IncompleteTransaction,

    #[error("cannot add invalid transaction to the chain")]
    InvalidTransaction,

    #[error("crypto error: {0}")]
    Crypto(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// First rule a chain failed during verification. Advisory only: callers
/// decide whether a corrupt chain is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainViolation {
    #[error("genesis block was modified")]
    GenesisModified,

    #[error("block #{index} contains an invalid transaction")]
    InvalidTransactions { index: usize },

    #[error("block #{index} hash does not match its content")]
    HashMismatch { index: usize },

    #[error("block #{index} does not link to the previous block hash")]
    BrokenLink { index: usize },

    #[error("block #{index} hash does not meet difficulty {difficulty}")]
    InsufficientWork { index: usize, difficulty: u32 },
}
