//! Single-node proof-of-work ledger: signed transfers batched into mined,
//! hash-linked blocks, with balances derived by replaying the chain.

pub mod blockchain;
pub mod config;
pub mod error;
pub mod hash;
pub mod transaction;
pub mod wallet;

pub use blockchain::{Block, Blockchain};
pub use config::LedgerConfig;
pub use error::{ChainViolation, LedgerError};
pub use transaction::Transaction;
pub use wallet::Keypair;
