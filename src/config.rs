use std::env;

use crate::blockchain::{DEFAULT_DIFFICULTY, DEFAULT_MINING_REWARD};

/// Tunables of a ledger instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    pub difficulty: u32,
    pub mining_reward: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            mining_reward: DEFAULT_MINING_REWARD,
        }
    }
}

impl LedgerConfig {
    /// Read `LEDGER_DIFFICULTY` and `LEDGER_MINING_REWARD` (after loading `.env`).
    /// Missing or unparseable values keep their defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            difficulty: lookup("LEDGER_DIFFICULTY")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.difficulty),
            mining_reward: lookup("LEDGER_MINING_REWARD")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.mining_reward),
        }
    }
}
