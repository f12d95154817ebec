pub mod block;
pub mod model;

pub use block::{Block, GENESIS_PREV_HASH, GENESIS_TIMESTAMP};
pub use model::Blockchain;

/// Default Proof-of-Work difficulty (number of leading zeros).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Reward credited to the miner of a block (paid out in the following block).
pub const DEFAULT_MINING_REWARD: u64 = 100;
