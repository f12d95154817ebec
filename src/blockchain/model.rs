use log::{debug, warn};

use super::{Block, DEFAULT_DIFFICULTY, DEFAULT_MINING_REWARD};
use crate::config::LedgerConfig;
use crate::error::{ChainViolation, LedgerError, Result};
use crate::hash::meets_difficulty;
use crate::transaction::Transaction;

/// Simple in-memory blockchain with Proof-of-Work and signed transfers.
#[derive(Debug)]
pub struct Blockchain {
    pub(crate) chain: Vec<Block>,
    pending_transactions: Vec<Transaction>,
    difficulty: u32,
    mining_reward: u64,
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY, DEFAULT_MINING_REWARD)
    }
}

impl Blockchain {
    /// Initialize a new blockchain with a genesis block.
    pub fn new(difficulty: u32, mining_reward: u64) -> Self {
        Self {
            chain: vec![Self::create_genesis_block()],
            pending_transactions: Vec::new(),
            difficulty,
            mining_reward,
        }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.difficulty, config.mining_reward)
    }

    pub fn create_genesis_block() -> Block {
        Block::genesis()
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        // Index 0 always holds the genesis block.
        &self.chain[self.chain.len() - 1]
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn mining_reward(&self) -> u64 {
        self.mining_reward
    }

    pub fn pending_transactions(&self) -> &[Transaction] {
        &self.pending_transactions
    }

    /// Admit a signed transfer into the pending queue. This is the only check
    /// a transaction goes through before being mined.
    pub fn add_transaction(&mut self, tx: Transaction) -> Result<()> {
        let has_payer = tx.from_address().is_some_and(|from| !from.is_empty());
        if !has_payer || tx.to_address().is_empty() {
            warn!("rejected tx {}: missing from/to address", tx.calculate_hash());
            return Err(LedgerError::IncompleteTransaction);
        }

        match tx.is_valid() {
            Ok(true) => {}
            Ok(false) => {
                warn!("rejected tx {}: signature does not verify", tx.calculate_hash());
                return Err(LedgerError::InvalidTransaction);
            }
            Err(e) => {
                warn!("rejected tx {}: {}", tx.calculate_hash(), e);
                return Err(e);
            }
        }

        debug!(
            "tx {} accepted into pending (size: {} -> {})",
            tx.calculate_hash(),
            self.pending_transactions.len(),
            self.pending_transactions.len() + 1
        );
        self.pending_transactions.push(tx);
        Ok(())
    }

    /// Mine every pending transaction into a new block and queue the reward
    /// for `reward_address`. The reward lands in the chain with the next block.
    pub fn mine_pending_transactions(&mut self, reward_address: &str) -> &Block {
        let txs = std::mem::take(&mut self.pending_transactions);
        let prev_hash = self.last_block().hash.clone();
        debug!(
            "mining block #{} with {} txs at difficulty {}",
            self.chain.len(),
            txs.len(),
            self.difficulty
        );

        let mut block = Block::new(prev_hash, txs);
        block.mine_block(self.difficulty);
        self.chain.push(block);

        self.pending_transactions = vec![Transaction::reward(reward_address, self.mining_reward)];
        self.last_block()
    }

    /// Replay the whole chain and sum what `address` received minus what it sent.
    pub fn balance_of_address(&self, address: &str) -> i128 {
        let mut balance: i128 = 0;
        for tx in self.chain.iter().flat_map(|b| b.transactions.iter()) {
            if tx.from_address() == Some(address) {
                balance -= i128::from(tx.amount);
            }
            if tx.to_address == address {
                balance += i128::from(tx.amount);
            }
        }
        balance
    }

    /// Validate the entire chain: genesis, transactions, hashes, linkage and PoW.
    /// Reports the first violation found.
    pub fn verify_chain(&self) -> std::result::Result<(), ChainViolation> {
        let genesis = &self.chain[0];
        if genesis.hash != genesis.calculate_hash()
            || genesis.hash != Self::create_genesis_block().hash
        {
            return Err(ChainViolation::GenesisModified);
        }

        for (index, pair) in self.chain.windows(2).enumerate() {
            let (prev, current) = (&pair[0], &pair[1]);
            let index = index + 1;

            if !current.has_valid_transactions() {
                return Err(ChainViolation::InvalidTransactions { index });
            }
            if current.hash != current.calculate_hash() {
                return Err(ChainViolation::HashMismatch { index });
            }
            if current.previous_hash != prev.hash {
                return Err(ChainViolation::BrokenLink { index });
            }
            if !meets_difficulty(&current.hash, self.difficulty) {
                return Err(ChainViolation::InsufficientWork {
                    index,
                    difficulty: self.difficulty,
                });
            }
        }

        Ok(())
    }

    pub fn is_chain_valid(&self) -> bool {
        match self.verify_chain() {
            Ok(()) => true,
            Err(violation) => {
                warn!("chain is corrupt: {}", violation);
                false
            }
        }
    }
}
