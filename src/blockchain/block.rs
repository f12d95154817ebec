use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::hash::{meets_difficulty, sha256_hex};
use crate::transaction::Transaction;

/// Fixed timestamp of the genesis block, so every chain starts from the same block.
pub const GENESIS_TIMESTAMP: i64 = 0;

/// `previous_hash` of the genesis block.
pub const GENESIS_PREV_HASH: &str = "0";

/// A batch of transactions linked to its predecessor by hash.
///
/// Built and mined as an owned value; once handed to the `Blockchain` it is
/// only reachable through shared references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub(crate) timestamp: i64, // Unix millis (UTC)
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) previous_hash: String,
    pub(crate) nonce: u64,   // Proof-of-Work nonce
    pub(crate) hash: String, // Cached hash of the block
}

impl Block {
    /// Create the genesis block (first block in the chain). Never mined.
    pub fn genesis() -> Self {
        let mut block = Self {
            timestamp: GENESIS_TIMESTAMP,
            transactions: Vec::new(),
            previous_hash: GENESIS_PREV_HASH.to_string(),
            nonce: 0,
            hash: String::new(),
        };
        block.hash = block.calculate_hash();
        block
    }

    /// Create a new block (not mined yet). Call `mine_block()` to perform PoW.
    pub fn new(previous_hash: impl Into<String>, transactions: Vec<Transaction>) -> Self {
        Self::new_with_timestamp(previous_hash, transactions, Utc::now().timestamp_millis())
    }

    pub fn new_with_timestamp(
        previous_hash: impl Into<String>,
        transactions: Vec<Transaction>,
        timestamp: i64,
    ) -> Self {
        let mut block = Self {
            timestamp,
            transactions,
            previous_hash: previous_hash.into(),
            nonce: 0,
            hash: String::new(),
        };
        block.hash = block.calculate_hash();
        block
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Compute the SHA-256 hash of this block using its fields
    /// (excluding the `hash` field itself). Transactions are serialized
    /// as JSON in order, so reordering them changes the hash.
    pub fn calculate_hash(&self) -> String {
        let txs_json = serde_json::to_string(&self.transactions).expect("serialize txs");
        let preimage = format!(
            "{}:{}:{}:{}",
            self.timestamp, self.previous_hash, self.nonce, txs_json
        );
        sha256_hex(preimage.as_bytes())
    }

    /// Perform Proof-of-Work by finding a nonce that yields a hash
    /// starting with `difficulty` leading zeros (in hex).
    pub fn mine_block(&mut self, difficulty: u32) {
        self.hash = self.calculate_hash();
        while !meets_difficulty(&self.hash, difficulty) {
            self.nonce = self.nonce.wrapping_add(1);
            self.hash = self.calculate_hash();
        }
        debug!("nonce {} satisfies difficulty {}", self.nonce, difficulty);
        info!("Block mined: {}", self.hash);
    }

    /// False on the first transaction that is invalid or cannot be checked.
    pub fn has_valid_transactions(&self) -> bool {
        self.transactions.iter().all(|tx| match tx.is_valid() {
            Ok(valid) => valid,
            Err(e) => {
                warn!("tx {} failed validation: {}", tx.calculate_hash(), e);
                false
            }
        })
    }

    /// Cached `hash` matches the content and satisfies the PoW difficulty.
    /// Does NOT validate chain linkage or transactions.
    pub fn is_valid(&self, difficulty: u32) -> bool {
        self.hash == self.calculate_hash() && meets_difficulty(&self.hash, difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::leading_zero_digits;
    use crate::wallet::Keypair;

    fn signed_tx(amount: u64) -> Transaction {
        let kp = Keypair::generate();
        let mut tx = Transaction::new(kp.address(), "recipient", amount);
        tx.sign(&kp).unwrap();
        tx
    }

    #[test]
    fn genesis_is_fixed() {
        let a = Block::genesis();
        let b = Block::genesis();
        assert_eq!(a.hash, b.hash);
        assert_eq!(a.hash, a.calculate_hash());
        assert_eq!(a.previous_hash, GENESIS_PREV_HASH);
        assert!(a.transactions.is_empty());
        assert_eq!(a.nonce, 0);
    }

    #[test]
    fn mining_produces_leading_zeros() {
        for difficulty in 0..=3 {
            let mut b = Block::new("prev", vec![Transaction::reward("miner", 100)]);
            b.mine_block(difficulty);
            assert!(leading_zero_digits(&b.hash) >= difficulty as usize);
            assert_eq!(b.hash, b.calculate_hash());
            assert!(b.is_valid(difficulty));
        }
    }

    #[test]
    fn difficulty_zero_keeps_nonce() {
        let mut b = Block::new("prev", vec![]);
        b.mine_block(0);
        assert_eq!(b.nonce, 0);
    }

    #[test]
    fn hash_changes_with_each_field() {
        let base = Block::new_with_timestamp("prev", vec![signed_tx(1)], 1_700_000_000_000);
        let h = base.calculate_hash();

        let mut b = base.clone();
        b.nonce += 1;
        assert_ne!(h, b.calculate_hash());

        let mut b = base.clone();
        b.timestamp += 1;
        assert_ne!(h, b.calculate_hash());

        let mut b = base.clone();
        b.previous_hash = "other".into();
        assert_ne!(h, b.calculate_hash());

        let mut b = base.clone();
        b.transactions[0].amount = 2;
        assert_ne!(h, b.calculate_hash());
    }

    #[test]
    fn transaction_order_is_hashed() {
        let t1 = signed_tx(1);
        let t2 = signed_tx(2);
        let a = Block::new_with_timestamp("prev", vec![t1.clone(), t2.clone()], 42);
        let b = Block::new_with_timestamp("prev", vec![t2, t1], 42);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn invalid_when_mutated() {
        let mut b = Block::new("prev", vec![signed_tx(3)]);
        b.mine_block(2);
        let old_hash = b.hash.clone();

        b.transactions.push(Transaction::reward("forger", 1_000));

        assert_ne!(old_hash, b.calculate_hash());
        assert!(!b.is_valid(2));
    }

    #[test]
    fn detects_invalid_transactions() {
        let good = Block::new("prev", vec![signed_tx(1), Transaction::reward("m", 5)]);
        assert!(good.has_valid_transactions());

        let kp = Keypair::generate();
        let unsigned = Transaction::new(kp.address(), "bob", 1);
        let missing_sig = Block::new("prev", vec![signed_tx(1), unsigned]);
        assert!(!missing_sig.has_valid_transactions());

        let mut forged = signed_tx(1);
        forged.amount = 99;
        let bad_sig = Block::new("prev", vec![forged]);
        assert!(!bad_sig.has_valid_transactions());
    }
}
