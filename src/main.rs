use std::env;

use log::{info, warn};
use pow_ledger::{Blockchain, Keypair, LedgerConfig, Transaction};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = LedgerConfig::from_env();
    env_logger::init();

    let me = match env::var("LEDGER_PRIVATE_KEY") {
        Ok(key) => Keypair::from_private_key_hex(&key)?,
        Err(_) => {
            warn!("LEDGER_PRIVATE_KEY not set, using a throwaway key");
            Keypair::generate()
        }
    };
    let recipient = Keypair::generate();

    println!(
        "⛓️ Starting ledger (difficulty={}, reward={})",
        config.difficulty, config.mining_reward
    );

    let mut blockchain = Blockchain::from_config(&config);

    let mut tx = Transaction::new(me.address(), recipient.address(), 100);
    tx.sign(&me)?;
    blockchain.add_transaction(tx)?;

    info!("Starting the miner...");
    blockchain.mine_pending_transactions(me.address());
    blockchain.mine_pending_transactions(me.address());

    println!("{}", serde_json::to_string_pretty(blockchain.blocks())?);
    println!("Balance of {}: {}", me.address(), blockchain.balance_of_address(me.address()));
    println!(
        "Balance of {}: {}",
        recipient.address(),
        blockchain.balance_of_address(recipient.address())
    );
    println!("Chain valid: {}", blockchain.is_chain_valid());

    Ok(())
}
