use pow_ledger::wallet::generate_keypair_hex;

fn main() {
    let (private_key, public_key, address) = generate_keypair_hex();
    println!("Your private key is: {private_key}");
    println!("Your public key is: {public_key}");
    println!("Your address is: {address}");
}
