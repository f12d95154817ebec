use rand::rngs::OsRng;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey, ecdsa::Signature};

use crate::error::{LedgerError, Result};

fn crypto_err(msg: &str) -> LedgerError {
    LedgerError::Crypto(msg.to_string())
}

/// A secp256k1 signing key together with its address.
#[derive(Debug, Clone)]
pub struct Keypair {
    private_key: String,
    address: String,
}

impl Keypair {
    /// Fresh random keypair.
    pub fn generate() -> Self {
        let (private_key, _, address) = generate_keypair_hex();
        Self {
            private_key,
            address,
        }
    }

    /// Rebuild a keypair from a hex-encoded private key.
    pub fn from_private_key_hex(private_hex: &str) -> Result<Self> {
        let address = derive_public_key_hex(private_hex)?;
        Ok(Self {
            private_key: private_hex.trim().to_lowercase(),
            address,
        })
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Wallet address (hex of the compressed public key).
    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Generate a new secp256k1 keypair and return (priv_hex, pub_hex_compressed, address_hex).
/// Address is simply the hex of the compressed public key.
pub fn generate_keypair_hex() -> (String, String, String) {
    let secp = Secp256k1::new();
    let (sk, pk) = secp.generate_keypair(&mut OsRng);
    let sk_hex = hex::encode(sk.secret_bytes());
    let pk_hex = hex::encode(pk.serialize());
    let address = pk_hex.clone();
    (sk_hex, pk_hex, address)
}

fn parse_secret_key(private_hex: &str) -> Result<SecretKey> {
    let bytes = hex::decode(private_hex.trim()).map_err(|_| crypto_err("invalid private key hex"))?;
    SecretKey::from_slice(&bytes).map_err(|_| crypto_err("invalid private key bytes"))
}

fn parse_public_key(pubkey_hex: &str) -> Result<PublicKey> {
    let bytes = hex::decode(pubkey_hex.trim()).map_err(|_| crypto_err("invalid pubkey hex"))?;
    PublicKey::from_slice(&bytes).map_err(|_| crypto_err("invalid pubkey bytes"))
}

/// Derive the address (compressed public key hex) owned by a private key.
pub fn derive_public_key_hex(private_hex: &str) -> Result<String> {
    let secp = Secp256k1::signing_only();
    let sk = parse_secret_key(private_hex)?;
    Ok(hex::encode(PublicKey::from_secret_key(&secp, &sk).serialize()))
}

/// Derive address (hex of compressed pubkey) from a given hex pubkey.
/// Accepts compressed or uncompressed encodings and returns normalized lowercase hex.
pub fn pubkey_to_address_hex(pubkey_hex: &str) -> Result<String> {
    let pk = parse_public_key(pubkey_hex)?;
    Ok(hex::encode(pk.serialize()))
}

/// Sign a 32-byte digest, returning the hex DER ECDSA signature.
pub fn sign_digest_hex(private_hex: &str, msg32: [u8; 32]) -> Result<String> {
    let secp = Secp256k1::signing_only();
    let sk = parse_secret_key(private_hex)?;
    let msg = Message::from_slice(&msg32).map_err(|_| crypto_err("invalid message length"))?;
    let sig = secp.sign_ecdsa(&msg, &sk);
    Ok(hex::encode(&*sig.serialize_der()))
}

/// Verify a signature (hex DER) against the given pubkey (hex) and message hash (32 bytes).
/// Malformed encodings are errors; a well-formed signature that does not match is `Ok(false)`.
pub fn verify_signature_hex(pubkey_hex: &str, sig_hex: &str, msg32: [u8; 32]) -> Result<bool> {
    let secp = Secp256k1::verification_only();

    let sig_bytes = hex::decode(sig_hex).map_err(|_| crypto_err("invalid signature hex"))?;
    let sig = Signature::from_der(&sig_bytes).map_err(|_| crypto_err("invalid DER signature"))?;

    let pk = parse_public_key(pubkey_hex)?;

    let msg = Message::from_slice(&msg32).map_err(|_| crypto_err("invalid message length"))?;
    Ok(secp.verify_ecdsa(&msg, &sig, &pk).is_ok())
}
