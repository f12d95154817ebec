use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::hash::{sha256, sha256_hex};
use crate::wallet::{self, Keypair};

/// How a missing payer is rendered in the hash preimage and in logs.
pub const REWARD_SENTINEL: &str = "none";

/// A value transfer between two addresses (hex-encoded public keys).
/// `from_address == None` marks a mining reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub(crate) from_address: Option<String>,
    pub(crate) to_address: String,
    pub(crate) amount: u64,
    /// Hex-encoded DER ECDSA signature over `digest()`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) signature: Option<String>,
}

impl Transaction {
    /// Unsigned transfer from `from_address` to `to_address`.
    pub fn new(from_address: impl Into<String>, to_address: impl Into<String>, amount: u64) -> Self {
        Self {
            from_address: Some(from_address.into()),
            to_address: to_address.into(),
            amount,
            signature: None,
        }
    }

    /// Mining reward issued to `to_address`. Needs no signature.
    pub fn reward(to_address: impl Into<String>, amount: u64) -> Self {
        Self {
            from_address: None,
            to_address: to_address.into(),
            amount,
            signature: None,
        }
    }

    pub fn from_address(&self) -> Option<&str> {
        self.from_address.as_deref()
    }

    pub fn to_address(&self) -> &str {
        &self.to_address
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    pub fn is_reward(&self) -> bool {
        self.from_address.is_none()
    }

    /// Payload that gets hashed and signed; the signature is not part of it.
    fn signing_payload(&self) -> String {
        format!(
            "{}:{}:{}",
            self.from_address().unwrap_or(REWARD_SENTINEL),
            self.to_address,
            self.amount
        )
    }

    /// SHA-256 of the signing payload.
    pub fn digest(&self) -> [u8; 32] {
        sha256(self.signing_payload().as_bytes())
    }

    /// Hex form of `digest()`.
    pub fn calculate_hash(&self) -> String {
        sha256_hex(self.signing_payload().as_bytes())
    }

    /// Sign with `keypair`, which must own the payer address.
    pub fn sign(&mut self, keypair: &Keypair) -> Result<()> {
        self.sign_with_private_key(keypair.private_key())
    }

    /// Sign with a hex-encoded private key whose public key must equal `from_address`.
    pub fn sign_with_private_key(&mut self, private_hex: &str) -> Result<()> {
        let signer = wallet::derive_public_key_hex(private_hex)?;
        let payer = match self.from_address() {
            Some(from) => wallet::pubkey_to_address_hex(from)
                .map_err(|_| LedgerError::UnauthorizedSigner)?,
            None => return Err(LedgerError::UnauthorizedSigner),
        };
        if signer != payer {
            return Err(LedgerError::UnauthorizedSigner);
        }

        let signature = wallet::sign_digest_hex(private_hex, self.digest())?;
        debug!("signed tx {} from {}", self.calculate_hash(), payer);
        self.signature = Some(signature);
        Ok(())
    }

    /// Rewards are always valid. Anything else must carry a signature that
    /// verifies against `from_address`.
    pub fn is_valid(&self) -> Result<bool> {
        let Some(from) = self.from_address() else {
            return Ok(true);
        };

        let signature = match self.signature() {
            Some(sig) if !sig.is_empty() => sig,
            _ => return Err(LedgerError::MissingSignature),
        };

        wallet::verify_signature_hex(from, signature, self.digest())
    }
}
