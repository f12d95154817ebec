use sha2::{Digest, Sha256};

/// SHA-256 of `bytes`.
pub fn sha256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest[..]);
    out
}

/// SHA-256 of `bytes` as lowercase hex (64 chars).
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(sha256(bytes))
}

/// Number of leading '0' characters in a hex digest.
pub fn leading_zero_digits(hash_hex: &str) -> usize {
    hash_hex.chars().take_while(|c| *c == '0').count()
}

/// Proof-of-Work predicate: at least `difficulty` leading zeros (in hex).
pub fn meets_difficulty(hash_hex: &str, difficulty: u32) -> bool {
    leading_zero_digits(hash_hex) >= difficulty as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(sha256(b"ledger"), sha256(b"ledger"));
        assert_ne!(sha256(b"ledger"), sha256(b"ledger "));
    }

    #[test]
    fn counts_leading_zero_digits() {
        assert_eq!(leading_zero_digits("abc"), 0);
        assert_eq!(leading_zero_digits("00f0"), 2);
        assert_eq!(leading_zero_digits("0000"), 4);
    }

    #[test]
    fn difficulty_zero_is_always_met() {
        assert!(meets_difficulty("ffff", 0));
        assert!(meets_difficulty("000a", 3));
        assert!(!meets_difficulty("00a0", 3));
    }
}
