use sha3::{Digest as _, Keccak256};

use crate::{MerkleError, MerkleResult};

/// 32-byte node hash. Equality is byte-exact.
pub type Digest = [u8; 32];

pub fn keccak256(data: &[u8]) -> Digest {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// `0x`-prefixed lowercase hex, the form written to root and proof artifacts.
pub fn digest_to_hex(digest: &Digest) -> String {
    format!("0x{}", hex::encode(digest))
}

/// Parse a `0x` + 64 hex digit string (prefix optional, case-insensitive).
pub fn parse_digest(text: &str) -> MerkleResult<Digest> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let mut digest = [0u8; 32];
    hex::decode_to_slice(digits, &mut digest)
        .map_err(|_| MerkleError::InvalidDigest(text.to_string()))?;
    Ok(digest)
}
