use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::{keccak256, MerkleError, MerkleResult};

const ADDRESS_HEX_LEN: usize = 40;

/// A 20-byte account address.
///
/// The canonical textual form is lowercase `0x` + 40 hex digits; it is the key
/// used by proof generation and the proof store, so lookups succeed whatever
/// casing the address was supplied in. [`Address::to_checksum`] gives the
/// EIP-55 mixed-case form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parse a raw address string.
    ///
    /// Accepts an optional `0x` prefix. All-lowercase and all-uppercase input
    /// is taken as-is; mixed-case input is treated as checksummed and must
    /// match the EIP-55 checksum.
    pub fn normalize(raw: &str) -> MerkleResult<Self> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(MerkleError::invalid_address(
                raw,
                format!("invalid character '{}'", bad),
            ));
        }
        if digits.len() != ADDRESS_HEX_LEN {
            return Err(MerkleError::invalid_address(
                raw,
                format!(
                    "expected {} hex digits, found {}",
                    ADDRESS_HEX_LEN,
                    digits.len()
                ),
            ));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| MerkleError::invalid_address(raw, e.to_string()))?;
        let address = Self(bytes);

        let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper && address.to_checksum()[2..] != *digits {
            return Err(MerkleError::invalid_address(raw, "checksum mismatch"));
        }

        Ok(address)
    }

    pub fn canonical_form(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// EIP-55: uppercase each letter whose nibble in
    /// `keccak256(lowercase_hex)` is >= 8.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(2 + ADDRESS_HEX_LEN);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let shift = if i % 2 == 0 { 4 } else { 0 };
            let nibble = (hash[i / 2] >> shift) & 0x0f;
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl FromStr for Address {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_form())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.canonical_form())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical_form())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Address::normalize(&raw).map_err(serde::de::Error::custom)
    }
}

/// Drop repeated addresses, keeping the first occurrence of each in input order.
pub fn dedup_addresses(addresses: &[Address]) -> Vec<Address> {
    let mut seen = HashSet::with_capacity(addresses.len());
    addresses
        .iter()
        .filter(|address| seen.insert(**address))
        .copied()
        .collect()
}

/// What to do with an entry that fails [`Address::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidAddressPolicy {
    /// Report the entry and keep going.
    #[default]
    Skip,
    /// Fail the whole batch on the first invalid entry.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedAddress {
    /// Zero-based position in the input list.
    pub position: usize,
    pub error: MerkleError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateAddress {
    pub position: usize,
    /// Position of the occurrence that was kept.
    pub first_position: usize,
    pub address: Address,
}

/// Outcome of normalizing an ordered address list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedBatch {
    /// Distinct addresses in first-occurrence order.
    pub addresses: Vec<Address>,
    pub rejected: Vec<RejectedAddress>,
    pub duplicates: Vec<DuplicateAddress>,
}

pub fn normalize_batch<S: AsRef<str>>(
    raws: &[S],
    policy: InvalidAddressPolicy,
) -> MerkleResult<NormalizedBatch> {
    let mut batch = NormalizedBatch::default();
    let mut first_seen = HashMap::with_capacity(raws.len());

    for (position, raw) in raws.iter().enumerate() {
        let address = match Address::normalize(raw.as_ref()) {
            Ok(address) => address,
            Err(error) => {
                if policy == InvalidAddressPolicy::Strict {
                    return Err(error);
                }
                warn!("Skipping address list entry {}: {}", position, error);
                batch.rejected.push(RejectedAddress { position, error });
                continue;
            }
        };

        match first_seen.get(&address) {
            Some(&first_position) => {
                warn!(
                    "Duplicate address {} at entry {} (first seen at entry {})",
                    address, position, first_position
                );
                batch.duplicates.push(DuplicateAddress {
                    position,
                    first_position,
                    address,
                });
            }
            None => {
                first_seen.insert(address, position);
                batch.addresses.push(address);
            }
        }
    }

    Ok(batch)
}
