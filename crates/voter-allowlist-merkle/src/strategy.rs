use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::MerkleError;

/// How an address is serialized before it is hashed into a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LeafEncoding {
    /// The raw 20 address bytes (`abi.encodePacked(address)`).
    RawBytes,
    /// The address left-padded to a 32-byte word (`abi.encode(address)`).
    AbiEncodedTuple,
}

/// Whether the serialized leaf is hashed once or twice.
///
/// Double hashing keeps leaf hashes out of the 64-byte internal node
/// preimage domain, which blocks second-preimage proofs that present an
/// internal node as a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LeafHashArity {
    Single,
    Double,
}

/// How two sibling hashes are ordered before being concatenated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PairOrder {
    /// `left || right` by tree position.
    Fixed,
    /// Smaller hash first. Leaves are also sorted by hash before building.
    SortedAscending,
}

/// The tree construction convention that, together with the address set,
/// determines a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Strategy {
    pub leaf_encoding: LeafEncoding,
    pub leaf_hash_arity: LeafHashArity,
    pub pair_order: PairOrder,
}

impl Strategy {
    pub const fn new(
        leaf_encoding: LeafEncoding,
        leaf_hash_arity: LeafHashArity,
        pair_order: PairOrder,
    ) -> Self {
        Self {
            leaf_encoding,
            leaf_hash_arity,
            pair_order,
        }
    }

    /// The OpenZeppelin `StandardMerkleTree` convention for a single
    /// `address` column: `keccak256(keccak256(abi.encode(addr)))`, sorted.
    pub const fn standard() -> Self {
        Self::new(
            LeafEncoding::AbiEncodedTuple,
            LeafHashArity::Double,
            PairOrder::SortedAscending,
        )
    }
}

impl fmt::Display for LeafEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LeafEncoding::RawBytes => "raw-bytes",
            LeafEncoding::AbiEncodedTuple => "abi-encoded-tuple",
        })
    }
}

impl fmt::Display for LeafHashArity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LeafHashArity::Single => "single",
            LeafHashArity::Double => "double",
        })
    }
}

impl fmt::Display for PairOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PairOrder::Fixed => "fixed",
            PairOrder::SortedAscending => "sorted-ascending",
        })
    }
}

/// Formats as `<encoding>/<arity>/<order>`, e.g. `raw-bytes/single/fixed`.
impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.leaf_encoding, self.leaf_hash_arity, self.pair_order
        )
    }
}

impl FromStr for LeafEncoding {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" | "raw-bytes" | "packed" => Ok(LeafEncoding::RawBytes),
            "abi" | "abi-encoded" | "abi-encoded-tuple" => Ok(LeafEncoding::AbiEncodedTuple),
            other => Err(MerkleError::InvalidStrategy(format!(
                "unknown leaf encoding '{}'",
                other
            ))),
        }
    }
}

impl FromStr for LeafHashArity {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "1" => Ok(LeafHashArity::Single),
            "double" | "2" => Ok(LeafHashArity::Double),
            other => Err(MerkleError::InvalidStrategy(format!(
                "unknown leaf hash arity '{}'",
                other
            ))),
        }
    }
}

impl FromStr for PairOrder {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(PairOrder::Fixed),
            "sorted" | "sorted-ascending" => Ok(PairOrder::SortedAscending),
            other => Err(MerkleError::InvalidStrategy(format!(
                "unknown pair order '{}'",
                other
            ))),
        }
    }
}

impl FromStr for Strategy {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        let [encoding, arity, order] = parts.as_slice() else {
            return Err(MerkleError::InvalidStrategy(format!(
                "expected <encoding>/<arity>/<order>, got '{}'",
                s
            )));
        };

        Ok(Strategy::new(encoding.parse()?, arity.parse()?, order.parse()?))
    }
}

impl TryFrom<String> for Strategy {
    type Error = MerkleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.to_string()
    }
}

/// The full default search space, most common convention first.
///
/// Sorted-pair conventions come before fixed-order ones because every widely
/// used Solidity verifier (OpenZeppelin `MerkleProof`, Solady
/// `MerkleProofLib`) hashes sorted pairs.
pub const DEFAULT_CANDIDATES: [Strategy; 8] = [
    Strategy::standard(),
    Strategy::new(
        LeafEncoding::RawBytes,
        LeafHashArity::Single,
        PairOrder::SortedAscending,
    ),
    Strategy::new(
        LeafEncoding::AbiEncodedTuple,
        LeafHashArity::Single,
        PairOrder::SortedAscending,
    ),
    Strategy::new(
        LeafEncoding::RawBytes,
        LeafHashArity::Double,
        PairOrder::SortedAscending,
    ),
    Strategy::new(
        LeafEncoding::RawBytes,
        LeafHashArity::Single,
        PairOrder::Fixed,
    ),
    Strategy::new(
        LeafEncoding::AbiEncodedTuple,
        LeafHashArity::Single,
        PairOrder::Fixed,
    ),
    Strategy::new(
        LeafEncoding::AbiEncodedTuple,
        LeafHashArity::Double,
        PairOrder::Fixed,
    ),
    Strategy::new(
        LeafEncoding::RawBytes,
        LeafHashArity::Double,
        PairOrder::Fixed,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_candidates_cover_whole_space() {
        let distinct: HashSet<Strategy> = DEFAULT_CANDIDATES.iter().copied().collect();
        assert_eq!(distinct.len(), 8);
        assert_eq!(DEFAULT_CANDIDATES[0], Strategy::standard());
    }

    #[test]
    fn test_strategy_text_round_trip() {
        for strategy in DEFAULT_CANDIDATES {
            let text = strategy.to_string();
            assert_eq!(text.parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_strategy_parse_aliases() {
        let strategy: Strategy = "abi/double/sorted".parse().unwrap();
        assert_eq!(strategy, Strategy::standard());

        let strategy: Strategy = "RAW/1/Fixed".parse().unwrap();
        assert_eq!(
            strategy,
            Strategy::new(LeafEncoding::RawBytes, LeafHashArity::Single, PairOrder::Fixed)
        );
    }

    #[test]
    fn test_strategy_parse_errors() {
        for bad in ["", "raw/single", "raw/single/fixed/extra", "raw/triple/fixed"] {
            assert!(
                matches!(bad.parse::<Strategy>(), Err(MerkleError::InvalidStrategy(_))),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_strategy_serde_as_string() {
        let json = serde_json::to_string(&Strategy::standard()).unwrap();
        assert_eq!(json, "\"abi-encoded-tuple/double/sorted-ascending\"");

        let back: Strategy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Strategy::standard());
    }
}
