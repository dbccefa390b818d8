use rs_merkle::Hasher;

use crate::{keccak256, Digest, PairOrder};

/// Combine two sibling hashes into their parent.
///
/// - `Fixed`: `keccak256(left || right)`
/// - `SortedAscending`: the byte-wise smaller hash goes first, which makes the
///   result independent of argument order (OpenZeppelin `_hashPair`)
pub fn combine(left: &Digest, right: &Digest, order: PairOrder) -> Digest {
    let (first, second) = match order {
        PairOrder::Fixed => (left, right),
        PairOrder::SortedAscending if left <= right => (left, right),
        PairOrder::SortedAscending => (right, left),
    };

    let mut concatenated = [0u8; 64];
    concatenated[..32].copy_from_slice(first);
    concatenated[32..].copy_from_slice(second);
    keccak256(&concatenated)
}

/// Keccak-256 tree hasher with position-ordered pairs.
///
/// A node without a right sibling is promoted unchanged, the same odd-node
/// rule [`SortedPairKeccak`] uses.
#[derive(Clone, Debug)]
pub struct FixedPairKeccak;

impl Hasher for FixedPairKeccak {
    type Hash = Digest;

    fn hash(data: &[u8]) -> Digest {
        keccak256(data)
    }

    fn concat_and_hash(left: &Self::Hash, right: Option<&Self::Hash>) -> Self::Hash {
        match right {
            Some(right) => combine(left, right, PairOrder::Fixed),
            None => *left,
        }
    }
}

/// Keccak-256 tree hasher with sorted pairs, as checked by the on-chain
/// `MerkleProof.verify` style verifiers.
#[derive(Clone, Debug)]
pub struct SortedPairKeccak;

impl Hasher for SortedPairKeccak {
    type Hash = Digest;

    fn hash(data: &[u8]) -> Digest {
        keccak256(data)
    }

    fn concat_and_hash(left: &Self::Hash, right: Option<&Self::Hash>) -> Self::Hash {
        match right {
            Some(right) => combine(left, right, PairOrder::SortedAscending),
            None => *left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_sorted_combine_is_commutative() {
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let x: Digest = rng.gen();
            let y: Digest = rng.gen();
            assert_eq!(
                combine(&x, &y, PairOrder::SortedAscending),
                combine(&y, &x, PairOrder::SortedAscending)
            );
        }
    }

    #[test]
    fn test_fixed_combine_is_order_sensitive() {
        let x = [1u8; 32];
        let y = [2u8; 32];
        assert_ne!(
            combine(&x, &y, PairOrder::Fixed),
            combine(&y, &x, PairOrder::Fixed)
        );
    }

    #[test]
    fn test_sorted_matches_fixed_on_ordered_input() {
        let low = [0x10u8; 32];
        let high = [0xF0u8; 32];
        let fixed = combine(&low, &high, PairOrder::Fixed);
        assert_eq!(combine(&low, &high, PairOrder::SortedAscending), fixed);
        assert_eq!(combine(&high, &low, PairOrder::SortedAscending), fixed);
    }

    #[test]
    fn test_combine_hashes_concatenation() {
        let left = [0xAAu8; 32];
        let right = [0xBBu8; 32];
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(&left);
        buf.extend_from_slice(&right);
        assert_eq!(combine(&left, &right, PairOrder::Fixed), keccak256(&buf));
    }

    #[test]
    fn test_hashers_promote_missing_sibling() {
        let node = [7u8; 32];
        assert_eq!(FixedPairKeccak::concat_and_hash(&node, None), node);
        assert_eq!(SortedPairKeccak::concat_and_hash(&node, None), node);
    }
}
