use crate::{keccak256, Address, Digest, LeafEncoding, LeafHashArity, Strategy};

/// A tree leaf: an address and its hash under one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaf {
    pub address: Address,
    pub hash: Digest,
}

impl Leaf {
    pub fn new(address: Address, strategy: Strategy) -> Self {
        Self {
            address,
            hash: encode_leaf(&address, strategy),
        }
    }
}

/// Hash an address into a leaf under `strategy`.
///
/// - `RawBytes`: `keccak256(addr)` over the 20 address bytes
/// - `AbiEncodedTuple`: `keccak256(abi.encode(addr))`, i.e. 12 zero bytes then
///   the address
/// - `Double` arity hashes that result once more
pub fn encode_leaf(address: &Address, strategy: Strategy) -> Digest {
    let first = match strategy.leaf_encoding {
        LeafEncoding::RawBytes => keccak256(address.as_bytes()),
        LeafEncoding::AbiEncodedTuple => keccak256(&abi_encode_address(address)),
    };

    match strategy.leaf_hash_arity {
        LeafHashArity::Single => first,
        LeafHashArity::Double => keccak256(&first),
    }
}

fn abi_encode_address(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PairOrder, DEFAULT_CANDIDATES};

    fn address() -> Address {
        Address::normalize("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap()
    }

    #[test]
    fn test_raw_bytes_single_hashes_address_bytes() {
        let strategy = Strategy::new(
            LeafEncoding::RawBytes,
            LeafHashArity::Single,
            PairOrder::SortedAscending,
        );
        assert_eq!(
            encode_leaf(&address(), strategy),
            keccak256(address().as_bytes())
        );
    }

    #[test]
    fn test_abi_encoded_pads_to_word() {
        let word = abi_encode_address(&address());
        assert_eq!(&word[..12], &[0u8; 12]);
        assert_eq!(&word[12..], address().as_bytes());

        let strategy = Strategy::new(
            LeafEncoding::AbiEncodedTuple,
            LeafHashArity::Single,
            PairOrder::Fixed,
        );
        assert_eq!(encode_leaf(&address(), strategy), keccak256(&word));
    }

    #[test]
    fn test_double_arity_rehashes_single() {
        let single = Strategy::new(
            LeafEncoding::AbiEncodedTuple,
            LeafHashArity::Single,
            PairOrder::SortedAscending,
        );
        let expected = keccak256(&encode_leaf(&address(), single));
        assert_eq!(encode_leaf(&address(), Strategy::standard()), expected);
    }

    #[test]
    fn test_pair_order_does_not_affect_leaf() {
        for strategy in DEFAULT_CANDIDATES {
            let flipped = Strategy {
                pair_order: match strategy.pair_order {
                    PairOrder::Fixed => PairOrder::SortedAscending,
                    PairOrder::SortedAscending => PairOrder::Fixed,
                },
                ..strategy
            };
            assert_eq!(
                encode_leaf(&address(), strategy),
                encode_leaf(&address(), flipped)
            );
        }
    }

    #[test]
    fn test_leaf_new_matches_encode_leaf() {
        let leaf = Leaf::new(address(), Strategy::standard());
        assert_eq!(leaf.address, address());
        assert_eq!(leaf.hash, encode_leaf(&address(), Strategy::standard()));
    }
}
