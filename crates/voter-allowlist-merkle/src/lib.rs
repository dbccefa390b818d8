/*!
# Voter Allowlist Merkle Trees

Builds binary Keccak-256 Merkle trees over voter addresses, generates
inclusion proofs for an on-chain verifier, and reconstructs which tree
construction convention produced a previously published root.

A tree is fully determined by the address set and a [`Strategy`]:

- **leaf encoding**: raw 20 address bytes, or `abi.encode(address)`
- **leaf hash arity**: hash once, or hash the hash again
- **pair order**: concatenate siblings by position, or smaller hash first

```rust
use voter_allowlist_merkle::{encode_leaf, verify, Address, AllowlistTree, Strategy};

# fn example() -> voter_allowlist_merkle::MerkleResult<()> {
let voters: Vec<Address> = [
    "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
    "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
]
.iter()
.map(|raw| Address::normalize(raw))
.collect::<Result<_, _>>()?;

let strategy = Strategy::standard();
let tree = AllowlistTree::build(&voters, strategy)?;
let proof = tree.proof_for(&voters[0])?;

assert!(verify(&encode_leaf(&voters[0], strategy), &proof, &tree.root(), strategy));
# Ok(())
# }
# example().unwrap();
```

When the convention behind an existing root is unknown, [`match_strategy`]
searches a candidate list (by default [`DEFAULT_CANDIDATES`]) and returns a
[`MatchOutcome`].
*/

pub mod address;
pub mod digest;
pub mod error;
pub mod hasher;
pub mod leaf;
pub mod matcher;
pub mod proof;
pub mod strategy;
pub mod tree;

pub use address::{
    dedup_addresses, normalize_batch, Address, DuplicateAddress, InvalidAddressPolicy,
    NormalizedBatch, RejectedAddress,
};
pub use digest::{digest_to_hex, keccak256, parse_digest, Digest};
pub use error::{MerkleError, MerkleResult};
pub use hasher::{combine, FixedPairKeccak, SortedPairKeccak};
pub use leaf::{encode_leaf, Leaf};
pub use matcher::{match_address_history, match_strategy, AddressSet, HistoryMatch, MatchOutcome};
pub use proof::{compute_root, verify, Proof};
pub use strategy::{LeafEncoding, LeafHashArity, PairOrder, Strategy, DEFAULT_CANDIDATES};
pub use tree::AllowlistTree;
