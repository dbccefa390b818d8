use rayon::prelude::*;
use rs_merkle::MerkleTree;
use std::collections::HashMap;
use tracing::debug;

use crate::{
    dedup_addresses, Address, Digest, FixedPairKeccak, Leaf, MerkleError, MerkleResult,
    PairOrder, Proof, SortedPairKeccak, Strategy,
};

/// Node layers, one `rs_merkle` tree per pair ordering.
#[derive(Clone)]
enum Layers {
    Fixed(MerkleTree<FixedPairKeccak>),
    Sorted(MerkleTree<SortedPairKeccak>),
}

impl Layers {
    fn from_leaves(leaf_hashes: &[Digest], order: PairOrder) -> Self {
        match order {
            PairOrder::Fixed => Layers::Fixed(MerkleTree::from_leaves(leaf_hashes)),
            PairOrder::SortedAscending => Layers::Sorted(MerkleTree::from_leaves(leaf_hashes)),
        }
    }

    fn root(&self) -> Option<Digest> {
        match self {
            Layers::Fixed(tree) => tree.root(),
            Layers::Sorted(tree) => tree.root(),
        }
    }

    fn proof_hashes(&self, index: usize) -> Vec<Digest> {
        match self {
            Layers::Fixed(tree) => tree.proof(&[index]).proof_hashes().to_vec(),
            Layers::Sorted(tree) => tree.proof(&[index]).proof_hashes().to_vec(),
        }
    }
}

/// A binary Merkle tree over a voter allowlist.
///
/// Built with [`AllowlistTree::build`]. The root is a pure function of the
/// address set and the [`Strategy`]:
///
/// 1. Addresses are deduplicated, first occurrence wins.
/// 2. Each address is hashed with [`crate::encode_leaf`].
/// 3. With `SortedAscending` pairs the leaf sequence is sorted by hash; with
///    `Fixed` pairs it keeps input order.
/// 4. Adjacent nodes are combined level by level. The last node of an odd
///    level is promoted unchanged; nodes are never duplicated or dropped.
#[derive(Clone)]
pub struct AllowlistTree {
    strategy: Strategy,
    leaves: Vec<Leaf>,
    root: Digest,
    layers: Layers,
    address_leaf_index: HashMap<Address, usize>,
}

impl AllowlistTree {
    pub fn build(addresses: &[Address], strategy: Strategy) -> MerkleResult<Self> {
        if addresses.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let distinct = dedup_addresses(addresses);
        if distinct.len() != addresses.len() {
            debug!(
                "Dropped {} duplicate address(es) before building",
                addresses.len() - distinct.len()
            );
        }

        let mut leaves: Vec<Leaf> = distinct
            .into_iter()
            .map(|address| Leaf::new(address, strategy))
            .collect();
        if strategy.pair_order == PairOrder::SortedAscending {
            leaves.sort_by(|a, b| a.hash.cmp(&b.hash));
        }

        let leaf_hashes: Vec<Digest> = leaves.iter().map(|leaf| leaf.hash).collect();
        let layers = Layers::from_leaves(&leaf_hashes, strategy.pair_order);
        let root = layers.root().ok_or(MerkleError::EmptyInput)?;

        let address_leaf_index = leaves
            .iter()
            .enumerate()
            .map(|(index, leaf)| (leaf.address, index))
            .collect();

        debug!(
            "Built {}-leaf tree with strategy {}",
            leaves.len(),
            strategy
        );

        Ok(Self {
            strategy,
            leaves,
            root,
            layers,
            address_leaf_index,
        })
    }

    pub fn root(&self) -> Digest {
        self.root
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Leaves in tree order.
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.address_leaf_index.contains_key(address)
    }

    pub fn leaf_index(&self, address: &Address) -> MerkleResult<usize> {
        self.address_leaf_index
            .get(address)
            .copied()
            .ok_or(MerkleError::AddressNotFound(*address))
    }

    pub fn leaf_for(&self, address: &Address) -> MerkleResult<&Leaf> {
        let index = self.leaf_index(address)?;
        Ok(&self.leaves[index])
    }

    /// Sibling path from the address's leaf to the root.
    pub fn proof_for(&self, address: &Address) -> MerkleResult<Proof> {
        let index = self.leaf_index(address)?;
        Ok(self.proof_at(index))
    }

    /// Proofs for every leaf, in tree order. Paths are generated in parallel.
    pub fn proofs(&self) -> Vec<Proof> {
        (0..self.leaves.len())
            .into_par_iter()
            .map(|index| self.proof_at(index))
            .collect()
    }

    /// Check a proof for `address` against this tree's root and strategy.
    pub fn verify_proof(&self, address: &Address, proof: &Proof) -> MerkleResult<bool> {
        let leaf = self.leaf_for(address)?;
        Ok(crate::verify(&leaf.hash, proof, &self.root, self.strategy))
    }

    fn proof_at(&self, index: usize) -> Proof {
        Proof {
            address: self.leaves[index].address,
            leaf_index: index,
            leaf_count: self.leaves.len(),
            path: self.layers.proof_hashes(index),
        }
    }
}

impl std::fmt::Debug for AllowlistTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllowlistTree")
            .field("strategy", &self.strategy)
            .field("leaf_count", &self.leaves.len())
            .field("root", &crate::digest_to_hex(&self.root))
            .finish()
    }
}
