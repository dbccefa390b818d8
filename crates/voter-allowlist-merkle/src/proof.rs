use crate::{combine, Address, Digest, PairOrder, Strategy};

/// Inclusion proof for one address.
///
/// `path` holds the sibling hashes from the leaf up to the root. Levels where
/// the node was promoted without a sibling contribute no entry. `leaf_index`
/// and `leaf_count` locate the leaf for fixed-order verification; the
/// sorted-pair verifier ignores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    pub address: Address,
    pub leaf_index: usize,
    pub leaf_count: usize,
    pub path: Vec<Digest>,
}

impl Proof {
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn as_slice(&self) -> &[Digest] {
        &self.path
    }
}

/// Check that `leaf` folded with `proof.path` under `strategy.pair_order`
/// reproduces `root`.
///
/// For sorted pairs this is exactly the on-chain loop
/// `computed = hashPair(computed, proof[i])`.
pub fn verify(leaf: &Digest, proof: &Proof, root: &Digest, strategy: Strategy) -> bool {
    compute_root(leaf, proof, strategy.pair_order).is_some_and(|computed| computed == *root)
}

/// Recompute the root implied by `leaf` and `proof`.
///
/// Returns `None` for fixed-order proofs whose path length does not fit the
/// recorded leaf position.
pub fn compute_root(leaf: &Digest, proof: &Proof, order: PairOrder) -> Option<Digest> {
    match order {
        PairOrder::SortedAscending => Some(
            proof
                .path
                .iter()
                .fold(*leaf, |node, sibling| combine(&node, sibling, order)),
        ),
        PairOrder::Fixed => fixed_order_root(leaf, proof),
    }
}

fn fixed_order_root(leaf: &Digest, proof: &Proof) -> Option<Digest> {
    if proof.leaf_index >= proof.leaf_count {
        return None;
    }

    let mut siblings = proof.path.iter();
    let mut node = *leaf;
    let mut index = proof.leaf_index;
    let mut width = proof.leaf_count;

    while width > 1 {
        let sibling_index = index ^ 1;
        if sibling_index < width {
            let sibling = siblings.next()?;
            node = if index % 2 == 0 {
                combine(&node, sibling, PairOrder::Fixed)
            } else {
                combine(sibling, &node, PairOrder::Fixed)
            };
        }
        // else: last node of an odd level, promoted unchanged
        index /= 2;
        width = width.div_ceil(2);
    }

    if siblings.next().is_some() {
        return None;
    }
    Some(node)
}
