use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{digest_to_hex, Address, AllowlistTree, Digest, Strategy};

/// Result of a strategy search.
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    /// The earliest candidate (in the supplied order) whose root equals the
    /// target, with the tree it produced.
    Matched {
        strategy: Strategy,
        tree: AllowlistTree,
    },
    /// No candidate reproduced the target root. Broaden the candidate list
    /// or try another version of the address list.
    NoMatch { candidates_tried: usize },
}

impl MatchOutcome {
    pub fn strategy(&self) -> Option<Strategy> {
        match self {
            MatchOutcome::Matched { strategy, .. } => Some(*strategy),
            MatchOutcome::NoMatch { .. } => None,
        }
    }

    pub fn into_tree(self) -> Option<AllowlistTree> {
        match self {
            MatchOutcome::Matched { tree, .. } => Some(tree),
            MatchOutcome::NoMatch { .. } => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }
}

/// Find which construction convention produced `target_root` for `addresses`.
///
/// Candidates are built in parallel on the rayon pool. The search stops
/// scheduling new candidates once a match is known, and the reported match
/// is always the first matching candidate in `candidates` order, so the
/// result does not depend on thread timing. A candidate that fails to build
/// is logged and skipped.
pub fn match_strategy(
    addresses: &[Address],
    target_root: &Digest,
    candidates: &[Strategy],
) -> MatchOutcome {
    debug!(
        "Searching {} candidate strategies for root {}",
        candidates.len(),
        digest_to_hex(target_root)
    );

    let found = candidates
        .par_iter()
        .find_map_first(|strategy| try_candidate(addresses, target_root, *strategy));

    match found {
        Some(tree) => {
            info!("Matched root with strategy {}", tree.strategy());
            MatchOutcome::Matched {
                strategy: tree.strategy(),
                tree,
            }
        }
        None => MatchOutcome::NoMatch {
            candidates_tried: candidates.len(),
        },
    }
}

fn try_candidate(
    addresses: &[Address],
    target_root: &Digest,
    strategy: Strategy,
) -> Option<AllowlistTree> {
    match AllowlistTree::build(addresses, strategy) {
        Ok(tree) if tree.root() == *target_root => Some(tree),
        Ok(tree) => {
            debug!(
                "Strategy {} gives root {}",
                strategy,
                digest_to_hex(&tree.root())
            );
            None
        }
        Err(e) => {
            warn!("Strategy {} could not be evaluated: {}", strategy, e);
            None
        }
    }
}

/// One version of the address list, e.g. a historical revision of the
/// allowlist file.
#[derive(Debug, Clone)]
pub struct AddressSet {
    pub label: String,
    pub addresses: Vec<Address>,
}

#[derive(Debug, Clone)]
pub struct HistoryMatch {
    pub label: String,
    pub strategy: Strategy,
    pub tree: AllowlistTree,
}

/// Run [`match_strategy`] over each address set in order and return the
/// first set/strategy pair that reproduces `target_root`.
pub fn match_address_history(
    sets: &[AddressSet],
    target_root: &Digest,
    candidates: &[Strategy],
) -> Option<HistoryMatch> {
    sets.iter().find_map(|set| {
        debug!("Trying address set '{}' ({} addresses)", set.label, set.addresses.len());
        match match_strategy(&set.addresses, target_root, candidates) {
            MatchOutcome::Matched { strategy, tree } => Some(HistoryMatch {
                label: set.label.clone(),
                strategy,
                tree,
            }),
            MatchOutcome::NoMatch { .. } => None,
        }
    })
}
