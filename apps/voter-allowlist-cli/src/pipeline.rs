//! Normalize, build or match, then persist.
//!
//! Nothing is written until the build/match decision has been made, so a
//! failed match or a root mismatch leaves the output directory untouched.

use tracing::info;
use voter_allowlist_artifacts::{read_address_list, ArtifactPaths, ProofStore};
use voter_allowlist_merkle::{
    digest_to_hex, match_address_history, normalize_batch, AddressSet, AllowlistTree, Digest,
    Strategy,
};

use crate::config::{PipelineConfig, PipelineMode};
use crate::error::{CliError, CliResult};

/// Summary of a finished pipeline run.
#[derive(Debug)]
pub struct PipelineReport {
    /// Address list the tree was built from.
    pub source: String,
    pub strategy: Strategy,
    pub root: Digest,
    pub leaf_count: usize,
    pub rejected: usize,
    pub duplicates: usize,
    /// `true` when the strategy was discovered rather than given.
    pub matched: bool,
    pub artifacts: Option<ArtifactPaths>,
}

struct LoadedSet {
    set: AddressSet,
    rejected: usize,
    duplicates: usize,
}

pub fn run(config: &PipelineConfig) -> CliResult<PipelineReport> {
    let mode = config.mode()?;
    let loaded = load_address_sets(config)?;

    let (chosen, tree, matched) = match mode {
        PipelineMode::Build {
            strategy,
            expected_root,
        } => {
            let chosen = loaded
                .into_iter()
                .next()
                .ok_or_else(|| CliError::InvalidConfig("no address files".to_string()))?;
            let tree = AllowlistTree::build(&chosen.set.addresses, strategy)?;

            if let Some(expected) = expected_root {
                if tree.root() != expected {
                    return Err(CliError::RootMismatch {
                        expected: digest_to_hex(&expected),
                        actual: digest_to_hex(&tree.root()),
                    });
                }
            }
            (chosen, tree, false)
        }
        PipelineMode::Match {
            target_root,
            candidates,
        } => {
            let sets: Vec<AddressSet> = loaded.iter().map(|l| l.set.clone()).collect();
            let found = match_address_history(&sets, &target_root, &candidates).ok_or_else(
                || CliError::NoMatch {
                    target_root: digest_to_hex(&target_root),
                    candidates_tried: candidates.len(),
                    address_sets: sets.len(),
                },
            )?;

            let chosen = loaded
                .into_iter()
                .find(|l| l.set.label == found.label)
                .ok_or_else(|| CliError::InvalidConfig(format!("unknown list {}", found.label)))?;
            info!(
                "Root {} reproduced from {} with {}",
                digest_to_hex(&target_root),
                found.label,
                found.strategy
            );
            (chosen, found.tree, true)
        }
    };

    let artifacts = if config.write_artifacts {
        Some(ProofStore::new(&config.output_dir).write(&tree)?)
    } else {
        None
    };

    Ok(PipelineReport {
        source: chosen.set.label,
        strategy: tree.strategy(),
        root: tree.root(),
        leaf_count: tree.len(),
        rejected: chosen.rejected,
        duplicates: chosen.duplicates,
        matched,
        artifacts,
    })
}

fn load_address_sets(config: &PipelineConfig) -> CliResult<Vec<LoadedSet>> {
    config
        .address_files
        .iter()
        .map(|path| {
            let raw = read_address_list(path)?;
            let batch = normalize_batch(&raw, config.invalid_addresses)?;
            info!(
                "{}: {} addresses ({} rejected, {} duplicates)",
                path.display(),
                batch.addresses.len(),
                batch.rejected.len(),
                batch.duplicates.len()
            );

            Ok(LoadedSet {
                set: AddressSet {
                    label: path.display().to_string(),
                    addresses: batch.addresses,
                },
                rejected: batch.rejected.len(),
                duplicates: batch.duplicates.len(),
            })
        })
        .collect()
}
