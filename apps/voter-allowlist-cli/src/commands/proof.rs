use serde::Serialize;
use std::path::PathBuf;
use voter_allowlist_artifacts::ProofStore;
use voter_allowlist_merkle::{digest_to_hex, Address};

use crate::error::CliResult;

#[derive(Serialize)]
struct ProofOutput {
    address: String,
    root: String,
    strategy: String,
    leaf_index: usize,
    leaf_count: usize,
    proof: Vec<String>,
}

pub fn execute(proofs_dir: PathBuf, address: String) -> CliResult<()> {
    let address = Address::normalize(&address)?;
    let stored = ProofStore::load(&proofs_dir)?;
    let proof = stored.proof_for(&address)?;

    let output = ProofOutput {
        address: address.to_checksum(),
        root: digest_to_hex(&stored.root()),
        strategy: stored.strategy().to_string(),
        leaf_index: proof.leaf_index,
        leaf_count: proof.leaf_count,
        proof: proof.path.iter().map(digest_to_hex).collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
