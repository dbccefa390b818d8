use std::path::PathBuf;
use tracing::warn;
use voter_allowlist_artifacts::ProofStore;
use voter_allowlist_merkle::{digest_to_hex, Address};

use crate::error::{CliError, CliResult};

/// Re-verify stored proofs against the stored root: one address, or all.
pub fn execute(proofs_dir: PathBuf, address: Option<String>) -> CliResult<()> {
    let stored = ProofStore::load(&proofs_dir)?;
    println!(
        "🔍 Verifying proofs in {} (root {}, strategy {})",
        proofs_dir.display(),
        digest_to_hex(&stored.root()),
        stored.strategy()
    );

    let addresses: Vec<Address> = match address {
        Some(raw) => vec![Address::normalize(&raw)?],
        None => stored.addresses().copied().collect(),
    };

    let mut failed = 0;
    for address in &addresses {
        if !stored.verify(address)? {
            warn!("Proof for {} does not verify", address);
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(CliError::VerificationFailed {
            failed,
            checked: addresses.len(),
        });
    }

    println!("✅ {} proof(s) verified", addresses.len());
    Ok(())
}
