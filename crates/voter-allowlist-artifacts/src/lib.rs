/*!
# Voter Allowlist Artifacts

File formats and storage for the allowlist pipeline.

## Input

Address lists are read with [`read_address_list`]:
- JSON: an array of address strings
- CSV (`.csv` extension): any file with an `address` header column

## Output

[`ProofStore::write`] persists a built tree to an output directory:
- `merkle_root.txt`: `0x` + 64 hex digits and a newline
- `proofs.json`: canonical lowercase address to its sibling path, keys sorted
- `manifest.json`: root, strategy, leaf count and each address's leaf index

## Usage

```rust,no_run
use voter_allowlist_artifacts::{read_address_list, ArtifactResult, ProofStore};
use voter_allowlist_merkle::{normalize_batch, AllowlistTree, InvalidAddressPolicy, Strategy};

fn example() -> ArtifactResult<()> {
    let raw = read_address_list("data/whitelist.json")?;
    let batch = normalize_batch(&raw, InvalidAddressPolicy::Skip)?;
    let tree = AllowlistTree::build(&batch.addresses, Strategy::standard())?;

    ProofStore::new("data/proofs").write(&tree)?;

    let stored = ProofStore::load("data/proofs")?;
    assert!(stored.verify(&batch.addresses[0])?);
    Ok(())
}
```
*/

pub mod address_list;
pub mod errors;
pub mod schemas;
pub mod store;

pub use address_list::read_address_list;
pub use errors::{ArtifactError, ArtifactResult};
pub use schemas::{
    AddressRow, Manifest, ProofsFile, ADDRESS_CSV_HEADER, MANIFEST_FILE, MERKLE_ROOT_FILE,
    PROOFS_FILE,
};
pub use store::{ArtifactPaths, ProofStore, StoredProofs};
