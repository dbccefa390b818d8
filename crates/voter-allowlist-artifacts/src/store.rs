/*!
# Proof Store

Persists a built tree as `merkle_root.txt`, `proofs.json` and `manifest.json`,
and loads them back for lookups and re-verification.
*/

use crate::{
    errors::{ArtifactError, ArtifactResult},
    schemas::{Manifest, ProofsFile, MANIFEST_FILE, MERKLE_ROOT_FILE, PROOFS_FILE},
};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use voter_allowlist_merkle::{
    digest_to_hex, encode_leaf, parse_digest, verify, Address, AllowlistTree, Digest,
    MerkleError, Proof, Strategy,
};

/// Paths of a complete artifact set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub merkle_root: PathBuf,
    pub proofs: PathBuf,
    pub manifest: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            merkle_root: dir.join(MERKLE_ROOT_FILE),
            proofs: dir.join(PROOFS_FILE),
            manifest: dir.join(MANIFEST_FILE),
        }
    }
}

/// Writes and reads the artifact set of one output directory.
#[derive(Debug, Clone)]
pub struct ProofStore {
    dir: PathBuf,
}

impl ProofStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths::in_dir(&self.dir)
    }

    /// Write all three artifacts for `tree`.
    ///
    /// Every file is staged in a temporary file inside the output directory
    /// and only renamed into place once all three have been written, so an
    /// error leaves previously written artifacts untouched.
    pub fn write(&self, tree: &AllowlistTree) -> ArtifactResult<ArtifactPaths> {
        fs::create_dir_all(&self.dir)?;

        let proofs = tree.proofs();
        let proofs_file: ProofsFile = proofs
            .iter()
            .map(|proof| {
                let path = proof.path.iter().map(digest_to_hex).collect();
                (proof.address.canonical_form(), path)
            })
            .collect();

        let manifest = Manifest {
            root: tree.root(),
            strategy: tree.strategy(),
            leaf_count: tree.len(),
            leaf_indices: proofs
                .iter()
                .map(|proof| (proof.address.canonical_form(), proof.leaf_index))
                .collect(),
        };

        let root_text = format!("{}\n", digest_to_hex(&tree.root()));
        let mut proofs_json = serde_json::to_string_pretty(&proofs_file)?;
        proofs_json.push('\n');
        let mut manifest_json = serde_json::to_string_pretty(&manifest)?;
        manifest_json.push('\n');

        let paths = self.paths();
        let staged = [
            (self.stage(manifest_json.as_bytes())?, &paths.manifest),
            (self.stage(proofs_json.as_bytes())?, &paths.proofs),
            (self.stage(root_text.as_bytes())?, &paths.merkle_root),
        ];

        for (temp, target) in staged {
            temp.persist(target)?;
            debug!("Wrote {}", target.display());
        }

        info!(
            "Stored {} proofs for root {} in {}",
            proofs.len(),
            digest_to_hex(&tree.root()),
            self.dir.display()
        );

        Ok(paths)
    }

    fn stage(&self, contents: &[u8]) -> ArtifactResult<NamedTempFile> {
        let mut temp = NamedTempFile::new_in(&self.dir)?;
        temp.write_all(contents)?;
        temp.as_file().sync_all()?;
        Ok(temp)
    }

    /// Load a previously written artifact set.
    pub fn load<P: AsRef<Path>>(dir: P) -> ArtifactResult<StoredProofs> {
        let paths = ArtifactPaths::in_dir(dir);

        let manifest: Manifest = serde_json::from_str(&read_artifact(&paths.manifest)?)?;
        let proofs_file: ProofsFile = serde_json::from_str(&read_artifact(&paths.proofs)?)?;
        let root = parse_digest(read_artifact(&paths.merkle_root)?.trim())?;

        if root != manifest.root {
            return Err(ArtifactError::Schema(format!(
                "{} holds {} but {} records {}",
                MERKLE_ROOT_FILE,
                digest_to_hex(&root),
                MANIFEST_FILE,
                digest_to_hex(&manifest.root)
            )));
        }

        let mut entries = BTreeMap::new();
        for (key, path) in proofs_file {
            let address = Address::normalize(&key)?;
            let leaf_index = manifest
                .leaf_indices
                .get(&address.canonical_form())
                .copied()
                .ok_or_else(|| {
                    ArtifactError::Schema(format!(
                        "{} has no leaf index for {}",
                        MANIFEST_FILE, key
                    ))
                })?;
            let path = path
                .iter()
                .map(|hex| parse_digest(hex))
                .collect::<Result<Vec<_>, _>>()?;

            entries.insert(address, StoredEntry { leaf_index, path });
        }

        if entries.len() != manifest.leaf_count {
            return Err(ArtifactError::Schema(format!(
                "{} has {} entries but {} records {} leaves",
                PROOFS_FILE,
                entries.len(),
                MANIFEST_FILE,
                manifest.leaf_count
            )));
        }

        Ok(StoredProofs {
            root,
            strategy: manifest.strategy,
            leaf_count: manifest.leaf_count,
            entries,
        })
    }
}

fn read_artifact(path: &Path) -> ArtifactResult<String> {
    if !path.exists() {
        return Err(ArtifactError::MissingArtifact(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredEntry {
    leaf_index: usize,
    path: Vec<Digest>,
}

/// An artifact set loaded from disk.
#[derive(Debug, Clone)]
pub struct StoredProofs {
    root: Digest,
    strategy: Strategy,
    leaf_count: usize,
    entries: BTreeMap<Address, StoredEntry>,
}

impl StoredProofs {
    pub fn root(&self) -> Digest {
        self.root
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored addresses in canonical order.
    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.entries.keys()
    }

    /// Look up the proof for `address`, whatever casing it was parsed from.
    pub fn proof_for(&self, address: &Address) -> ArtifactResult<Proof> {
        let entry = self
            .entries
            .get(address)
            .ok_or(MerkleError::AddressNotFound(*address))?;

        Ok(Proof {
            address: *address,
            leaf_index: entry.leaf_index,
            leaf_count: self.leaf_count,
            path: entry.path.clone(),
        })
    }

    /// Re-derive the leaf for `address` and check its stored proof against
    /// the stored root.
    pub fn verify(&self, address: &Address) -> ArtifactResult<bool> {
        let proof = self.proof_for(address)?;
        let leaf = encode_leaf(address, self.strategy);
        Ok(verify(&leaf, &proof, &self.root, self.strategy))
    }
}
