use thiserror::Error;
use voter_allowlist_artifacts::ArtifactError;
use voter_allowlist_merkle::MerkleError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Merkle(#[from] MerkleError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "No candidate strategy reproduces root {target_root} ({candidates_tried} strategies over \
         {address_sets} address list(s)); broaden the candidate list or supply another version \
         of the address list"
    )]
    NoMatch {
        target_root: String,
        candidates_tried: usize,
        address_sets: usize,
    },

    #[error("Built root {actual} does not match expected root {expected}")]
    RootMismatch { expected: String, actual: String },

    #[error("{failed} of {checked} stored proofs failed verification")]
    VerificationFailed { failed: usize, checked: usize },
}
