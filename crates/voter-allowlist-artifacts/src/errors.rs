use std::path::PathBuf;
use thiserror::Error;
use voter_allowlist_merkle::MerkleError;

pub type ArtifactResult<T> = Result<T, ArtifactError>;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Merkle(#[from] MerkleError),

    #[error("Schema validation error: {0}")]
    Schema(String),

    #[error("Missing artifact: {}", .0.display())]
    MissingArtifact(PathBuf),
}

impl From<tempfile::PersistError> for ArtifactError {
    fn from(err: tempfile::PersistError) -> Self {
        ArtifactError::Io(err.error)
    }
}
