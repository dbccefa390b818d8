use thiserror::Error;

use crate::Address;

pub type MerkleResult<T> = Result<T, MerkleError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("Invalid address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    #[error("Cannot build a merkle tree from an empty address set")]
    EmptyInput,

    #[error("Address not found in tree: {0}")]
    AddressNotFound(Address),

    #[error("Invalid digest '{0}': expected 0x followed by 64 hex digits")]
    InvalidDigest(String),

    #[error("Invalid strategy: {0}")]
    InvalidStrategy(String),
}

impl MerkleError {
    pub(crate) fn invalid_address(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
