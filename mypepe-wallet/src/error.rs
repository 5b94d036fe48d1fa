//! Error types for the wallet-core library

use thiserror::Error;

use crate::transaction::ValidationError;

/// Custom error type for wallet-core operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Invalid WIF: {0}")]
    InvalidWif(String),

    #[error("Invalid child index: {0}")]
    InvalidIndex(u32),

    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    #[error("Entropy error: {0}")]
    Entropy(String),

    #[error("Insufficient funds: need {needed}, available {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("Transfer rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for wallet-core operations
pub type Result<T> = std::result::Result<T, Error>;
