//! MyPepe Wallet Core - key derivation and transfer validation
//!
//! This library provides the logic behind the MyPepe browser wallet:
//! mnemonic generation, BIP32/BIP44 key derivation, address generation,
//! WIF import, and validation of transfers before they are signed.
//!
//! Everything here is synchronous and free of shared state. Randomness only
//! enters through [`crypto::EntropySource`].

pub mod error;
pub mod config;
pub mod metadata;
pub mod crypto;
pub mod account;
pub mod transaction;

// Re-export commonly used types for convenience
pub use account::{generate_address, validate_address, Address, Wallet};
pub use config::{NetworkParams, WalletConfig};
pub use crypto::keys::{from_wif, generate_child, generate_root, ChildKey, KeyPair, RootKey};
pub use crypto::mnemonic::{generate_phrase, Mnemonic};
pub use error::{Error, Result};
pub use transaction::{validate_transaction, Amount, ValidationError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
