//! Cryptographic primitives and operations
//!
//! This module provides functionality for mnemonic generation, key derivation,
//! and the encodings required for wallet management.

pub mod base58;
pub mod entropy;
pub mod mnemonic;
pub mod keys;

pub use entropy::{EntropySource, FixedEntropy, OsEntropy};
pub use mnemonic::*;
pub use keys::*;
