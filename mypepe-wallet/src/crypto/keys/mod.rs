//! Key derivation and management
//!
//! Hierarchical derivation from a BIP39 seed, secp256k1 key pairs and
//! WIF import/export.

mod derivation;
pub mod hd;
pub mod path;
pub mod wif;

pub use derivation::*;
pub use hd::{generate_child, generate_root, generate_root_with_passphrase, ChildKey, ExtendedPrivateKey, RootKey};
pub use path::{DerivationPath, HARDENED_OFFSET};
pub use wif::from_wif;
