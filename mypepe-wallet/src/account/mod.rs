//! Account management functionality
//!
//! This module turns derived keys into addresses and groups the receiving
//! indices of one phrase into a `Wallet`.

pub mod address;
mod wallet;

pub use address::{generate_address, validate_address, Address, AddressKind};
pub use wallet::*;
