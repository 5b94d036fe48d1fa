//! Pre-signing validation of transfer requests

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::amount::{Amount, AmountParseError};
use crate::account::validate_address;
use crate::config::NetworkParams;

/// Reason a transfer request was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationError {
    #[error("Invalid address")]
    InvalidAddress,

    #[error("Cannot send to yourself")]
    SelfTransferNotAllowed,

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Insufficient balance")]
    InsufficientBalance,
}

impl ValidationError {
    /// Stable identifier of the rejection
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidAddress => "InvalidAddress",
            Self::SelfTransferNotAllowed => "SelfTransferNotAllowed",
            Self::InvalidAmount => "InvalidAmount",
            Self::InsufficientBalance => "InsufficientBalance",
        }
    }
}

/// Validate a transfer of `amount` display units from `sender`, whose
/// balance is `balance` smallest units, to `recipient`.
///
/// The first failing check wins:
/// 1. recipient is not an address of `params`
/// 2. sender and recipient are the same address
/// 3. amount is not a positive decimal number
/// 4. amount exceeds the balance
///
/// On success the parsed amount is returned.
pub fn validate_transaction(
    params: &NetworkParams,
    sender: &str,
    recipient: &str,
    amount: &str,
    balance: u64,
) -> Result<Amount, ValidationError> {
    let result = check(params, sender, recipient, amount, balance);
    if let Err(e) = &result {
        debug!(kind = e.kind(), recipient = recipient.trim(), "transfer rejected");
    }
    result
}

fn check(
    params: &NetworkParams,
    sender: &str,
    recipient: &str,
    amount: &str,
    balance: u64,
) -> Result<Amount, ValidationError> {
    let recipient = recipient.trim();
    if !validate_address(recipient, params) {
        return Err(ValidationError::InvalidAddress);
    }

    if sender.trim() == recipient {
        return Err(ValidationError::SelfTransferNotAllowed);
    }

    let amount = match Amount::from_display_str(amount) {
        Ok(amount) if !amount.is_zero() => amount,
        // Larger than any representable balance
        Err(AmountParseError::Overflow) => return Err(ValidationError::InsufficientBalance),
        _ => return Err(ValidationError::InvalidAmount),
    };

    if amount > Amount::from_base_units(balance) {
        return Err(ValidationError::InsufficientBalance);
    }

    Ok(amount)
}
