//! Input selection for outgoing transfers

use tracing::{debug, instrument};

use super::amount::Amount;
use super::types::{RawTransactionRequest, TransferRequest, Utxo};
use crate::config::NetworkParams;
use crate::error::{Error, Result};

/// Fee attached to a transfer unless configured otherwise (0.01 coin)
pub const DEFAULT_FEE: Amount = Amount::from_base_units(1_000_000);

/// Outputs chosen to fund a transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtxoSelection {
    /// Selected outputs, in the order given
    pub inputs: Vec<Utxo>,
    /// Sum of the selected outputs
    pub total: Amount,
    /// `total - amount - fee`
    pub change: Amount,
}

/// Take outputs in order until their sum strictly exceeds `amount + fee`
pub fn select_utxos(utxos: &[Utxo], amount: Amount, fee: Amount) -> Result<UtxoSelection> {
    let target = amount
        .checked_add(fee)
        .ok_or_else(|| Error::InvalidInput("amount plus fee overflows".to_string()))?;

    let mut inputs = Vec::new();
    let mut total = Amount::ZERO;
    for utxo in utxos {
        total = total
            .checked_add(utxo.value)
            .ok_or_else(|| Error::InvalidInput("utxo total overflows".to_string()))?;
        inputs.push(utxo.clone());

        if total > target {
            debug!(inputs = inputs.len(), %total, %target, "selected utxos");
            return Ok(UtxoSelection {
                inputs,
                total,
                change: total - target,
            });
        }
    }

    Err(Error::InsufficientFunds {
        needed: target.to_base_units(),
        available: total.to_base_units(),
    })
}

/// Validate a transfer and select the outputs that fund it
#[instrument(skip_all, fields(fee = %fee))]
pub fn prepare_transfer(
    params: &NetworkParams,
    request: &TransferRequest,
    utxos: &[Utxo],
    fee: Amount,
) -> Result<RawTransactionRequest> {
    let amount = request.validate(params)?;
    let selection = select_utxos(utxos, amount, fee)?;

    Ok(RawTransactionRequest {
        sender: request.sender_address.trim().to_string(),
        recipient: request.recipient_address.trim().to_string(),
        amount,
        fee,
        inputs: selection.inputs,
        change: selection.change,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utxo(n: u8, value: u64) -> Utxo {
        Utxo::new(hex::encode([n; 32]), u32::from(n), Amount::from_base_units(value)).unwrap()
    }

    #[test]
    fn test_stops_once_target_exceeded() {
        let utxos = vec![utxo(1, 60), utxo(2, 50), utxo(3, 1_000)];
        let selection =
            select_utxos(&utxos, Amount::from_base_units(100), Amount::from_base_units(5)).unwrap();

        assert_eq!(selection.inputs.len(), 2);
        assert_eq!(selection.total, Amount::from_base_units(110));
        assert_eq!(selection.change, Amount::from_base_units(5));
    }

    #[test]
    fn test_exact_match_is_not_enough() {
        let utxos = vec![utxo(1, 100), utxo(2, 5)];
        let err = select_utxos(&utxos, Amount::from_base_units(100), Amount::from_base_units(5))
            .unwrap_err();

        assert!(matches!(err, Error::InsufficientFunds { needed: 105, available: 105 }));
    }

    #[test]
    fn test_empty_set() {
        let err = select_utxos(&[], Amount::from_base_units(1), DEFAULT_FEE).unwrap_err();
        assert!(matches!(err, Error::InsufficientFunds { available: 0, .. }));
    }

    #[test]
    fn test_utxo_rejects_bad_txid() {
        assert!(matches!(Utxo::new("xyz", 0, Amount::ZERO), Err(Error::InvalidInput(_))));
        assert!(matches!(Utxo::new("abcd", 0, Amount::ZERO), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_overflowing_totals() {
        let err = select_utxos(&[], Amount::from_base_units(u64::MAX), Amount::from_base_units(1))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let utxos = vec![utxo(1, u64::MAX - 1), utxo(2, 2)];
        let err = select_utxos(&utxos, Amount::from_base_units(u64::MAX - 2), Amount::from_base_units(1))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
