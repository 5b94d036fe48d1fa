//! Transfer and raw-transaction types

use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::validation::{validate_transaction, ValidationError};
use crate::config::NetworkParams;
use crate::error::{Error, Result};

/// A send attempt as entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Sending address
    pub sender_address: String,
    /// Receiving address
    pub recipient_address: String,
    /// Amount in display units, as typed
    pub amount: String,
    /// Sender balance in smallest units
    pub address_balance: u64,
}

impl TransferRequest {
    /// Validate the request, returning the parsed amount
    pub fn validate(&self, params: &NetworkParams) -> std::result::Result<Amount, ValidationError> {
        validate_transaction(
            params,
            &self.sender_address,
            &self.recipient_address,
            &self.amount,
            self.address_balance,
        )
    }
}

/// An unspent output owned by the sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    /// Transaction id, hex encoded
    pub txid: String,
    /// Output index within the transaction
    pub vout: u32,
    /// Output value
    pub value: Amount,
}

impl Utxo {
    /// Create an unspent output, checking the txid encoding
    pub fn new(txid: impl Into<String>, vout: u32, value: Amount) -> Result<Self> {
        let txid = txid.into();
        let bytes = hex::decode(&txid)
            .map_err(|e| Error::InvalidInput(format!("Invalid txid {}: {}", txid, e)))?;
        if bytes.len() != 32 {
            return Err(Error::InvalidInput(format!(
                "Invalid txid {}: expected 32 bytes, got {}",
                txid,
                bytes.len()
            )));
        }
        Ok(Self { txid, vout, value })
    }
}

/// Input handed to the external transaction builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransactionRequest {
    /// Sending address, also receives the change
    pub sender: String,
    /// Receiving address
    pub recipient: String,
    /// Amount sent to the recipient
    pub amount: Amount,
    /// Network fee
    pub fee: Amount,
    /// Outputs being spent
    pub inputs: Vec<Utxo>,
    /// Value returned to the sender
    pub change: Amount,
}

/// Output of the external transaction builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    /// Serialized transaction, hex encoded
    pub raw_tx: String,
    /// Fee actually paid
    pub fee: Amount,
}

/// Builds and signs raw transactions outside this crate
pub trait TransactionBuilder {
    /// Build a raw transaction for a prepared request
    fn build(&self, request: &RawTransactionRequest) -> Result<RawTransaction>;
}
