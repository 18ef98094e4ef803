//! Error types for building and checking Pod proof PSBTs.

use bitcoin::Amount;
use thiserror::Error;

/// All possible errors that can occur when building or verifying a proof PSBT.
#[derive(Debug, Error)]
pub enum Error {
    /// The address does not decode to an output script on the configured network
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    /// The deposit flow was invoked without any funding UTXO
    #[error("No funding UTXO provided")]
    NoFundingUtxo,
    /// Script or PSBT assembly was rejected
    #[error("Script construction failed: {0}")]
    ScriptConstruction(String),
    /// The message could not be decoded into bytes
    #[error("Invalid message encoding: {0}")]
    InvalidMessageEncoding(String),
    /// A UTXO supplied by the caller or an indexer is malformed
    #[error("Invalid UTXO: {0}")]
    InvalidUtxo(String),
    /// The confirmed UTXOs of an address do not cover the requested amount
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: Amount, available: Amount },
    /// The base64 PSBT could not be decoded
    #[error("Invalid PSBT: {0}")]
    InvalidPsbt(String),
    /// The PSBT does not spend the expected virtual transaction
    #[error("Proof mismatch: {0}")]
    ProofMismatch(String),
    /// The network configuration is incomplete or malformed
    #[error("Configuration error: {0}")]
    Config(String),
    /// The indexing service could not be reached or answered garbage
    #[cfg(feature = "esplora")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
