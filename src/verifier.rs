//! Checks that a proof PSBT, typically the one a wallet hands back after
//! signing, still spends the virtual transaction derived from its inputs.

use bitcoin::{
    base64::{prelude::BASE64_STANDARD, Engine},
    Network, OutPoint, Psbt, Transaction,
};
use tracing::debug;

use crate::{Error, PsbtBuilder, Result, Utxo};

pub struct Verifier {
    builder: PsbtBuilder,
}

impl Verifier {
    pub fn new(network: Network) -> Self {
        Self {
            builder: PsbtBuilder::new(network),
        }
    }

    pub fn from_builder(builder: PsbtBuilder) -> Self {
        Self { builder }
    }

    /// Decodes a standard base64 PSBT.
    pub fn decode_psbt(psbt: &str) -> Result<Psbt> {
        let bytes = BASE64_STANDARD
            .decode(psbt.trim())
            .map_err(|e| Error::InvalidPsbt(format!("base64: {}", e)))?;
        Psbt::deserialize(&bytes).map_err(|e| Error::InvalidPsbt(e.to_string()))
    }

    /// Verifies that `psbt` is an ownership proof of `address` over `message`.
    pub fn verify_message_proof(
        &self,
        psbt: &str,
        address: &str,
        message: impl AsRef<[u8]>,
    ) -> Result<Psbt> {
        let psbt = Self::decode_psbt(psbt)?;
        let expected = self.builder.message_proof(address, message)?;
        check_spend_link(&psbt, &expected.to_spend, 0)?;
        check_outputs(&psbt, &expected.psbt.unsigned_tx)?;

        debug!("Message proof for {} verified", address);
        Ok(psbt)
    }

    /// Verifies that `psbt` is a deposit proof of `sender` over `utxo`.
    ///
    /// Only the virtual input is checked; the output depends on the
    /// receiver and amount chosen by the depositor.
    pub fn verify_deposit_proof(&self, psbt: &str, sender: &str, utxo: &Utxo) -> Result<Psbt> {
        let psbt = Self::decode_psbt(psbt)?;
        let to_spend = self.builder.deposit_to_spend(sender, utxo)?;
        check_spend_link(&psbt, &to_spend, utxo.vout)?;

        debug!("Deposit proof for {} over {} verified", sender, utxo.outpoint());
        Ok(psbt)
    }
}

/// Checks that the single input of `psbt` spends output `vout` of `to_spend`
/// and declares the first output of `to_spend` as its witness UTXO.
pub fn check_spend_link(psbt: &Psbt, to_spend: &Transaction, vout: u32) -> Result<()> {
    let unsigned = &psbt.unsigned_tx;
    if unsigned.input.len() != 1 || psbt.inputs.len() != 1 {
        return Err(Error::ProofMismatch(format!(
            "expected a single input, found {}",
            unsigned.input.len()
        )));
    }

    let expected = OutPoint {
        txid: to_spend.compute_txid(),
        vout,
    };
    let previous_output = unsigned.input[0].previous_output;
    if previous_output != expected {
        return Err(Error::ProofMismatch(format!(
            "input spends {}, expected {}",
            previous_output, expected
        )));
    }

    let spent = to_spend
        .output
        .first()
        .ok_or_else(|| Error::ProofMismatch("virtual transaction has no output".to_string()))?;
    match &psbt.inputs[0].witness_utxo {
        Some(witness_utxo) if witness_utxo == spent => Ok(()),
        Some(witness_utxo) => Err(Error::ProofMismatch(format!(
            "witness UTXO {} sat to {} does not match virtual output {} sat to {}",
            witness_utxo.value.to_sat(),
            witness_utxo.script_pubkey,
            spent.value.to_sat(),
            spent.script_pubkey
        ))),
        None => Err(Error::ProofMismatch("input has no witness UTXO".to_string())),
    }
}

fn check_outputs(psbt: &Psbt, expected: &Transaction) -> Result<()> {
    if psbt.unsigned_tx.output != expected.output {
        return Err(Error::ProofMismatch(
            "outputs differ from the expected proof".to_string(),
        ));
    }
    if psbt.unsigned_tx.version != expected.version {
        return Err(Error::ProofMismatch(format!(
            "version {} differs from {}",
            psbt.unsigned_tx.version.0, expected.version.0
        )));
    }

    Ok(())
}
