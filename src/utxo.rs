//! Funding UTXOs: the input-only model handed to the deposit flow, and
//! selection of the outputs that fund a deposit.

use std::str::FromStr;

use bitcoin::{Amount, OutPoint, ScriptBuf, Txid};

use crate::{Error, Result};

/// An unspent output of a prior transaction, as reported by an indexer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utxo {
    /// The referenced transaction's txid.
    pub txid: Txid,
    /// The index of the referenced output in its transaction's vout.
    pub vout: u32,
    /// The value of the output.
    pub value: Amount,
    /// The script which must be satisfied for the output to be spent.
    pub script_pubkey: ScriptBuf,
}

impl Utxo {
    /// Builds a UTXO from the hex strings an indexer hands out.
    ///
    /// `txid_hex` is in display order, as shown by block explorers.
    pub fn from_hex_parts(
        txid_hex: &str,
        vout: u32,
        value_sats: u64,
        script_hex: &str,
    ) -> Result<Self> {
        let txid = Txid::from_str(txid_hex)
            .map_err(|e| Error::InvalidUtxo(format!("txid {}: {}", txid_hex, e)))?;
        let script_pubkey = ScriptBuf::from_hex(script_hex)
            .map_err(|e| Error::InvalidUtxo(format!("script {}: {}", script_hex, e)))?;

        Ok(Self {
            txid,
            vout,
            value: Amount::from_sat(value_sats),
            script_pubkey,
        })
    }

    pub fn outpoint(&self) -> OutPoint {
        OutPoint {
            txid: self.txid,
            vout: self.vout,
        }
    }
}

/// Picks the UTXOs that fund `amount`, largest first.
///
/// Without an amount every UTXO is returned. Otherwise UTXOs are taken
/// until their running sum exceeds the amount.
pub fn select_funding_utxos(mut utxos: Vec<Utxo>, amount: Option<Amount>) -> Result<Vec<Utxo>> {
    utxos.sort_by(|a, b| b.value.cmp(&a.value));

    let Some(required) = amount else {
        return Ok(utxos);
    };

    let mut sum = Amount::ZERO;
    let mut count = 0;
    for utxo in &utxos {
        count += 1;
        match sum.checked_add(utxo.value) {
            Some(next) => sum = next,
            // The true sum exceeds any representable amount.
            None => {
                sum = Amount::MAX;
                break;
            }
        }
        if sum > required {
            break;
        }
    }

    if sum < required {
        return Err(Error::InsufficientFunds {
            required,
            available: sum,
        });
    }

    utxos.truncate(count);
    Ok(utxos)
}

/// A service that knows the confirmed UTXOs of an address.
#[allow(async_fn_in_trait)]
pub trait UtxoSource {
    /// Returns the UTXOs funding `amount` for `address`, largest first.
    async fn funding_utxos(&self, address: &str, amount: Option<Amount>) -> Result<Vec<Utxo>>;
}
