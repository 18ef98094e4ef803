//! Client for an Esplora-compatible indexer (mempool.space and friends),
//! used as the source of funding UTXOs and output scripts.

use std::str::FromStr;

use bitcoin::{Amount, ScriptBuf, Txid};
use reqwest::{Client as HttpClient, ClientBuilder};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{select_funding_utxos, Error, NetworkConfig, Result, Utxo, UtxoSource};

/// Confirmation status of an indexed output.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct TxStatus {
    pub confirmed: bool,
    #[serde(default)]
    pub block_height: Option<u32>,
}

/// An entry of `GET /address/{address}/utxo`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct EsploraUtxo {
    pub txid: String,
    pub vout: u32,
    pub value: u64,
    #[serde(default)]
    pub status: TxStatus,
}

/// The answer of `GET /v1/validate-address/{address}`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AddressValidation {
    pub isvalid: bool,
    #[serde(rename = "scriptPubKey", default)]
    pub script_pubkey: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AddressValidation {
    /// The validated output script of the address.
    pub fn script_pubkey(&self, address: &str) -> Result<ScriptBuf> {
        if !self.isvalid {
            let reason = self.error.as_deref().unwrap_or("rejected by indexer");
            return Err(Error::InvalidAddress(format!("{}: {}", address, reason)));
        }

        let hex = self
            .script_pubkey
            .as_deref()
            .ok_or_else(|| Error::InvalidAddress(format!("{}: no scriptPubKey", address)))?;
        ScriptBuf::from_hex(hex).map_err(|e| Error::InvalidUtxo(format!("script {}: {}", hex, e)))
    }
}

/// Turns indexer entries into funding UTXOs: unconfirmed entries are
/// dropped, the rest is selected for `amount` and given `script_pubkey`.
pub fn funding_utxos_from_entries(
    entries: Vec<EsploraUtxo>,
    script_pubkey: &ScriptBuf,
    amount: Option<Amount>,
) -> Result<Vec<Utxo>> {
    let total = entries.len();
    let utxos = entries
        .into_iter()
        .filter(|entry| entry.status.confirmed)
        .map(|entry| {
            let txid = Txid::from_str(&entry.txid)
                .map_err(|e| Error::InvalidUtxo(format!("txid {}: {}", entry.txid, e)))?;
            Ok(Utxo {
                txid,
                vout: entry.vout,
                value: Amount::from_sat(entry.value),
                script_pubkey: script_pubkey.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if utxos.len() < total {
        debug!("Skipped {} unconfirmed UTXOs", total - utxos.len());
    }

    select_funding_utxos(utxos, amount)
}

/// Combines the two indexer answers for `address`: the address must be
/// valid before any of its UTXOs is selected.
pub fn funding_utxos_from_responses(
    address: &str,
    entries: Vec<EsploraUtxo>,
    validation: &AddressValidation,
    amount: Option<Amount>,
) -> Result<Vec<Utxo>> {
    let script_pubkey = match validation.script_pubkey(address) {
        Ok(script_pubkey) => script_pubkey,
        Err(e) => {
            warn!("Indexer rejected {}: {}", address, e);
            return Err(e);
        }
    };

    funding_utxos_from_entries(entries, &script_pubkey, amount)
}

#[derive(Clone, Debug)]
pub struct EsploraClient {
    client: HttpClient,
    base_url: String,
}

impl EsploraClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = ClientBuilder::new().build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(EsploraClient { client, base_url })
    }

    pub fn from_config(config: &NetworkConfig) -> Result<Self> {
        EsploraClient::new(config.esplora_url()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn address_utxos(&self, address: &str) -> Result<Vec<EsploraUtxo>> {
        let url = format!("{}/address/{}/utxo", self.base_url, address);
        let utxos = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<EsploraUtxo>>()
            .await?;

        Ok(utxos)
    }

    pub async fn validate_address(&self, address: &str) -> Result<AddressValidation> {
        let url = format!("{}/v1/validate-address/{}", self.base_url, address);
        let validation = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<AddressValidation>()
            .await?;

        Ok(validation)
    }
}

impl UtxoSource for EsploraClient {
    async fn funding_utxos(&self, address: &str, amount: Option<Amount>) -> Result<Vec<Utxo>> {
        let entries = self.address_utxos(address).await?;
        let validation = self.validate_address(address).await?;

        funding_utxos_from_responses(address, entries, &validation, amount)
    }
}
