//! Network configuration injected into the builder and the indexer client.

use bitcoin::Network;
use serde::{Deserialize, Serialize};

use crate::{DepositOutput, Error, Result};

/// Where proofs are built for and where funding UTXOs are looked up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network: Network,
    /// Base URL of an Esplora-compatible indexer, e.g. `https://mempool.space/api`.
    #[serde(default)]
    pub esplora_url: Option<String>,
    #[serde(default)]
    pub deposit_output: DepositOutput,
}

impl NetworkConfig {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            esplora_url: None,
            deposit_output: DepositOutput::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn with_esplora_url(mut self, url: impl Into<String>) -> Self {
        self.esplora_url = Some(url.into());
        self
    }

    pub fn with_deposit_output(mut self, deposit_output: DepositOutput) -> Self {
        self.deposit_output = deposit_output;
        self
    }

    /// The configured indexer URL, falling back to mempool.space for public networks.
    pub fn esplora_url(&self) -> Result<String> {
        if let Some(url) = &self.esplora_url {
            return Ok(url.trim_end_matches('/').to_string());
        }

        match self.network {
            Network::Bitcoin => Ok("https://mempool.space/api".to_string()),
            Network::Testnet => Ok("https://mempool.space/testnet/api".to_string()),
            Network::Signet => Ok("https://mempool.space/signet/api".to_string()),
            other => Err(Error::Config(format!(
                "no default indexer for network {}, set esplora_url",
                other
            ))),
        }
    }
}
