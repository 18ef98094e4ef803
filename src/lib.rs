//! BIP-322 style ownership and deposit proofs for Pod custody vaults.
//!
//! The crate builds the virtual "to_spend" transaction committing to a
//! tagged message hash and the unsigned "to_sign" PSBT spending it. The
//! PSBT is handed to a wallet for signing; nothing here signs or
//! broadcasts.

pub mod builder;
pub mod config;
pub mod error;
#[cfg(feature = "esplora")]
pub mod esplora;
pub mod utils;
pub mod utxo;
pub mod verifier;

pub use builder::*;
pub use config::*;
pub use error::*;
#[cfg(feature = "esplora")]
pub use esplora::*;
pub use utils::*;
pub use utxo::*;
pub use verifier::*;
