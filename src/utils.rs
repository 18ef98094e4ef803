//! The utility methods for BIP-322 message commitments: the tagged hash,
//! the commitment scriptSig of the virtual "to_spend" input and address
//! resolution.

use std::str::FromStr;
use std::sync::OnceLock;

use bitcoin::{
    base64::{prelude::BASE64_STANDARD, Engine},
    hashes::{sha256, Hash, HashEngine},
    hex::FromHex,
    opcodes::{all::OP_PUSHNUM_1, Opcode, OP_0},
    script::{Builder, Instruction},
    Address, Network, Script, ScriptBuf,
};

use crate::{Error, Result};

const TAG: &str = "BIP0322-signed-message";

static TAG_PREFIX: OnceLock<[u8; 64]> = OnceLock::new();

/// `SHA256(tag) || SHA256(tag)`, computed once per process.
fn tag_prefix() -> &'static [u8; 64] {
    TAG_PREFIX.get_or_init(|| {
        let tag_hash = sha256::Hash::hash(TAG.as_bytes());
        let mut prefix = [0u8; 64];
        prefix[..32].copy_from_slice(tag_hash.as_byte_array());
        prefix[32..].copy_from_slice(tag_hash.as_byte_array());
        prefix
    })
}

/// Creates a tagged hash of a message according to the BIP322 specification.
///
/// Strings are hashed as their UTF-8 bytes. This is a single SHA-256 pass
/// over the 64-byte tag prefix followed by the message.
pub fn tagged_message_hash(message: impl AsRef<[u8]>) -> sha256::Hash {
    let mut engine = sha256::Hash::engine();
    engine.input(tag_prefix());
    engine.input(message.as_ref());

    sha256::Hash::from_engine(engine)
}

/// How a textual message handed over by a caller maps to bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageEncoding {
    /// The text itself, as UTF-8.
    #[default]
    Utf8,
    /// Hex-encoded raw bytes.
    Hex,
    /// Standard base64-encoded raw bytes.
    Base64,
}

/// Decodes a textual message into the bytes that get committed to.
pub fn decode_message(input: &str, encoding: MessageEncoding) -> Result<Vec<u8>> {
    match encoding {
        MessageEncoding::Utf8 => Ok(input.as_bytes().to_vec()),
        MessageEncoding::Hex => Vec::<u8>::from_hex(input)
            .map_err(|e| Error::InvalidMessageEncoding(format!("hex: {}", e))),
        MessageEncoding::Base64 => BASE64_STANDARD
            .decode(input)
            .map_err(|e| Error::InvalidMessageEncoding(format!("base64: {}", e))),
    }
}

/// The element preceding the commitment in a virtual "to_spend" scriptSig.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitmentMarker {
    /// `OP_0`, used by plain message proofs.
    Zero,
    /// `OP_PUSHNUM_1`, used by deposit proofs.
    One,
}

impl CommitmentMarker {
    pub fn opcode(self) -> Opcode {
        match self {
            Self::Zero => OP_0,
            Self::One => OP_PUSHNUM_1,
        }
    }
}

/// Builds `<marker> <commitment>`, the scriptSig of a virtual "to_spend" input.
pub fn commitment_script_sig(marker: CommitmentMarker, commitment: &sha256::Hash) -> ScriptBuf {
    Builder::new()
        .push_opcode(marker.opcode())
        .push_slice(commitment.to_byte_array())
        .into_script()
}

/// Parses a scriptSig built by [`commitment_script_sig`] back into its parts.
pub fn extract_commitment(script_sig: &Script) -> Result<(CommitmentMarker, sha256::Hash)> {
    let malformed = |what: &str| Error::ScriptConstruction(format!("commitment scriptSig {}", what));
    let mut instructions = script_sig.instructions();

    // OP_0 decodes as an empty push.
    let marker = match instructions.next() {
        Some(Ok(Instruction::PushBytes(bytes))) if bytes.is_empty() => CommitmentMarker::Zero,
        Some(Ok(Instruction::Op(op))) if op == OP_PUSHNUM_1 => CommitmentMarker::One,
        _ => return Err(malformed("has no marker")),
    };

    let commitment = match instructions.next() {
        Some(Ok(Instruction::PushBytes(bytes))) => {
            let array: [u8; 32] = bytes
                .as_bytes()
                .try_into()
                .map_err(|_| malformed("does not push 32 bytes"))?;
            sha256::Hash::from_byte_array(array)
        }
        _ => return Err(malformed("has no commitment push")),
    };

    if instructions.next().is_some() {
        return Err(malformed("has trailing data"));
    }

    Ok((marker, commitment))
}

/// Resolves an address to its output script, rejecting other networks.
pub fn resolve_script_pubkey(address: &str, network: Network) -> Result<ScriptBuf> {
    let unchecked = Address::from_str(address)
        .map_err(|e| Error::InvalidAddress(format!("{}: {}", address, e)))?;
    let checked = unchecked
        .require_network(network)
        .map_err(|e| Error::InvalidAddress(format!("{}: {}", address, e)))?;

    Ok(checked.script_pubkey())
}
