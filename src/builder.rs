//! Construction of the virtual "to_spend" transaction and the "to_sign"
//! PSBT for ownership proofs and deposit proofs.

use bitcoin::{
    absolute::LockTime,
    base64::{prelude::BASE64_STANDARD, Engine},
    hashes::{sha256, Hash},
    opcodes::all::{OP_DUP, OP_HASH160, OP_RETURN},
    script::Builder,
    transaction::Version,
    Amount, Network, OutPoint, Psbt, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Txid, Witness,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    commitment_script_sig, resolve_script_pubkey, tagged_message_hash, CommitmentMarker, Error,
    NetworkConfig, Result, Utxo, UtxoSource,
};

/// Message committed to by every deposit proof.
pub const DEPOSIT_MESSAGE: &str = "deposit";

/// Value carried by the virtual deposit output.
pub const DEPOSIT_MARKER_VALUE: Amount = Amount::from_sat(1);

/// The output carried by a deposit proof PSBT.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositOutput {
    /// A bare `OP_DUP OP_HASH160` template worth one satoshi, as expected by
    /// the Pod operator.
    #[default]
    PubkeyHashTemplate,
    /// The receiver's output script carrying the deposit amount.
    Receiver,
}

/// A virtual "to_spend" transaction together with the PSBT spending it.
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualProof {
    pub commitment: sha256::Hash,
    pub to_spend: Transaction,
    pub psbt: Psbt,
}

impl VirtualProof {
    pub fn to_spend_txid(&self) -> Txid {
        self.to_spend.compute_txid()
    }

    /// Serializes the PSBT as standard base64, ready for a wallet's `signPsbt`.
    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(self.psbt.serialize())
    }
}

/// Builds proof PSBTs for a single network.
#[derive(Clone, Copy, Debug)]
pub struct PsbtBuilder {
    network: Network,
    deposit_output: DepositOutput,
}

impl PsbtBuilder {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            deposit_output: DepositOutput::default(),
        }
    }

    pub fn from_config(config: &NetworkConfig) -> Self {
        Self {
            network: config.network,
            deposit_output: config.deposit_output,
        }
    }

    pub fn with_deposit_output(mut self, deposit_output: DepositOutput) -> Self {
        self.deposit_output = deposit_output;
        self
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Builds the ownership proof of `address` over `message`.
    ///
    /// The unsigned "to_sign" transaction is the BIP-322 one: version 0,
    /// a single input spending output 0 of "to_spend" and a single
    /// zero-value `OP_RETURN` output.
    pub fn message_proof(&self, address: &str, message: impl AsRef<[u8]>) -> Result<VirtualProof> {
        let script_pubkey = resolve_script_pubkey(address, self.network)?;
        let commitment = tagged_message_hash(message);

        let to_spend = to_spend(
            Version(0),
            OutPoint {
                txid: Txid::all_zeros(),
                vout: 0xFFFFFFFF,
            },
            Sequence::ZERO,
            commitment_script_sig(CommitmentMarker::Zero, &commitment),
            TxOut {
                value: Amount::ZERO,
                script_pubkey,
            },
        );

        let psbt = to_sign(
            Version(0),
            OutPoint {
                txid: to_spend.compute_txid(),
                vout: 0,
            },
            to_spend.output[0].clone(),
            TxOut {
                value: Amount::ZERO,
                script_pubkey: Builder::new().push_opcode(OP_RETURN).into_script(),
            },
        )?;

        debug!(
            "Built message proof for {} spending virtual tx {}",
            address,
            to_spend.compute_txid()
        );

        Ok(VirtualProof {
            commitment,
            to_spend,
            psbt,
        })
    }

    /// Builds the deposit proof of `sender` over its first funding UTXO.
    ///
    /// The PSBT input keeps the funding UTXO's output index even though the
    /// virtual transaction has a single output; the Pod operator relies on it.
    pub fn deposit_proof(
        &self,
        sender: &str,
        receiver: &str,
        amount_sats: u64,
        utxos: &[Utxo],
    ) -> Result<VirtualProof> {
        let utxo = utxos.first().ok_or(Error::NoFundingUtxo)?;
        let to_spend = self.deposit_to_spend(sender, utxo)?;

        let output = match self.deposit_output {
            DepositOutput::PubkeyHashTemplate => TxOut {
                value: DEPOSIT_MARKER_VALUE,
                script_pubkey: pubkey_hash_template(),
            },
            DepositOutput::Receiver => TxOut {
                value: Amount::from_sat(amount_sats),
                script_pubkey: resolve_script_pubkey(receiver, self.network)?,
            },
        };

        let psbt = to_sign(
            Version::TWO,
            OutPoint {
                txid: to_spend.compute_txid(),
                vout: utxo.vout,
            },
            to_spend.output[0].clone(),
            output,
        )?;

        debug!(
            "Built deposit proof for {} over {} spending virtual tx {}",
            sender,
            utxo.outpoint(),
            to_spend.compute_txid()
        );

        Ok(VirtualProof {
            commitment: tagged_message_hash(DEPOSIT_MESSAGE),
            to_spend,
            psbt,
        })
    }

    /// Builds the virtual deposit transaction of `sender` spending `utxo`.
    pub fn deposit_to_spend(&self, sender: &str, utxo: &Utxo) -> Result<Transaction> {
        let sender_script = resolve_script_pubkey(sender, self.network)?;
        let commitment = tagged_message_hash(DEPOSIT_MESSAGE);

        Ok(to_spend(
            Version::ONE,
            utxo.outpoint(),
            Sequence::ENABLE_RBF_NO_LOCKTIME,
            commitment_script_sig(CommitmentMarker::One, &commitment),
            TxOut {
                value: DEPOSIT_MARKER_VALUE,
                script_pubkey: sender_script,
            },
        ))
    }

    /// Fetches the funding UTXOs of `sender` and builds its deposit proof.
    pub async fn deposit_proof_from_source<S: UtxoSource>(
        &self,
        source: &S,
        sender: &str,
        receiver: &str,
        amount_sats: u64,
    ) -> Result<VirtualProof> {
        let utxos = source
            .funding_utxos(sender, Some(Amount::from_sat(amount_sats)))
            .await?;
        debug!("Found {} funding UTXOs for {}", utxos.len(), sender);

        self.deposit_proof(sender, receiver, amount_sats, &utxos)
    }
}

/// Builds the base64 ownership proof PSBT of `address` over `message`.
pub fn build_message_proof_psbt(
    address: &str,
    message: impl AsRef<[u8]>,
    network: Network,
) -> Result<String> {
    PsbtBuilder::new(network)
        .message_proof(address, message)
        .map(|proof| proof.to_base64())
}

/// Builds the base64 deposit proof PSBT of `sender` over `utxos[0]`.
pub fn build_deposit_proof_psbt(
    sender: &str,
    receiver: &str,
    amount_sats: u64,
    utxos: &[Utxo],
    network: Network,
) -> Result<String> {
    PsbtBuilder::new(network)
        .deposit_proof(sender, receiver, amount_sats, utxos)
        .map(|proof| proof.to_base64())
}

/// Constructs a virtual "to_spend" transaction with one input and one output.
pub fn to_spend(
    version: Version,
    previous_output: OutPoint,
    sequence: Sequence,
    script_sig: ScriptBuf,
    output: TxOut,
) -> Transaction {
    Transaction {
        version,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output,
            script_sig,
            sequence,
            witness: Witness::new(),
        }],
        output: vec![output],
    }
}

/// Constructs the "to_sign" PSBT spending `outpoint`, described by `witness_utxo`.
pub fn to_sign(
    version: Version,
    outpoint: OutPoint,
    witness_utxo: TxOut,
    output: TxOut,
) -> Result<Psbt> {
    let tx = Transaction {
        version,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output: outpoint,
            script_sig: ScriptBuf::new(),
            sequence: Sequence::ZERO,
            witness: Witness::new(),
        }],
        output: vec![output],
    };

    let mut psbt =
        Psbt::from_unsigned_tx(tx).map_err(|e| Error::ScriptConstruction(format!("psbt: {}", e)))?;
    psbt.inputs[0].witness_utxo = Some(witness_utxo);

    Ok(psbt)
}

fn pubkey_hash_template() -> ScriptBuf {
    Builder::new()
        .push_opcode(OP_DUP)
        .push_opcode(OP_HASH160)
        .into_script()
}

#[cfg(test)]
mod tests {
    use bitcoin::{
        consensus, ecdsa,
        secp256k1::{Message, Secp256k1},
        sighash::{EcdsaSighashType, SighashCache},
        PublicKey,
    };

    use super::*;
    use crate::{extract_commitment, select_funding_utxos};

    const SEGWIT_ADDRESS: &str = "bc1q9vza2e8x573nczrlzms0wvx3gsqjx7vavgkx0l";
    const RECEIVER_ADDRESS: &str = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq";
    const TESTNET_ADDRESS: &str = "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx";
    const SCRIPT_HEX: &str = "00142b05d564e6a7a33c087f16e0f730d1440123799d";

    const EMPTY_PSBT: &str = "cHNidP8BAD0AAAAAAaeZWlQ8KGa1G6ll540B3l21BDXN6dSCv2DYuJumCmjFAAAAAAAAAAAAAQAAAAAAAAAAAWoAAAAAAAEBHwAAAAAAAAAAFgAUKwXVZOanozwIfxbg9zDRRAEjeZ0AAA==";
    const HELLO_WORLD_PSBT: &str = "cHNidP8BAD0AAAAAASs1A9aiYU3q8XFsIzJcU+BRS0r8mBAcdxdSrUBnGZ23AAAAAAAAAAAAAQAAAAAAAAAAAWoAAAAAAAEBHwAAAAAAAAAAFgAUKwXVZOanozwIfxbg9zDRRAEjeZ0AAA==";
    const DEPOSIT_PSBT: &str = "cHNidP8BAD4CAAAAAS9hosyuWaeUH4ewmYFcgdwybvtGoe/RrsLDc+tkIMd6AAAAAAAAAAAAAQEAAAAAAAAAAnapAAAAAAABAR8BAAAAAAAAABYAFCsF1WTmp6M8CH8W4Pcw0UQBI3mdAAA=";

    fn funding_utxo(vout: u32) -> Utxo {
        Utxo::from_hex_parts(&"aa".repeat(32), vout, 100_000, SCRIPT_HEX).unwrap()
    }

    #[test]
    fn test_message_proof_matches_bip322_vectors() {
        let builder = PsbtBuilder::new(Network::Bitcoin);

        let empty = builder.message_proof(SEGWIT_ADDRESS, "").unwrap();
        assert_eq!(
            empty.to_spend_txid().to_string(),
            "c5680aa69bb8d860bf82d4e9cd3504b55dde018de765a91bb566283c545a99a7"
        );
        assert_eq!(
            empty.psbt.unsigned_tx.compute_txid().to_string(),
            "1e9654e951a5ba44c8604c4de6c67fd78a27e81dcadcfe1edf638ba3aaebaed6"
        );
        assert_eq!(empty.to_base64(), EMPTY_PSBT);

        let hello = builder.message_proof(SEGWIT_ADDRESS, "Hello World").unwrap();
        assert_eq!(
            hello.to_spend_txid().to_string(),
            "b79d196740ad5217771c1098fc4a4b51e0535c32236c71f1ea4d61a2d603352b"
        );
        assert_eq!(
            hello.psbt.unsigned_tx.compute_txid().to_string(),
            "88737ae86f2077145f93cc4b153ae9a1cb8d56afa511988c149c5c8c9d93bddf"
        );
        assert_eq!(hello.to_base64(), HELLO_WORLD_PSBT);
    }

    #[test]
    fn test_message_proof_layout() {
        let proof = PsbtBuilder::new(Network::Bitcoin)
            .message_proof(SEGWIT_ADDRESS, "Hello World")
            .unwrap();
        let script_pubkey = resolve_script_pubkey(SEGWIT_ADDRESS, Network::Bitcoin).unwrap();

        let spend_input = &proof.to_spend.input[0];
        assert_eq!(proof.to_spend.version, Version(0));
        assert_eq!(spend_input.previous_output.txid, Txid::all_zeros());
        assert_eq!(spend_input.previous_output.vout, 0xFFFFFFFF);
        assert_eq!(spend_input.sequence, Sequence::ZERO);
        assert_eq!(proof.to_spend.output[0].value, Amount::ZERO);
        assert_eq!(proof.to_spend.output[0].script_pubkey, script_pubkey);

        let unsigned = &proof.psbt.unsigned_tx;
        assert_eq!(unsigned.version, Version(0));
        assert_eq!(unsigned.input.len(), 1);
        assert_eq!(unsigned.input[0].sequence, Sequence::ZERO);
        assert_eq!(unsigned.output.len(), 1);
        assert_eq!(unsigned.output[0].value, Amount::ZERO);
        assert_eq!(unsigned.output[0].script_pubkey.as_bytes(), &[0x6a]);
        assert_eq!(
            proof.psbt.inputs[0].witness_utxo,
            Some(TxOut {
                value: Amount::ZERO,
                script_pubkey,
            })
        );
    }

    #[test]
    fn test_message_proof_is_deterministic() {
        let first = build_message_proof_psbt(SEGWIT_ADDRESS, "Hello World", Network::Bitcoin);
        let second = build_message_proof_psbt(SEGWIT_ADDRESS, "Hello World", Network::Bitcoin);
        assert_eq!(first.unwrap(), second.unwrap());
    }

    #[test]
    fn test_message_proof_rejects_wrong_network() {
        assert!(matches!(
            build_message_proof_psbt(SEGWIT_ADDRESS, "Hello World", Network::Testnet),
            Err(Error::InvalidAddress(_))
        ));

        let testnet = build_message_proof_psbt(TESTNET_ADDRESS, "Hello World", Network::Testnet);
        assert!(testnet.is_ok());
        assert!(matches!(
            build_message_proof_psbt(TESTNET_ADDRESS, "Hello World", Network::Bitcoin),
            Err(Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_message_proof_commitment_round_trip() {
        let proof = PsbtBuilder::new(Network::Bitcoin)
            .message_proof(SEGWIT_ADDRESS, b"\x00raw bytes\xff")
            .unwrap();
        let (marker, commitment) = extract_commitment(&proof.to_spend.input[0].script_sig).unwrap();

        assert_eq!(marker, CommitmentMarker::Zero);
        assert_eq!(commitment, tagged_message_hash(b"\x00raw bytes\xff"));
        assert_eq!(commitment, proof.commitment);
    }

    #[test]
    fn test_published_signature_verifies_against_message_proof() {
        // BIP-322 "Hello World" simple signature for SEGWIT_ADDRESS.
        let signature = "AkcwRAIgZRfIY3p7/DoVTty6YZbWS71bc5Vct9p9Fia83eRmw2QCICK/ENGfwLtptFluMGs2KsqoNSk89pO7F29zJLUx9a/sASECx/EgAxlkQpQ9hYjgGu6EBCPMVPwVIVJqO4XCsMvViHI=";
        let witness: Witness = consensus::deserialize(&BASE64_STANDARD.decode(signature).unwrap())
            .unwrap();
        let ecdsa_sig = ecdsa::Signature::from_slice(&witness[0]).unwrap();
        let pubkey = PublicKey::from_slice(&witness[1]).unwrap();
        assert_eq!(ecdsa_sig.sighash_type, EcdsaSighashType::All);

        let proof = PsbtBuilder::new(Network::Bitcoin)
            .message_proof(SEGWIT_ADDRESS, "Hello World")
            .unwrap();
        let witness_utxo = proof.psbt.inputs[0].witness_utxo.clone().unwrap();
        let sighash = SighashCache::new(&proof.psbt.unsigned_tx)
            .p2wpkh_signature_hash(
                0,
                &witness_utxo.script_pubkey,
                witness_utxo.value,
                EcdsaSighashType::All,
            )
            .unwrap();

        let secp = Secp256k1::verification_only();
        let message = Message::from_digest(sighash.to_byte_array());
        assert!(secp
            .verify_ecdsa(&message, &ecdsa_sig.signature, &pubkey.inner)
            .is_ok());

        let other = PsbtBuilder::new(Network::Bitcoin)
            .message_proof(SEGWIT_ADDRESS, "Hello World!")
            .unwrap();
        let other_sighash = SighashCache::new(&other.psbt.unsigned_tx)
            .p2wpkh_signature_hash(
                0,
                &witness_utxo.script_pubkey,
                witness_utxo.value,
                EcdsaSighashType::All,
            )
            .unwrap();
        let other_message = Message::from_digest(other_sighash.to_byte_array());
        assert!(secp
            .verify_ecdsa(&other_message, &ecdsa_sig.signature, &pubkey.inner)
            .is_err());
    }

    #[test]
    fn test_deposit_proof_without_utxos() {
        let result = build_deposit_proof_psbt(
            SEGWIT_ADDRESS,
            RECEIVER_ADDRESS,
            50_000,
            &[],
            Network::Bitcoin,
        );
        assert!(matches!(result, Err(Error::NoFundingUtxo)));
    }

    #[test]
    fn test_deposit_proof_spends_virtual_transaction() {
        let utxo = funding_utxo(0);
        let proof = PsbtBuilder::new(Network::Bitcoin)
            .deposit_proof(SEGWIT_ADDRESS, RECEIVER_ADDRESS, 50_000, &[utxo.clone()])
            .unwrap();

        let input = &proof.psbt.unsigned_tx.input[0];
        assert_ne!(input.previous_output.txid, utxo.txid);
        assert_eq!(input.previous_output.txid, proof.to_spend_txid());
        assert_eq!(
            proof.to_spend_txid().to_string(),
            "7ac72064eb73c3c2aed1efa146fb6e32dc815c8199b0871f94a759aecca2612f"
        );
        assert_eq!(proof.to_base64(), DEPOSIT_PSBT);
    }

    #[test]
    fn test_deposit_proof_layout() {
        let utxo = funding_utxo(3);
        let proof = PsbtBuilder::new(Network::Bitcoin)
            .deposit_proof(SEGWIT_ADDRESS, RECEIVER_ADDRESS, 50_000, &[utxo.clone(), funding_utxo(4)])
            .unwrap();
        let sender_script = resolve_script_pubkey(SEGWIT_ADDRESS, Network::Bitcoin).unwrap();

        let spend_input = &proof.to_spend.input[0];
        assert_eq!(proof.to_spend.version, Version::ONE);
        assert_eq!(spend_input.previous_output, utxo.outpoint());
        assert_eq!(spend_input.sequence, Sequence(0xFFFFFFFD));
        assert_eq!(proof.to_spend.output[0].value, Amount::from_sat(1));
        assert_eq!(proof.to_spend.output[0].script_pubkey, sender_script);

        let (marker, commitment) = extract_commitment(&spend_input.script_sig).unwrap();
        assert_eq!(marker, CommitmentMarker::One);
        assert_eq!(commitment, tagged_message_hash(DEPOSIT_MESSAGE));

        let unsigned = &proof.psbt.unsigned_tx;
        assert_eq!(unsigned.version, Version::TWO);
        assert_eq!(unsigned.input[0].previous_output.vout, 3);
        assert_eq!(unsigned.input[0].sequence, Sequence::ZERO);
        assert_eq!(unsigned.output[0].value, Amount::from_sat(1));
        assert_eq!(unsigned.output[0].script_pubkey.as_bytes(), &[0x76, 0xa9]);
        assert_eq!(
            proof.psbt.inputs[0].witness_utxo,
            Some(TxOut {
                value: Amount::from_sat(1),
                script_pubkey: sender_script,
            })
        );
    }

    #[test]
    fn test_deposit_proof_receiver_output() {
        let proof = PsbtBuilder::new(Network::Bitcoin)
            .with_deposit_output(DepositOutput::Receiver)
            .deposit_proof(SEGWIT_ADDRESS, RECEIVER_ADDRESS, 50_000, &[funding_utxo(0)])
            .unwrap();
        let receiver_script = resolve_script_pubkey(RECEIVER_ADDRESS, Network::Bitcoin).unwrap();

        let output = &proof.psbt.unsigned_tx.output[0];
        assert_eq!(output.value, Amount::from_sat(50_000));
        assert_eq!(output.script_pubkey, receiver_script);
    }

    #[test]
    fn test_deposit_proof_rejects_invalid_addresses() {
        let utxos = [funding_utxo(0)];
        assert!(matches!(
            build_deposit_proof_psbt("garbage", RECEIVER_ADDRESS, 1, &utxos, Network::Bitcoin),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(
            PsbtBuilder::new(Network::Bitcoin)
                .with_deposit_output(DepositOutput::Receiver)
                .deposit_proof(SEGWIT_ADDRESS, TESTNET_ADDRESS, 1, &utxos),
            Err(Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_template_deposit_ignores_receiver() {
        let utxos = [funding_utxo(0)];
        let with_receiver =
            build_deposit_proof_psbt(SEGWIT_ADDRESS, RECEIVER_ADDRESS, 1, &utxos, Network::Bitcoin)
                .unwrap();
        let without_receiver =
            build_deposit_proof_psbt(SEGWIT_ADDRESS, "", 1, &utxos, Network::Bitcoin).unwrap();

        assert_eq!(with_receiver, without_receiver);
        assert_eq!(with_receiver, DEPOSIT_PSBT);
    }

    #[test]
    fn test_deposit_proof_reads_txid_in_display_order() {
        let txid_hex: String = (1u8..=32).map(|b| format!("{:02x}", b)).collect();
        let utxo = Utxo::from_hex_parts(&txid_hex, 2, 100_000, SCRIPT_HEX).unwrap();
        let proof = PsbtBuilder::new(Network::Bitcoin)
            .deposit_proof(SEGWIT_ADDRESS, RECEIVER_ADDRESS, 50_000, &[utxo])
            .unwrap();

        // version (4 bytes) and input count (1 byte) precede the prevout.
        let serialized = consensus::serialize(&proof.to_spend);
        let internal: Vec<u8> = (1u8..=32).rev().collect();
        assert_eq!(serialized[5..37], internal[..]);
        assert_eq!(serialized[37..41], [2, 0, 0, 0]);

        assert_eq!(
            proof.to_spend_txid().to_string(),
            "745cf4d151c0446b95d79afd67549a8bd0dec1feef0c65cd2c1ff11820419954"
        );
        assert_eq!(
            proof.psbt.unsigned_tx.compute_txid().to_string(),
            "37a535641a218a39799fd3e8aac2556fa9fbb508a2f28cb5c16e3365ebc205fe"
        );
        assert_eq!(
            proof.to_base64(),
            "cHNidP8BAD4CAAAAAVSZQSAY8R8szWUM7/7B3tCLmlRn/ZrXlWtEwFHR9Fx0AgAAAAAAAAAAAQEAAAAAAAAAAnapAAAAAAABAR8BAAAAAAAAABYAFCsF1WTmp6M8CH8W4Pcw0UQBI3mdAAA="
        );
    }

    struct StaticSource(Vec<Utxo>);

    impl UtxoSource for StaticSource {
        async fn funding_utxos(&self, _address: &str, amount: Option<Amount>) -> Result<Vec<Utxo>> {
            select_funding_utxos(self.0.clone(), amount)
        }
    }

    #[tokio::test]
    async fn test_deposit_proof_from_source_uses_largest_utxo() {
        let small = Utxo::from_hex_parts(&"01".repeat(32), 0, 1_000, SCRIPT_HEX).unwrap();
        let large = Utxo::from_hex_parts(&"02".repeat(32), 2, 90_000, SCRIPT_HEX).unwrap();
        let source = StaticSource(vec![small, large.clone()]);

        let proof = PsbtBuilder::new(Network::Bitcoin)
            .deposit_proof_from_source(&source, SEGWIT_ADDRESS, RECEIVER_ADDRESS, 50_000)
            .await
            .unwrap();
        assert_eq!(proof.to_spend.input[0].previous_output, large.outpoint());

        let result = PsbtBuilder::new(Network::Bitcoin)
            .deposit_proof_from_source(&source, SEGWIT_ADDRESS, RECEIVER_ADDRESS, 100_000)
            .await;
        assert!(matches!(result, Err(Error::InsufficientFunds { .. })));
    }
}
