//! The Neo N3 transaction.
//!
//! Serialization is consensus-critical: the unsigned layout is hashed to
//! produce the transaction id, and the signing digest prepends the 4-byte
//! network magic to a SHA-256 of those same bytes. Two transactions built
//! from identical fields must serialize byte-identically.

use getset::{CopyGetters, Getters, MutGetters, Setters};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
	neo_builder::transaction::{
		signer::Signer, transaction_attribute::TransactionAttribute,
		transaction_error::TransactionError, witness::Witness,
	},
	neo_codec::{Decoder, Encoder, NeoSerializable, VarSizeTrait},
	neo_config::NeoConstants,
	neo_crypto::{hash256, sha256},
	neo_types::{Bytes, TxHash, TxHashExtension},
};

/// A transaction, signed or not depending on its witnesses.
#[derive(
	Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters, MutGetters, CopyGetters,
)]
pub struct Transaction {
	/// Transaction format version, currently 0.
	#[getset(get_copy = "pub")]
	pub version: u8,

	/// Random value making otherwise-identical transactions distinct.
	#[getset(get_copy = "pub")]
	pub nonce: u32,

	/// GAS consumed by executing the script, in fractions.
	#[getset(get_copy = "pub")]
	pub sys_fee: i64,

	/// GAS paid for size and witness verification, in fractions.
	#[getset(get_copy = "pub")]
	pub net_fee: i64,

	/// Last block height at which the transaction is valid.
	#[getset(get_copy = "pub")]
	pub valid_until_block: u32,

	/// The authorizing signers, first one pays the fees.
	#[getset(get = "pub")]
	pub signers: Vec<Signer>,

	/// Additional attributes.
	#[getset(get = "pub")]
	pub attributes: Vec<TransactionAttribute>,

	/// The invocation script executed by the VM.
	#[getset(get = "pub")]
	pub script: Bytes,

	/// One witness per signer, in signer order.
	#[getset(get = "pub", get_mut = "pub")]
	pub witnesses: Vec<Witness>,
}

impl Transaction {
	/// Fixed-width header bytes: version, nonce, fees, validity.
	pub const HEADER_SIZE: usize = 25;

	/// Serializes everything except the witnesses, the form that gets
	/// hashed.
	pub fn serialize_without_witnesses(&self, writer: &mut Encoder) {
		writer.write_u8(self.version);
		writer.write_u32(self.nonce);
		writer.write_i64(self.sys_fee);
		writer.write_i64(self.net_fee);
		writer.write_u32(self.valid_until_block);
		writer.write_serializable_variable_list(&self.signers);
		writer.write_serializable_variable_list(&self.attributes);
		writer.write_var_bytes(&self.script);
	}

	fn unsigned_bytes(&self) -> Bytes {
		let mut writer = Encoder::new();
		self.serialize_without_witnesses(&mut writer);
		writer.to_bytes()
	}

	/// The digest each signer signs:
	/// `sha256(network_magic_le || sha256(unsigned_tx))`.
	pub fn get_hash_data(&self, network_magic: u32) -> [u8; 32] {
		let inner = sha256(&self.unsigned_bytes());
		let mut data = Vec::with_capacity(36);
		data.extend_from_slice(&network_magic.to_le_bytes());
		data.extend_from_slice(&inner);
		let digest = sha256(&data);
		debug!(magic = network_magic, "computed transaction signing digest");
		digest
	}

	/// The transaction id: a double SHA-256 over the unsigned bytes,
	/// displayed big-endian.
	pub fn get_tx_id(&self) -> TxHash {
		let hash = hash256(&self.unsigned_bytes());
		TxHash::from_le_bytes(&hash).expect("hash256 yields 32 bytes")
	}

	/// Appends a witness.
	pub fn add_witness(&mut self, witness: Witness) {
		self.witnesses.push(witness);
	}

	/// Checks the invariants of a finalized transaction: witness count
	/// matches signer count and every witness answers for its signer.
	pub fn validate_witnesses(&self) -> Result<(), TransactionError> {
		if self.witnesses.len() != self.signers.len() {
			return Err(TransactionError::WitnessMismatch(format!(
				"{} witnesses for {} signers",
				self.witnesses.len(),
				self.signers.len()
			)));
		}
		for (signer, witness) in self.signers.iter().zip(&self.witnesses) {
			// Caller-supplied witnesses may omit the verification script
			// when the account is deployed as a contract.
			if witness.verification.is_empty() {
				continue;
			}
			if &witness.script_hash() != signer.signer_hash() {
				return Err(TransactionError::WitnessMismatch(format!(
					"witness script hash {} does not match signer {}",
					witness.script_hash(),
					signer.signer_hash()
				)));
			}
		}
		Ok(())
	}
}

impl NeoSerializable for Transaction {
	type Error = TransactionError;

	fn size(&self) -> usize {
		Self::HEADER_SIZE
			+ self.signers.var_size()
			+ self.attributes.var_size()
			+ self.script.var_size()
			+ self.witnesses.var_size()
	}

	fn encode(&self, writer: &mut Encoder) {
		self.serialize_without_witnesses(writer);
		writer.write_serializable_variable_list(&self.witnesses);
	}

	fn decode(reader: &mut Decoder<'_>) -> Result<Self, Self::Error> {
		let version = reader.read_u8()?;
		if version != NeoConstants::CURRENT_TX_VERSION {
			return Err(TransactionError::TransactionConfiguration(format!(
				"unsupported transaction version {version}"
			)));
		}
		let nonce = reader.read_u32()?;
		let sys_fee = reader.read_i64()?;
		let net_fee = reader.read_i64()?;
		if sys_fee < 0 || net_fee < 0 {
			return Err(TransactionError::NegativeFee);
		}
		let valid_until_block = reader.read_u32()?;

		let signers = reader.read_serializable_list::<Signer>()?;
		if signers.is_empty() {
			return Err(TransactionError::NoSigners);
		}
		let attributes = reader.read_serializable_list::<TransactionAttribute>()?;
		let script = reader.read_var_bytes()?;
		if script.is_empty() {
			return Err(TransactionError::EmptyScript);
		}

		let mut witnesses = Vec::new();
		if reader.available() > 0 {
			witnesses = reader.read_serializable_list::<Witness>()?;
		}

		Ok(Self {
			version,
			nonce,
			sys_fee,
			net_fee,
			valid_until_block,
			signers,
			attributes,
			script,
			witnesses,
		})
	}
}
