//! Assembles and signs transactions.
//!
//! The builder moves through draft, validated, signed and serialized
//! stages: configuration calls shape the draft, `get_unsigned_tx` runs the
//! validation, `sign` computes the signing digest under the configured
//! network magic and attaches one witness per signer. The signed result is
//! cached so repeated calls are idempotent; any mutation after signing
//! drops the witnesses and returns the builder to the draft stage.
//!
//! Fees and the validity window are plain inputs here: simulating the
//! invocation cost and reading the chain height belong to the RPC layer,
//! which hands the resulting numbers in.

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::{
	neo_builder::transaction::{
		signer::Signer, transaction::Transaction, transaction_attribute::TransactionAttribute,
		transaction_error::TransactionError, witness::Witness, witness_scope::WitnessScope,
	},
	neo_config::NeoConstants,
	neo_crypto::KeyPair,
	neo_types::{Bytes, ScriptHash},
};

enum WitnessSource {
	/// Sign automatically with this key pair.
	KeyPair(KeyPair),
	/// Use this caller-supplied witness.
	Manual(Witness),
	/// The caller still owes a witness for this signer.
	Missing,
}

/// Builder for a signed [`Transaction`].
pub struct TransactionBuilder {
	version: u8,
	nonce: Option<u32>,
	valid_until_block: Option<u32>,
	system_fee: i64,
	network_fee: i64,
	network_magic: Option<u32>,
	signers: Vec<Signer>,
	witness_sources: Vec<WitnessSource>,
	attributes: Vec<TransactionAttribute>,
	script: Option<Bytes>,
	signed: Option<Transaction>,
}

impl Default for TransactionBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for TransactionBuilder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TransactionBuilder")
			.field("version", &self.version)
			.field("nonce", &self.nonce)
			.field("valid_until_block", &self.valid_until_block)
			.field("system_fee", &self.system_fee)
			.field("network_fee", &self.network_fee)
			.field("network_magic", &self.network_magic)
			.field("signers", &self.signers)
			.field("attributes", &self.attributes)
			.field("script", &self.script)
			.field("signed", &self.signed.is_some())
			.finish()
	}
}

impl TransactionBuilder {
	/// Creates an empty draft.
	pub fn new() -> Self {
		Self {
			version: NeoConstants::CURRENT_TX_VERSION,
			nonce: None,
			valid_until_block: None,
			system_fee: 0,
			network_fee: 0,
			network_magic: None,
			signers: Vec::new(),
			witness_sources: Vec::new(),
			attributes: Vec::new(),
			script: None,
			signed: None,
		}
	}

	fn invalidate(&mut self) {
		if self.signed.take().is_some() {
			debug!("transaction builder mutated after signing; witnesses dropped");
		}
	}

	/// Sets the transaction version.
	pub fn version(&mut self, version: u8) -> &mut Self {
		self.invalidate();
		self.version = version;
		self
	}

	/// Pins the nonce. Unset nonces are drawn at random when the
	/// transaction is assembled.
	pub fn nonce(&mut self, nonce: u32) -> &mut Self {
		self.invalidate();
		self.nonce = Some(nonce);
		self
	}

	/// Sets the last block height the transaction is valid at.
	pub fn valid_until_block(&mut self, block: u32) -> Result<&mut Self, TransactionError> {
		if block == 0 {
			return Err(TransactionError::InvalidBlock);
		}
		self.invalidate();
		self.valid_until_block = Some(block);
		Ok(self)
	}

	/// Sets the system fee, the simulated execution cost in GAS fractions.
	pub fn system_fee(&mut self, fee: i64) -> Result<&mut Self, TransactionError> {
		if fee < 0 {
			return Err(TransactionError::NegativeFee);
		}
		self.invalidate();
		self.system_fee = fee;
		Ok(self)
	}

	/// Sets the network fee covering size and witness verification.
	pub fn network_fee(&mut self, fee: i64) -> Result<&mut Self, TransactionError> {
		if fee < 0 {
			return Err(TransactionError::NegativeFee);
		}
		self.invalidate();
		self.network_fee = fee;
		Ok(self)
	}

	/// Sets the magic number of the network the transaction is signed for.
	pub fn network_magic(&mut self, magic: u32) -> &mut Self {
		self.invalidate();
		self.network_magic = Some(magic);
		self
	}

	/// Sets the invocation script.
	pub fn set_script(&mut self, script: Bytes) -> &mut Self {
		self.invalidate();
		self.script = Some(script);
		self
	}

	/// Appends to the invocation script.
	pub fn extend_script(&mut self, script: Bytes) -> &mut Self {
		self.invalidate();
		match &mut self.script {
			Some(existing) => existing.extend(script),
			None => self.script = Some(script),
		}
		self
	}

	/// Adds a signer whose witness will be produced from `key_pair`. The
	/// key pair must control the signer's account.
	pub fn add_signer_with_key(
		&mut self,
		signer: Signer,
		key_pair: KeyPair,
	) -> Result<&mut Self, TransactionError> {
		if &key_pair.get_script_hash() != signer.signer_hash() {
			return Err(TransactionError::WitnessMismatch(format!(
				"key pair controls {} but the signer is {}",
				key_pair.get_script_hash(),
				signer.signer_hash()
			)));
		}
		self.push_signer(signer, WitnessSource::KeyPair(key_pair))
	}

	/// Adds a signer whose witness the caller will supply through
	/// [`add_witness`](Self::add_witness).
	pub fn add_signer(&mut self, signer: Signer) -> Result<&mut Self, TransactionError> {
		self.push_signer(signer, WitnessSource::Missing)
	}

	fn push_signer(
		&mut self,
		signer: Signer,
		source: WitnessSource,
	) -> Result<&mut Self, TransactionError> {
		if self.signers.iter().any(|s| s.signer_hash() == signer.signer_hash()) {
			return Err(TransactionError::DuplicateSigner);
		}
		if self.signers.len() + 1 > NeoConstants::MAX_SIGNER_SUBITEMS as usize {
			return Err(TransactionError::TooManySigners(self.signers.len() + 1));
		}
		self.check_attribute_limit(self.signers.len() + 1, self.attributes.len())?;
		self.invalidate();
		self.signers.push(signer);
		self.witness_sources.push(source);
		Ok(self)
	}

	/// Supplies the witness for the signer with the matching script hash.
	pub fn add_witness(&mut self, witness: Witness) -> Result<&mut Self, TransactionError> {
		let hash = witness.script_hash();
		let index = self
			.signers
			.iter()
			.position(|signer| signer.signer_hash() == &hash)
			.ok_or_else(|| {
				TransactionError::WitnessMismatch(format!(
					"no signer with script hash {hash} for the supplied witness"
				))
			})?;
		self.invalidate();
		self.witness_sources[index] = WitnessSource::Manual(witness);
		Ok(self)
	}

	/// Adds a transaction attribute.
	pub fn add_attribute(
		&mut self,
		attribute: TransactionAttribute,
	) -> Result<&mut Self, TransactionError> {
		self.check_attribute_limit(self.signers.len(), self.attributes.len() + 1)?;
		if matches!(attribute, TransactionAttribute::HighPriority)
			&& self.attributes.iter().any(|a| matches!(a, TransactionAttribute::HighPriority))
		{
			return Err(TransactionError::TransactionConfiguration(
				"a transaction carries at most one high-priority attribute".to_string(),
			));
		}
		self.invalidate();
		self.attributes.push(attribute);
		Ok(self)
	}

	fn check_attribute_limit(
		&self,
		signers: usize,
		attributes: usize,
	) -> Result<(), TransactionError> {
		if signers + attributes > NeoConstants::MAX_TRANSACTION_ATTRIBUTES as usize {
			return Err(TransactionError::TransactionConfiguration(format!(
				"a transaction cannot have more than {} attributes including signers",
				NeoConstants::MAX_TRANSACTION_ATTRIBUTES
			)));
		}
		Ok(())
	}

	/// Whether the draft carries the high-priority attribute. Whether a
	/// signer is actually a committee member is only decided by the node.
	pub fn is_high_priority(&self) -> bool {
		self.attributes.iter().any(|a| matches!(a, TransactionAttribute::HighPriority))
	}

	fn validate(&self) -> Result<(), TransactionError> {
		let script = self.script.as_ref().ok_or(TransactionError::NoScript)?;
		if script.is_empty() {
			return Err(TransactionError::EmptyScript);
		}
		if self.signers.is_empty() {
			return Err(TransactionError::NoSigners);
		}

		let unique: HashSet<&ScriptHash> =
			self.signers.iter().map(Signer::signer_hash).collect();
		if unique.len() != self.signers.len() {
			return Err(TransactionError::DuplicateSigner);
		}

		// A globally-scoped signer is incompatible with per-signer
		// restrictions elsewhere in the same transaction.
		let has_global = self.signers.iter().any(|s| s.has_scope(WitnessScope::Global));
		if has_global && self.signers.len() > 1 {
			let restricted = self.signers.iter().any(|s| {
				!s.allowed_contracts().is_empty()
					|| !s.allowed_groups().is_empty()
					|| !s.rules().is_empty()
			});
			if restricted {
				return Err(TransactionError::TransactionConfiguration(
					"a transaction with a globally-scoped signer cannot carry scope restrictions"
						.to_string(),
				));
			}
		}

		if self.valid_until_block.is_none() {
			return Err(TransactionError::InvalidBlock);
		}
		Ok(())
	}

	/// Validates the draft and assembles the unsigned transaction.
	pub fn get_unsigned_tx(&mut self) -> Result<Transaction, TransactionError> {
		self.validate()?;
		let nonce = *self.nonce.get_or_insert_with(|| rand::thread_rng().gen());
		Ok(Transaction {
			version: self.version,
			nonce,
			sys_fee: self.system_fee,
			net_fee: self.network_fee,
			valid_until_block: self.valid_until_block.expect("validated above"),
			signers: self.signers.clone(),
			attributes: self.attributes.clone(),
			script: self.script.clone().expect("validated above"),
			witnesses: Vec::new(),
		})
	}

	/// Signs the transaction for the configured network, producing one
	/// witness per signer. Idempotent until the builder is mutated again.
	pub fn sign(&mut self) -> Result<Transaction, TransactionError> {
		if let Some(signed) = &self.signed {
			return Ok(signed.clone());
		}

		let magic = self.network_magic.ok_or(TransactionError::NoNetworkMagic)?;
		let mut tx = self.get_unsigned_tx()?;
		let digest = tx.get_hash_data(magic);

		for (signer, source) in self.signers.iter().zip(&self.witness_sources) {
			let witness = match source {
				WitnessSource::KeyPair(key_pair) => Witness::create(&digest, key_pair)?,
				WitnessSource::Manual(witness) => witness.clone(),
				WitnessSource::Missing =>
					return Err(TransactionError::WitnessMismatch(format!(
						"signer {} has neither a key pair nor a supplied witness",
						signer.signer_hash()
					))),
			};
			tx.add_witness(witness);
		}

		tx.validate_witnesses()?;
		self.signed = Some(tx.clone());
		Ok(tx)
	}
}
